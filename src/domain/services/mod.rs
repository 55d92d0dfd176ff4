mod address_classifier;

pub use address_classifier::AddressClassifier;
