//! Adapters Layer
//!
//! Inbound adapters expose the pipeline over HTTP; outbound adapters
//! implement the domain ports against external providers and stores.

pub mod inbound;
pub mod outbound;
