//! Address Classifier Service
//!
//! Pure domain logic for deciding whether an address is globally routable.
//! This service has NO external dependencies - it's pure Rust.

use crate::domain::value_objects::Classification;
use std::net::{IpAddr, Ipv4Addr};

/// Classifier for client addresses.
///
/// The reserved ranges are a fixed, disjoint list; the first match wins:
/// - 10.0.0.0/8
/// - 172.16.0.0/12 (second octet 16-31, not a plain prefix)
/// - 192.168.0.0/16
/// - 169.254.0.0/16 (link-local)
/// - 127.0.0.0/8 and ::1 (loopback)
///
/// Anything that parses but matches none of these is `Public`. Anything
/// that does not parse is `Invalid`, which callers treat as "not public".
pub struct AddressClassifier;

impl AddressClassifier {
    /// Classify a raw address string.
    ///
    /// No failure mode: malformed input yields `Classification::Invalid`.
    /// Deterministic and side-effect-free, safe for any number of
    /// concurrent callers without synchronization.
    pub fn classify(address: &str) -> Classification {
        match address.trim().parse::<IpAddr>() {
            Ok(ip) => Self::classify_ip(ip),
            Err(_) => Classification::Invalid,
        }
    }

    /// Classify an already-parsed address. Never yields `Invalid`.
    pub fn classify_ip(ip: IpAddr) -> Classification {
        match ip {
            IpAddr::V4(v4) if Self::is_reserved_v4(v4) => Classification::Private,
            IpAddr::V6(v6) if v6.is_loopback() => Classification::Private,
            _ => Classification::Public,
        }
    }

    fn is_reserved_v4(ip: Ipv4Addr) -> bool {
        let octets = ip.octets();

        octets[0] == 10
            || (octets[0] == 172 && (16..=31).contains(&octets[1]))
            || (octets[0] == 192 && octets[1] == 168)
            || (octets[0] == 169 && octets[1] == 254)
            || octets[0] == 127
    }
}
