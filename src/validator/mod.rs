//! Validators: predicates over already-sanitized values.

use std::net::{IpAddr, Ipv4Addr, Ipv6Addr};
use std::sync::Arc;

use url::{Host, Url};

mod tld;

pub use tld::TldList;

/// A yes/no check on a sanitized string.
pub trait Validator {
    /// Returns true if the value is acceptable.
    fn is_valid(&self, value: &str) -> bool;
}

/// Checks that a sanitized string is a registrable-looking domain name.
///
/// All of the following must hold:
/// - no whitespace
/// - at least two dot-separated labels and at least five characters
/// - the last label is a known top-level domain
/// - the name converts to ASCII (IDNA)
/// - `https://<ascii name>` parses as a URL
///
/// # Examples
///
/// ```
/// use form_core::{DomainValidator, Validator};
///
/// let validator = DomainValidator::new();
/// assert!(validator.is_valid("ex.com"));
/// assert!(validator.is_valid("bücher.de"));
/// assert!(!validator.is_valid("a.b"));
/// assert!(!validator.is_valid("example.notatld"));
/// ```
#[derive(Debug, Clone)]
pub struct DomainValidator {
    tlds: Arc<TldList>,
}

impl DomainValidator {
    /// Creates a validator using the built-in TLD list.
    pub fn new() -> Self {
        Self {
            tlds: TldList::shared_default(),
        }
    }

    /// Creates a validator using a caller-maintained TLD list.
    pub fn with_tlds(tlds: Arc<TldList>) -> Self {
        Self { tlds }
    }
}

impl Default for DomainValidator {
    fn default() -> Self {
        Self::new()
    }
}

impl Validator for DomainValidator {
    fn is_valid(&self, value: &str) -> bool {
        if value.chars().any(char::is_whitespace) {
            return false;
        }

        let mut labels: Vec<&str> = value.split('.').collect();
        if labels.len() < 2 || value.chars().count() < 5 {
            return false;
        }

        match labels.pop() {
            Some(tld) if self.tlds.contains(tld) => {}
            _ => return false,
        }

        let ascii = match Host::parse(value) {
            Ok(Host::Domain(ascii)) => ascii,
            _ => return false,
        };

        Url::parse(&format!("https://{ascii}")).is_ok()
    }
}

/// Which address families an [`IpValidator`] accepts.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum IpMode {
    /// IPv4 or IPv6
    #[default]
    Any,
    /// IPv4 only
    V4,
    /// IPv6 only
    V6,
}

/// Checks that a string is an IP address literal.
///
/// # Examples
///
/// ```
/// use form_core::{IpMode, IpValidator, Validator};
///
/// assert!(IpValidator::new(IpMode::Any).is_valid("::1"));
/// assert!(IpValidator::new(IpMode::V4).is_valid("192.168.0.1"));
/// assert!(!IpValidator::new(IpMode::V4).is_valid("::1"));
/// ```
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct IpValidator {
    mode: IpMode,
}

impl IpValidator {
    /// Creates a validator for the given address family.
    pub fn new(mode: IpMode) -> Self {
        Self { mode }
    }

    /// Returns the configured mode.
    pub fn mode(&self) -> IpMode {
        self.mode
    }
}

impl Validator for IpValidator {
    fn is_valid(&self, value: &str) -> bool {
        match self.mode {
            IpMode::Any => value.parse::<IpAddr>().is_ok(),
            IpMode::V4 => value.parse::<Ipv4Addr>().is_ok(),
            IpMode::V6 => value.parse::<Ipv6Addr>().is_ok(),
        }
    }
}
