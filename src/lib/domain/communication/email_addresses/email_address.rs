//! Email Address

use std::fmt;

const DELIMITER: char = '@';

/// An address with an optional display name
///
/// No syntax validation happens here, the transport is the authority on
/// whether an address is deliverable.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct EmailAddress {
    address: String,
    name: Option<String>,
}

impl EmailAddress {
    /// Create a new email address
    pub fn new(address: impl Into<String>, name: Option<&str>) -> Self {
        Self {
            address: address.into(),
            name: name.map(str::to_string),
        }
    }

    /// The bare address
    pub fn address(&self) -> &str {
        &self.address
    }

    /// The display name, if any
    pub fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }
}

impl fmt::Display for EmailAddress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.name {
            Some(name) => write!(f, "{} <{}>", name, self.address),
            None => write!(f, "{}", self.address),
        }
    }
}

impl From<EmailAddress> for String {
    fn from(email: EmailAddress) -> Self {
        email.to_string()
    }
}

/// Lower-cases `raw` and, when it has no domain part, treats it as a local
/// part on `host`.
pub fn qualify_address(raw: &str, host: &str) -> String {
    let lowered = raw.to_lowercase();

    if lowered.contains(DELIMITER) {
        lowered
    } else {
        format!("{lowered}{DELIMITER}{host}")
    }
}
