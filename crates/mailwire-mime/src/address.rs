//! Email address normalization.
//!
//! Callers hand addresses over in several shapes: a bare email string, an
//! ordered mapping of email to display name (where purely numeric keys mark
//! positional, unnamed entries), or an already-built [`Address`]. All of them
//! are normalized into canonical [`Address`] records before anything is
//! stored.

use crate::error::{Error, Result};
use serde::ser::SerializeStruct;
use serde::{Serialize, Serializer};
use std::fmt;

/// A canonical email address with an optional display name.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Address {
    email: String,
    name: Option<String>,
}

impl Address {
    /// Creates an address without a display name.
    ///
    /// # Errors
    ///
    /// Returns an error if the email is empty.
    pub fn new(email: impl Into<String>) -> Result<Self> {
        let email = email.into();
        Self::validate(&email)?;
        Ok(Self { email, name: None })
    }

    /// Creates an address with a display name.
    ///
    /// An empty name is treated as no name at all.
    ///
    /// # Errors
    ///
    /// Returns an error if the email is empty.
    pub fn with_name(email: impl Into<String>, name: impl Into<String>) -> Result<Self> {
        let mut address = Self::new(email)?;
        let name = name.into();
        if !name.is_empty() {
            address.name = Some(name);
        }
        Ok(address)
    }

    /// Returns the email part.
    #[must_use]
    pub fn email(&self) -> &str {
        &self.email
    }

    /// Returns the display name, if any.
    #[must_use]
    pub fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }

    /// Replaces the display name. An empty name clears it.
    pub fn set_name(&mut self, name: Option<String>) {
        self.name = name.filter(|n| !n.is_empty());
    }

    fn validate(email: &str) -> Result<()> {
        if email.trim().is_empty() {
            return Err(Error::InvalidAddress("Address cannot be empty".into()));
        }
        Ok(())
    }
}

/// Renders `"Name" <email>` for named addresses and the bare email otherwise.
impl fmt::Display for Address {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.name {
            Some(name) => {
                let escaped = name.replace('\\', "\\\\").replace('"', "\\\"");
                write!(f, "\"{escaped}\" <{}>", self.email)
            }
            None => f.write_str(&self.email),
        }
    }
}

/// Unnamed addresses go out as a bare string, named ones as `{name, email}`.
impl Serialize for Address {
    fn serialize<S>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        match &self.name {
            None => serializer.serialize_str(&self.email),
            Some(name) => {
                let mut state = serializer.serialize_struct("Address", 2)?;
                state.serialize_field("name", name)?;
                state.serialize_field("email", &self.email)?;
                state.end()
            }
        }
    }
}

/// Address input as accepted by the recipient setters.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AddressInput {
    /// A single email without a display name.
    Bare(String),
    /// Ordered `(key, value)` pairs.
    ///
    /// A key made only of ASCII digits is positional and its value is a bare
    /// email. Any other key is the email and its value the display name.
    Mapping(Vec<(String, String)>),
    /// An already normalized address.
    Single(Address),
}

impl AddressInput {
    /// Normalizes the input into canonical addresses, preserving order.
    ///
    /// # Errors
    ///
    /// Returns an error if any entry has an empty email.
    pub fn into_addresses(self) -> Result<Vec<Address>> {
        match self {
            Self::Bare(email) => Ok(vec![Address::new(email)?]),
            Self::Single(address) => Ok(vec![address]),
            Self::Mapping(pairs) => pairs
                .into_iter()
                .map(|(key, value)| {
                    if is_positional(&key) {
                        Address::new(value)
                    } else {
                        Address::with_name(key, value)
                    }
                })
                .collect(),
        }
    }
}

fn is_positional(key: &str) -> bool {
    !key.is_empty() && key.bytes().all(|b| b.is_ascii_digit())
}

impl From<&str> for AddressInput {
    fn from(email: &str) -> Self {
        Self::Bare(email.to_string())
    }
}

impl From<String> for AddressInput {
    fn from(email: String) -> Self {
        Self::Bare(email)
    }
}

impl From<Address> for AddressInput {
    fn from(address: Address) -> Self {
        Self::Single(address)
    }
}

impl<K, V> From<Vec<(K, V)>> for AddressInput
where
    K: Into<String>,
    V: Into<String>,
{
    fn from(pairs: Vec<(K, V)>) -> Self {
        Self::Mapping(
            pairs
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        )
    }
}

impl<K, V, const N: usize> From<[(K, V); N]> for AddressInput
where
    K: Into<String>,
    V: Into<String>,
{
    fn from(pairs: [(K, V); N]) -> Self {
        Self::from(Vec::from(pairs))
    }
}

/// Lets the output of a recipient view be fed back into a setter.
impl From<Vec<Address>> for AddressInput {
    fn from(addresses: Vec<Address>) -> Self {
        Self::Mapping(
            addresses
                .into_iter()
                .enumerate()
                .map(|(i, a)| match a.name {
                    Some(name) => (a.email, name),
                    None => (i.to_string(), a.email),
                })
                .collect(),
        )
    }
}

/// Renders addresses as a comma separated header value.
///
/// The output is deterministic for a given input, so it can be compared
/// against later renderings.
#[must_use]
pub fn render_address_list(addresses: &[Address]) -> String {
    addresses
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join(",")
}
