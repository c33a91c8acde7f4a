//! Recipient store and derived To/Cc/Bcc views.
//!
//! The transmission API only knows a flat recipient list. Copy recipients
//! are the entries carrying a `header_to` routing value; whether a copy entry
//! is Cc or Bcc is only recorded by the synthesized `Cc` header, which lists
//! the Cc addresses. The views below recover To/Cc/Bcc from those two pieces.

mod resolve;
mod states;

use std::marker::PhantomData;

use mailwire_mime::{Address, AddressInput, render_address_list};
use serde::Serialize;

pub use self::resolve::{MAIN_RECIPIENT_PLACEHOLDER, MAIN_RECIPIENT_TOKEN};
pub use self::states::{Building, Resolved};
use crate::{Error, Result};

/// A single entry of the flat recipient list.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RecipientEntry {
    address: Address,
    #[serde(skip_serializing_if = "Option::is_none")]
    header_to: Option<String>,
}

impl RecipientEntry {
    pub(crate) const fn primary(address: Address) -> Self {
        Self {
            address,
            header_to: None,
        }
    }

    pub(crate) fn copy(address: Address) -> Self {
        Self {
            address,
            header_to: Some(MAIN_RECIPIENT_PLACEHOLDER.to_string()),
        }
    }

    /// Returns the recipient address.
    #[must_use]
    pub const fn address(&self) -> &Address {
        &self.address
    }

    /// Returns the routing header value of a copy entry.
    #[must_use]
    pub fn header_to(&self) -> Option<&str> {
        self.header_to.as_deref()
    }

    /// Returns true for Cc and Bcc entries.
    #[must_use]
    pub const fn is_copy(&self) -> bool {
        self.header_to.is_some()
    }
}

/// Recipients as sent on the wire.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum Recipients {
    /// Reference to a recipient list stored with the provider.
    StoredList {
        /// Stored list identifier.
        list_id: String,
    },
    /// Explicit recipients in insertion order.
    Entries(Vec<RecipientEntry>),
}

/// The recipient list of a message together with its `Cc` header.
///
/// The type parameter tracks whether copy entries have been resolved.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecipientStore<S = Building> {
    recipients: Recipients,
    cc_header: Option<String>,
    _state: PhantomData<S>,
}

impl Default for RecipientStore<Building> {
    fn default() -> Self {
        Self::new()
    }
}

/// Views shared by all states.
impl<S> RecipientStore<S> {
    /// Returns the wire representation.
    #[must_use]
    pub const fn recipients(&self) -> &Recipients {
        &self.recipients
    }

    /// Returns the explicit entries; empty in stored-list mode.
    #[must_use]
    pub fn entries(&self) -> &[RecipientEntry] {
        match &self.recipients {
            Recipients::Entries(entries) => entries,
            Recipients::StoredList { .. } => &[],
        }
    }

    /// Returns the stored list id, if the store references one.
    #[must_use]
    pub fn stored_list_id(&self) -> Option<&str> {
        match &self.recipients {
            Recipients::StoredList { list_id } => Some(list_id),
            Recipients::Entries(_) => None,
        }
    }

    /// Returns the synthesized `Cc` header value.
    #[must_use]
    pub fn cc_header(&self) -> Option<&str> {
        self.cc_header.as_deref()
    }

    /// Returns the address copy entries are routed to.
    #[must_use]
    pub fn main_recipient(&self) -> Option<&str> {
        resolve::main_recipient(self.entries())
    }

    /// Returns the To recipients.
    ///
    /// In stored-list mode this is a single entry carrying the list id.
    /// Named entries are keyed by email: a later named entry for the same
    /// email replaces the earlier name in place. Unnamed entries always
    /// append.
    #[must_use]
    pub fn to(&self) -> Vec<Address> {
        if let Some(list_id) = self.stored_list_id() {
            return Address::new(list_id).map(|a| vec![a]).unwrap_or_default();
        }

        let mut to: Vec<Address> = Vec::new();
        for entry in self.entries().iter().filter(|e| !e.is_copy()) {
            let address = entry.address();
            if let Some(name) = address.name() {
                let existing = to
                    .iter_mut()
                    .find(|a| a.name().is_some() && a.email() == address.email());
                if let Some(slot) = existing {
                    slot.set_name(Some(name.to_string()));
                    continue;
                }
            }
            to.push(address.clone());
        }
        to
    }

    /// Returns the Cc emails, deduplicated, in first-seen order.
    ///
    /// Display names are not recovered.
    #[must_use]
    pub fn cc(&self) -> Vec<String> {
        self.copies(true)
    }

    /// Returns the Bcc emails joined with `,`.
    #[must_use]
    pub fn bcc(&self) -> String {
        self.copies(false).join(",")
    }

    fn copies(&self, carbon: bool) -> Vec<String> {
        let mut emails: Vec<String> = Vec::new();
        for entry in self.entries().iter().filter(|e| e.is_copy()) {
            if self.is_listed_in_cc(entry) != carbon {
                continue;
            }
            let email = entry.address().email();
            if !emails.iter().any(|e| e == email) {
                emails.push(email.to_string());
            }
        }
        emails
    }

    /// A copy entry is Cc when its address occurs in the `Cc` header.
    ///
    /// The check is a plain substring search, so it gives the same answer
    /// before and after resolution.
    fn is_listed_in_cc(&self, entry: &RecipientEntry) -> bool {
        self.cc_header
            .as_deref()
            .is_some_and(|header| !header.is_empty() && header.contains(entry.address().email()))
    }

    fn with_state<T>(self) -> RecipientStore<T> {
        RecipientStore {
            recipients: self.recipients,
            cc_header: self.cc_header,
            _state: PhantomData,
        }
    }
}

impl RecipientStore<Building> {
    /// Creates an empty store.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            recipients: Recipients::Entries(Vec::new()),
            cc_header: None,
            _state: PhantomData,
        }
    }

    /// Appends To recipients.
    ///
    /// # Errors
    ///
    /// Returns an error if an address is invalid or the store references a
    /// stored list.
    pub fn add_to(&mut self, input: impl Into<AddressInput>) -> Result<()> {
        let addresses = input.into().into_addresses()?;
        self.entries_mut()?
            .extend(addresses.into_iter().map(RecipientEntry::primary));
        Ok(())
    }

    /// Appends Cc recipients and sets the `Cc` header to their rendering.
    ///
    /// The header is replaced, not extended. An empty input changes nothing.
    ///
    /// # Errors
    ///
    /// Returns an error if an address is invalid or the store references a
    /// stored list.
    pub fn add_cc(&mut self, input: impl Into<AddressInput>) -> Result<()> {
        let addresses = input.into().into_addresses()?;
        if addresses.is_empty() {
            return Ok(());
        }
        let header = render_address_list(&addresses);
        self.entries_mut()?
            .extend(addresses.into_iter().map(RecipientEntry::copy));
        self.cc_header = Some(header);
        Ok(())
    }

    /// Appends Bcc recipients. The `Cc` header is left untouched.
    ///
    /// # Errors
    ///
    /// Returns an error if an address is invalid or the store references a
    /// stored list.
    pub fn add_bcc(&mut self, input: impl Into<AddressInput>) -> Result<()> {
        let addresses = input.into().into_addresses()?;
        self.entries_mut()?
            .extend(addresses.into_iter().map(RecipientEntry::copy));
        Ok(())
    }

    /// Switches to stored-list mode, discarding explicit recipients and the
    /// `Cc` header.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidArgument`] if `list_id` is blank; the store is
    /// left unchanged.
    pub fn set_stored_list(&mut self, list_id: impl Into<String>) -> Result<()> {
        let list_id = list_id.into();
        if list_id.trim().is_empty() {
            return Err(Error::InvalidArgument("stored list id is empty".into()));
        }
        let discarded = self.entries().len();
        tracing::debug!(%list_id, discarded, "Using stored recipient list");
        self.recipients = Recipients::StoredList { list_id };
        self.cc_header = None;
        Ok(())
    }

    /// Resolves copy entries against the main recipient.
    #[must_use]
    pub fn resolve(mut self) -> RecipientStore<Resolved> {
        if let Recipients::Entries(entries) = &mut self.recipients {
            resolve::resolve_copy_recipients(entries);
        }
        self.with_state()
    }

    fn entries_mut(&mut self) -> Result<&mut Vec<RecipientEntry>> {
        match &mut self.recipients {
            Recipients::Entries(entries) => Ok(entries),
            Recipients::StoredList { list_id } => Err(Error::UnsupportedOperation(format!(
                "explicit recipients cannot be combined with stored list {list_id}"
            ))),
        }
    }
}

impl RecipientStore<Resolved> {
    /// Runs resolution again. Already resolved entries are unchanged.
    #[must_use]
    pub fn resolve(mut self) -> Self {
        if let Recipients::Entries(entries) = &mut self.recipients {
            resolve::resolve_copy_recipients(entries);
        }
        self
    }
}
