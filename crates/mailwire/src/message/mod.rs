//! Message aggregate.
//!
//! A [`Message`] owns its recipient store, content, attachments and delivery
//! settings. It is built in the [`Building`] state and turned into a
//! [`Resolved`] message right before serialization:
//!
//! ```text
//! ┌──────────────┐   resolve()   ┌──────────────┐
//! │   Building   │ ────────────→ │   Resolved   │ ─── to_wire_payload()
//! └──────────────┘               └──────────────┘
//! ```
//!
//! Messages are plain data. They are `Send` but offer no internal
//! synchronization; sharing one between threads needs an external lock.

mod parts;

use std::fmt;
use std::sync::Arc;

use mailwire_mime::{AddressInput, MagicSniffer, MimeSniffer, render_address_list};
use serde_json::{Map, Value};

pub use self::parts::PartOptions;
use crate::config::TransmissionConfig;
use crate::headers::Headers;
use crate::payload::{Attachment, Content, Options, Transmission};
use crate::recipients::{Building, RecipientStore, Resolved};
use crate::source::{FileSource, FsFileSource};
use crate::{Error, Result};

/// Transmission-level settings outside the content block.
#[derive(Debug, Clone, Default)]
struct Settings {
    options: Options,
    campaign_id: Option<String>,
    description: Option<String>,
    metadata: Option<Map<String, Value>>,
    substitution_data: Option<Value>,
    return_path: Option<String>,
}

/// Injected collaborators.
#[derive(Clone)]
struct Collaborators {
    files: Arc<dyn FileSource>,
    sniffer: Arc<dyn MimeSniffer>,
}

impl Default for Collaborators {
    fn default() -> Self {
        Self {
            files: Arc::new(FsFileSource),
            sniffer: Arc::new(MagicSniffer),
        }
    }
}

/// An email message destined for the transmission API.
///
/// The type parameter tracks whether copy recipients have been resolved.
#[derive(Clone)]
pub struct Message<S = Building> {
    recipients: RecipientStore<S>,
    content: Content,
    settings: Settings,
    io: Collaborators,
}

// Manual Debug implementation since the collaborators are trait objects
impl<S: fmt::Debug> fmt::Debug for Message<S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Message")
            .field("recipients", &self.recipients)
            .field("content", &self.content)
            .field("settings", &self.settings)
            .finish_non_exhaustive()
    }
}

impl Default for Message<Building> {
    fn default() -> Self {
        Self::new()
    }
}

/// Accessors shared by all states.
impl<S> Message<S> {
    /// Returns the recipient store.
    #[must_use]
    pub const fn recipients(&self) -> &RecipientStore<S> {
        &self.recipients
    }

    /// Returns the rendered sender.
    #[must_use]
    pub fn from(&self) -> Option<&str> {
        self.content.from.as_deref()
    }

    /// Returns the rendered reply-to.
    #[must_use]
    pub fn reply_to(&self) -> Option<&str> {
        self.content.reply_to.as_deref()
    }

    /// Returns the To recipients. See [`RecipientStore::to`].
    #[must_use]
    pub fn to(&self) -> Vec<mailwire_mime::Address> {
        self.recipients.to()
    }

    /// Returns the Cc emails. See [`RecipientStore::cc`].
    #[must_use]
    pub fn cc(&self) -> Vec<String> {
        self.recipients.cc()
    }

    /// Returns the Bcc emails joined with `,`.
    #[must_use]
    pub fn bcc(&self) -> String {
        self.recipients.bcc()
    }

    /// Returns the subject.
    #[must_use]
    pub fn subject(&self) -> Option<&str> {
        self.content.subject.as_deref()
    }

    /// Returns the plain text body.
    #[must_use]
    pub fn text_body(&self) -> Option<&str> {
        self.content.text.as_deref()
    }

    /// Returns the HTML body.
    #[must_use]
    pub fn html_body(&self) -> Option<&str> {
        self.content.html.as_deref()
    }

    /// Returns the charset content is sent in. Always UTF-8.
    #[must_use]
    pub const fn charset(&self) -> &'static str {
        "UTF-8"
    }

    /// Returns custom content headers (the synthesized `Cc` is not included).
    #[must_use]
    pub const fn headers(&self) -> &Headers {
        &self.content.headers
    }

    /// Returns attachments in insertion order.
    #[must_use]
    pub fn attachments(&self) -> &[Attachment] {
        &self.content.attachments
    }

    /// Returns inline images in insertion order.
    #[must_use]
    pub fn inline_images(&self) -> &[Attachment] {
        &self.content.inline_images
    }

    /// Returns the delivery options.
    #[must_use]
    pub const fn options(&self) -> &Options {
        &self.settings.options
    }

    /// Returns the campaign id.
    #[must_use]
    pub fn campaign_id(&self) -> Option<&str> {
        self.settings.campaign_id.as_deref()
    }

    /// Returns the return path.
    #[must_use]
    pub fn return_path(&self) -> Option<&str> {
        self.settings.return_path.as_deref()
    }

    fn build_payload(&self) -> Transmission {
        let mut content = self.content.clone();
        if let Some(cc) = self.recipients.cc_header() {
            content.headers.set("Cc", cc);
        }

        Transmission {
            options: self.settings.options.clone(),
            recipients: self.recipients.recipients().clone(),
            content,
            campaign_id: self.settings.campaign_id.clone(),
            description: self.settings.description.clone(),
            metadata: self.settings.metadata.clone(),
            substitution_data: self.settings.substitution_data.clone(),
            return_path: self.settings.return_path.clone(),
        }
    }
}

impl Message<Building> {
    /// Creates an empty message reading files from disk and sniffing content
    /// by magic numbers.
    #[must_use]
    pub fn new() -> Self {
        Self {
            recipients: RecipientStore::new(),
            content: Content::default(),
            settings: Settings::default(),
            io: Collaborators::default(),
        }
    }

    /// Creates a message seeded from configured defaults.
    ///
    /// # Errors
    ///
    /// Returns an error if the configured sender or reply-to is not a valid
    /// address.
    pub fn with_config(config: &TransmissionConfig) -> Result<Self> {
        let mut message = Self::new();
        if let Some(from) = config.from.as_deref() {
            message.set_from(from)?;
        }
        if let Some(reply_to) = config.reply_to.as_deref() {
            message.set_reply_to(reply_to)?;
        }
        message.settings.options = config.options.clone();
        message.settings.campaign_id.clone_from(&config.campaign_id);
        message.settings.return_path.clone_from(&config.return_path);
        Ok(message)
    }

    /// Replaces the file source used by [`attach`](Self::attach) and
    /// [`embed`](Self::embed).
    #[must_use]
    pub fn with_file_source(mut self, files: impl FileSource + 'static) -> Self {
        self.io.files = Arc::new(files);
        self
    }

    /// Replaces the content sniffer.
    #[must_use]
    pub fn with_sniffer(mut self, sniffer: impl MimeSniffer + 'static) -> Self {
        self.io.sniffer = Arc::new(sniffer);
        self
    }

    /// Sets the sender. Several addresses are joined with `,`.
    ///
    /// # Errors
    ///
    /// Returns an error if an address is invalid.
    pub fn set_from(&mut self, input: impl Into<AddressInput>) -> Result<&mut Self> {
        let addresses = input.into().into_addresses()?;
        self.content.from = Some(render_address_list(&addresses));
        Ok(self)
    }

    /// Sets the reply-to. Several addresses are joined with `,`.
    ///
    /// # Errors
    ///
    /// Returns an error if an address is invalid.
    pub fn set_reply_to(&mut self, input: impl Into<AddressInput>) -> Result<&mut Self> {
        let addresses = input.into().into_addresses()?;
        self.content.reply_to = Some(render_address_list(&addresses));
        Ok(self)
    }

    /// Appends To recipients.
    ///
    /// # Errors
    ///
    /// Returns an error if an address is invalid or a stored list is in use.
    pub fn set_to(&mut self, input: impl Into<AddressInput>) -> Result<&mut Self> {
        self.recipients.add_to(input)?;
        Ok(self)
    }

    /// Appends Cc recipients and rewrites the `Cc` header.
    ///
    /// # Errors
    ///
    /// Returns an error if an address is invalid or a stored list is in use.
    pub fn set_cc(&mut self, input: impl Into<AddressInput>) -> Result<&mut Self> {
        self.recipients.add_cc(input)?;
        Ok(self)
    }

    /// Appends Bcc recipients.
    ///
    /// # Errors
    ///
    /// Returns an error if an address is invalid or a stored list is in use.
    pub fn set_bcc(&mut self, input: impl Into<AddressInput>) -> Result<&mut Self> {
        self.recipients.add_bcc(input)?;
        Ok(self)
    }

    /// Sends to a provider-side stored recipient list instead of explicit
    /// recipients. Previously added recipients are discarded.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidArgument`] for a blank list id; the message
    /// is left unchanged.
    pub fn set_stored_recipients_list(&mut self, list_id: impl Into<String>) -> Result<&mut Self> {
        self.recipients.set_stored_list(list_id)?;
        Ok(self)
    }

    /// Sets the subject.
    pub fn set_subject(&mut self, subject: impl Into<String>) -> &mut Self {
        self.content.subject = Some(subject.into());
        self
    }

    /// Sets the plain text body.
    pub fn set_text_body(&mut self, text: impl Into<String>) -> &mut Self {
        self.content.text = Some(text.into());
        self
    }

    /// Sets the HTML body.
    pub fn set_html_body(&mut self, html: impl Into<String>) -> &mut Self {
        self.content.html = Some(html.into());
        self
    }

    /// Renders a stored template instead of inline content.
    pub fn set_template(&mut self, template_id: impl Into<String>, use_draft: bool) -> &mut Self {
        self.content.template_id = Some(template_id.into());
        self.content.use_draft_template = Some(use_draft);
        self
    }

    /// Always fails: content is sent as UTF-8.
    ///
    /// # Errors
    ///
    /// Returns [`Error::UnsupportedOperation`].
    pub fn set_charset(&mut self, charset: &str) -> Result<&mut Self> {
        Err(Error::UnsupportedOperation(format!(
            "charset {charset} cannot be set; content is always {}",
            self.charset()
        )))
    }

    /// Sets a custom content header.
    pub fn add_header(&mut self, name: impl Into<String>, value: impl Into<String>) -> &mut Self {
        self.content.headers.set(name, value);
        self
    }

    /// Replaces the delivery options.
    pub fn set_options(&mut self, options: Options) -> &mut Self {
        self.settings.options = options;
        self
    }

    /// Returns the delivery options for in-place changes.
    pub fn options_mut(&mut self) -> &mut Options {
        &mut self.settings.options
    }

    /// Sets the campaign id.
    pub fn set_campaign_id(&mut self, campaign_id: impl Into<String>) -> &mut Self {
        self.settings.campaign_id = Some(campaign_id.into());
        self
    }

    /// Sets the description.
    pub fn set_description(&mut self, description: impl Into<String>) -> &mut Self {
        self.settings.description = Some(description.into());
        self
    }

    /// Sets transmission metadata.
    pub fn set_metadata(&mut self, metadata: Map<String, Value>) -> &mut Self {
        self.settings.metadata = Some(metadata);
        self
    }

    /// Sets substitution data. The value is passed through untouched.
    pub fn set_substitution_data(&mut self, data: Value) -> &mut Self {
        self.settings.substitution_data = Some(data);
        self
    }

    /// Sets the return path.
    pub fn set_return_path(&mut self, return_path: impl Into<String>) -> &mut Self {
        self.settings.return_path = Some(return_path.into());
        self
    }

    /// Resolves copy recipients. No recipients can be added afterwards.
    #[must_use]
    pub fn resolve(self) -> Message<Resolved> {
        Message {
            recipients: self.recipients.resolve(),
            content: self.content,
            settings: self.settings,
            io: self.io,
        }
    }

    /// Builds the wire payload from a resolved copy of this message.
    ///
    /// The message itself stays in the building state.
    #[must_use]
    pub fn to_wire_payload(&self) -> Transmission {
        self.clone().resolve().to_wire_payload()
    }

    /// Renders the wire payload as JSON.
    ///
    /// # Errors
    ///
    /// Returns an error if serialization fails.
    pub fn to_json(&self) -> Result<String> {
        self.to_wire_payload().to_json()
    }
}

impl Message<Resolved> {
    /// Runs resolution again; a no-op for already resolved entries.
    #[must_use]
    pub fn resolve(self) -> Self {
        Self {
            recipients: self.recipients.resolve(),
            ..self
        }
    }

    /// Builds the wire payload.
    #[must_use]
    pub fn to_wire_payload(&self) -> Transmission {
        self.build_payload()
    }

    /// Renders the wire payload as JSON.
    ///
    /// # Errors
    ///
    /// Returns an error if serialization fails.
    pub fn to_json(&self) -> Result<String> {
        self.to_wire_payload().to_json()
    }
}

/// Human-readable recipient summary.
impl<S> fmt::Display for Message<S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if let Some(from) = self.from() {
            writeln!(f, "From: {from}")?;
        }

        if let Some(list_id) = self.recipients.stored_list_id() {
            writeln!(f, "To: list:{list_id}")?;
        } else {
            let to = render_address_list(&self.to());
            if !to.is_empty() {
                writeln!(f, "To: {to}")?;
            }
        }

        let cc = self.cc();
        if !cc.is_empty() {
            writeln!(f, "Cc: {}", cc.join(","))?;
        }

        let bcc = self.bcc();
        if !bcc.is_empty() {
            writeln!(f, "Bcc: {bcc}")?;
        }

        if let Some(reply_to) = self.reply_to() {
            writeln!(f, "Reply-To: {reply_to}")?;
        }

        if let Some(subject) = self.subject() {
            writeln!(f, "Subject: {subject}")?;
        }

        Ok(())
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::similar_names)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_from_bare_and_unnamed_mapping_match() {
        let mut bare = Message::new();
        bare.set_from("a@x.com").unwrap();

        let mut mapped = Message::new();
        mapped.set_from([("a@x.com", "")]).unwrap();

        assert_eq!(bare.from(), Some("a@x.com"));
        assert_eq!(bare.from(), mapped.from());
    }

    #[test]
    fn test_from_joins_multiple() {
        let mut message = Message::new();
        message
            .set_from(vec![("a@x.com", "Alice"), ("1", "b@x.com")])
            .unwrap();
        assert_eq!(message.from(), Some("\"Alice\" <a@x.com>,b@x.com"));
    }

    #[test]
    fn test_setters_chain() {
        let mut message = Message::new();
        message
            .set_to("a@x.com")
            .unwrap()
            .set_cc("c@x.com")
            .unwrap()
            .set_subject("Hi")
            .set_text_body("Hello");

        assert_eq!(message.to().len(), 1);
        assert_eq!(message.cc(), vec!["c@x.com".to_string()]);
        assert_eq!(message.subject(), Some("Hi"));
        assert_eq!(message.text_body(), Some("Hello"));
    }

    #[test]
    fn test_set_charset_unsupported() {
        let mut message = Message::new();
        assert!(matches!(
            message.set_charset("iso-8859-1"),
            Err(Error::UnsupportedOperation(_))
        ));
        assert_eq!(message.charset(), "UTF-8");
    }

    #[test]
    fn test_with_config() {
        let config = TransmissionConfig::from_json(
            r#"{"from": "noreply@acme.test", "options": {"sandbox": true}, "campaign_id": "c1"}"#,
        )
        .unwrap();
        let message = Message::with_config(&config).unwrap();

        assert_eq!(message.from(), Some("noreply@acme.test"));
        assert_eq!(message.reply_to(), None);
        assert!(message.options().sandbox);
        assert_eq!(message.campaign_id(), Some("c1"));
    }

    #[test]
    fn test_with_config_rejects_blank_sender() {
        let config = TransmissionConfig::from_json(r#"{"from": "noreply@acme.test", "reply_to": " "}"#)
            .unwrap();
        assert!(matches!(
            Message::with_config(&config),
            Err(Error::Mime(mailwire_mime::Error::InvalidAddress(_)))
        ));

        let config = TransmissionConfig::from_json(r#"{"from": ""}"#).unwrap();
        assert!(Message::with_config(&config).is_err());
    }

    #[test]
    fn test_empty_cc_adds_no_header() {
        let mut message = Message::new();
        message.set_to("a@x.com").unwrap();
        message.set_cc(Vec::<(String, String)>::new()).unwrap();

        let payload = message.to_wire_payload();
        assert!(payload.content.headers.get("Cc").is_none());
        assert!(message.cc().is_empty());
    }

    #[test]
    fn test_blank_stored_list_rejected() {
        let mut message = Message::new();
        message.set_to("a@x.com").unwrap();

        assert!(matches!(
            message.set_stored_recipients_list(""),
            Err(Error::InvalidArgument(_))
        ));
        assert!(message.set_stored_recipients_list("  ").is_err());
        assert_eq!(message.recipients().stored_list_id(), None);
        assert_eq!(message.to().len(), 1);
    }

    #[test]
    fn test_to_wire_payload_leaves_message_building() {
        let mut message = Message::new();
        message.set_to("main@x.com").unwrap();
        message.set_cc("c@x.com").unwrap();

        let payload = message.to_wire_payload();
        assert_eq!(
            serde_json::to_value(&payload.recipients).unwrap(),
            json!([
                { "address": "main@x.com" },
                { "address": "c@x.com", "header_to": "main@x.com%" }
            ])
        );
        assert_eq!(
            message.recipients().entries()[1].header_to(),
            Some(crate::MAIN_RECIPIENT_PLACEHOLDER)
        );
    }

    #[test]
    fn test_payload_merges_cc_header() {
        let mut message = Message::new();
        message.add_header("X-Tag", "welcome");
        message.set_to("a@x.com").unwrap();
        message.set_cc([("c@x.com", "Carol")]).unwrap();

        let payload = message.to_wire_payload();
        assert_eq!(payload.content.headers.get("X-Tag"), Some("welcome"));
        assert_eq!(
            payload.content.headers.get("Cc"),
            Some("\"Carol\" <c@x.com>")
        );
        assert!(message.headers().get("Cc").is_none());
    }

    #[test]
    fn test_display_summary() {
        let mut message = Message::new();
        message.set_from("sender@x.com").unwrap();
        message.set_to([("a@x.com", "Alice")]).unwrap();
        message.set_cc("c@x.com").unwrap();
        message.set_bcc("d@x.com").unwrap();
        message.set_subject("Hello");

        assert_eq!(
            message.to_string(),
            "From: sender@x.com\n\
             To: \"Alice\" <a@x.com>\n\
             Cc: c@x.com\n\
             Bcc: d@x.com\n\
             Subject: Hello\n"
        );
    }

    #[test]
    fn test_display_stored_list() {
        let mut message = Message::new();
        message.set_stored_recipients_list("L1").unwrap();
        assert_eq!(message.to_string(), "To: list:L1\n");
    }
}
