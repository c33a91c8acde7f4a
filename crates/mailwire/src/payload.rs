//! Wire payload for the transmission API.
//!
//! These types mirror the request body field for field. Optional fields are
//! omitted from the JSON when unset.

use chrono::{DateTime, FixedOffset};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::headers::Headers;
use crate::recipients::Recipients;

/// Maximum length of `campaign_id`, in bytes.
///
/// Advisory only: nothing in this crate enforces it.
pub const CAMPAIGN_ID_MAX_BYTES: usize = 64;

/// Maximum length of `description`, in bytes. Advisory only.
pub const DESCRIPTION_MAX_BYTES: usize = 1024;

/// Maximum length of the subject, in bytes. Advisory only.
pub const SUBJECT_MAX_BYTES: usize = 998;

/// Delivery options.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Options {
    /// Scheduled delivery time.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub start_time: Option<DateTime<FixedOffset>>,
    /// Track opens.
    pub open_tracking: bool,
    /// Track clicks.
    pub click_tracking: bool,
    /// Mark the transmission as transactional.
    pub transactional: bool,
    /// Send through the sandbox domain.
    pub sandbox: bool,
    /// Ignore the suppression list.
    pub skip_suppression: bool,
}

impl Default for Options {
    fn default() -> Self {
        Self {
            start_time: None,
            open_tracking: true,
            click_tracking: true,
            transactional: false,
            sandbox: false,
            skip_suppression: false,
        }
    }
}

/// An attachment or inline image record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Attachment {
    /// MIME type.
    #[serde(rename = "type")]
    pub content_type: String,
    /// File name, or content id for inline images.
    pub name: String,
    /// Base64 encoded content.
    pub data: String,
}

/// The `content` block of a transmission.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Content {
    /// Stored template to render instead of inline content.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub template_id: Option<String>,
    /// Use the draft version of the stored template. Set together with
    /// `template_id`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub use_draft_template: Option<bool>,
    /// HTML body.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub html: Option<String>,
    /// Plain text body.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,
    /// Subject line.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub subject: Option<String>,
    /// Rendered sender.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub from: Option<String>,
    /// Rendered reply-to.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reply_to: Option<String>,
    /// Content headers, including the synthesized `Cc`.
    #[serde(skip_serializing_if = "Headers::is_empty")]
    pub headers: Headers,
    /// Attachments in insertion order.
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub attachments: Vec<Attachment>,
    /// Inline images in insertion order.
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub inline_images: Vec<Attachment>,
}

/// A complete transmission request body.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Transmission {
    /// Delivery options.
    pub options: Options,
    /// Resolved recipients, or a stored list reference.
    pub recipients: Recipients,
    /// Message content.
    pub content: Content,
    /// Campaign identifier.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub campaign_id: Option<String>,
    /// Free form description.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Transmission level metadata.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub metadata: Option<Map<String, Value>>,
    /// Substitution data, passed through untouched.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub substitution_data: Option<Value>,
    /// Envelope return path.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub return_path: Option<String>,
}

impl Transmission {
    /// Renders the payload as JSON.
    ///
    /// # Errors
    ///
    /// Returns an error if serialization fails.
    pub fn to_json(&self) -> crate::Result<String> {
        serde_json::to_string(self).map_err(Into::into)
    }
}
