//! # mailwire
//!
//! Message model and wire payload builder for transactional-email
//! transmission APIs.
//!
//! The transmission format has a single flat recipient list and no native
//! Cc/Bcc. This crate encodes copy recipients into that list with a routing
//! header pointing at the main recipient, and recovers To/Cc/Bcc views from
//! it.
//!
//! ## Features
//!
//! - **Recipient model**: To/Cc/Bcc setters over one ordered recipient list
//! - **Stored lists**: Reference a provider-side recipient list by id
//! - **Type-state resolution**: Copy recipients are resolved exactly once,
//!   before serialization
//! - **Attachments and inline images**: Injectable file access and MIME
//!   sniffing
//! - **Configuration**: JSON-loadable delivery defaults
//!
//! ## Quick Start
//!
//! ```ignore
//! use mailwire::{Message, PartOptions};
//!
//! let mut message = Message::new();
//! message
//!     .set_from(vec![("news@example.com", "Example News")])?
//!     .set_to("alice@example.com")?
//!     .set_cc("bob@example.com")?
//!     .set_bcc("audit@example.com")?
//!     .set_subject("Weekly digest")
//!     .set_html_body("<p>Hello</p>");
//! message.attach_content("report", PartOptions::new().file_name("report.txt"));
//!
//! let json = message.resolve().to_json()?;
//! ```
//!
//! ## Modules
//!
//! - [`recipients`]: Recipient store, views and resolution
//! - [`payload`]: Wire payload types
//! - [`config`]: Message defaults

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![forbid(unsafe_code)]

pub mod config;
mod error;
mod headers;
mod message;
pub mod payload;
pub mod recipients;
mod source;

pub use config::TransmissionConfig;
pub use error::{Error, Result};
pub use headers::Headers;
pub use mailwire_mime::{Address, AddressInput, MagicSniffer, MimeSniffer};
pub use message::{Message, PartOptions};
pub use payload::{Attachment, Options, Transmission};
pub use recipients::{
    Building, MAIN_RECIPIENT_PLACEHOLDER, MAIN_RECIPIENT_TOKEN, RecipientEntry, RecipientStore,
    Recipients, Resolved,
};
pub use source::{FileSource, FsFileSource};
