//! # mailwire-mime
//!
//! Address normalization and MIME helpers for transmission payloads.
//!
//! ## Features
//!
//! - **Addresses**: Normalize bare, mapped and structured address inputs
//! - **Rendering**: Deterministic `"Name" <email>` address lists for headers
//! - **Content types**: Parse and classify MIME types
//! - **Sniffing**: shared-mime-info content detection behind an injectable trait
//! - **Encoding**: Base64 for attachment payloads
//!
//! ## Quick Start
//!
//! ```ignore
//! use mailwire_mime::{AddressInput, render_address_list};
//!
//! let addresses = AddressInput::from(vec![("alice@example.com", "Alice"), ("0", "bob@example.com")])
//!     .into_addresses()?;
//!
//! assert_eq!(
//!     render_address_list(&addresses),
//!     "\"Alice\" <alice@example.com>,bob@example.com"
//! );
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![forbid(unsafe_code)]

mod address;
mod content_type;
mod error;
mod sniff;

pub mod encoding;

pub use address::{Address, AddressInput, render_address_list};
pub use content_type::ContentType;
pub use error::{Error, Result};
pub use sniff::{MagicSniffer, MimeSniffer};
