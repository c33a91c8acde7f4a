//! Attachments and inline images.
//!
//! Every call either adds exactly one record or leaves the message
//! unchanged. Empty content is accepted and silently ignored.

use std::path::Path;

use mailwire_mime::ContentType;
use mailwire_mime::encoding::encode_base64;

use super::Message;
use crate::payload::Attachment;
use crate::recipients::Building;
use crate::{Error, Result};

/// Per-call options for attachments and inline images.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PartOptions {
    /// File name for attachments, content id for inline images.
    pub file_name: Option<String>,
    /// MIME type; sniffed from the content when absent.
    pub content_type: Option<String>,
}

impl PartOptions {
    /// Creates empty options.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the file name (or content id for inline images).
    #[must_use]
    pub fn file_name(mut self, file_name: impl Into<String>) -> Self {
        self.file_name = Some(file_name.into());
        self
    }

    /// Sets the MIME type.
    #[must_use]
    pub fn content_type(mut self, content_type: impl Into<String>) -> Self {
        self.content_type = Some(content_type.into());
        self
    }
}

impl Message<Building> {
    /// Attaches a file.
    ///
    /// The name defaults to the file's base name.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Io`] if the file cannot be read.
    pub fn attach(&mut self, path: impl AsRef<Path>, options: PartOptions) -> Result<&mut Self> {
        let path = path.as_ref();
        let content = self.read(path)?;

        let options = PartOptions {
            file_name: options.file_name.or_else(|| {
                path.file_name()
                    .map(|name| name.to_string_lossy().into_owned())
            }),
            ..options
        };
        Ok(self.attach_content(content, options))
    }

    /// Attaches in-memory content.
    ///
    /// The name defaults to `attachment<index>`.
    pub fn attach_content(&mut self, content: impl AsRef<[u8]>, options: PartOptions) -> &mut Self {
        let content = content.as_ref();
        if content.is_empty() {
            tracing::trace!("Skipping empty attachment");
            return self;
        }

        let index = self.content.attachments.len();
        let content_type = options
            .content_type
            .unwrap_or_else(|| self.io.sniffer.sniff(content));
        let name = options
            .file_name
            .unwrap_or_else(|| format!("attachment{index}"));

        tracing::debug!(%name, %content_type, size = content.len(), "Adding attachment");
        self.content.attachments.push(Attachment {
            content_type,
            name,
            data: encode_base64(content),
        });
        self
    }

    /// Embeds an image file as an inline image.
    ///
    /// The content id defaults to `image<index>`; reference it from HTML as
    /// `cid:<id>`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Io`] if the file cannot be read and
    /// [`Error::InvalidArgument`] if it is not an image.
    pub fn embed(&mut self, path: impl AsRef<Path>, options: PartOptions) -> Result<&mut Self> {
        let content = self.read(path.as_ref())?;
        self.embed_content(content, options)
    }

    /// Embeds in-memory image content as an inline image.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidArgument`] if the declared or sniffed type is
    /// not `image/*`.
    pub fn embed_content(
        &mut self,
        content: impl AsRef<[u8]>,
        options: PartOptions,
    ) -> Result<&mut Self> {
        let content = content.as_ref();
        if content.is_empty() {
            tracing::trace!("Skipping empty inline image");
            return Ok(self);
        }

        let content_type = options
            .content_type
            .unwrap_or_else(|| self.io.sniffer.sniff(content));
        let is_image = ContentType::parse(&content_type).is_ok_and(|ct| ct.is_image());
        if !is_image {
            return Err(Error::InvalidArgument(format!(
                "only images can be embedded, got {content_type}"
            )));
        }

        let index = self.content.inline_images.len();
        let name = options.file_name.unwrap_or_else(|| format!("image{index}"));

        tracing::debug!(%name, %content_type, size = content.len(), "Adding inline image");
        self.content.inline_images.push(Attachment {
            content_type,
            name,
            data: encode_base64(content),
        });
        Ok(self)
    }

    fn read(&self, path: &Path) -> Result<Vec<u8>> {
        self.io.files.read(path).map_err(|source| Error::Io {
            path: path.to_path_buf(),
            source,
        })
    }
}
