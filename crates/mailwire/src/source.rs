//! File access for attachments and inline images.

use std::io;
use std::path::Path;

/// Reads attachment content by path.
///
/// Injected into messages so tests can serve content from memory.
pub trait FileSource: Send + Sync {
    /// Reads the whole file.
    ///
    /// # Errors
    ///
    /// Returns the underlying I/O error, e.g. `NotFound`.
    fn read(&self, path: &Path) -> io::Result<Vec<u8>>;
}

/// Reads from the local file system.
#[derive(Debug, Clone, Copy, Default)]
pub struct FsFileSource;

impl FileSource for FsFileSource {
    fn read(&self, path: &Path) -> io::Result<Vec<u8>> {
        std::fs::read(path)
    }
}
