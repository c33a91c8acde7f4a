//! Content type detection from raw bytes.

/// Detects the MIME type of a byte buffer.
///
/// Injected into message builders so tests can substitute a fixed answer.
pub trait MimeSniffer: Send + Sync {
    /// Returns the detected `type/subtype` for `data`.
    fn sniff(&self, data: &[u8]) -> String;
}

/// Magic-number detection backed by the shared-mime-info database.
///
/// Binary content with no known signature is `application/octet-stream`,
/// unrecognized text is `text/plain`.
#[derive(Debug, Clone, Copy, Default)]
pub struct MagicSniffer;

/// Text subtypes the type tree only reaches through an XML prolog.
const TEXT_REFINEMENTS: &[&str] = &["image/svg+xml"];

impl MimeSniffer for MagicSniffer {
    fn sniff(&self, data: &[u8]) -> String {
        let mime = tree_magic_mini::from_u8(data);
        if (mime == "text/plain" || mime == "application/xml")
            && let Some(refined) = TEXT_REFINEMENTS
                .iter()
                .copied()
                .find(|candidate| tree_magic_mini::match_u8(candidate, data))
        {
            return refined.to_string();
        }
        mime.to_string()
    }
}

impl<F> MimeSniffer for F
where
    F: Fn(&[u8]) -> String + Send + Sync,
{
    fn sniff(&self, data: &[u8]) -> String {
        self(data)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// A 1x1 24-bit bitmap with a `BITMAPINFOHEADER`.
    const BMP_1X1: &[u8] = &[
        b'B', b'M', 0x3A, 0, 0, 0, 0, 0, 0, 0, 0x36, 0, 0, 0, // file header
        0x28, 0, 0, 0, 1, 0, 0, 0, 1, 0, 0, 0, 1, 0, 0x18, 0, // info header
        0, 0, 0, 0, 4, 0, 0, 0, 0x13, 0x0B, 0, 0, 0x13, 0x0B, 0, 0, //
        0, 0, 0, 0, 0, 0, 0, 0, // palette counts
        0xFF, 0x00, 0x00, 0x00, // pixel + padding
    ];

    #[test]
    fn test_sniff_images() {
        let sniffer = MagicSniffer;
        assert_eq!(sniffer.sniff(b"\x89PNG\r\n\x1a\n\0\0\0\rIHDR"), "image/png");
        assert_eq!(sniffer.sniff(b"\xFF\xD8\xFF\xE0\0\x10JFIF\0"), "image/jpeg");
        assert_eq!(sniffer.sniff(b"GIF89a\x01\0\x01\0"), "image/gif");
        assert_eq!(sniffer.sniff(BMP_1X1), "image/bmp");
    }

    #[test]
    fn test_sniff_svg() {
        let sniffer = MagicSniffer;
        let with_prolog = b"<?xml version=\"1.0\"?>\n<svg xmlns=\"http://www.w3.org/2000/svg\"/>";
        let bare = b"<svg xmlns=\"http://www.w3.org/2000/svg\" width=\"1\" height=\"1\"/>";
        assert_eq!(sniffer.sniff(with_prolog), "image/svg+xml");
        assert_eq!(sniffer.sniff(bare), "image/svg+xml");
    }

    #[test]
    fn test_sniff_documents() {
        let sniffer = MagicSniffer;
        assert_eq!(sniffer.sniff(b"%PDF-1.7\n"), "application/pdf");
        assert_eq!(sniffer.sniff(b"PK\x03\x04\x14\0\0\0\0\0"), "application/zip");
    }

    #[test]
    fn test_sniff_fallbacks() {
        let sniffer = MagicSniffer;
        assert_eq!(sniffer.sniff(b"hello world"), "text/plain");
        assert_eq!(sniffer.sniff(&[0x01, 0x00, 0x7F, 0x00, 0x13]), "application/octet-stream");
    }

    #[test]
    fn test_closure_sniffer() {
        let fixed = |_: &[u8]| "image/png".to_string();
        assert_eq!(fixed.sniff(b"anything"), "image/png");
    }
}
