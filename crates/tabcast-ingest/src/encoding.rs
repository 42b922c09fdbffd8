//! Character encoding detection for delimited text sources.
//!
//! A BOM wins outright; otherwise detection is statistical via `chardetng`.
//! Decoding that produces replacement characters means the guess was not
//! trustworthy, which is fatal for that single file only.

use std::path::Path;

use chardetng::EncodingDetector;
use encoding_rs::Encoding;

use crate::error::{IngestError, Result};

/// Best-guess encoding for the given bytes.
#[must_use]
pub fn detect_encoding(bytes: &[u8]) -> &'static Encoding {
    if let Some((encoding, _bom_len)) = Encoding::for_bom(bytes) {
        return encoding;
    }
    let mut detector = EncodingDetector::new();
    detector.feed(bytes, true);
    detector.guess(None, true)
}

/// Decode raw source bytes to text, resolving the encoding first.
///
/// Any BOM is consumed by the decoder. Fails with
/// [`IngestError::Encoding`] when the decoded text contains replacement
/// characters, i.e. no detected encoding cleanly explains the bytes.
pub fn decode_text(path: &Path, bytes: &[u8]) -> Result<String> {
    let encoding = detect_encoding(bytes);
    let (text, used, had_errors) = encoding.decode(bytes);
    if had_errors {
        tracing::warn!(
            path = %path.display(),
            encoding = used.name(),
            "decoding produced replacement characters"
        );
        return Err(IngestError::Encoding {
            path: path.to_path_buf(),
        });
    }
    tracing::debug!(path = %path.display(), encoding = used.name(), "decoded source text");
    Ok(text.into_owned())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_utf8_plain() {
        let path = Path::new("test.csv");
        let text = decode_text(path, "a,b\n1,2\n".as_bytes()).unwrap();
        assert_eq!(text, "a,b\n1,2\n");
    }

    #[test]
    fn test_utf8_bom_consumed() {
        let path = Path::new("test.csv");
        let mut bytes = vec![0xEF, 0xBB, 0xBF];
        bytes.extend_from_slice(b"a,b\n");
        let text = decode_text(path, &bytes).unwrap();
        assert_eq!(text, "a,b\n");
    }

    #[test]
    fn test_latin1_currency() {
        // "£100" in ISO-8859-1: 0xA3 is the pound sign
        let path = Path::new("test.csv");
        let bytes = [b'p', b'r', b'i', b'c', b'e', b'\n', 0xA3, b'1', b'0', b'0', b'\n'];
        let text = decode_text(path, &bytes).unwrap();
        assert!(text.contains('£'));
    }

    #[test]
    fn test_utf16_le_bom() {
        let path = Path::new("test.csv");
        // "ab" as UTF-16 LE with BOM
        let bytes = [0xFF, 0xFE, b'a', 0x00, b'b', 0x00];
        let text = decode_text(path, &bytes).unwrap();
        assert_eq!(text, "ab");
    }
}
