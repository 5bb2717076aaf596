//! Text encoding normalization for trie keys.
//!
//! Every word handed to the trie is encoded into the configured encoding and
//! decoded back before it is used as a key. Characters the encoding cannot
//! represent come back as `?`, and malformed sequences as U+FFFD, so two
//! inputs that differ only in characters the encoding cannot carry collapse
//! onto the same key.

use std::borrow::Cow;
use std::fmt;

use encoding_rs::{Encoding, EncoderResult, UTF_8};
use serde::{Deserialize, Deserializer, Serialize, Serializer};

use super::error::NiihauTrieError;
use super::NiihauTrieResult;

/// Replacement written for characters the target encoding cannot represent.
const UNMAPPABLE_REPLACEMENT: u8 = b'?';

/// A text encoding applied once to every input string.
///
/// Wraps an [`encoding_rs::Encoding`] resolved from a WHATWG label such as
/// `"utf-8"`, `"latin1"` or `"shift_jis"`. There is no platform default: the
/// encoding is always chosen explicitly, UTF-8 being the value of
/// [`TextEncoding::utf8`].
#[derive(Clone, Copy, PartialEq, Eq)]
pub struct TextEncoding {
    encoding: &'static Encoding,
}

impl TextEncoding {
    /// UTF-8, under which the round trip is the identity.
    pub fn utf8() -> Self {
        Self { encoding: UTF_8 }
    }

    /// Resolves an encoding from its label.
    ///
    /// # Errors
    ///
    /// Returns [`NiihauTrieError::UnknownEncoding`] when the label does not name
    /// a known encoding.
    pub fn from_label(label: &str) -> NiihauTrieResult<Self> {
        Encoding::for_label(label.trim().as_bytes())
            .map(|encoding| Self { encoding })
            .ok_or_else(|| NiihauTrieError::UnknownEncoding(label.to_string()))
    }

    /// Canonical name of the encoding.
    pub fn name(&self) -> &'static str {
        self.encoding.name()
    }

    /// Round-trips `input` through this encoding.
    ///
    /// Borrows the input unchanged when the round trip cannot alter it.
    pub fn normalize<'a>(&self, input: &'a str) -> Cow<'a, str> {
        if self.encoding == UTF_8 || (self.encoding.is_ascii_compatible() && input.is_ascii()) {
            return Cow::Borrowed(input);
        }

        // UTF-16 variants encode as UTF-8 in encoding_rs, so decode with the
        // same encoding the encoder actually produced.
        let output = self.encoding.output_encoding();
        let bytes = self.encode_lossy(input);
        let (decoded, had_errors) = output.decode_without_bom_handling(&bytes);
        if had_errors {
            tracing::debug!(encoding = output.name(), "Malformed bytes replaced while decoding");
        }

        if decoded == input {
            Cow::Borrowed(input)
        } else {
            Cow::Owned(decoded.into_owned())
        }
    }

    /// Encodes `input`, substituting [`UNMAPPABLE_REPLACEMENT`] for every
    /// character the encoding cannot represent.
    fn encode_lossy(&self, input: &str) -> Vec<u8> {
        let mut encoder = self.encoding.new_encoder();
        let capacity = encoder
            .max_buffer_length_from_utf8_without_replacement(input.len())
            .unwrap_or(input.len() * 4);
        let mut bytes = Vec::with_capacity(capacity);
        let mut remaining = input;
        let mut substituted = 0usize;

        loop {
            let (result, read) =
                encoder.encode_from_utf8_to_vec_without_replacement(remaining, &mut bytes, true);
            remaining = &remaining[read..];
            match result {
                EncoderResult::InputEmpty => break,
                EncoderResult::OutputFull => {
                    let extra = encoder
                        .max_buffer_length_from_utf8_without_replacement(remaining.len())
                        .unwrap_or(remaining.len() * 4)
                        .max(16);
                    bytes.reserve(extra);
                }
                EncoderResult::Unmappable(_) => {
                    bytes.push(UNMAPPABLE_REPLACEMENT);
                    substituted += 1;
                }
            }
        }

        if substituted > 0 {
            tracing::debug!(
                encoding = self.name(),
                substituted,
                "Replaced characters not representable in the configured encoding"
            );
        }
        bytes
    }
}

impl Default for TextEncoding {
    fn default() -> Self {
        Self::utf8()
    }
}

impl fmt::Debug for TextEncoding {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("TextEncoding").field(&self.name()).finish()
    }
}

impl fmt::Display for TextEncoding {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl std::str::FromStr for TextEncoding {
    type Err = NiihauTrieError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_label(s)
    }
}

impl Serialize for TextEncoding {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.name())
    }
}

impl<'de> Deserialize<'de> for TextEncoding {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let label = String::deserialize(deserializer)?;
        Self::from_label(&label).map_err(serde::de::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_utf8_is_identity() {
        let encoding = TextEncoding::utf8();
        assert!(matches!(encoding.normalize("héllo ☃"), Cow::Borrowed("héllo ☃")));
    }

    #[test]
    fn test_labels_resolve() {
        assert_eq!(TextEncoding::from_label("UTF-8").unwrap().name(), "UTF-8");
        assert_eq!(TextEncoding::from_label(" latin1 ").unwrap().name(), "windows-1252");
        assert_eq!(
            TextEncoding::from_label("klingon"),
            Err(NiihauTrieError::UnknownEncoding("klingon".to_string()))
        );
    }

    #[test]
    fn test_unmappable_characters_become_question_marks() {
        let latin1 = TextEncoding::from_label("latin1").unwrap();
        assert_eq!(latin1.normalize("café"), "café");
        assert_eq!(latin1.normalize("snow☃man"), "snow?man");
        assert_eq!(latin1.normalize("日本"), "??");
    }

    #[test]
    fn test_ascii_fast_path() {
        let sjis = TextEncoding::from_label("shift_jis").unwrap();
        assert!(matches!(sjis.normalize("plain"), Cow::Borrowed("plain")));
        assert_eq!(sjis.normalize("日本"), "日本");
    }

    #[test]
    fn test_utf16_round_trips_through_utf8() {
        let utf16 = TextEncoding::from_label("utf-16le").unwrap();
        assert_eq!(utf16.normalize("ünïcødé"), "ünïcødé");
    }

    #[test]
    fn test_serde_uses_labels() {
        let encoding = TextEncoding::from_label("iso-8859-2").unwrap();
        let json = serde_json::to_string(&encoding).unwrap();
        assert_eq!(json, "\"ISO-8859-2\"");
        let back: TextEncoding = serde_json::from_str(&json).unwrap();
        assert_eq!(back, encoding);
        assert!(serde_json::from_str::<TextEncoding>("\"nope\"").is_err());
    }
}
