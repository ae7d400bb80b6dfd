use crate::errors::EncodingError;
use encoding_rs::Encoding;

/// A character encoding that is known to be ASCII-compatible.
///
/// The tokenizer locates markup delimiters by their ASCII byte values, so only encodings in which
/// every ASCII byte stands for itself can be used. This rules out UTF-16LE, UTF-16BE,
/// ISO-2022-JP and the `replacement` encoding.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AsciiCompatibleEncoding(&'static Encoding);

impl AsciiCompatibleEncoding {
    /// Returns `Some` if the encoding is ASCII-compatible.
    #[must_use]
    pub fn new(encoding: &'static Encoding) -> Option<Self> {
        encoding.is_ascii_compatible().then_some(Self(encoding))
    }

    /// Resolves a [WHATWG encoding label](https://encoding.spec.whatwg.org/#names-and-labels).
    pub fn from_label(label: &str) -> Result<Self, EncodingError> {
        let encoding = Encoding::for_label_no_replacement(label.trim().as_bytes())
            .ok_or(EncodingError::UnknownEncoding)?;

        Self::new(encoding).ok_or(EncodingError::NonAsciiCompatibleEncoding)
    }

    /// The wrapped encoding.
    #[inline]
    #[must_use]
    pub fn encoding(self) -> &'static Encoding {
        self.0
    }
}

impl From<AsciiCompatibleEncoding> for &'static Encoding {
    #[inline]
    fn from(encoding: AsciiCompatibleEncoding) -> Self {
        encoding.0
    }
}

impl TryFrom<&'static Encoding> for AsciiCompatibleEncoding {
    type Error = EncodingError;

    fn try_from(encoding: &'static Encoding) -> Result<Self, EncodingError> {
        Self::new(encoding).ok_or(EncodingError::NonAsciiCompatibleEncoding)
    }
}
