/// Specifies the memory settings for the [`Tokenizer`].
///
/// [`Tokenizer`]: crate::Tokenizer
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MemorySettings {
    /// Specifies the number of bytes that should be preallocated on [`Tokenizer`]
    /// instantiation for the carry-over buffer.
    ///
    /// The carry-over buffer holds the bytes of a token that spans several chunks
    /// until the token is complete.
    ///
    /// ### Default
    ///
    /// `1024` bytes.
    ///
    /// [`Tokenizer`]: crate::Tokenizer
    pub preallocated_carry_over_size: usize,

    /// Sets a hard limit in bytes on the memory used to buffer data between chunks:
    /// the carry-over buffer and the text run that hasn't been emitted yet.
    ///
    /// Exceeding the limit is a fatal error that halts the tokenizer.
    ///
    /// ### Default
    ///
    /// [`usize::MAX`], which means no limit.
    pub max_allowed_memory_usage: usize,
}

impl Default for MemorySettings {
    #[inline]
    fn default() -> Self {
        MemorySettings {
            preallocated_carry_over_size: 1024,
            max_allowed_memory_usage: usize::MAX,
        }
    }
}

/// Specifies settings for the [`Tokenizer`].
///
/// [`Tokenizer`]: crate::Tokenizer
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Settings<'s> {
    /// The [character encoding] of the input. The value should be a valid encoding label.
    /// Only ASCII-compatible encodings are supported.
    ///
    /// ### Default
    ///
    /// `"utf-8"`.
    ///
    /// [character encoding]: https://encoding.spec.whatwg.org/
    pub encoding: &'s str,

    /// The file name mentioned in the error messages.
    ///
    /// ### Default
    ///
    /// `None`.
    pub filename: Option<&'s str>,

    /// Tokenizes the input as XML. Implies `recognize_self_closing`.
    ///
    /// ### Default
    ///
    /// `false`.
    pub xml_mode: bool,

    /// If enabled, a self-closing tag (`<br/>`) produces a close tag event
    /// right after its open tag event.
    ///
    /// ### Default
    ///
    /// `false`.
    pub recognize_self_closing: bool,

    /// Specifies the memory settings.
    pub memory_settings: MemorySettings,
}

impl Settings<'_> {
    /// Creates settings for XML input.
    #[inline]
    #[must_use]
    pub fn xml() -> Self {
        Settings {
            xml_mode: true,
            ..Settings::default()
        }
    }

    #[inline]
    pub(crate) fn recognizes_self_closing(&self) -> bool {
        self.xml_mode || self.recognize_self_closing
    }
}

impl Default for Settings<'_> {
    #[inline]
    fn default() -> Self {
        Settings {
            encoding: "utf-8",
            filename: None,
            xml_mode: false,
            recognize_self_closing: false,
            memory_settings: MemorySettings::default(),
        }
    }
}
