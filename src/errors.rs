use crate::memory::MemoryLimitExceededError;
use crate::parser::Position;
use std::error::Error as StdError;
use std::fmt::{self, Display};
use std::io;
use thiserror::Error;

/// The kind of a syntax error found in the input.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[non_exhaustive]
pub enum ErrorKind {
    /// `<` found inside a tag that hasn't been terminated yet (e.g. `<<p>`).
    ///
    /// This is the only fatal kind: it halts tokenization.
    UnexpectedTagOpen,
    /// A tag without a name (e.g. `<>`, `</>` or `< />`).
    MissingTagName,
    /// A quoted attribute value without a closing quote.
    UnclosedAttributeValue,
    /// A `"` that neither opens nor closes an attribute value.
    DoubleQuoteInAttribute,
    /// A tag name immediately followed by `=` (e.g. `<a=b>`).
    AssignInTagName,
    /// The input ended inside a tag.
    UnterminatedTag,
    /// The input ended inside a processing instruction.
    UnterminatedProcessingInstruction,
}

impl ErrorKind {
    #[inline]
    #[must_use]
    pub fn is_fatal(self) -> bool {
        matches!(self, ErrorKind::UnexpectedTagOpen)
    }

    #[must_use]
    pub fn message(self) -> &'static str {
        match self {
            ErrorKind::UnexpectedTagOpen => "unexpected `<`",
            ErrorKind::MissingTagName => "no tag name specified",
            ErrorKind::UnclosedAttributeValue => "unclosed attribute value",
            ErrorKind::DoubleQuoteInAttribute => "double-quote found inside attribute",
            ErrorKind::AssignInTagName => "`=` found inside tag name",
            ErrorKind::UnterminatedTag => "tag is not terminated before the end of input",
            ErrorKind::UnterminatedProcessingInstruction => {
                "processing instruction is not terminated before the end of input"
            }
        }
    }
}

impl Display for ErrorKind {
    #[inline]
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.message())
    }
}

/// A syntax error with its location in the input.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HtmlError {
    kind: ErrorKind,
    filename: Option<String>,
    position: Position,
}

impl HtmlError {
    pub(crate) fn new(kind: ErrorKind, filename: Option<String>, position: Position) -> Self {
        HtmlError {
            kind,
            filename,
            position,
        }
    }

    #[inline]
    #[must_use]
    pub fn kind(&self) -> ErrorKind {
        self.kind
    }

    #[inline]
    #[must_use]
    pub fn message(&self) -> &'static str {
        self.kind.message()
    }

    /// The file name configured for diagnostics, if any.
    #[inline]
    #[must_use]
    pub fn filename(&self) -> Option<&str> {
        self.filename.as_deref()
    }

    #[inline]
    #[must_use]
    pub fn position(&self) -> Position {
        self.position
    }

    #[inline]
    #[must_use]
    pub fn line(&self) -> usize {
        self.position.line
    }

    #[inline]
    #[must_use]
    pub fn column(&self) -> usize {
        self.position.column
    }

    #[inline]
    #[must_use]
    pub fn is_fatal(&self) -> bool {
        self.kind.is_fatal()
    }
}

impl Display for HtmlError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("Syntax Error: ")?;

        if let Some(filename) = &self.filename {
            write!(f, "{filename}: ")?;
        }

        write!(f, "{}\n\t{}", self.position, self.kind)
    }
}

impl StdError for HtmlError {}

/// An error that occurs when an invalid encoding is provided in [`Settings`].
///
/// [`Settings`]: crate::Settings
#[derive(Error, Debug, PartialEq, Eq, Copy, Clone)]
pub enum EncodingError {
    /// The provided value doesn't match any of the [labels specified in the standard].
    ///
    /// [labels specified in the standard]: https://encoding.spec.whatwg.org/#names-and-labels
    #[error("Unknown character encoding has been provided.")]
    UnknownEncoding,

    /// The provided label is for one of the non-ASCII-compatible encodings
    /// (`UTF-16LE`, `UTF-16BE`, `ISO-2022-JP`).
    #[error("Expected ASCII-compatible encoding.")]
    NonAsciiCompatibleEncoding,
}

/// An error that occurs while feeding input into the [`Tokenizer`].
///
/// [`Tokenizer`]: crate::Tokenizer
#[derive(Error, Debug)]
pub enum TokenizerError {
    /// A fatal syntax error. It's returned only when no error handler is registered,
    /// otherwise the error is passed to the handler.
    #[error("{0}")]
    Syntax(HtmlError),

    /// The carry-over buffer for a token spanning several chunks, or a pending
    /// text run, has outgrown the configured memory limit.
    #[error("{0}")]
    MemoryLimitExceeded(#[from] MemoryLimitExceededError),

    /// An error returned by one of the event handlers.
    #[error("Event handler error: {0}")]
    HandlerError(Box<dyn StdError + Send + Sync>),

    /// The input source could not be read.
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// The tokenizer has been halted by a previous fatal error.
    #[error("The tokenizer has been halted by a fatal error, it should be reset before use.")]
    Halted,
}

impl TokenizerError {
    /// Fatal errors halt the tokenizer until it is reset.
    #[must_use]
    pub fn is_fatal(&self) -> bool {
        matches!(
            self,
            TokenizerError::Syntax(_) | TokenizerError::MemoryLimitExceeded(_) | TokenizerError::Halted
        )
    }
}
