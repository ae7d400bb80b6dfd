use crate::errors::HtmlError;
use crate::parser::Attributes;
use bitflags::bitflags;
use std::error::Error;

/// The result type returned by the event handlers.
///
/// An error returned from a handler stops the current [`write`] or [`end`] call and is
/// propagated to the caller as [`TokenizerError::HandlerError`].
///
/// [`write`]: crate::Tokenizer::write
/// [`end`]: crate::Tokenizer::end
/// [`TokenizerError::HandlerError`]: crate::TokenizerError::HandlerError
pub type HandlerResult = Result<(), Box<dyn Error + Send + Sync>>;

/// Handler for an element open tag: name, attributes and the self-closing flag.
pub type OpenTagHandler<'h> = Box<dyn FnMut(&str, &Attributes, bool) -> HandlerResult + 'h>;
/// Handler for an element close tag: name and whether it's produced by a self-closing tag.
pub type CloseTagHandler<'h> = Box<dyn FnMut(&str, bool) -> HandlerResult + 'h>;
/// Handler for a text run between two pieces of markup.
pub type TextHandler<'h> = Box<dyn FnMut(&str) -> HandlerResult + 'h>;
/// Handler for a single attribute, invoked before the open tag handler of its element.
pub type AttributeHandler<'h> = Box<dyn FnMut(&str, &str) -> HandlerResult + 'h>;
/// Handler for a processing instruction: name and raw body.
pub type ProcessingInstructionHandler<'h> = Box<dyn FnMut(&str, &str) -> HandlerResult + 'h>;
/// Handler for syntax errors.
pub type ErrorHandler<'h> = Box<dyn FnMut(&HtmlError) + 'h>;

bitflags! {
    /// Parts of the tokenization output requested by the registered handlers.
    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    pub struct HandlerCapabilities: u8 {
        const TEXT                    = 0b0000_0001;
        const OPEN_TAGS               = 0b0000_0010;
        const CLOSE_TAGS              = 0b0000_0100;
        const ATTRIBUTES              = 0b0000_1000;
        const PROCESSING_INSTRUCTIONS = 0b0001_0000;
        const ERRORS                  = 0b0010_0000;
    }
}

impl HandlerCapabilities {
    // NOTE: names and attributes of element tags need to be decoded only if they're
    // consumed by a handler. Otherwise tags are scanned for syntax errors only.
    #[inline]
    pub(crate) fn requires_tag_lexing(self, recognize_self_closing: bool) -> bool {
        self.intersects(Self::OPEN_TAGS | Self::ATTRIBUTES)
            || (recognize_self_closing && self.contains(Self::CLOSE_TAGS))
    }
}

/// A set of optional event handlers.
///
/// # Example
/// ```
/// use tagstream::Handlers;
///
/// let handlers = Handlers::default()
///     .open_tag(|name, attributes, _| {
///         println!("<{name}> with {} attributes", attributes.len());
///         Ok(())
///     })
///     .text(|text| {
///         println!("{text:?}");
///         Ok(())
///     });
/// ```
#[derive(Default)]
pub struct Handlers<'h> {
    pub(crate) open_tag: Option<OpenTagHandler<'h>>,
    pub(crate) close_tag: Option<CloseTagHandler<'h>>,
    pub(crate) text: Option<TextHandler<'h>>,
    pub(crate) attribute: Option<AttributeHandler<'h>>,
    pub(crate) processing_instruction: Option<ProcessingInstructionHandler<'h>>,
    pub(crate) error: Option<ErrorHandler<'h>>,
}

impl<'h> Handlers<'h> {
    #[inline]
    #[must_use]
    pub fn open_tag(
        mut self,
        handler: impl FnMut(&str, &Attributes, bool) -> HandlerResult + 'h,
    ) -> Self {
        self.open_tag = Some(Box::new(handler));
        self
    }

    #[inline]
    #[must_use]
    pub fn close_tag(mut self, handler: impl FnMut(&str, bool) -> HandlerResult + 'h) -> Self {
        self.close_tag = Some(Box::new(handler));
        self
    }

    #[inline]
    #[must_use]
    pub fn text(mut self, handler: impl FnMut(&str) -> HandlerResult + 'h) -> Self {
        self.text = Some(Box::new(handler));
        self
    }

    #[inline]
    #[must_use]
    pub fn attribute(mut self, handler: impl FnMut(&str, &str) -> HandlerResult + 'h) -> Self {
        self.attribute = Some(Box::new(handler));
        self
    }

    #[inline]
    #[must_use]
    pub fn processing_instruction(
        mut self,
        handler: impl FnMut(&str, &str) -> HandlerResult + 'h,
    ) -> Self {
        self.processing_instruction = Some(Box::new(handler));
        self
    }

    /// Registers a handler for syntax errors.
    ///
    /// Fatal errors are forwarded to this handler instead of being returned from
    /// [`write`](crate::Tokenizer::write); the tokenizer is halted regardless.
    #[inline]
    #[must_use]
    pub fn error(mut self, handler: impl FnMut(&HtmlError) + 'h) -> Self {
        self.error = Some(Box::new(handler));
        self
    }

    #[must_use]
    pub fn capabilities(&self) -> HandlerCapabilities {
        let mut capabilities = HandlerCapabilities::empty();

        capabilities.set(HandlerCapabilities::TEXT, self.text.is_some());
        capabilities.set(HandlerCapabilities::OPEN_TAGS, self.open_tag.is_some());
        capabilities.set(HandlerCapabilities::CLOSE_TAGS, self.close_tag.is_some());
        capabilities.set(HandlerCapabilities::ATTRIBUTES, self.attribute.is_some());
        capabilities.set(
            HandlerCapabilities::PROCESSING_INSTRUCTIONS,
            self.processing_instruction.is_some(),
        );
        capabilities.set(HandlerCapabilities::ERRORS, self.error.is_some());

        capabilities
    }
}
