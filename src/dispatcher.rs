use crate::errors::{ErrorKind, HtmlError, TokenizerError};
use crate::handlers::{HandlerResult, Handlers};
use crate::parser::{Attributes, ParserOutputSink, Position};

#[inline]
fn handler_result(result: HandlerResult) -> Result<(), TokenizerError> {
    result.map_err(TokenizerError::HandlerError)
}

// Routes the parser output to the user handlers and collects the
// recoverable errors that aren't consumed by an error handler.
pub(crate) struct Dispatcher<'h> {
    handlers: Handlers<'h>,
    configured_filename: Option<String>,
    filename: Option<String>,
    errors: Vec<HtmlError>,
}

impl<'h> Dispatcher<'h> {
    pub fn new(handlers: Handlers<'h>, filename: Option<String>) -> Self {
        Dispatcher {
            handlers,
            configured_filename: filename.clone(),
            filename,
            errors: Vec::new(),
        }
    }

    #[inline]
    pub fn errors(&self) -> &[HtmlError] {
        &self.errors
    }

    #[inline]
    pub fn has_filename(&self) -> bool {
        self.filename.is_some()
    }

    #[inline]
    pub fn set_filename(&mut self, filename: Option<String>) {
        self.filename = filename;
    }

    pub fn reset(&mut self) {
        self.errors.clear();
        self.filename.clone_from(&self.configured_filename);
    }
}

impl ParserOutputSink for Dispatcher<'_> {
    #[inline]
    fn handle_text(&mut self, text: &str) -> Result<(), TokenizerError> {
        match self.handlers.text {
            Some(ref mut handler) => handler_result(handler(text)),
            None => Ok(()),
        }
    }

    #[inline]
    fn handle_open_tag(
        &mut self,
        name: &str,
        attributes: &Attributes,
        self_closing: bool,
    ) -> Result<(), TokenizerError> {
        match self.handlers.open_tag {
            Some(ref mut handler) => handler_result(handler(name, attributes, self_closing)),
            None => Ok(()),
        }
    }

    #[inline]
    fn handle_close_tag(&mut self, name: &str, self_closing: bool) -> Result<(), TokenizerError> {
        match self.handlers.close_tag {
            Some(ref mut handler) => handler_result(handler(name, self_closing)),
            None => Ok(()),
        }
    }

    #[inline]
    fn handle_attribute(&mut self, name: &str, value: &str) -> Result<(), TokenizerError> {
        match self.handlers.attribute {
            Some(ref mut handler) => handler_result(handler(name, value)),
            None => Ok(()),
        }
    }

    #[inline]
    fn handle_processing_instruction(
        &mut self,
        name: &str,
        raw_body: &str,
    ) -> Result<(), TokenizerError> {
        match self.handlers.processing_instruction {
            Some(ref mut handler) => handler_result(handler(name, raw_body)),
            None => Ok(()),
        }
    }

    fn report_error(&mut self, kind: ErrorKind, position: Position) -> Result<(), TokenizerError> {
        let error = HtmlError::new(kind, self.filename.clone(), position);

        match self.handlers.error {
            Some(ref mut handler) => {
                handler(&error);
                Ok(())
            }
            None if error.is_fatal() => Err(TokenizerError::Syntax(error)),
            None => {
                self.errors.push(error);
                Ok(())
            }
        }
    }
}
