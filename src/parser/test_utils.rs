use super::{Attributes, ParserOutputSink, Position};
use crate::errors::{ErrorKind, HtmlError, TokenizerError};

#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum Event {
    Text(String),
    OpenTag(String, Vec<(String, String)>, bool),
    CloseTag(String, bool),
    Attribute(String, String),
    ProcessingInstruction(String, String),
    Error(ErrorKind, Position),
}

#[derive(Default)]
pub(crate) struct RecordingSink {
    pub events: Vec<Event>,
}

impl ParserOutputSink for RecordingSink {
    fn handle_text(&mut self, text: &str) -> Result<(), TokenizerError> {
        self.events.push(Event::Text(text.into()));
        Ok(())
    }

    fn handle_open_tag(
        &mut self,
        name: &str,
        attributes: &Attributes,
        self_closing: bool,
    ) -> Result<(), TokenizerError> {
        let attributes = attributes
            .iter()
            .map(|a| (a.name().into(), a.value().into()))
            .collect();

        self.events
            .push(Event::OpenTag(name.into(), attributes, self_closing));
        Ok(())
    }

    fn handle_close_tag(&mut self, name: &str, self_closing: bool) -> Result<(), TokenizerError> {
        self.events.push(Event::CloseTag(name.into(), self_closing));
        Ok(())
    }

    fn handle_attribute(&mut self, name: &str, value: &str) -> Result<(), TokenizerError> {
        self.events
            .push(Event::Attribute(name.into(), value.into()));
        Ok(())
    }

    fn handle_processing_instruction(
        &mut self,
        name: &str,
        raw_body: &str,
    ) -> Result<(), TokenizerError> {
        self.events
            .push(Event::ProcessingInstruction(name.into(), raw_body.into()));
        Ok(())
    }

    fn report_error(&mut self, kind: ErrorKind, position: Position) -> Result<(), TokenizerError> {
        self.events.push(Event::Error(kind, position));

        if kind.is_fatal() {
            Err(TokenizerError::Syntax(HtmlError::new(kind, None, position)))
        } else {
            Ok(())
        }
    }
}
