mod byte_class;
mod position;
mod tag_parser;
mod text_decoder;

#[cfg(test)]
pub(crate) mod test_utils;

use self::byte_class::{classify, is_whitespace, ByteClass};
use self::tag_parser::TagParser;
use self::text_decoder::TextDecoder;
use crate::base::{Align, Bytes};
use crate::errors::{ErrorKind, TokenizerError};
use crate::handlers::HandlerCapabilities;
use crate::memory::SharedMemoryLimiter;
use encoding_rs::Encoding;
use memchr::{memchr, memchr2};

pub use self::position::Position;
pub use self::tag_parser::{Attribute, Attributes};

/// The state of the tokenizer.
///
/// `Text` is both the initial state and the state between tokens.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ParserState {
    #[default]
    Text,
    /// After `<`, inside an element tag.
    TagOpen,
    /// After `</`, inside an end tag.
    TagClose,
    /// After `<?`, inside a processing instruction.
    Instruction,
}

pub(crate) trait ParserOutputSink {
    fn handle_text(&mut self, text: &str) -> Result<(), TokenizerError>;

    fn handle_open_tag(
        &mut self,
        name: &str,
        attributes: &Attributes,
        self_closing: bool,
    ) -> Result<(), TokenizerError>;

    fn handle_close_tag(&mut self, name: &str, self_closing: bool) -> Result<(), TokenizerError>;

    fn handle_attribute(&mut self, name: &str, value: &str) -> Result<(), TokenizerError>;

    fn handle_processing_instruction(
        &mut self,
        name: &str,
        raw_body: &str,
    ) -> Result<(), TokenizerError>;

    fn report_error(&mut self, kind: ErrorKind, position: Position) -> Result<(), TokenizerError>;
}

// The state machine scans every byte of the logical input exactly once.
//
// Offsets are relative to the input of the current `run` call. When the input ends
// in the middle of a token, the bytes from the token start are blocked: the caller
// must prepend them to the next input and call `adjust_for_next_input` to realign
// the offsets. Text runs are never blocked, they are streamed into the text decoder.
pub(crate) struct StateMachine {
    state: ParserState,
    next_pos: usize,
    // NOTE: start of the current tag content, i.e. the position right
    // after `<`, `</` or `<?`. Meaningful only outside of the `Text` state.
    token_start: usize,
    question_mark_seen: bool,
    position: Position,
    halted: bool,
    encoding: &'static Encoding,
    text_decoder: TextDecoder,
    decode_text: bool,
    lex_tags: bool,
    lex_end_tags: bool,
    lex_instructions: bool,
    recognize_self_closing: bool,
}

impl StateMachine {
    pub fn new(
        capabilities: HandlerCapabilities,
        recognize_self_closing: bool,
        encoding: &'static Encoding,
        limiter: SharedMemoryLimiter,
    ) -> Self {
        StateMachine {
            state: ParserState::Text,
            next_pos: 0,
            token_start: 0,
            question_mark_seen: false,
            position: Position::default(),
            halted: false,
            encoding,
            text_decoder: TextDecoder::new(encoding, limiter),
            decode_text: capabilities.contains(HandlerCapabilities::TEXT),
            lex_tags: capabilities.requires_tag_lexing(recognize_self_closing),
            lex_end_tags: capabilities.contains(HandlerCapabilities::CLOSE_TAGS),
            lex_instructions: capabilities.contains(HandlerCapabilities::PROCESSING_INSTRUCTIONS),
            recognize_self_closing,
        }
    }

    #[inline]
    pub fn state(&self) -> ParserState {
        self.state
    }

    #[inline]
    pub fn position(&self) -> Position {
        self.position
    }

    #[inline]
    pub fn is_halted(&self) -> bool {
        self.halted
    }

    pub fn halt(&mut self) {
        self.halted = true;
        self.text_decoder.reset();
    }

    pub fn reset(&mut self) {
        self.state = ParserState::Text;
        self.next_pos = 0;
        self.token_start = 0;
        self.question_mark_seen = false;
        self.position = Position::default();
        self.halted = false;
        self.text_decoder.reset();
    }

    pub fn run<S: ParserOutputSink>(
        &mut self,
        input: &[u8],
        sink: &mut S,
    ) -> Result<(), TokenizerError> {
        while !self.halted && self.next_pos < input.len() {
            match self.state {
                ParserState::Text => self.text_state(input, sink)?,
                ParserState::TagOpen => self.tag_open_state(input, sink)?,
                ParserState::TagClose => self.tag_close_state(input, sink)?,
                ParserState::Instruction => self.instruction_state(input, sink)?,
            }
        }

        Ok(())
    }

    // Finishes the logical input. `input` contains the blocked bytes of the
    // pending token, if there is one.
    pub fn finish<S: ParserOutputSink>(
        &mut self,
        input: &[u8],
        sink: &mut S,
    ) -> Result<(), TokenizerError> {
        let state = self.state;
        let token_start = self.token_start;

        self.switch_state(ParserState::Text);
        self.next_pos = 0;
        self.token_start = 0;

        match state {
            ParserState::Text => {
                if let Some(text) = self.text_decoder.finish()? {
                    trace!(@event "text", text);
                    sink.handle_text(&text)?;
                }
            }
            ParserState::TagOpen => {
                let raw = input.get(token_start..).unwrap_or_default();

                let tag = TagParser::new(raw, self.encoding, self.position, sink)
                    .diagnostics_only()
                    .parse()?;

                if tag.error_count == 0 {
                    sink.report_error(ErrorKind::UnterminatedTag, self.position)?;
                }
            }
            ParserState::TagClose => {
                sink.report_error(ErrorKind::UnterminatedTag, self.position)?;
            }
            ParserState::Instruction => {
                sink.report_error(ErrorKind::UnterminatedProcessingInstruction, self.position)?;
            }
        }

        Ok(())
    }

    #[inline]
    fn blocked_start(&self) -> usize {
        match self.state {
            ParserState::Text => self.next_pos,
            _ => self.token_start,
        }
    }

    // NOTE: besides the bytes of an unfinished token this includes bytes that
    // haven't been scanned at all because an event handler has failed.
    #[inline]
    pub fn blocked_byte_count(&self, input_len: usize) -> usize {
        if self.halted {
            0
        } else {
            input_len - self.blocked_start()
        }
    }

    pub fn adjust_for_next_input(&mut self) {
        if self.halted {
            return;
        }

        let offset = self.blocked_start();

        self.next_pos.align(offset);

        if self.state != ParserState::Text {
            self.token_start.align(offset);
        }
    }

    #[inline]
    fn switch_state(&mut self, state: ParserState) {
        trace!(@state state);

        self.state = state;
        self.question_mark_seen = false;
    }

    #[inline]
    fn enter_markup(&mut self, state: ParserState, marker: u8) {
        self.position.advance(marker);
        self.next_pos += 1;
        self.token_start = self.next_pos;
        self.switch_state(state);
    }

    #[inline]
    fn leave_markup(&mut self, tag_end: usize) {
        self.position.advance(b'>');
        self.next_pos = tag_end + 1;
        self.token_start = 0;
        self.switch_state(ParserState::Text);
    }

    fn fail<S: ParserOutputSink>(
        &mut self,
        kind: ErrorKind,
        sink: &mut S,
    ) -> Result<(), TokenizerError> {
        trace!(@event "fatal error", kind, self.position);

        self.halt();
        sink.report_error(kind, self.position)
    }

    #[inline]
    fn decode(&self, bytes: &[u8]) -> String {
        Bytes::from(bytes).as_string(self.encoding)
    }

    fn consume_text(&mut self, raw: &[u8]) -> Result<(), TokenizerError> {
        self.position.advance_over(raw);

        if self.decode_text {
            self.text_decoder.feed(raw)?;
        }

        Ok(())
    }

    fn text_state<S: ParserOutputSink>(
        &mut self,
        input: &[u8],
        sink: &mut S,
    ) -> Result<(), TokenizerError> {
        let text_start = self.next_pos;

        let Some(offset) = memchr(b'<', &input[text_start..]) else {
            self.consume_text(&input[text_start..])?;
            self.next_pos = input.len();

            return Ok(());
        };

        let tag_open = text_start + offset;

        self.consume_text(&input[text_start..tag_open])?;

        let text = self.text_decoder.finish()?;

        self.next_pos = tag_open;
        self.enter_markup(ParserState::TagOpen, b'<');

        if let Some(text) = text {
            trace!(@event "text", text);
            sink.handle_text(&text)?;
        }

        Ok(())
    }

    fn tag_open_state<S: ParserOutputSink>(
        &mut self,
        input: &[u8],
        sink: &mut S,
    ) -> Result<(), TokenizerError> {
        if self.next_pos == self.token_start {
            let marker = input[self.next_pos];

            match classify(marker) {
                ByteClass::Slash => {
                    self.enter_markup(ParserState::TagClose, marker);
                    return Ok(());
                }
                ByteClass::Question => {
                    self.enter_markup(ParserState::Instruction, marker);
                    return Ok(());
                }
                _ => (),
            }
        }

        let Some(tag_end) = self.find_tag_end(input, sink)? else {
            return Ok(());
        };

        let raw = &input[self.token_start..tag_end];
        let error_position = self.position;

        self.leave_markup(tag_end);

        let parser = TagParser::new(raw, self.encoding, error_position, sink);

        // NOTE: tags nobody listens to are still validated, so the reported
        // errors don't depend on the registered handlers.
        if !self.lex_tags {
            parser.diagnostics_only().parse()?;

            return Ok(());
        }

        let tag = parser.parse()?;

        if let Some(name) = tag.name {
            trace!(@event "open tag", name, tag.attributes, tag.self_closing);
            sink.handle_open_tag(&name, &tag.attributes, tag.self_closing)?;

            if tag.self_closing && self.recognize_self_closing {
                trace!(@event "close tag", name, true);
                sink.handle_close_tag(&name, true)?;
            }
        }

        Ok(())
    }

    fn tag_close_state<S: ParserOutputSink>(
        &mut self,
        input: &[u8],
        sink: &mut S,
    ) -> Result<(), TokenizerError> {
        let Some(tag_end) = self.find_tag_end(input, sink)? else {
            return Ok(());
        };

        let raw = &input[self.token_start..tag_end];
        let error_position = self.position;

        self.leave_markup(tag_end);

        if raw.iter().all(|&b| is_whitespace(b)) {
            sink.report_error(ErrorKind::MissingTagName, error_position)
        } else if self.lex_end_tags {
            let name = self.decode(raw);

            trace!(@event "close tag", name, false);
            sink.handle_close_tag(&name, false)
        } else {
            Ok(())
        }
    }

    fn instruction_state<S: ParserOutputSink>(
        &mut self,
        input: &[u8],
        sink: &mut S,
    ) -> Result<(), TokenizerError> {
        let scan_start = self.next_pos;

        let Some(tag_end) = self.find_tag_end(input, sink)? else {
            if !self.halted {
                if let Some(&last) = input[scan_start..].last() {
                    self.question_mark_seen = last == b'?';
                }
            }

            return Ok(());
        };

        let terminated = if tag_end > scan_start {
            input[tag_end - 1] == b'?'
        } else {
            self.question_mark_seen
        };

        if !terminated {
            // NOTE: `>` that isn't preceded by `?` is a part of the instruction body.
            self.position.advance(b'>');
            self.next_pos = tag_end + 1;
            self.question_mark_seen = false;

            return Ok(());
        }

        let body = &input[self.token_start..tag_end - 1];

        self.leave_markup(tag_end);

        if self.lex_instructions {
            let name_len = body
                .iter()
                .position(|&b| is_whitespace(b))
                .unwrap_or(body.len());

            let name = self.decode(&body[..name_len]);
            let raw_body = self.decode(body);

            trace!(@event "processing instruction", name, raw_body);
            sink.handle_processing_instruction(&name, &raw_body)?;
        }

        Ok(())
    }

    // Looks for the `>` that terminates the current markup. `<` found on the way
    // is a fatal error. The position is left at the found byte.
    fn find_tag_end<S: ParserOutputSink>(
        &mut self,
        input: &[u8],
        sink: &mut S,
    ) -> Result<Option<usize>, TokenizerError> {
        let start = self.next_pos;

        match memchr2(b'<', b'>', &input[start..]) {
            Some(offset) => {
                let pos = start + offset;

                self.position.advance_over(&input[start..pos]);
                self.next_pos = pos;

                if input[pos] == b'<' {
                    self.fail(ErrorKind::UnexpectedTagOpen, sink)?;

                    Ok(None)
                } else {
                    Ok(Some(pos))
                }
            }
            None => {
                self.position.advance_over(&input[start..]);
                self.next_pos = input.len();

                Ok(None)
            }
        }
    }
}
