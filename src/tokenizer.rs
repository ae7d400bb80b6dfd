use crate::base::AsciiCompatibleEncoding;
use crate::dispatcher::Dispatcher;
use crate::errors::{EncodingError, HtmlError, TokenizerError};
use crate::handlers::Handlers;
use crate::memory::{Arena, MemoryLimitExceededError, MemoryLimiter};
use crate::parser::{ParserState, Position, StateMachine};
use crate::settings::Settings;
use std::fmt::{self, Debug};

/// A streaming HTML/XML tokenizer.
///
/// The input is fed with [`write`] in chunks of arbitrary size, and the end of the input is
/// signalled with [`end`]. Events are dispatched to the [`Handlers`] as soon as their tokens
/// are complete. Tokens that span several chunks are buffered internally, so the produced
/// events don't depend on how the input is split.
///
/// [`write`]: Tokenizer::write
/// [`end`]: Tokenizer::end
pub struct Tokenizer<'h> {
    state_machine: StateMachine,
    pub(crate) dispatcher: Dispatcher<'h>,
    buffer: Arena,
    has_buffered_data: bool,
}

impl<'h> Tokenizer<'h> {
    /// Constructs a new tokenizer with the provided `handlers` and `settings`.
    ///
    /// # Errors
    ///
    /// Returns an error if the encoding label in `settings` is unknown or refers
    /// to an encoding that isn't ASCII-compatible.
    pub fn new(handlers: Handlers<'h>, settings: Settings<'_>) -> Result<Self, EncodingError> {
        let encoding = AsciiCompatibleEncoding::from_label(settings.encoding)?;
        let memory_settings = settings.memory_settings;
        let limiter = MemoryLimiter::new_shared(memory_settings.max_allowed_memory_usage);

        let state_machine = StateMachine::new(
            handlers.capabilities(),
            settings.recognizes_self_closing(),
            encoding.into(),
            limiter.clone(),
        );

        let dispatcher = Dispatcher::new(handlers, settings.filename.map(String::from));
        let buffer = Arena::new(limiter, memory_settings.preallocated_carry_over_size);

        Ok(Tokenizer {
            state_machine,
            dispatcher,
            buffer,
            has_buffered_data: false,
        })
    }

    fn buffer_blocked_bytes(
        &mut self,
        data: &[u8],
        blocked_byte_count: usize,
    ) -> Result<(), MemoryLimitExceededError> {
        if self.has_buffered_data {
            self.buffer.shrink_to_last(blocked_byte_count);
        } else {
            let blocked_bytes = &data[data.len() - blocked_byte_count..];

            self.buffer.init_with(blocked_bytes)?;
            self.has_buffered_data = true;
        }

        trace!(@buffer self.buffer);

        Ok(())
    }

    fn halt(&mut self) {
        self.state_machine.halt();
        self.buffer.clear();
        self.has_buffered_data = false;
    }

    #[inline]
    fn check_fatal(&mut self, result: Result<(), TokenizerError>) -> Result<(), TokenizerError> {
        if matches!(result, Err(ref e) if e.is_fatal()) {
            self.halt();
        }

        result
    }

    /// Writes a chunk of input.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    ///
    /// - a fatal syntax error has been found and no error handler is registered;
    /// - the memory limit has been exceeded;
    /// - one of the handlers has returned an error;
    /// - the tokenizer has been halted by a previous fatal error.
    ///
    /// After a handler error the tokenizer stays usable: the next `write` resumes
    /// right after the event that failed.
    pub fn write(&mut self, data: &[u8]) -> Result<(), TokenizerError> {
        trace!(@write data);

        if self.state_machine.is_halted() {
            return Err(TokenizerError::Halted);
        }

        if self.has_buffered_data {
            let appended = self.buffer.append(data).map_err(TokenizerError::from);

            self.check_fatal(appended)?;
        }

        let input = if self.has_buffered_data {
            self.buffer.bytes()
        } else {
            data
        };

        let result = self.state_machine.run(input, &mut self.dispatcher);
        let blocked_byte_count = self.state_machine.blocked_byte_count(input.len());

        self.state_machine.adjust_for_next_input();

        if blocked_byte_count > 0 {
            let buffered = self
                .buffer_blocked_bytes(data, blocked_byte_count)
                .map_err(TokenizerError::from);

            self.check_fatal(buffered)?;
        } else {
            self.has_buffered_data = false;
        }

        self.check_fatal(result)
    }

    /// Signals the end of the input.
    ///
    /// Pending text is emitted, and a token cut off by the end of the input is
    /// reported as a syntax error. The tokenizer can be reused for the next
    /// document after [`reset`](Tokenizer::reset).
    ///
    /// # Errors
    ///
    /// The same as for [`write`](Tokenizer::write).
    pub fn end(&mut self) -> Result<(), TokenizerError> {
        trace!(@end);

        self.write(&[])?;

        let input: &[u8] = if self.has_buffered_data {
            self.buffer.bytes()
        } else {
            &[]
        };

        let result = self.state_machine.finish(input, &mut self.dispatcher);

        self.buffer.clear();
        self.has_buffered_data = false;

        self.check_fatal(result)
    }

    /// An alias for [`write`](Tokenizer::write).
    #[inline]
    pub fn feed(&mut self, data: &[u8]) -> Result<(), TokenizerError> {
        self.write(data)
    }

    /// An alias for [`end`](Tokenizer::end).
    #[inline]
    pub fn finish(&mut self) -> Result<(), TokenizerError> {
        self.end()
    }

    /// Returns the tokenizer to its initial state, discarding any buffered input and
    /// the collected errors. The handlers and settings are kept.
    pub fn reset(&mut self) {
        self.state_machine.reset();
        self.dispatcher.reset();
        self.buffer.clear();
        self.has_buffered_data = false;
    }

    /// Recoverable syntax errors found so far.
    ///
    /// Errors consumed by an error handler aren't collected.
    #[inline]
    #[must_use]
    pub fn errors(&self) -> &[HtmlError] {
        self.dispatcher.errors()
    }

    /// The position right after the last scanned byte.
    #[inline]
    #[must_use]
    pub fn position(&self) -> Position {
        self.state_machine.position()
    }

    #[inline]
    #[must_use]
    pub fn state(&self) -> ParserState {
        self.state_machine.state()
    }

    /// Whether a fatal error has stopped the tokenization.
    #[inline]
    #[must_use]
    pub fn is_halted(&self) -> bool {
        self.state_machine.is_halted()
    }
}

// NOTE: this opaque Debug implementation is required to make
// `.unwrap_err()` and `.expect_err()` methods available on Result
// returned by the `Tokenizer::new` method.
impl Debug for Tokenizer<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Tokenizer")
            .field("state", &self.state())
            .field("position", &self.position())
            .finish_non_exhaustive()
    }
}
