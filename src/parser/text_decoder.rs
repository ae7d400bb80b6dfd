use crate::memory::{MemoryLimitExceededError, SharedMemoryLimiter};
use encoding_rs::{CoderResult, Decoder, Encoding};

const DECODING_BUFFER_SIZE: usize = 1024;

// Decodes a text run that may arrive in several pieces. The streaming
// decoder keeps incomplete multi-byte sequences between calls, and the
// decoded text is accumulated until the run ends.
pub(crate) struct TextDecoder {
    encoding: &'static Encoding,
    pending_text_streaming_decoder: Option<Decoder>,
    decoding_buffer: String,
    text: String,
    limiter: SharedMemoryLimiter,
    accounted_usage: usize,
}

impl TextDecoder {
    pub fn new(encoding: &'static Encoding, limiter: SharedMemoryLimiter) -> Self {
        TextDecoder {
            encoding,
            pending_text_streaming_decoder: None,
            decoding_buffer: "\0".repeat(DECODING_BUFFER_SIZE),
            text: String::new(),
            limiter,
            accounted_usage: 0,
        }
    }

    #[inline]
    pub fn has_pending_text(&self) -> bool {
        self.pending_text_streaming_decoder.is_some()
    }

    pub fn feed(&mut self, raw_input: &[u8]) -> Result<(), MemoryLimitExceededError> {
        if raw_input.is_empty() {
            return Ok(());
        }

        self.decode(raw_input, false)?;
        self.account_usage()
    }

    // Finishes the current text run. Returns `None` if no bytes
    // have been fed since the previous run has ended.
    pub fn finish(&mut self) -> Result<Option<String>, MemoryLimitExceededError> {
        if !self.has_pending_text() {
            return Ok(None);
        }

        self.decode(&[], true)?;
        self.pending_text_streaming_decoder = None;
        self.release_usage();

        Ok(Some(std::mem::take(&mut self.text)))
    }

    pub fn reset(&mut self) {
        self.pending_text_streaming_decoder = None;
        self.text.clear();
        self.release_usage();
    }

    #[inline(never)]
    fn decode(&mut self, mut raw_input: &[u8], last: bool) -> Result<(), MemoryLimitExceededError> {
        let encoding = self.encoding;
        let buffer = self.decoding_buffer.as_mut_str();

        let decoder = self
            .pending_text_streaming_decoder
            .get_or_insert_with(|| encoding.new_decoder_without_bom_handling());

        loop {
            let (status, read, written, ..) = decoder.decode_to_str(raw_input, buffer, last);

            self.text.push_str(&buffer[..written]);

            if status == CoderResult::InputEmpty {
                return Ok(());
            }

            raw_input = &raw_input[read..];
        }
    }

    fn account_usage(&mut self) -> Result<(), MemoryLimitExceededError> {
        let usage = self.text.len();

        if usage > self.accounted_usage {
            let delta = usage - self.accounted_usage;

            self.limiter.borrow_mut().increase_usage(delta)?;
            self.accounted_usage = usage;
        }

        Ok(())
    }

    fn release_usage(&mut self) {
        self.limiter
            .borrow_mut()
            .decrease_usage(self.accounted_usage);

        self.accounted_usage = 0;
    }
}
