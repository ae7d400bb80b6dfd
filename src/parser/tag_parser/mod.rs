mod attributes;

use super::byte_class::{classify, is_whitespace, ByteClass};
use super::{ParserOutputSink, Position};
use crate::base::Bytes;
use crate::errors::{ErrorKind, TokenizerError};
use encoding_rs::Encoding;
use memchr::memchr;

pub use self::attributes::{Attribute, Attributes};

#[derive(Debug, Default)]
pub(crate) struct ParsedTag {
    pub name: Option<String>,
    pub attributes: Attributes,
    pub self_closing: bool,
    pub error_count: usize,
}

// Parses the content of an element tag, i.e. everything between `<` and `>`.
//
// The first token is the tag name. It's followed by attributes that are separated by
// whitespace, and each attribute may have a quoted or unquoted value. Attributes are
// reported to the sink as soon as they are recognized. Errors are reported at the position
// of the tag end. `/` makes the tag self-closing only if it's the last byte of the tag,
// elsewhere it's an ordinary byte of a token.
pub(crate) struct TagParser<'i, 's, S: ParserOutputSink> {
    input: &'i [u8],
    pos: usize,
    encoding: &'static Encoding,
    position: Position,
    collect: bool,
    sink: &'s mut S,
    tag: ParsedTag,
}

impl<'i, 's, S: ParserOutputSink> TagParser<'i, 's, S> {
    pub fn new(
        input: &'i [u8],
        encoding: &'static Encoding,
        position: Position,
        sink: &'s mut S,
    ) -> Self {
        TagParser {
            input,
            pos: 0,
            encoding,
            position,
            collect: true,
            sink,
            tag: ParsedTag::default(),
        }
    }

    // NOTE: used for tags that never produce events, i.e. tags that are cut off
    // by the end of input or tags nobody listens to. The name and attributes
    // aren't decoded, but syntax errors are still reported.
    pub fn diagnostics_only(mut self) -> Self {
        self.collect = false;
        self
    }

    pub fn parse(mut self) -> Result<ParsedTag, TokenizerError> {
        self.skip_whitespace();

        let name = self.take_while(|b| {
            !matches!(
                classify(b),
                ByteClass::Whitespace | ByteClass::Slash | ByteClass::Equals | ByteClass::Quote
            )
        });

        match self.peek() {
            Some(ByteClass::Equals) => {
                self.report(ErrorKind::AssignInTagName)?;
                self.pos += 1;
            }
            Some(ByteClass::Quote) => {
                self.report(ErrorKind::DoubleQuoteInAttribute)?;
                self.pos += 1;
            }
            _ => (),
        }

        if name.is_empty() {
            self.report(ErrorKind::MissingTagName)?;
        } else {
            if self.collect {
                self.tag.name = Some(self.decode(name));
            }

            self.parse_attributes()?;
        }

        Ok(self.tag)
    }

    fn parse_attributes(&mut self) -> Result<(), TokenizerError> {
        loop {
            self.skip_whitespace();

            let Some(class) = self.peek() else {
                return Ok(());
            };

            match class {
                ByteClass::Slash if self.at_last_byte() => {
                    self.tag.self_closing = true;
                    self.pos += 1;
                }
                ByteClass::Quote => {
                    self.report(ErrorKind::DoubleQuoteInAttribute)?;
                    self.pos += 1;
                }
                // NOTE: `=` without a preceding attribute name.
                ByteClass::Equals => self.pos += 1,
                _ => self.parse_attribute()?,
            }
        }
    }

    fn parse_attribute(&mut self) -> Result<(), TokenizerError> {
        let name = self.take_token(|class| {
            matches!(
                class,
                ByteClass::Whitespace | ByteClass::Equals | ByteClass::Quote
            )
        });

        self.skip_whitespace();

        let value = if self.peek() == Some(ByteClass::Equals) {
            self.pos += 1;
            self.skip_whitespace();
            self.parse_value()?
        } else {
            &[]
        };

        if self.collect {
            let name = self.decode(name);
            let value = self.decode(value);

            self.sink.handle_attribute(&name, &value)?;
            self.tag.attributes.set(name, value);
        }

        Ok(())
    }

    fn parse_value(&mut self) -> Result<&'i [u8], TokenizerError> {
        let input = self.input;

        match self.peek() {
            Some(ByteClass::Quote) => {
                let start = self.pos + 1;

                match memchr(b'"', &input[start..]) {
                    Some(len) => {
                        self.pos = start + len + 1;
                        Ok(&input[start..start + len])
                    }
                    None => {
                        self.report(ErrorKind::UnclosedAttributeValue)?;
                        self.pos = input.len();
                        Ok(&input[start..])
                    }
                }
            }
            Some(_) => {
                let value = self.take_token(|class| class == ByteClass::Whitespace);

                if memchr(b'"', value).is_some() {
                    self.report(ErrorKind::DoubleQuoteInAttribute)?;
                }

                Ok(value)
            }
            None => Ok(&[]),
        }
    }

    #[inline]
    fn peek(&self) -> Option<ByteClass> {
        self.input.get(self.pos).map(|&b| classify(b))
    }

    #[inline]
    fn skip_whitespace(&mut self) {
        self.take_while(is_whitespace);
    }

    #[inline]
    fn at_last_byte(&self) -> bool {
        self.pos + 1 == self.input.len()
    }

    // NOTE: `/` is a part of the token unless it's the last byte of the tag.
    fn take_token(&mut self, is_delimiter: impl Fn(ByteClass) -> bool) -> &'i [u8] {
        let input = self.input;
        let start = self.pos;
        let last = input.len().saturating_sub(1);

        self.pos += input[start..]
            .iter()
            .enumerate()
            .take_while(|&(offset, &b)| match classify(b) {
                ByteClass::Slash => start + offset != last,
                class => !is_delimiter(class),
            })
            .count();

        &input[start..self.pos]
    }

    #[inline]
    fn take_while(&mut self, predicate: impl Fn(u8) -> bool) -> &'i [u8] {
        let input = self.input;
        let start = self.pos;

        self.pos += input[start..]
            .iter()
            .take_while(|&&b| predicate(b))
            .count();

        &input[start..self.pos]
    }

    #[inline]
    fn decode(&self, bytes: &[u8]) -> String {
        Bytes::from(bytes).as_string(self.encoding)
    }

    fn report(&mut self, kind: ErrorKind) -> Result<(), TokenizerError> {
        self.tag.error_count += 1;
        self.sink.report_error(kind, self.position)
    }
}
