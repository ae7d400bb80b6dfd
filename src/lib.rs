//! `tagstream` is an incremental, event-driven HTML/XML tokenizer.
//!
//! The tokenizer consumes raw byte chunks and emits structural events (open tag, close tag,
//! text run, attribute, processing instruction and error) without building a DOM or requiring
//! the whole document to be in memory. Tags, attribute values and multi-byte characters that
//! span chunk boundaries are handled as if the input were contiguous.
//!
//! ```
//! use std::cell::RefCell;
//! use tagstream::{Handlers, Settings, Tokenizer};
//!
//! let names = RefCell::new(Vec::new());
//!
//! let mut tokenizer = Tokenizer::new(
//!     Handlers::default().open_tag(|name, _attributes, _self_closing| {
//!         names.borrow_mut().push(name.to_owned());
//!         Ok(())
//!     }),
//!     Settings::default(),
//! )
//! .unwrap();
//!
//! tokenizer.write(b"<div><sp").unwrap();
//! tokenizer.write(b"an class=\"x\">text</span></div>").unwrap();
//! tokenizer.end().unwrap();
//!
//! drop(tokenizer);
//!
//! assert_eq!(names.into_inner(), ["div", "span"]);
//! ```

#[macro_use]
mod debug_trace;

mod base;
mod dispatcher;
mod errors;
mod handlers;
mod memory;
mod parser;
mod reader;
mod settings;
mod tokenizer;

pub use self::base::AsciiCompatibleEncoding;
pub use self::errors::{EncodingError, ErrorKind, HtmlError, TokenizerError};
pub use self::handlers::{
    AttributeHandler, CloseTagHandler, ErrorHandler, HandlerCapabilities, HandlerResult, Handlers,
    OpenTagHandler, ProcessingInstructionHandler, TextHandler,
};
pub use self::memory::MemoryLimitExceededError;
pub use self::parser::{Attribute, Attributes, ParserState, Position};
pub use self::reader::{ReadMode, ReadSettings};
pub use self::settings::{MemorySettings, Settings};
pub use self::tokenizer::Tokenizer;
