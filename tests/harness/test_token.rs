use encoding_rs::Encoding;
use serde_derive::Deserialize;
use std::cell::RefCell;
use tagstream::{Handlers, Settings, Tokenizer};

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub enum TestToken {
    OpenTag {
        name: String,
        #[serde(default)]
        attributes: Vec<(String, String)>,
        #[serde(default)]
        self_closing: bool,
    },
    CloseTag {
        name: String,
        #[serde(default)]
        self_closing: bool,
    },
    Text(String),
    ProcessingInstruction {
        name: String,
        raw_body: String,
    },
    Error {
        kind: String,
        line: usize,
        column: usize,
    },
}

impl TestToken {
    // NOTE: columns count bytes, so they depend on the encoding of non-ASCII input.
    pub fn without_column(mut self) -> Self {
        if let TestToken::Error { ref mut column, .. } = self {
            *column = 0;
        }

        self
    }
}

// Tokenizes the chunks with all handlers registered. Errors are recorded
// as tokens in the order they are reported.
pub fn tokenize<'c>(
    chunks: impl IntoIterator<Item = &'c [u8]>,
    encoding: &'static Encoding,
    xml_mode: bool,
    recognize_self_closing: bool,
) -> Vec<TestToken> {
    let tokens = RefCell::new(Vec::new());
    let push = |token| tokens.borrow_mut().push(token);

    let handlers = Handlers::default()
        .open_tag(|name, attributes, self_closing| {
            push(TestToken::OpenTag {
                name: name.into(),
                attributes: attributes
                    .iter()
                    .map(|a| (a.name().into(), a.value().into()))
                    .collect(),
                self_closing,
            });
            Ok(())
        })
        .close_tag(|name, self_closing| {
            push(TestToken::CloseTag {
                name: name.into(),
                self_closing,
            });
            Ok(())
        })
        .text(|text| {
            push(TestToken::Text(text.into()));
            Ok(())
        })
        .processing_instruction(|name, raw_body| {
            push(TestToken::ProcessingInstruction {
                name: name.into(),
                raw_body: raw_body.into(),
            });
            Ok(())
        })
        .error(|e| {
            push(TestToken::Error {
                kind: format!("{:?}", e.kind()),
                line: e.line(),
                column: e.column(),
            })
        });

    let settings = Settings {
        encoding: encoding.name(),
        xml_mode,
        recognize_self_closing,
        ..Settings::default()
    };

    let mut tokenizer = Tokenizer::new(handlers, settings).unwrap();

    for chunk in chunks {
        tokenizer.write(chunk).unwrap();
    }

    tokenizer.end().unwrap();

    drop(tokenizer);

    tokens.into_inner()
}
