use encoding_rs::*;
use rand::Rng;
use std::cell::RefCell;
use tagstream::{Handlers, Settings, Tokenizer};

static ASCII_COMPATIBLE_ENCODINGS: [&Encoding; 36] = [
    BIG5,
    EUC_JP,
    EUC_KR,
    GB18030,
    GBK,
    IBM866,
    ISO_8859_2,
    ISO_8859_3,
    ISO_8859_4,
    ISO_8859_5,
    ISO_8859_6,
    ISO_8859_7,
    ISO_8859_8,
    ISO_8859_8_I,
    ISO_8859_10,
    ISO_8859_13,
    ISO_8859_14,
    ISO_8859_15,
    ISO_8859_16,
    KOI8_R,
    KOI8_U,
    MACINTOSH,
    SHIFT_JIS,
    UTF_8,
    WINDOWS_874,
    WINDOWS_1250,
    WINDOWS_1251,
    WINDOWS_1252,
    WINDOWS_1253,
    WINDOWS_1254,
    WINDOWS_1255,
    WINDOWS_1256,
    WINDOWS_1257,
    WINDOWS_1258,
    X_MAC_CYRILLIC,
    X_USER_DEFINED,
];

static MARKUP: &[&str] = &[
    "<",
    ">",
    "/>",
    "</",
    "<?",
    "?>",
    "\"",
    " = ",
    "=",
    "<p>",
    "</p>",
    "<br/>",
    "<!DOCTYPE html>",
    "<?xml version=\"1.0\"?>",
    "<a href=\"x\">",
    "<a href=x/>",
    "<p id=foo class=\"a b\">",
    "       ",
    "\n\r\n\r\r\t\x0c",
    "Привет",
];

fn get_byte(data: &mut &[u8]) -> u8 {
    let Some((first, rest)) = (*data).split_at_checked(1) else {
        return 1;
    };
    *data = rest;
    first[0]
}

fn tokenize<'c>(
    chunks: impl IntoIterator<Item = &'c [u8]>,
    encoding: &'static Encoding,
    xml_mode: bool,
) -> Vec<String> {
    let log = RefCell::new(Vec::new());
    let push = |event| log.borrow_mut().push(event);

    let handlers = Handlers::default()
        .open_tag(|name, attributes, self_closing| {
            push(format!("open {name:?} {attributes:?} {self_closing}"));
            Ok(())
        })
        .close_tag(|name, self_closing| {
            push(format!("close {name:?} {self_closing}"));
            Ok(())
        })
        .text(|text| {
            push(format!("text {text:?}"));
            Ok(())
        })
        .attribute(|name, value| {
            push(format!("attribute {name:?}={value:?}"));
            Ok(())
        })
        .processing_instruction(|name, raw_body| {
            push(format!("pi {name:?} {raw_body:?}"));
            Ok(())
        })
        .error(|e| push(e.to_string()));

    let mut tokenizer = Tokenizer::new(
        handlers,
        Settings {
            encoding: encoding.name(),
            xml_mode,
            ..Settings::default()
        },
    )
    .unwrap();

    let mut halted = false;

    for chunk in chunks {
        // NOTE: with an error handler registered, only a halted tokenizer returns an error.
        if tokenizer.write(chunk).is_err() {
            halted = true;
            break;
        }
    }

    if !halted {
        tokenizer.end().unwrap();
    }

    drop(tokenizer);

    log.into_inner()
}

pub fn run_tokenizer(mut data: &[u8]) {
    let settings = get_byte(&mut data);
    let encoding =
        ASCII_COMPATIBLE_ENCODINGS[(settings as usize / 5) % ASCII_COMPATIBLE_ENCODINGS.len()];
    let xml_mode = settings & 1 == 0;

    let mut input = Vec::new();

    for chunk in data.chunks(settings as usize / 7 + 13) {
        input.extend_from_slice(MARKUP[chunk[0] as usize % MARKUP.len()].as_bytes());
        input.extend_from_slice(chunk);
    }

    let expected = tokenize([input.as_slice()], encoding, xml_mode);
    let chunk_size = rand::thread_rng().gen_range(1..=input.len().max(1));

    assert_eq!(
        tokenize(input.chunks(chunk_size), encoding, xml_mode),
        expected,
        "chunk size: {chunk_size}"
    );
}
