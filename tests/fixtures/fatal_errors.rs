use std::cell::RefCell;
use tagstream::{ErrorKind, Handlers, HtmlError, Settings, Tokenizer, TokenizerError};

fn expect_syntax_error(result: Result<(), TokenizerError>) -> HtmlError {
    match result {
        Err(TokenizerError::Syntax(e)) => e,
        r => panic!("Expected syntax error, got {r:?}"),
    }
}

#[test]
fn unexpected_tag_open() {
    let texts = RefCell::new(Vec::new());

    let mut tokenizer = Tokenizer::new(
        Handlers::default().text(|text| {
            texts.borrow_mut().push(text.to_owned());
            Ok(())
        }),
        Settings {
            filename: Some("index.html"),
            ..Settings::default()
        },
    )
    .unwrap();

    let err = expect_syntax_error(tokenizer.write(b"before\n<div <span>after"));

    assert_eq!(err.kind(), ErrorKind::UnexpectedTagOpen);
    assert!(err.is_fatal());
    assert_eq!((err.line(), err.column()), (2, 6));
    assert_eq!(
        err.to_string(),
        "Syntax Error: index.html: Line 2, Column 6\n\tunexpected `<`"
    );

    assert!(tokenizer.is_halted());
    assert!(matches!(tokenizer.write(b"more"), Err(TokenizerError::Halted)));
    assert!(matches!(tokenizer.end(), Err(TokenizerError::Halted)));

    drop(tokenizer);

    assert_eq!(texts.into_inner(), ["before\n"]);
}

#[test]
fn unexpected_tag_open_across_chunks() {
    let mut tokenizer = Tokenizer::new(Handlers::default(), Settings::default()).unwrap();

    tokenizer.write(b"<a").unwrap();

    let err = expect_syntax_error(tokenizer.write(b"<b>"));

    assert_eq!((err.line(), err.column()), (1, 3));
}

#[test]
fn unexpected_tag_open_in_end_tag_and_instruction() {
    for input in ["</a <b>", "<?pi <b ?>"] {
        let mut tokenizer = Tokenizer::new(Handlers::default(), Settings::default()).unwrap();
        let err = expect_syntax_error(tokenizer.write(input.as_bytes()));

        assert_eq!(err.kind(), ErrorKind::UnexpectedTagOpen, "{input}");
    }
}

#[test]
fn fatal_error_is_passed_to_error_handler() {
    let errors = RefCell::new(Vec::new());

    let mut tokenizer = Tokenizer::new(
        Handlers::default().error(|e| errors.borrow_mut().push(e.clone())),
        Settings::default(),
    )
    .unwrap();

    assert!(tokenizer.write(b"<a\n\n<b>").is_ok());
    assert!(tokenizer.is_halted());
    assert!(tokenizer.errors().is_empty());

    drop(tokenizer);

    let errors = errors.into_inner();

    assert_eq!(errors.len(), 1);
    assert_eq!(errors[0].kind(), ErrorKind::UnexpectedTagOpen);
    assert_eq!((errors[0].line(), errors[0].column()), (3, 1));
}

#[test]
fn reset_after_fatal_error() {
    let names = RefCell::new(Vec::new());

    let mut tokenizer = Tokenizer::new(
        Handlers::default().open_tag(|name, _, _| {
            names.borrow_mut().push(name.to_owned());
            Ok(())
        }),
        Settings::default(),
    )
    .unwrap();

    assert!(tokenizer.write(b"<a><<b>").is_err());

    tokenizer.reset();
    tokenizer.write(b"<c>").unwrap();
    tokenizer.end().unwrap();

    drop(tokenizer);

    assert_eq!(names.into_inner(), ["a", "c"]);
}

#[test]
fn recoverable_errors_are_collected() {
    let mut tokenizer = Tokenizer::new(
        Handlers::default().open_tag(|_, _, _| Ok(())),
        Settings {
            filename: Some("page.html"),
            ..Settings::default()
        },
    )
    .unwrap();

    tokenizer.write(b"<a href=\"x>\n</>\n<p").unwrap();
    tokenizer.end().unwrap();

    let errors: Vec<_> = tokenizer
        .errors()
        .iter()
        .map(|e| (e.kind(), e.line(), e.column()))
        .collect();

    assert_eq!(
        errors,
        [
            (ErrorKind::UnclosedAttributeValue, 1, 11),
            (ErrorKind::MissingTagName, 2, 3),
            (ErrorKind::UnterminatedTag, 3, 3),
        ]
    );

    assert_eq!(
        tokenizer.errors()[1].to_string(),
        "Syntax Error: page.html: Line 2, Column 3\n\tno tag name specified"
    );

    tokenizer.reset();

    assert!(tokenizer.errors().is_empty());
}
