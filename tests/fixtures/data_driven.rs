use crate::harness::{tokenize, ChunkedInput, TestCase, TestToken, ASCII_COMPATIBLE_ENCODINGS};
use encoding_rs::UTF_8;
use itertools::Itertools;

// NOTE: every pair of split points is checked only for short inputs.
const MAX_DOUBLE_SPLIT_INPUT_LEN: usize = 64;

fn run(test: &TestCase, chunks: Vec<&[u8]>, encoding: &'static encoding_rs::Encoding) -> Vec<TestToken> {
    tokenize(chunks, encoding, test.xml_mode, test.recognize_self_closing)
}

#[test]
fn whole_input() {
    for test in TestCase::load_all() {
        let input = ChunkedInput::from(test.input.as_str());

        assert_eq!(
            run(&test, vec![input.bytes()], UTF_8),
            test.expected,
            "{}",
            test.description
        );
    }
}

#[test]
fn split_at_every_offset() {
    for test in TestCase::load_all() {
        let input = ChunkedInput::from(test.input.as_str());

        for chunks in input.splits() {
            assert_eq!(
                run(&test, chunks.to_vec(), UTF_8),
                test.expected,
                "{} (chunks: {:?})",
                test.description,
                chunks
            );
        }
    }
}

#[test]
fn split_at_every_pair_of_offsets() {
    for test in TestCase::load_all() {
        let bytes = test.input.as_bytes();

        if bytes.len() > MAX_DOUBLE_SPLIT_INPUT_LEN {
            continue;
        }

        for (a, b) in (0..=bytes.len()).tuple_combinations() {
            let chunks = vec![&bytes[..a], &bytes[a..b], &bytes[b..]];

            assert_eq!(
                run(&test, chunks, UTF_8),
                test.expected,
                "{} (split at {a} and {b})",
                test.description
            );
        }
    }
}

#[test]
fn byte_by_byte() {
    for test in TestCase::load_all() {
        let chunks = test.input.as_bytes().chunks(1).collect();

        assert_eq!(run(&test, chunks, UTF_8), test.expected, "{}", test.description);
    }
}

#[test]
fn ascii_compatible_encodings() {
    for test in TestCase::load_all() {
        for encoding in ASCII_COMPATIBLE_ENCODINGS.iter().copied() {
            let mut input = ChunkedInput::from(test.input.as_str());

            let Ok(chunk_size) = input.init(encoding) else {
                continue;
            };

            let normalize = |tokens: Vec<TestToken>| -> Vec<TestToken> {
                if input.input().is_ascii() {
                    tokens
                } else {
                    tokens.into_iter().map(TestToken::without_column).collect()
                }
            };

            assert_eq!(
                normalize(run(&test, input.chunks().collect(), input.encoding())),
                normalize(test.expected.clone()),
                "{} (encoding: {}, chunk size: {chunk_size})",
                test.description,
                encoding.name()
            );
        }
    }
}
