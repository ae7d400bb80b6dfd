#![no_main]

use libfuzzer_sys::fuzz_target;
use test_case::run_tokenizer;

fuzz_target!(|data: &[u8]| {
    run_tokenizer(data);
});
