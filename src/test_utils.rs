use proptest::prelude::*;

/// Non-empty ASCII digit strings of at most `max_len` characters.
pub(crate) fn arb_digit_string(max_len: usize) -> impl Strategy<Value = String> {
    proptest::string::string_regex(&format!("[0-9]{{1,{max_len}}}"))
        .expect("digit pattern is a valid regex")
}
