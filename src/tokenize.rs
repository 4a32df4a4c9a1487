//! Whitespace tokenization and input validation.
//!
//! Tokenization is deliberately dumb: split on runs of ASCII spaces, keep
//! everything else. Punctuation, digits, and non-ASCII bytes are all valid
//! word characters; no Unicode interpretation happens anywhere. The only
//! inputs the engine refuses outright are control bytes in `[0x00, 0x1F]`.

/// Split `text` on runs of ASCII spaces, yielding non-empty words in order.
pub fn split_words(text: &str) -> Vec<&str> {
    text.split(' ').filter(|word| !word.is_empty()).collect()
}

/// True iff any byte of `s` falls in `[0x00, 0x1F]`.
pub fn has_control_bytes(s: &str) -> bool {
    s.bytes().any(|b| b <= 0x1F)
}
