//! Whitespace tokenization of account blocks.

/// Split an account block into whitespace-delimited tokens, in order.
#[must_use]
pub fn tokenize(text: &str) -> Vec<&str> {
    text.split_whitespace().collect()
}
