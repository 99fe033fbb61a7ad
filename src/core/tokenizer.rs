// src/core/tokenizer.rs

/// The quote character recognised by [`tokenize`].
pub const QUOTE: char = '"';

/// Splits a raw input line into tokens, honoring double-quoted segments.
///
/// # Logic:
/// - The delimiter outside quotes ends the current token. Runs of delimiters never
///   produce empty tokens.
/// - A quote toggles quote mode. Inside quotes the delimiter is an ordinary character.
///   Closing a quote emits its content if non-empty, so `""` yields nothing.
/// - Text pending before an opening quote is discarded: `--name="a b"` yields `a b`.
/// - Whatever remains after the scan (including an unterminated quote) is the final token.
pub fn tokenize(text: &str, delimiter: char) -> Vec<String> {
    let mut tokens = Vec::new();
    let mut begin = 0;
    let mut in_quote = false;

    for (i, c) in text.char_indices() {
        if c == delimiter && !in_quote {
            push_run(&mut tokens, text, begin, i);
            begin = i + c.len_utf8();
        } else if c == QUOTE {
            if in_quote {
                push_run(&mut tokens, text, begin, i);
            }
            in_quote = !in_quote;
            begin = i + c.len_utf8();
        }
    }
    push_run(&mut tokens, text, begin, text.len());

    tokens
}

/// Pushes `text[begin..end]` if it is a non-empty, valid slice.
fn push_run(tokens: &mut Vec<String>, text: &str, begin: usize, end: usize) {
    if end > begin
        && let Some(run) = text.get(begin..end)
    {
        tokens.push(run.to_string());
    }
}
