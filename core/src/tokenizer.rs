//! Splits a console line into tokens.
//!
//! Rules:
//!
//! - Unquoted whitespace separates tokens.
//! - `"..."` and `'...'` group their contents into one token with the quotes
//!   removed. Quotes may sit inside a word: `say"hi there"` is `sayhi there`.
//! - Inside double quotes a backslash escapes `"` or `\`; any other
//!   backslash is kept literally. Single quotes take everything literally.
//! - `""` produces an empty token.
//! - An unterminated quote runs to the end of the line.

use tracing::debug;

/// Tokenizes one input line. Never fails.
///
/// # Examples
///
/// ```
/// use console_command_core::tokenize;
///
/// assert_eq!(tokenize(r#"say "hello world"  now"#), vec!["say", "hello world", "now"]);
/// assert_eq!(tokenize("kick 'bob"), vec!["kick", "bob"]);
/// assert!(tokenize("   ").is_empty());
/// ```
pub fn tokenize(line: &str) -> Vec<String> {
    let mut tokens = Vec::new();
    let mut current = String::new();
    // A token exists once any quote opens, even if it stays empty.
    let mut in_token = false;
    let mut quote: Option<char> = None;
    let mut chars = line.trim().chars().peekable();

    while let Some(c) = chars.next() {
        match quote {
            Some(q) if c == q => quote = None,
            Some('"') if c == '\\' => match chars.peek() {
                Some(&next) if next == '"' || next == '\\' => {
                    current.push(next);
                    chars.next();
                }
                _ => current.push(c),
            },
            Some(_) => current.push(c),
            None if c == '"' || c == '\'' => {
                quote = Some(c);
                in_token = true;
            }
            None if c.is_whitespace() => {
                if in_token {
                    tokens.push(std::mem::take(&mut current));
                    in_token = false;
                }
            }
            None => {
                current.push(c);
                in_token = true;
            }
        }
    }

    if in_token {
        tokens.push(current);
    }

    debug!(count = tokens.len(), "tokenized console line");
    tokens
}
