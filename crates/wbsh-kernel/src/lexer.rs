//! Command line tokenizer.
//!
//! Lines split on whitespace outside double quotes. A quoted span becomes a
//! single token with the quotes stripped. Unquoted `KEY=value` tokens are
//! recognized as named parameters and separated from positional arguments.

use crate::error::CommandError;
use crate::tools::ToolArgs;

/// A single token from a command line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Token {
    /// The token text, quotes stripped.
    pub text: String,
    /// True if the token came from a double-quoted span.
    pub quoted: bool,
}

/// Split a line into tokens, honoring double quotes.
pub fn tokenize(line: &str) -> Result<Vec<Token>, CommandError> {
    let mut tokens = Vec::new();
    let mut current = String::new();
    let mut quoted = false;
    let mut in_quotes = false;

    for ch in line.chars() {
        match ch {
            '"' => {
                if in_quotes {
                    in_quotes = false;
                } else {
                    in_quotes = true;
                    quoted = true;
                }
            }
            c if c.is_whitespace() && !in_quotes => {
                if !current.is_empty() || quoted {
                    tokens.push(Token {
                        text: std::mem::take(&mut current),
                        quoted,
                    });
                    quoted = false;
                }
            }
            c => current.push(c),
        }
    }

    if in_quotes {
        return Err(CommandError::UnterminatedQuote);
    }
    if !current.is_empty() || quoted {
        tokens.push(Token {
            text: current,
            quoted,
        });
    }

    Ok(tokens)
}

/// Partition tokens into positional arguments and named `KEY=value` parameters.
///
/// Only unquoted tokens with an identifier-shaped key are treated as named;
/// `"RATE=150"` in quotes stays positional. Keys are stored uppercased.
pub fn parse_args(tokens: &[Token]) -> ToolArgs {
    let mut args = ToolArgs::new();
    for token in tokens {
        if !token.quoted {
            if let Some((key, value)) = token.text.split_once('=') {
                if !key.is_empty() && key.chars().all(|c| c.is_ascii_alphanumeric() || c == '_') {
                    args.named.insert(key.to_ascii_uppercase(), value.to_string());
                    continue;
                }
            }
        }
        args.positional.push(token.text.clone());
    }
    args
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_simple_split() {
        let tokens = tokenize("dir sys:s").unwrap();
        assert_eq!(tokens.len(), 2);
        assert_eq!(tokens[0].text, "dir");
        assert_eq!(tokens[1].text, "sys:s");
    }

    #[test]
    fn test_quoted_span_is_one_token() {
        let tokens = tokenize("say \"hello world\" RATE=150").unwrap();
        assert_eq!(tokens.len(), 3);
        assert_eq!(tokens[1].text, "hello world");
        assert!(tokens[1].quoted);
        assert!(!tokens[2].quoted);
    }

    #[test]
    fn test_unterminated_quote() {
        let result = tokenize("echo \"oops");
        assert_eq!(result.unwrap_err(), CommandError::UnterminatedQuote);
    }

    #[test]
    fn test_empty_quoted_token_kept() {
        let tokens = tokenize("echo \"\"").unwrap();
        assert_eq!(tokens.len(), 2);
        assert_eq!(tokens[1].text, "");
    }

    #[test]
    fn test_named_params_separated() {
        let tokens = tokenize("say \"hello world\" RATE=150").unwrap();
        let args = parse_args(&tokens[1..]);
        assert_eq!(args.positional, vec!["hello world"]);
        assert_eq!(args.named.get("RATE").map(String::as_str), Some("150"));
    }

    #[test]
    fn test_named_key_case_folded() {
        let tokens = tokenize("ping host count=3").unwrap();
        let args = parse_args(&tokens[1..]);
        assert_eq!(args.named.get("COUNT").map(String::as_str), Some("3"));
    }

    #[test]
    fn test_quoted_equals_stays_positional() {
        let tokens = tokenize("echo \"A=B\"").unwrap();
        let args = parse_args(&tokens[1..]);
        assert_eq!(args.positional, vec!["A=B"]);
        assert!(args.named.is_empty());
    }

    #[test]
    fn test_path_with_equals_stays_positional() {
        // "SYS:a=b" has a ':' in the key portion, so it is not a named param
        let tokens = tokenize("type SYS:a=b").unwrap();
        let args = parse_args(&tokens[1..]);
        assert_eq!(args.positional, vec!["SYS:a=b"]);
    }
}
