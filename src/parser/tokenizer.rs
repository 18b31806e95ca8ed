//! Argument tokenizer for check references
//!
//! A check reference looks like `$mysql "MySQL" 3306`: a `$`-prefixed check
//! name followed by positional arguments. Arguments are separated by spaces,
//! and double quotes group text containing spaces into a single argument.
//!
//! A quote only starts a new token when a break is already pending (at the
//! start of input or right after a space). A quote in the middle of a token
//! just toggles quoting, so `ab"cd"ef` stays one token, `abcdef`.

use thiserror::Error;

/// Errors produced while splitting a reference
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TokenizeError {
    /// First token is missing or does not start with `$`
    #[error("invalid reference '{reference}': expected '$<check> [args...]'")]
    InvalidReference { reference: String },
}

/// A parsed check reference: check name plus its declared arguments
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CheckRef {
    /// Check name without the leading `$`
    pub name: String,
    /// Positional arguments in declaration order
    pub args: Vec<String>,
}

impl CheckRef {
    /// Tokenize `reference` and interpret token 0 as the check name
    pub fn parse(reference: &str) -> Result<Self, TokenizeError> {
        let mut tokens = tokenize(reference).into_iter();

        let name = match tokens.next() {
            Some(first) => match first.strip_prefix('$') {
                Some(name) => name.to_string(),
                None => {
                    return Err(TokenizeError::InvalidReference {
                        reference: reference.to_string(),
                    })
                }
            },
            None => {
                return Err(TokenizeError::InvalidReference {
                    reference: reference.to_string(),
                })
            }
        };

        Ok(Self {
            name,
            args: tokens.collect(),
        })
    }
}

/// Split `input` into tokens, honouring double quotes
pub fn tokenize(input: &str) -> Vec<String> {
    let mut tokens: Vec<String> = Vec::new();
    let mut quoted = false;
    let mut at_boundary = true;

    for c in input.chars() {
        match c {
            '"' => {
                if at_boundary && !quoted {
                    tokens.push(String::new());
                }
                quoted = !quoted;
                at_boundary = false;
            }
            ' ' if quoted => push_char(&mut tokens, c),
            ' ' => at_boundary = true,
            _ => {
                if at_boundary {
                    tokens.push(String::new());
                }
                push_char(&mut tokens, c);
                at_boundary = false;
            }
        }
    }

    tokens
}

fn push_char(tokens: &mut Vec<String>, c: char) {
    // A token is always open here: `at_boundary` starts true and is only
    // cleared after a token has been pushed.
    match tokens.last_mut() {
        Some(token) => token.push(c),
        None => tokens.push(c.to_string()),
    }
}
