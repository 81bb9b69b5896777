use std::fmt;

#[derive(Debug, Clone, PartialEq)]
pub(crate) enum Token {
    Ident(String),
    Str(String),
    Int(i64),
    Float(f64),
    Dot,
    Comma,
    LParen,
    RParen,
    LBracket,
    RBracket,
    Eof,
}

/// A token and the byte offset it starts at.
#[derive(Debug, Clone, PartialEq)]
pub(crate) struct Spanned {
    pub(crate) token: Token,
    pub(crate) offset: usize,
}

/// Splits a resolver expression into tokens.
///
/// Whitespace (including newlines) is insignificant. Strings may use either
/// double or single quotes and support `\"`, `\'`, `\\`, `\n` and `\t`
/// escapes.
pub(crate) fn tokenize(src: &str) -> Result<Vec<Spanned>, String> {
    let mut tokens = vec![];
    let mut chars = src.char_indices().peekable();

    while let Some(&(offset, ch)) = chars.peek() {
        let token = match ch {
            c if c.is_whitespace() => {
                chars.next();
                continue;
            }
            '.' => {
                chars.next();
                Token::Dot
            }
            ',' => {
                chars.next();
                Token::Comma
            }
            '(' => {
                chars.next();
                Token::LParen
            }
            ')' => {
                chars.next();
                Token::RParen
            }
            '[' => {
                chars.next();
                Token::LBracket
            }
            ']' => {
                chars.next();
                Token::RBracket
            }
            '"' | '\'' => {
                chars.next();
                let mut out = String::new();
                loop {
                    match chars.next() {
                        Some((_, c)) if c == ch => break,
                        Some((_, '\\')) => match chars.next() {
                            Some((_, 'n')) => out.push('\n'),
                            Some((_, 't')) => out.push('\t'),
                            Some((_, c @ ('"' | '\'' | '\\'))) => out.push(c),
                            Some((at, c)) => {
                                return Err(format!("unknown escape `\\{c}` at offset {at}"))
                            }
                            None => return Err(format!("unterminated string at offset {offset}")),
                        },
                        Some((_, c)) => out.push(c),
                        None => return Err(format!("unterminated string at offset {offset}")),
                    }
                }
                Token::Str(out)
            }
            c if c.is_ascii_digit() || c == '-' => {
                let mut text = String::new();
                while let Some(&(_, c)) = chars.peek() {
                    if c.is_ascii_digit() || c == '.' || (c == '-' && text.is_empty()) {
                        text.push(c);
                        chars.next();
                    } else {
                        break;
                    }
                }
                if let Ok(value) = text.parse::<i64>() {
                    Token::Int(value)
                } else if let Ok(value) = text.parse::<f64>() {
                    Token::Float(value)
                } else {
                    return Err(format!("invalid number `{text}` at offset {offset}"));
                }
            }
            c if c.is_alphabetic() || c == '_' || c == '$' => {
                let mut ident = String::new();
                while let Some(&(_, c)) = chars.peek() {
                    if c.is_alphanumeric() || c == '_' || c == '$' {
                        ident.push(c);
                        chars.next();
                    } else {
                        break;
                    }
                }
                Token::Ident(ident)
            }
            c => return Err(format!("unexpected character `{c}` at offset {offset}")),
        };

        tokens.push(Spanned { token, offset });
    }

    tokens.push(Spanned {
        token: Token::Eof,
        offset: src.len(),
    });

    Ok(tokens)
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Token::Ident(ident) => write!(f, "`{ident}`"),
            Token::Str(value) => write!(f, "string {value:?}"),
            Token::Int(value) => write!(f, "number {value}"),
            Token::Float(value) => write!(f, "number {value}"),
            Token::Dot => f.write_str("`.`"),
            Token::Comma => f.write_str("`,`"),
            Token::LParen => f.write_str("`(`"),
            Token::RParen => f.write_str("`)`"),
            Token::LBracket => f.write_str("`[`"),
            Token::RBracket => f.write_str("`]`"),
            Token::Eof => f.write_str("end of expression"),
        }
    }
}
