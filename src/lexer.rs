//! Streaming lexer: pulls characters from an input stream one at a time and
//! classifies them into tokens, skipping whitespace and `#` line comments.
//!
//! The lexer never errors. Every input byte either contributes to a token or
//! is skipped; symbols with no lexical meaning come back verbatim as
//! single-character tokens for the parser to reject.

use std::collections::HashMap;
use std::fmt;
use std::iter::Peekable;
use std::str::Chars;

use lazy_static::lazy_static;

#[derive(Debug, PartialEq, Clone)]
pub enum Token {
    Eof,
    Def,
    Extern,
    Ident(String),
    Number(f64),
    Char(char),
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Token::Eof => write!(f, "end of input"),
            Token::Def => write!(f, "'def'"),
            Token::Extern => write!(f, "'extern'"),
            Token::Ident(name) => write!(f, "identifier '{}'", name),
            Token::Number(value) => write!(f, "number {}", value),
            Token::Char(c) => write!(f, "'{}'", c),
        }
    }
}

lazy_static! {
    static ref RESERVED: HashMap<&'static str, Token> = {
        let mut map = HashMap::new();
        map.insert("def", Token::Def);
        map.insert("extern", Token::Extern);
        map
    };
}

/// Converts the digits-and-dots text of a numeric literal to an `f64`.
///
/// The scanner accepts malformed literals like `1.2.3`; following `strtod`,
/// the longest valid prefix is what counts, so `1.2.3` reads as `1.2` and a
/// lone `.` as `0.0`.
fn number_value(text: &str) -> f64 {
    text.parse().unwrap_or_else(|_| {
        let cut = text
            .find('.')
            .and_then(|first| text[first + 1..].find('.').map(|i| first + 1 + i));
        cut.and_then(|i| text[..i].parse().ok()).unwrap_or(0.0)
    })
}

/// A stateful scanner over a character stream. The `Peekable` wrapper is the
/// one-character pushback buffer: a character is examined before it is
/// committed to any token.
pub struct Lexer<I: Iterator<Item = char>> {
    chars: Peekable<I>,
}

impl<'a> Lexer<Chars<'a>> {
    pub fn from_source(source: &'a str) -> Self {
        Lexer::new(source.chars())
    }
}

impl<I: Iterator<Item = char>> Lexer<I> {
    pub fn new(chars: I) -> Self {
        Lexer {
            chars: chars.peekable(),
        }
    }

    /// Consumes input up to and including the next token's characters and
    /// returns that token. At end of input, returns `Token::Eof` forever.
    pub fn next_token(&mut self) -> Token {
        while let Some(&c) = self.chars.peek() {
            if c.is_whitespace() {
                self.chars.next();
            } else if c.is_alphabetic() {
                return self.identifier_or_keyword();
            } else if c.is_ascii_digit() || c == '.' {
                return self.number();
            } else if c == '#' {
                self.skip_comment();
            } else {
                self.chars.next();
                return Token::Char(c);
            }
        }
        Token::Eof
    }

    // [a-zA-Z][a-zA-Z0-9]*, with the reserved words split out as exact,
    // case-sensitive whole-identifier matches
    fn identifier_or_keyword(&mut self) -> Token {
        let mut text = String::new();
        while let Some(&c) = self.chars.peek() {
            if !c.is_alphanumeric() {
                break;
            }
            text.push(c);
            self.chars.next();
        }
        match RESERVED.get(text.as_str()) {
            Some(token) => token.clone(),
            None => Token::Ident(text),
        }
    }

    // any run of digits and decimal points; no sign, no exponent
    fn number(&mut self) -> Token {
        let mut text = String::new();
        while let Some(&c) = self.chars.peek() {
            if !c.is_ascii_digit() && c != '.' {
                break;
            }
            text.push(c);
            self.chars.next();
        }
        Token::Number(number_value(&text))
    }

    fn skip_comment(&mut self) {
        for c in self.chars.by_ref() {
            if c == '\n' {
                break;
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn tokenize(source: &str) -> Vec<Token> {
        let mut lexer = Lexer::from_source(source);
        let mut tokens = Vec::new();
        loop {
            let token = lexer.next_token();
            let done = token == Token::Eof;
            tokens.push(token);
            if done {
                break;
            }
        }
        tokens
    }

    #[test]
    fn identifiers_keep_their_text() {
        assert_eq!(
            tokenize("foo bar9 x"),
            vec![
                Token::Ident("foo".to_string()),
                Token::Ident("bar9".to_string()),
                Token::Ident("x".to_string()),
                Token::Eof,
            ]
        );
    }

    #[test]
    fn reserved_words_become_keywords() {
        assert_eq!(
            tokenize("def extern"),
            vec![Token::Def, Token::Extern, Token::Eof]
        );
    }

    #[test]
    fn reserved_words_are_exact_matches() {
        // case-sensitive, whole identifier only
        assert_eq!(
            tokenize("Def DEF define externs"),
            vec![
                Token::Ident("Def".to_string()),
                Token::Ident("DEF".to_string()),
                Token::Ident("define".to_string()),
                Token::Ident("externs".to_string()),
                Token::Eof,
            ]
        );
    }

    #[test]
    fn numbers_parse_as_f64() {
        assert_eq!(
            tokenize("42 3.14 0.5 .5 7."),
            vec![
                Token::Number(42.0),
                Token::Number(3.14),
                Token::Number(0.5),
                Token::Number(0.5),
                Token::Number(7.0),
                Token::Eof,
            ]
        );
    }

    #[test]
    fn malformed_number_reads_longest_valid_prefix() {
        assert_eq!(tokenize("1.2.3"), vec![Token::Number(1.2), Token::Eof]);
        assert_eq!(tokenize("."), vec![Token::Number(0.0), Token::Eof]);
    }

    #[test]
    fn comments_never_produce_tokens() {
        assert_eq!(
            tokenize("# leading comment\nx # trailing\ny"),
            vec![
                Token::Ident("x".to_string()),
                Token::Ident("y".to_string()),
                Token::Eof,
            ]
        );
        // comment running to end of input, no newline
        assert_eq!(
            tokenize("x # no newline"),
            vec![Token::Ident("x".to_string()), Token::Eof]
        );
    }

    #[test]
    fn unknown_symbols_come_back_verbatim() {
        assert_eq!(
            tokenize("(+@"),
            vec![
                Token::Char('('),
                Token::Char('+'),
                Token::Char('@'),
                Token::Eof
            ]
        );
    }

    #[test]
    fn eof_is_sticky() {
        let mut lexer = Lexer::from_source("  ");
        assert_eq!(lexer.next_token(), Token::Eof);
        assert_eq!(lexer.next_token(), Token::Eof);
    }

    #[test]
    fn lexes_a_definition() {
        assert_eq!(
            tokenize("def add(x y) x+y;"),
            vec![
                Token::Def,
                Token::Ident("add".to_string()),
                Token::Char('('),
                Token::Ident("x".to_string()),
                Token::Ident("y".to_string()),
                Token::Char(')'),
                Token::Ident("x".to_string()),
                Token::Char('+'),
                Token::Ident("y".to_string()),
                Token::Char(';'),
                Token::Eof,
            ]
        );
    }
}
