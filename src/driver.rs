//! Top-level driving loop over the parser.
//!
//! Dispatches on the current token: `def` and `extern` go to their dedicated
//! rules, `;` is skipped, anything else parses as an anonymous top-level
//! expression. Recovery from a syntax error is deliberately minimal: advance
//! exactly one token and try again, which can cascade into spurious
//! follow-on errors on badly malformed input.

use crate::ast::Item;
use crate::lexer::Token;
use crate::parser::{Parser, SyntaxError};

/// Everything one run over an input produced: the top-level items that
/// parsed, in source order, and every syntax error encountered along the way.
#[derive(Debug, PartialEq, Clone)]
pub struct ParseOutcome {
    pub items: Vec<Item>,
    pub errors: Vec<SyntaxError>,
}

/// Parses top-level constructs until end of input.
pub fn parse_program<I: Iterator<Item = char>>(parser: &mut Parser<I>) -> ParseOutcome {
    let mut items = Vec::new();
    let mut errors = Vec::new();

    loop {
        let result = match parser.current().clone() {
            Token::Eof => break,
            Token::Char(';') => {
                parser.advance();
                continue;
            }
            Token::Def => parser.parse_definition().map(Item::Function),
            Token::Extern => parser.parse_extern().map(Item::Extern),
            _ => parser.parse_top_level_expr().map(Item::Function),
        };

        match result {
            Ok(item) => items.push(item),
            Err(err) => {
                errors.push(err);
                // skip one token and retry
                parser.advance();
            }
        }
    }

    ParseOutcome { items, errors }
}
