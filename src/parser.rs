//! Recursive-descent parser with one token of lookahead.
//!
//! Primary expressions are parsed by straightforward descent; binary
//! operators are resolved by precedence climbing against a per-parser
//! operator table, so there is no grammar rule per operator. Each `parse_*`
//! operation assumes the current-token buffer already holds the first
//! unconsumed token on entry and leaves it holding the first unconsumed
//! token on exit.

use std::collections::HashMap;
use std::str::Chars;

use crate::ast::{Expression, Function, Prototype};
use crate::lexer::{Lexer, Token};

/// The single error kind of the front end: a grammar violation, carrying a
/// message naming the construct that was expected. No partial AST survives a
/// failure; the enclosing top-level construct is discarded wholesale.
#[derive(Debug, PartialEq, Clone, thiserror::Error)]
#[error("{message}")]
pub struct SyntaxError {
    message: String,
}

impl SyntaxError {
    fn new(message: impl Into<String>) -> Self {
        SyntaxError {
            message: message.into(),
        }
    }

    pub fn message(&self) -> &str {
        &self.message
    }
}

pub type ParseResult<T> = Result<T, SyntaxError>;

/// Parser state: the lexer it pulls from, the one-token lookahead buffer,
/// and the binary-operator precedence table. Each parser owns independent
/// state, so separate parses never interfere.
pub struct Parser<I: Iterator<Item = char>> {
    lexer: Lexer<I>,
    cur_tok: Token,
    precedence: HashMap<char, i32>,
}

impl<'a> Parser<Chars<'a>> {
    pub fn from_source(source: &'a str) -> Self {
        Parser::new(Lexer::from_source(source))
    }
}

impl<I: Iterator<Item = char>> Parser<I> {
    pub fn new(mut lexer: Lexer<I>) -> Self {
        let cur_tok = lexer.next_token();
        let mut precedence = HashMap::new();
        precedence.insert('<', 10);
        precedence.insert('+', 20);
        precedence.insert('-', 20);
        precedence.insert('*', 40);
        Parser {
            lexer,
            cur_tok,
            precedence,
        }
    }

    /// The token the next grammar rule will start from.
    pub fn current(&self) -> &Token {
        &self.cur_tok
    }

    /// Discards the current token and refills the buffer from the lexer.
    pub fn advance(&mut self) {
        self.cur_tok = self.lexer.next_token();
    }

    // precedence of the pending binary operator; -1 for anything that is
    // not an operator in the table, which terminates climbing
    fn cur_precedence(&self) -> i32 {
        match self.cur_tok {
            Token::Char(op) => self.precedence.get(&op).copied().unwrap_or(-1),
            _ => -1,
        }
    }

    /// primary := identifierexpr | numberexpr | parenexpr
    pub fn parse_primary(&mut self) -> ParseResult<Expression> {
        match self.cur_tok {
            Token::Ident(_) => self.parse_identifier_expr(),
            Token::Number(value) => {
                self.advance();
                Ok(Expression::Number(value))
            }
            Token::Char('(') => self.parse_paren_expr(),
            _ => Err(SyntaxError::new(
                "unexpected token when expecting an expression",
            )),
        }
    }

    /// parenexpr := '(' expression ')'
    ///
    /// Parentheses only group; the inner expression comes back unwrapped.
    fn parse_paren_expr(&mut self) -> ParseResult<Expression> {
        self.advance(); // eat '('
        let inner = self.parse_expression()?;
        if self.cur_tok != Token::Char(')') {
            return Err(SyntaxError::new("expected ')'"));
        }
        self.advance(); // eat ')'
        Ok(inner)
    }

    /// identifierexpr := identifier | identifier '(' expression* ')'
    fn parse_identifier_expr(&mut self) -> ParseResult<Expression> {
        let name = match &self.cur_tok {
            Token::Ident(name) => name.clone(),
            _ => {
                return Err(SyntaxError::new(
                    "unexpected token when expecting an expression",
                ))
            }
        };
        self.advance();

        if self.cur_tok != Token::Char('(') {
            return Ok(Expression::Variable(name));
        }
        self.advance(); // eat '('

        let mut args = Vec::new();
        if self.cur_tok != Token::Char(')') {
            loop {
                args.push(self.parse_expression()?);
                match self.cur_tok {
                    Token::Char(')') => break,
                    Token::Char(',') => self.advance(),
                    _ => {
                        return Err(SyntaxError::new(
                            "expected ')' or ',' in argument list",
                        ))
                    }
                }
            }
        }
        self.advance(); // eat ')'

        Ok(Expression::Call(name, args))
    }

    /// expression := primary binoprhs
    pub fn parse_expression(&mut self) -> ParseResult<Expression> {
        let lhs = self.parse_primary()?;
        self.parse_bin_op_rhs(0, lhs)
    }

    /// binoprhs := (operator primary)*
    ///
    /// Precedence climbing. Any pending operator binding at least as tightly
    /// as `min_prec` is consumed; if the operator after its right-hand
    /// primary binds tighter still, that operator takes the primary first
    /// (recursing with `prec + 1`, which also makes equal precedence fold
    /// left-associatively).
    fn parse_bin_op_rhs(&mut self, min_prec: i32, mut lhs: Expression) -> ParseResult<Expression> {
        loop {
            let prec = self.cur_precedence();
            if prec < min_prec {
                return Ok(lhs);
            }
            let op = match self.cur_tok {
                Token::Char(op) => op,
                _ => return Ok(lhs),
            };
            self.advance(); // eat the operator

            let mut rhs = self.parse_primary()?;
            if prec < self.cur_precedence() {
                rhs = self.parse_bin_op_rhs(prec + 1, rhs)?;
            }
            lhs = Expression::Binary(op, Box::new(lhs), Box::new(rhs));
        }
    }

    /// prototype := identifier '(' identifier* ')'
    ///
    /// Parameter names are a plain run of identifiers, no separators.
    pub fn parse_prototype(&mut self) -> ParseResult<Prototype> {
        let name = match &self.cur_tok {
            Token::Ident(name) => name.clone(),
            _ => return Err(SyntaxError::new("expected function name in prototype")),
        };
        self.advance();

        if self.cur_tok != Token::Char('(') {
            return Err(SyntaxError::new("expected '(' in prototype"));
        }
        self.advance();

        let mut params = Vec::new();
        while let Token::Ident(param) = &self.cur_tok {
            params.push(param.clone());
            self.advance();
        }

        if self.cur_tok != Token::Char(')') {
            return Err(SyntaxError::new("expected ')' in prototype"));
        }
        self.advance();

        Ok(Prototype { name, params })
    }

    /// definition := 'def' prototype expression
    pub fn parse_definition(&mut self) -> ParseResult<Function> {
        self.advance(); // eat 'def'
        let prototype = self.parse_prototype()?;
        let body = self.parse_expression()?;
        Ok(Function { prototype, body })
    }

    /// external := 'extern' prototype
    pub fn parse_extern(&mut self) -> ParseResult<Prototype> {
        self.advance(); // eat 'extern'
        self.parse_prototype()
    }

    /// toplevelexpr := expression
    ///
    /// Wraps a bare expression as an anonymous zero-parameter function. A
    /// failed inner parse propagates; no default node is produced.
    pub fn parse_top_level_expr(&mut self) -> ParseResult<Function> {
        let body = self.parse_expression()?;
        Ok(Function {
            prototype: Prototype {
                name: String::new(),
                params: Vec::new(),
            },
            body,
        })
    }
}
