pub mod ast;
pub mod driver;
pub mod lexer;
pub mod parser;

pub use ast::{Expression, Function, Item, Prototype};
pub use driver::ParseOutcome;
pub use lexer::{Lexer, Token};
pub use parser::{ParseResult, Parser, SyntaxError};
