//! AST produced by the parser. Nodes own their children outright and are
//! never mutated after construction; consumers pattern-match on the enums.

/// A function signature: its name plus positional parameter names. The
/// parameter count is the arity contract later stages check calls against.
/// Duplicate parameter names are not rejected at this layer.
#[derive(Debug, PartialEq, Clone)]
pub struct Prototype {
    pub name: String,
    pub params: Vec<String>,
}

#[derive(Debug, PartialEq, Clone)]
pub enum Expression {
    Number(f64),
    Variable(String),
    Binary(char, Box<Expression>, Box<Expression>),
    /// Callee is an unresolved name; resolution happens downstream.
    Call(String, Vec<Expression>),
}

#[derive(Debug, PartialEq, Clone)]
pub struct Function {
    pub prototype: Prototype,
    pub body: Expression,
}

impl Function {
    /// True for the synthetic wrapper around a bare top-level expression:
    /// empty name, no parameters.
    pub fn is_anonymous(&self) -> bool {
        self.prototype.name.is_empty()
    }
}

/// A top-level construct as handed to consumers of the front end.
#[derive(Debug, PartialEq, Clone)]
pub enum Item {
    Function(Function),
    Extern(Prototype),
}
