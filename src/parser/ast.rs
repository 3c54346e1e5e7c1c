// AST (Abstract Syntax Tree) definitions for PLC programs
//
// The tree is plain owned data: every node owns its children and nothing
// refers back to tokens or cursors once parsing is done.

use bigdecimal::BigDecimal;
use num_bigint::BigInt;

/// Literal values
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Literal {
    Nil,
    Boolean(bool),
    Integer(BigInt),
    Decimal(BigDecimal),
    Character(char),
    String(String),
}

/// Expressions
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Expression {
    Literal(Literal),
    /// Explicitly parenthesized sub-expression
    Group(Box<Expression>),
    Binary {
        operator: String,
        left: Box<Expression>,
        right: Box<Expression>,
    },
    /// Variable read, optionally subscripted: `name` or `name[index]`
    Access {
        name: String,
        offset: Option<Box<Expression>>,
    },
    /// Call of a named function
    Function {
        name: String,
        arguments: Vec<Expression>,
    },
    /// List literal; only appears as the initializer of a `LIST` global
    PlcList(Vec<Expression>),
}

impl Expression {
    pub fn group(inner: Expression) -> Self {
        Expression::Group(Box::new(inner))
    }

    pub fn binary(operator: impl Into<String>, left: Expression, right: Expression) -> Self {
        Expression::Binary {
            operator: operator.into(),
            left: Box::new(left),
            right: Box::new(right),
        }
    }

    pub fn access(name: impl Into<String>) -> Self {
        Expression::Access {
            name: name.into(),
            offset: None,
        }
    }

    pub fn index(name: impl Into<String>, offset: Expression) -> Self {
        Expression::Access {
            name: name.into(),
            offset: Some(Box::new(offset)),
        }
    }

    pub fn call(name: impl Into<String>, arguments: Vec<Expression>) -> Self {
        Expression::Function {
            name: name.into(),
            arguments,
        }
    }
}

/// One arm of a `SWITCH`. A missing condition marks the `DEFAULT` arm.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Case {
    pub condition: Option<Expression>,
    pub statements: Vec<Statement>,
}

impl Case {
    pub fn is_default(&self) -> bool {
        self.condition.is_none()
    }
}

/// Statements
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Statement {
    /// Expression evaluated for its side effect
    Expression(Expression),
    Declaration {
        name: String,
        value: Option<Expression>,
    },
    Assignment {
        receiver: Expression,
        value: Expression,
    },
    If {
        condition: Expression,
        then_statements: Vec<Statement>,
        else_statements: Vec<Statement>,
    },
    Switch {
        condition: Expression,
        cases: Vec<Case>,
    },
    While {
        condition: Expression,
        statements: Vec<Statement>,
    },
    Return(Expression),
}

/// Module-level variable: `LIST`, `VAR` or `VAL`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Global {
    pub name: String,
    pub mutable: bool,
    pub value: Option<Expression>,
}

/// Function definition
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Function {
    pub name: String,
    pub parameters: Vec<String>,
    pub statements: Vec<Statement>,
}

/// Top-level program structure
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Source {
    pub globals: Vec<Global>,
    pub functions: Vec<Function>,
}

impl Source {
    pub fn new() -> Self {
        Source::default()
    }
}
