//! AST datastructures produced by the parser.

use crate::prelude::*;
use crate::config::MAX_SYMBOL_LEN;
use crate::shared::bounded::BoundedString;

/// Source location of an AST node.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub struct Position {
    /// 1-based line number.
    pub line    : u32,
    /// 1-based column number.
    pub column  : u32,
}

impl Position {
    pub fn new(line: u32, column: u32) -> Self {
        Position { line, column }
    }
}

impl Display for Position {
    fn fmt(self: &Self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.line, self.column)
    }
}

/// Implemented by AST structures that have a source location.
pub trait Positioned {
    fn position(self: &Self) -> Position;
}

macro_rules! impl_positioned {
    ($struct_name:ident) => {
        impl Positioned for $struct_name {
            fn position(self: &Self) -> Position {
                self.position
            }
        }
    }
}

/// Visibility of a declared symbol.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Visibility {
    Private,
    Public,
}

impl Default for Visibility {
    fn default() -> Self {
        Visibility::Private
    }
}

/// A declared name.
#[derive(Clone, Debug, PartialEq)]
pub struct Symbol {
    pub name        : BoundedString<MAX_SYMBOL_LEN>,
    pub visibility  : Visibility,
}

/// A statement. `Program` and `Module` own their child statements.
#[derive(Clone, Debug, PartialEq)]
pub enum Statement {
    Program(Vec<Statement>),
    Module(Module),
    Decl(Decl),
    Procedure(Procedure),
    End(End),
}

impl Statement {
    /// Returns child statements of compound statements, an empty slice otherwise.
    pub fn children(self: &Self) -> &[Statement] {
        match self {
            Statement::Program(children) => children,
            Statement::Module(module) => &module.children,
            _ => &[],
        }
    }
    /// Returns the statement as a declaration, if it is one.
    pub fn as_decl(self: &Self) -> Option<&Decl> {
        match self {
            Statement::Decl(decl) => Some(decl),
            _ => None,
        }
    }
    /// Returns the statement as a module, if it is one.
    pub fn as_module(self: &Self) -> Option<&Module> {
        match self {
            Statement::Module(module) => Some(module),
            _ => None,
        }
    }
    /// Returns the statement as a procedure declaration, if it is one.
    pub fn as_procedure(self: &Self) -> Option<&Procedure> {
        match self {
            Statement::Procedure(procedure) => Some(procedure),
            _ => None,
        }
    }
}

/// Named block: `name: do; ... end name;`
#[derive(Clone, Debug, PartialEq)]
pub struct Module {
    pub position    : Position,
    pub name        : BoundedString<MAX_SYMBOL_LEN>,
    /// Statements in the block. The last child is the closing `End`.
    pub children    : Vec<Statement>,
}

impl_positioned!(Module);

/// Variable or type declaration: `decl name (size) type modifiers, ...;`
#[derive(Clone, Debug, PartialEq)]
pub struct Decl {
    pub position    : Position,
    pub symbol      : Symbol,
    pub type_name   : String,
    pub is_constant : bool,
    pub is_typedef  : bool,
    pub array_size  : Option<ArraySize>,
    pub initial     : Option<Expression>,
    /// Declarations chained with `,` after this one.
    pub children    : Vec<Decl>,
}

impl_positioned!(Decl);

/// Array clause of a declaration. `None` for `()`, i.e. an unsized array.
#[derive(Clone, Debug, PartialEq)]
pub struct ArraySize(pub Option<Expression>);

/// Procedure declaration: `proc name(args) type [public];`
#[derive(Clone, Debug, PartialEq)]
pub struct Procedure {
    pub position    : Position,
    pub symbol      : Symbol,
    pub return_type : String,
    pub arguments   : Vec<Argument>,
}

impl_positioned!(Procedure);

#[derive(Clone, Debug, PartialEq)]
pub struct Argument {
    pub name        : BoundedString<MAX_SYMBOL_LEN>,
    pub type_name   : Option<String>,
}

/// Block terminator: `end [name];`
#[derive(Clone, Debug, PartialEq)]
pub struct End {
    pub position    : Position,
    pub name        : Option<String>,
}

impl_positioned!(End);

/// Expression. Currently limited to a single literal or identifier.
#[derive(Clone, Debug, PartialEq)]
pub enum Expression {
    Integer(i64, Position),
    Decimal(f64, Position),
    Identifier(String, Position),
}

impl Positioned for Expression {
    fn position(self: &Self) -> Position {
        match self {
            Expression::Integer(_, position) => *position,
            Expression::Decimal(_, position) => *position,
            Expression::Identifier(_, position) => *position,
        }
    }
}

impl Display for Expression {
    fn fmt(self: &Self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Expression::Integer(value, _) => write!(f, "{}", value),
            Expression::Decimal(value, _) => write!(f, "{}", value),
            Expression::Identifier(name, _) => write!(f, "{}", name),
        }
    }
}
