use std::sync::Arc;
use crate::prelude::*;
use crate::config::MAX_TOKEN_LEN;
use crate::shared::bounded::BoundedString;

/// Kind of a lexed token.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum TokenKind {
    Eof,
    Int,
    Dec,
    Str,
    Ident,
    TypeName,
    /// Placeholder for input that failed to lex. Only produced when recovering.
    Error,
    // keywords
    If,
    Then,
    Else,
    Do,
    End,
    Declare,
    Struct,
    Union,
    Label,
    Const,
    Initial,
    Typedef,
    Proc,
    Extern,
    Public,
    Native,
    At,
    Goto,
    By,
    Case,
    While,
    Leave,
    Iterate,
    Call,
    Return,
    Halt,
    // operators and delimiters
    Assign,         // :=
    NotEqual,       // <>
    LessEqual,      // <=
    GreaterEqual,   // >=
    Arrow,          // ->
    Plus,
    Minus,
    Star,
    Slash,
    Percent,
    Equal,
    Less,
    Greater,
    LParen,
    RParen,
    LBracket,
    RBracket,
    Comma,
    Semicolon,
    Colon,
    Dot,
    Ampersand,
    Pipe,
    Caret,
    Bang,
    AtSign,
}

/// Reserved words, matched against whole identifier runs.
pub(crate) const KEYWORDS: &[ (&str, TokenKind) ] = &[
    ("if",          TokenKind::If),
    ("then",        TokenKind::Then),
    ("else",        TokenKind::Else),
    ("do",          TokenKind::Do),
    ("end",         TokenKind::End),
    ("decl",        TokenKind::Declare),
    ("struct",      TokenKind::Struct),
    ("union",       TokenKind::Union),
    ("label",       TokenKind::Label),
    ("const",       TokenKind::Const),
    ("initial",     TokenKind::Initial),
    ("typedef",     TokenKind::Typedef),
    ("proc",        TokenKind::Proc),
    ("extern",      TokenKind::Extern),
    ("public",      TokenKind::Public),
    ("native",      TokenKind::Native),
    ("at",          TokenKind::At),
    ("goto",        TokenKind::Goto),
    ("by",          TokenKind::By),
    ("case",        TokenKind::Case),
    ("while",       TokenKind::While),
    ("leave",       TokenKind::Leave),
    ("iterate",     TokenKind::Iterate),
    ("call",        TokenKind::Call),
    ("return",      TokenKind::Return),
    ("halt",        TokenKind::Halt),
];

/// Built-in type names. These lex as `TokenKind::TypeName`.
pub(crate) const TYPE_NAMES: &[ &str ] = &[
    "int", "uint", "byte", "word", "dword", "float", "char", "bool", "string",
];

impl TokenKind {
    /// Looks up the reserved word table for the given identifier run.
    pub(crate) fn reserved(word: &str) -> Option<TokenKind> {
        if let Some(&(_, kind)) = KEYWORDS.iter().find(|(keyword, _)| *keyword == word) {
            Some(kind)
        } else if TYPE_NAMES.contains(&word) {
            Some(TokenKind::TypeName)
        } else {
            None
        }
    }
    /// Whether this kind is a reserved keyword.
    pub fn is_keyword(self: &Self) -> bool {
        KEYWORDS.iter().any(|(_, kind)| kind == self)
    }
    /// Short human readable description used in diagnostics.
    pub fn describe(self: &Self) -> &'static str {
        use TokenKind::*;
        if let Some(&(word, _)) = KEYWORDS.iter().find(|(_, kind)| kind == self) {
            return word;
        }
        match self {
            Eof             => "end of file",
            Int             => "integer literal",
            Dec             => "decimal literal",
            Str             => "string literal",
            Ident           => "identifier",
            TypeName        => "type name",
            Error           => "invalid input",
            Assign          => ":=",
            NotEqual        => "<>",
            LessEqual       => "<=",
            GreaterEqual    => ">=",
            Arrow           => "->",
            Plus            => "+",
            Minus           => "-",
            Star            => "*",
            Slash           => "/",
            Percent         => "%",
            Equal           => "=",
            Less            => "<",
            Greater         => ">",
            LParen          => "(",
            RParen          => ")",
            LBracket        => "[",
            RBracket        => "]",
            Comma           => ",",
            Semicolon       => ";",
            Colon           => ":",
            Dot             => ".",
            Ampersand       => "&",
            Pipe            => "|",
            Caret           => "^",
            Bang            => "!",
            AtSign          => "@",
            _               => "keyword",
        }
    }
}

impl Display for TokenKind {
    fn fmt(self: &Self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.describe())
    }
}

/// A lexed token with its source location.
#[derive(Clone, Debug, PartialEq)]
pub struct Token {
    pub kind    : TokenKind,
    pub text    : BoundedString<MAX_TOKEN_LEN>,
    pub file    : Arc<str>,
    /// 1-based line number.
    pub line    : u32,
    /// 1-based column number.
    pub column  : u32,
}

impl Token {
    /// Creates the end of file token at the given location.
    pub(crate) fn eof(file: Arc<str>, line: u32, column: u32) -> Self {
        Token { kind: TokenKind::Eof, text: BoundedString::default(), file, line, column }
    }
    /// Returns the token text.
    pub fn text(self: &Self) -> &str {
        self.text.as_str()
    }
}

impl Display for Token {
    fn fmt(self: &Self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.kind {
            TokenKind::Int | TokenKind::Dec | TokenKind::Ident | TokenKind::TypeName | TokenKind::Error => write!(f, "{}({})", self.kind, self.text),
            TokenKind::Str => write!(f, "'{}'", self.text),
            _ => write!(f, "{}", self.kind),
        }
    }
}
