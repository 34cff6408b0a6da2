//! Nom based scanner producing the token sequence consumed by the parser.

pub mod error;
pub mod token;

use std::sync::Arc;
use nom::IResult;
use nom::branch::alt;
use nom::bytes::complete::{tag, take_till, take_until, take_while, take_while1};
use nom::character::complete::{char, multispace1};
use nom::combinator::{recognize, value};
use nom::sequence::{delimited, pair, tuple};
use tracing::{debug, warn};
use crate::config::MAX_TOKEN_LEN;
use crate::shared::{ErrorPolicy, bounded::BoundedString};
use error::{LexError, LexErrorKind, LexResult};
use token::{Token, TokenKind};

type Output<'a, O> = IResult<&'a str, O>;

// whitespace and comments

fn whitespace(i: &str) -> Output<&str> {
    multispace1(i)
}

fn line_comment(i: &str) -> Output<&str> {
    recognize(pair(tag("//"), take_till(|c: char| c == '\n')))(i)
}

fn block_comment(i: &str) -> Output<&str> {
    recognize(tuple((tag("/*"), take_until("*/"), tag("*/"))))(i)
}

// identifiers and reserved words ([a-zA-Z_]+)

fn word(i: &str) -> Output<&str> {
    take_while1(|c: char| c.is_ascii_alphabetic() || c == '_')(i)
}

// numbers (digits with any number of dots, validated by the caller)

fn number(i: &str) -> Output<&str> {
    recognize(pair(
        take_while1(|c: char| c.is_ascii_digit()),
        take_while(|c: char| c.is_ascii_digit() || c == '.'),
    ))(i)
}

// strings ('hello')

fn string(i: &str) -> Output<&str> {
    delimited(char('\''), take_until("'"), char('\''))(i)
}

// operators and delimiters, multi-character symbols first

fn symbol(i: &str) -> Output<TokenKind> {
    use TokenKind::*;
    alt((
        alt((
            value(Assign, tag(":=")),
            value(NotEqual, tag("<>")),
            value(LessEqual, tag("<=")),
            value(GreaterEqual, tag(">=")),
            value(Arrow, tag("->")),
        )),
        alt((
            value(Plus, char('+')),
            value(Minus, char('-')),
            value(Star, char('*')),
            value(Slash, char('/')),
            value(Percent, char('%')),
            value(Equal, char('=')),
            value(Less, char('<')),
            value(Greater, char('>')),
            value(LParen, char('(')),
            value(RParen, char(')')),
            value(LBracket, char('[')),
        )),
        alt((
            value(RBracket, char(']')),
            value(Comma, char(',')),
            value(Semicolon, char(';')),
            value(Colon, char(':')),
            value(Dot, char('.')),
            value(Ampersand, char('&')),
            value(Pipe, char('|')),
            value(Caret, char('^')),
            value(Bang, char('!')),
            value(AtSign, char('@')),
        )),
    ))(i)
}

/// Result of scanning at the current position.
enum Scan<'a> {
    /// Whitespace or comment of the given length.
    Skip(usize),
    /// Token kind, token text and number of bytes consumed.
    Token(TokenKind, &'a str, usize),
    /// Error kind and number of bytes belonging to the offending input.
    Fail(LexErrorKind, usize),
    Unexpected(char),
}

/// Output of a lexer run.
#[derive(Clone, Debug)]
pub struct Lexed {
    /// Tokens in source order, always terminated by `TokenKind::Eof`.
    pub tokens: Vec<Token>,
    /// Errors that were recovered from. Always empty with `ErrorPolicy::Abort`.
    pub errors: Vec<LexError>,
}

struct Lexer<'a> {
    source  : &'a str,
    offset  : usize,
    line    : u32,
    column  : u32,
    file    : Arc<str>,
    policy  : ErrorPolicy,
    tokens  : Vec<Token>,
    errors  : Vec<LexError>,
}

impl<'a> Lexer<'a> {

    fn new(source: &'a str, file: &str, policy: ErrorPolicy) -> Self {
        // a NUL character terminates the input
        let source = match source.find('\0') {
            Some(end) => &source[..end],
            None => source,
        };
        Lexer {
            source  : source,
            offset  : 0,
            line    : 1,
            column  : 1,
            file    : Arc::from(file),
            policy  : policy,
            tokens  : Vec::new(),
            errors  : Vec::new(),
        }
    }

    fn run(mut self: Self) -> LexResult<Lexed> {
        let source = self.source;
        while self.offset < source.len() {
            let (line, column) = (self.line, self.column);
            match Self::scan(&source[self.offset..]) {
                Scan::Skip(len) => self.advance(len),
                Scan::Token(kind, text, len) => match BoundedString::new(text) {
                    Ok(text) => {
                        self.tokens.push(Token { kind, text, file: self.file.clone(), line, column });
                        self.advance(len);
                    }
                    Err(_) => self.fail(LexErrorKind::TokenTooLong, len)?,
                },
                Scan::Fail(kind, len) => self.fail(kind, len)?,
                Scan::Unexpected(c) => {
                    warn!("{}:{}:{}: skipping unexpected character {:?}", self.file, line, column, c);
                    self.advance(c.len_utf8());
                }
            }
        }
        self.tokens.push(Token::eof(self.file.clone(), self.line, self.column));
        debug!("{}: lexed {} tokens, {} errors", self.file, self.tokens.len(), self.errors.len());
        Ok(Lexed { tokens: self.tokens, errors: self.errors })
    }

    /// Scans the input at the start of `rest`, which must not be empty.
    fn scan(rest: &'a str) -> Scan<'a> {
        if let Ok((_, ws)) = whitespace(rest) {
            return Scan::Skip(ws.len());
        }
        if let Ok((_, comment)) = line_comment(rest) {
            return Scan::Skip(comment.len());
        }
        if rest.starts_with("/*") {
            return match block_comment(rest) {
                Ok((_, comment)) => Scan::Skip(comment.len()),
                Err(_) => Scan::Fail(LexErrorKind::UnterminatedComment, rest.len()),
            };
        }
        if let Ok((_, w)) = word(rest) {
            let kind = TokenKind::reserved(w).unwrap_or(TokenKind::Ident);
            return Scan::Token(kind, w, w.len());
        }
        if let Ok((_, n)) = number(rest) {
            return match n.matches('.').count() {
                0 => Scan::Token(TokenKind::Int, n, n.len()),
                1 => Scan::Token(TokenKind::Dec, n, n.len()),
                _ => Scan::Fail(LexErrorKind::MalformedNumber, n.len()),
            };
        }
        if rest.starts_with('\'') {
            return match string(rest) {
                Ok((remaining, content)) => Scan::Token(TokenKind::Str, content, rest.len() - remaining.len()),
                Err(_) => Scan::Fail(LexErrorKind::UnterminatedString, 1),
            };
        }
        if let Ok((remaining, kind)) = symbol(rest) {
            let len = rest.len() - remaining.len();
            return Scan::Token(kind, &rest[..len], len);
        }
        match rest.chars().next() {
            Some(c) => Scan::Unexpected(c),
            None => Scan::Skip(0),
        }
    }

    /// Reports an error at the current position. When recovering, emits an error token covering the offending
    /// input up to the next whitespace and continues after it.
    fn fail(self: &mut Self, kind: LexErrorKind, len: usize) -> LexResult {
        let error = LexError::new(kind, self.file.clone(), self.line, self.column);
        if self.policy == ErrorPolicy::Abort {
            return Err(error);
        }
        warn!("{}, recovering", error);
        let source = self.source;
        let rest = &source[self.offset..];
        let to_whitespace = rest.find(char::is_whitespace).unwrap_or(rest.len());
        let skip = len.max(to_whitespace);
        self.tokens.push(Token {
            kind    : TokenKind::Error,
            text    : BoundedString::new(truncate(&rest[..skip], MAX_TOKEN_LEN)).unwrap_or_default(),
            file    : self.file.clone(),
            line    : self.line,
            column  : self.column,
        });
        self.errors.push(error);
        self.advance(skip);
        Ok(())
    }

    /// Moves the position forward by `len` bytes, tracking line and column.
    fn advance(self: &mut Self, len: usize) {
        let source = self.source;
        for c in source[self.offset..self.offset + len].chars() {
            if c == '\n' {
                self.line += 1;
                self.column = 1;
            } else {
                self.column += 1;
            }
        }
        self.offset += len;
    }
}

/// Truncates text to at most `max` bytes on a char boundary.
fn truncate(text: &str, max: usize) -> &str {
    if text.len() <= max {
        return text;
    }
    let mut end = max;
    while !text.is_char_boundary(end) {
        end -= 1;
    }
    &text[..end]
}

/// Lexes source text into tokens, failing on the first lex error. `file` tags the tokens for diagnostics.
///
/// ```
/// use yang::lexer::{tokenize, TokenKind};
///
/// let tokens = tokenize("decl x int;", "repl").unwrap();
/// assert_eq!(tokens[0].kind, TokenKind::Declare);
/// assert_eq!(tokens.last().unwrap().kind, TokenKind::Eof);
/// ```
pub fn tokenize(source: &str, file: &str) -> LexResult<Vec<Token>> {
    Ok(tokenize_with(source, file, ErrorPolicy::Abort)?.tokens)
}

/// Lexes source text using the given error policy. With `ErrorPolicy::Recover` this never fails; errors are
/// returned alongside the tokens and an `Error` token marks each skipped region.
pub fn tokenize_with(source: &str, file: &str, policy: ErrorPolicy) -> LexResult<Lexed> {
    Lexer::new(source, file, policy).run()
}
