//! Recursive descent parser generating the statement AST from lexed tokens.

pub mod error;

use std::sync::Arc;
use tracing::{debug, warn};
use crate::config::{MAX_NESTING, MAX_SYMBOL_LEN};
use crate::shared::{ErrorPolicy, bounded::BoundedString};
use crate::frontend::lexer::token::{Token, TokenKind};
use crate::frontend::ast::*;
use error::{ParseError, ParseErrorKind, ParseResult, Severity};

/// Output of a parser run.
#[derive(Clone, Debug)]
pub struct Parsed {
    /// The root `Statement::Program`.
    pub program     : Statement,
    /// Warnings and, when recovering, the errors that were skipped over.
    pub diagnostics : Vec<ParseError>,
}

struct Parser<'t> {
    tokens      : &'t [ Token ],
    index       : usize,
    /// Returned once the token slice is exhausted.
    eof         : Token,
    /// Number of enclosing module blocks.
    depth       : usize,
    policy      : ErrorPolicy,
    diagnostics : Vec<ParseError>,
}

fn position(token: &Token) -> Position {
    Position::new(token.line, token.column)
}

impl<'t> Parser<'t> {

    fn new(tokens: &'t [ Token ], policy: ErrorPolicy) -> Self {
        let eof = match tokens.last() {
            Some(last) if last.kind == TokenKind::Eof => last.clone(),
            Some(last) => Token::eof(last.file.clone(), last.line, last.column + last.text.len() as u32),
            None => Token::eof(Arc::from(""), 1, 1),
        };
        Parser { tokens, index: 0, eof, depth: 0, policy, diagnostics: Vec::new() }
    }

    // token access

    fn current(self: &Self) -> &Token {
        self.tokens.get(self.index).unwrap_or(&self.eof)
    }

    fn peek(self: &Self) -> &Token {
        self.tokens.get(self.index + 1).unwrap_or(&self.eof)
    }

    fn check(self: &Self, kind: TokenKind) -> bool {
        self.current().kind == kind
    }

    /// Returns the current token and moves on. Never moves past end of file.
    fn advance(self: &mut Self) -> Token {
        let token = self.current().clone();
        if token.kind != TokenKind::Eof {
            self.index += 1;
        }
        token
    }

    /// Consumes the current token if it is of the given kind.
    fn accept(self: &mut Self, kind: TokenKind) -> Option<Token> {
        if self.check(kind) {
            Some(self.advance())
        } else {
            None
        }
    }

    fn expect(self: &mut Self, kind: TokenKind, expected: &'static str) -> ParseResult<Token> {
        match self.accept(kind) {
            Some(token) => Ok(token),
            None => Err(self.unexpected(expected)),
        }
    }

    // diagnostics

    fn error(self: &Self, kind: ParseErrorKind, token: &Token) -> ParseError {
        ParseError::new(kind, Severity::Error, token.file.clone(), position(token))
    }

    fn unexpected(self: &Self, expected: &'static str) -> ParseError {
        let current = self.current();
        self.error(ParseErrorKind::UnexpectedToken { expected, found: current.to_string() }, current)
    }

    /// Records a non-fatal diagnostic.
    fn warn(self: &mut Self, kind: ParseErrorKind, token: &Token) {
        let warning = ParseError::new(kind, Severity::Warning, token.file.clone(), position(token));
        warn!("{}", warning);
        self.diagnostics.push(warning);
    }

    /// Applies the error policy: returns the error when aborting, records it when recovering.
    fn report(self: &mut Self, error: ParseError) -> ParseResult {
        match self.policy {
            ErrorPolicy::Abort => Err(error),
            ErrorPolicy::Recover => {
                warn!("{}, skipping to next statement", error);
                self.diagnostics.push(error);
                Ok(())
            }
        }
    }

    /// Skips tokens up to and including the next `;`, or up to end of file.
    fn synchronize(self: &mut Self) {
        while !self.check(TokenKind::Eof) {
            if self.advance().kind == TokenKind::Semicolon {
                break;
            }
        }
    }

    fn symbol_name(self: &Self, token: &Token) -> ParseResult<BoundedString<MAX_SYMBOL_LEN>> {
        BoundedString::new(token.text()).map_err(|_| self.error(ParseErrorKind::NameTooLong(token.text().to_string()), token))
    }

    // grammar

    /// Parses statements up to end of file or, inside a module, up to and including its `end`.
    fn block(self: &mut Self, enclosing: Option<&str>) -> ParseResult<Vec<Statement>> {
        let mut children = Vec::new();
        loop {
            match (self.current().kind, enclosing) {
                (TokenKind::Eof, None) => return Ok(children),
                (TokenKind::Eof, Some(_)) => {
                    let error = self.unexpected("end");
                    self.report(error)?;
                    return Ok(children);
                }
                (TokenKind::End, Some(name)) => {
                    match self.end(name) {
                        Ok(end) => children.push(Statement::End(end)),
                        Err(error) => {
                            self.report(error)?;
                            self.synchronize();
                        }
                    }
                    return Ok(children);
                }
                _ => match self.statement() {
                    Ok(statement) => children.push(statement),
                    Err(error) => {
                        self.report(error)?;
                        self.synchronize();
                    }
                },
            }
        }
    }

    fn statement(self: &mut Self) -> ParseResult<Statement> {
        match self.current().kind {
            TokenKind::Declare => Ok(Statement::Decl(self.decl()?)),
            TokenKind::Proc => Ok(Statement::Procedure(self.procedure()?)),
            TokenKind::Ident if self.peek().kind == TokenKind::Colon => Ok(Statement::Module(self.module()?)),
            _ => Err(self.unexpected("statement")),
        }
    }

    // decl a (10) int typedef, b float;

    fn decl(self: &mut Self) -> ParseResult<Decl> {
        self.expect(TokenKind::Declare, "decl")?;
        let mut decl = self.declarator()?;
        while self.accept(TokenKind::Comma).is_some() {
            self.accept(TokenKind::Declare);
            let chained = self.declarator()?;
            decl.children.push(chained);
        }
        self.expect(TokenKind::Semicolon, ";")?;
        Ok(decl)
    }

    fn declarator(self: &mut Self) -> ParseResult<Decl> {
        let name = self.expect(TokenKind::Ident, "identifier")?;
        let array_size = if self.accept(TokenKind::LParen).is_some() {
            let size = if self.check(TokenKind::RParen) { None } else { Some(self.expression()?) };
            self.expect(TokenKind::RParen, ")")?;
            Some(ArraySize(size))
        } else {
            None
        };
        let type_name = self.type_name()?;
        let mut decl = Decl {
            position    : position(&name),
            symbol      : Symbol { name: self.symbol_name(&name)?, visibility: Visibility::Private },
            type_name   : type_name,
            is_constant : false,
            is_typedef  : false,
            array_size  : array_size,
            initial     : None,
            children    : Vec::new(),
        };
        loop {
            match self.current().kind {
                TokenKind::Typedef => decl.is_typedef = true,
                TokenKind::Const => decl.is_constant = true,
                TokenKind::Public => decl.symbol.visibility = Visibility::Public,
                TokenKind::Initial => {
                    self.advance();
                    self.expect(TokenKind::LParen, "(")?;
                    decl.initial = Some(self.expression()?);
                    self.expect(TokenKind::RParen, ")")?;
                    continue;
                }
                _ => break,
            }
            self.advance();
        }
        Ok(decl)
    }

    /// Built-in type names or user defined (typedef) names.
    fn type_name(self: &mut Self) -> ParseResult<String> {
        match self.current().kind {
            TokenKind::TypeName | TokenKind::Ident => Ok(self.advance().text().to_string()),
            _ => Err(self.unexpected("type name")),
        }
    }

    // name: do; ... end name;

    fn module(self: &mut Self) -> ParseResult<Module> {
        if self.depth >= MAX_NESTING {
            return Err(self.error(ParseErrorKind::NestingTooDeep, self.current()));
        }
        let name_token = self.expect(TokenKind::Ident, "identifier")?;
        self.expect(TokenKind::Colon, ":")?;
        self.expect(TokenKind::Do, "do")?;
        self.expect(TokenKind::Semicolon, ";")?;
        let name = self.symbol_name(&name_token)?;
        self.depth += 1;
        let children = self.block(Some(name.as_str()));
        self.depth -= 1;
        let children = children?;
        Ok(Module {
            position    : position(&name_token),
            name        : name,
            children    : children,
        })
    }

    fn end(self: &mut Self, enclosing: &str) -> ParseResult<End> {
        let end = self.expect(TokenKind::End, "end")?;
        let name = self.accept(TokenKind::Ident);
        self.expect(TokenKind::Semicolon, ";")?;
        if let Some(name) = &name {
            if name.text() != enclosing {
                self.warn(ParseErrorKind::NameMismatch { expected: enclosing.to_string(), found: name.text().to_string() }, name);
            }
        }
        Ok(End {
            position    : position(&end),
            name        : name.map(|name| name.text().to_string()),
        })
    }

    // proc name(a int, b) int public;

    fn procedure(self: &mut Self) -> ParseResult<Procedure> {
        self.expect(TokenKind::Proc, "proc")?;
        let name = self.expect(TokenKind::Ident, "identifier")?;
        self.expect(TokenKind::LParen, "(")?;
        let mut arguments = Vec::new();
        if !self.check(TokenKind::RParen) {
            loop {
                let argument = self.expect(TokenKind::Ident, "argument name")?;
                let type_name = match self.current().kind {
                    TokenKind::TypeName | TokenKind::Ident => Some(self.type_name()?),
                    _ => None,
                };
                arguments.push(Argument { name: self.symbol_name(&argument)?, type_name });
                if self.accept(TokenKind::Comma).is_none() {
                    break;
                }
            }
        }
        self.expect(TokenKind::RParen, ")")?;
        let return_type = self.type_name()?;
        let visibility = if self.accept(TokenKind::Public).is_some() { Visibility::Public } else { Visibility::Private };
        self.expect(TokenKind::Semicolon, ";")?;
        Ok(Procedure {
            position    : position(&name),
            symbol      : Symbol { name: self.symbol_name(&name)?, visibility },
            return_type : return_type,
            arguments   : arguments,
        })
    }

    // expression (a single literal or identifier)

    fn expression(self: &mut Self) -> ParseResult<Expression> {
        let token = self.current().clone();
        let at = position(&token);
        let expression = match token.kind {
            TokenKind::Int => token.text().parse::<i64>().ok().map(|value| Expression::Integer(value, at)),
            TokenKind::Dec => token.text().parse::<f64>().ok().map(|value| Expression::Decimal(value, at)),
            TokenKind::Ident => Some(Expression::Identifier(token.text().to_string(), at)),
            _ => return Err(self.unexpected("expression")),
        };
        self.advance();
        expression.ok_or_else(|| self.error(ParseErrorKind::InvalidNumber(token.text().to_string()), &token))
    }

    fn finish(self: Self, children: Vec<Statement>) -> Parsed {
        debug!("parsed {} top level statements, {} diagnostics", children.len(), self.diagnostics.len());
        Parsed {
            program     : Statement::Program(children),
            diagnostics : self.diagnostics,
        }
    }
}

/// Parses tokens into a `Statement::Program`. Errors are recorded as diagnostics and parsing resumes at the next
/// statement boundary.
///
/// ```
/// use yang::{lexer::tokenize, parser::parse};
///
/// let tokens = tokenize("x; decl y int;", "repl").unwrap();
/// let parsed = parse(&tokens);
/// assert_eq!(parsed.program.children().len(), 1);
/// assert_eq!(parsed.diagnostics.len(), 1);
/// ```
pub fn parse(tokens: &[ Token ]) -> Parsed {
    let mut parser = Parser::new(tokens, ErrorPolicy::Recover);
    let children = match parser.block(None) {
        Ok(children) => children,
        Err(error) => {
            parser.diagnostics.push(error);
            Vec::new()
        }
    };
    parser.finish(children)
}

/// Parses tokens into a `Statement::Program`, failing on the first error. Name mismatches on `end` are
/// warnings and do not fail.
///
/// ```
/// use yang::{lexer::tokenize, parser::parse_strict};
///
/// let tokens = tokenize("decl x int;", "repl").unwrap();
/// let program = parse_strict(&tokens).unwrap();
/// assert_eq!(program.children().len(), 1);
/// assert!(parse_strict(&tokenize("x;", "repl").unwrap()).is_err());
/// ```
pub fn parse_strict(tokens: &[ Token ]) -> ParseResult<Statement> {
    Ok(parse_with(tokens, ErrorPolicy::Abort)?.program)
}

/// Parses tokens into a `Statement::Program` using the given error policy. With `ErrorPolicy::Recover` this never
/// fails; skipped errors are returned as diagnostics.
pub fn parse_with(tokens: &[ Token ], policy: ErrorPolicy) -> ParseResult<Parsed> {
    let mut parser = Parser::new(tokens, policy);
    let children = parser.block(None)?;
    Ok(parser.finish(children))
}

/// Returns whether the tokens end on a statement boundary outside of any module block. Interactive front ends use
/// this to keep reading lines until the buffered input can be parsed as a whole.
///
/// ```
/// use yang::{lexer::tokenize, parser::is_complete};
///
/// assert!(!is_complete(&tokenize("m: do;", "repl").unwrap()));
/// assert!(is_complete(&tokenize("m: do; decl x int; end m;", "repl").unwrap()));
/// ```
pub fn is_complete(tokens: &[ Token ]) -> bool {
    let opened = tokens.windows(3)
        .filter(|window| window[0].kind == TokenKind::Ident && window[1].kind == TokenKind::Colon && window[2].kind == TokenKind::Do)
        .count();
    let closed = tokens.iter().filter(|token| token.kind == TokenKind::End).count();
    let last = tokens.iter().rev().find(|token| token.kind != TokenKind::Eof);
    match last {
        None => true,
        Some(token) => closed >= opened && matches!(token.kind, TokenKind::Semicolon | TokenKind::Error),
    }
}
