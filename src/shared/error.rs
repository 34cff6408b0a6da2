use std::fmt::{self, Display};
#[cfg(feature="compiler")]
use crate::frontend::{lexer::error::LexError, parser::error::ParseError};
#[cfg(feature="compiler")]
use crate::bytecode::assembler::error::AssembleError;
use crate::bytecode::error::LoadError;
#[cfg(feature="runtime")]
use crate::bytecode::runtime::error::RuntimeError;

/// An error generated by any stage: lexing, parsing, assembling, loading or execution.
#[derive(Debug)]
pub enum Error {
    #[cfg(feature="compiler")]
    LexError(LexError),
    #[cfg(feature="compiler")]
    ParseError(ParseError),
    #[cfg(feature="compiler")]
    AssembleError(AssembleError),
    LoadError(LoadError),
    #[cfg(feature="runtime")]
    RuntimeError(RuntimeError),
}

impl Display for Error {
    fn fmt(self: &Self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            #[cfg(feature="compiler")]
            Self::LexError(e) => write!(f, "{}", e),
            #[cfg(feature="compiler")]
            Self::ParseError(e) => write!(f, "{}", e),
            #[cfg(feature="compiler")]
            Self::AssembleError(e) => write!(f, "{}", e),
            Self::LoadError(e) => write!(f, "{}", e),
            #[cfg(feature="runtime")]
            Self::RuntimeError(e) => write!(f, "{}", e),
        }
    }
}

impl std::error::Error for Error {
    fn source(self: &Self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            #[cfg(feature="compiler")]
            Self::LexError(e) => Some(e),
            #[cfg(feature="compiler")]
            Self::ParseError(e) => Some(e),
            #[cfg(feature="compiler")]
            Self::AssembleError(e) => Some(e),
            Self::LoadError(e) => Some(e),
            #[cfg(feature="runtime")]
            Self::RuntimeError(e) => Some(e),
        }
    }
}

#[cfg(feature="compiler")]
impl From<LexError> for Error {
    fn from(error: LexError) -> Error {
        Error::LexError(error)
    }
}

#[cfg(feature="compiler")]
impl From<ParseError> for Error {
    fn from(error: ParseError) -> Error {
        Error::ParseError(error)
    }
}

#[cfg(feature="compiler")]
impl From<AssembleError> for Error {
    fn from(error: AssembleError) -> Error {
        Error::AssembleError(error)
    }
}

impl From<LoadError> for Error {
    fn from(error: LoadError) -> Error {
        Error::LoadError(error)
    }
}

#[cfg(feature="runtime")]
impl From<RuntimeError> for Error {
    fn from(error: RuntimeError) -> Error {
        Error::RuntimeError(error)
    }
}
