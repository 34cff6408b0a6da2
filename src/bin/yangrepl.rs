//! Reads source from standard input and prints its tokens and syntax tree.
//!
//! Lines are buffered until they end on a statement boundary outside of any module block, so a module may span
//! several lines. Remaining input is processed at end of file.
//!
//! Usage: `yangrepl [--strict]`

use std::io::{self, BufRead};

use clap::Parser;
use tracing::{error, warn};

use yang::ErrorPolicy;
use yang::lexer::{tokenize_with, Lexed, TokenKind};
use yang::parser::{is_complete, parse_with};

mod shared;

#[derive(Parser, Debug)]
#[command(name = "yangrepl")]
#[command(about = "Tokenize and parse yang source read from stdin")]
struct Args {
    /// Stop at the first lex or parse error of each input
    #[arg(long)]
    strict: bool,
}

/// Source lines not yet processed.
struct Buffer {
    source      : String,
    /// Line number of the first buffered line.
    start_line  : usize,
}

fn main() {
    shared::init_logging();

    let args = Args::parse();
    let policy = if args.strict { ErrorPolicy::Abort } else { ErrorPolicy::Recover };
    let mut buffer = Buffer { source: String::new(), start_line: 1 };

    for (index, line) in io::stdin().lock().lines().enumerate() {
        let line = match line {
            Ok(line) => line,
            Err(err) => {
                error!("Failed to read input: {}", err);
                break;
            }
        };
        if buffer.source.is_empty() {
            buffer.start_line = index + 1;
        }
        buffer.source.push_str(&line);
        buffer.source.push('\n');

        let file = format!("stdin@{}", buffer.start_line);
        match tokenize_with(&buffer.source, &file, policy) {
            Ok(lexed) if !is_complete(&lexed.tokens) => continue,
            Ok(lexed) => process(&lexed, policy),
            Err(err) => error!("{}", err),
        }
        buffer.source.clear();
    }

    if !buffer.source.trim().is_empty() {
        let file = format!("stdin@{}", buffer.start_line);
        match tokenize_with(&buffer.source, &file, policy) {
            Ok(lexed) => process(&lexed, policy),
            Err(err) => error!("{}", err),
        }
    }
}

/// Prints tokens and the parsed program of one complete input.
fn process(lexed: &Lexed, policy: ErrorPolicy) {
    for err in &lexed.errors {
        warn!("{}", err);
    }
    for token in lexed.tokens.iter().filter(|token| token.kind != TokenKind::Eof) {
        println!("{:>4}:{:<3} {:<12} {}", token.line, token.column, token.kind.to_string(), token.text());
    }

    match parse_with(&lexed.tokens, policy) {
        Ok(parsed) => {
            for diagnostic in &parsed.diagnostics {
                warn!("{}", diagnostic);
            }
            println!("{:#?}", parsed.program);
        }
        Err(err) => error!("{}", err),
    }
}
