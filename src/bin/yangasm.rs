//! Assembles mnemonic source into a yang executable.
//!
//! Usage: `yangasm <input.yasm> [-o output.yang]`

use std::fs;
use std::path::PathBuf;
use std::process;

use clap::Parser;
use tracing::{error, info};

use yang::assembler::assemble;

mod shared;

#[derive(Parser, Debug)]
#[command(name = "yangasm")]
#[command(about = "Assemble yang mnemonic source into an executable image")]
struct Args {
    /// Assembly source file
    input: PathBuf,

    /// Output file, defaults to the input file with a .yang extension
    #[arg(short, long)]
    output: Option<PathBuf>,
}

fn main() {
    shared::init_logging();

    let args = Args::parse();
    let output = args.output.clone().unwrap_or_else(|| args.input.with_extension("yang"));

    let source = match fs::read_to_string(&args.input) {
        Ok(source) => source,
        Err(err) => {
            error!("Failed to read {}: {}", args.input.display(), err);
            process::exit(1);
        }
    };

    let program = match assemble(&source) {
        Ok(program) => program,
        Err(err) => {
            error!("{}: {}", args.input.display(), err);
            process::exit(1);
        }
    };

    if let Err(err) = fs::write(&output, program.to_bytes()) {
        error!("Failed to write {}: {}", output.display(), err);
        process::exit(1);
    }

    info!("Wrote {} instructions to {}", program.len(), output.display());
}
