use rustyline::error::ReadlineError;
use rustyline::{Config, DefaultEditor};
use std::io::{self, Write};

use crate::evm::disasm::disassemble;
use crate::evm::input::{parse_hex, InputError};
use crate::{log_debug, log_warn};

const PROMPT: &str = "evm> ";

/// What to do with one line of shell input.
#[derive(Debug, PartialEq, Eq)]
enum Step {
    Exit,
    Skip,
    Listing(Vec<String>),
}

fn handle_line(line: &str) -> Result<Step, InputError> {
    match line.trim() {
        "exit" | "quit" => Ok(Step::Exit),
        "" => Ok(Step::Skip),
        text => Ok(Step::Listing(disassemble(&parse_hex(text)?))),
    }
}

/// Reads hex bytecode a line at a time and prints each listing.
pub fn repl() -> rustyline::Result<()> {
    let config = Config::builder().auto_add_history(true).build();
    let mut rl = DefaultEditor::with_config(config)?;

    loop {
        match rl.readline(PROMPT) {
            Ok(line) => match handle_line(&line) {
                Ok(Step::Exit) => break,
                Ok(Step::Skip) => {}
                Ok(Step::Listing(lines)) => {
                    log_debug!("Shell listing", lines = lines.len());
                    let mut out = io::stdout().lock();
                    for l in lines {
                        let _ = writeln!(out, "{}", l);
                    }
                }
                Err(e) => {
                    log_warn!("Rejected shell input", error = e.to_string().as_str());
                    let _ = writeln!(io::stderr(), "Error: {}", e);
                }
            },
            Err(ReadlineError::Interrupted) | Err(ReadlineError::Eof) => break,
            Err(err) => return Err(err),
        }
    }
    Ok(())
}
