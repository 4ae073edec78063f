use crate::evm::logging::{LogFormat, LogLevel, LoggingConfig};
use crate::evm::shell::repl::repl;
use crate::evm::{disassemble, resolve_code};

mod evm;
use clap::Parser;
use std::path::PathBuf;
use std::process::exit;

#[derive(Parser)]
#[command(name = "evmdis")]
#[command(about = "Disassemble EVM bytecode into a code/data listing")]
#[command(version)]
struct Cli {
    /// Bytecode as a hex string, or a path to a file holding one (0x prefix optional)
    #[arg(long, value_name = "HEX|PATH", required_unless_present = "shell")]
    code: Option<String>,

    /// Read bytecode interactively, one hex string per line
    #[arg(long, conflicts_with = "code")]
    shell: bool,

    /// Set the logging level
    #[arg(long, value_enum, default_value = "warn")]
    log_level: LogLevel,

    /// Also write logs to stderr (in addition to the log file)
    #[arg(long)]
    log_console: bool,

    /// Custom log file path
    #[arg(long, value_name = "PATH")]
    log_file: Option<PathBuf>,

    /// Log output format
    #[arg(long, value_enum, default_value = "text")]
    log_format: LogFormat,
}

fn main() {
    let cli = Cli::parse();

    let logging_config = LoggingConfig {
        level: cli.log_level,
        console_output: cli.log_console,
        file_path: cli.log_file.map(|p| p.to_string_lossy().to_string()),
        format: cli.log_format,
    };

    let _guard = match crate::evm::logging::init_logging(logging_config) {
        Ok(guard) => guard,
        Err(e) => {
            eprintln!("FATAL: Failed to initialize logging system: {}", e);
            exit(1);
        }
    };

    crate::log_info!("evmdis starting", version = env!("CARGO_PKG_VERSION"));

    if cli.shell {
        if let Err(e) = repl() {
            crate::log_error!("Shell failed", error = e.to_string().as_str());
            eprintln!("Shell error: {}", e);
            exit(1);
        }
    } else if let Some(code) = cli.code {
        run_code(&code);
    }
}

fn run_code(arg: &str) {
    match resolve_code(arg) {
        Ok(code) => println!("{}", disassemble(&code).join("\n")),
        Err(e) => {
            crate::log_error!("Could not load bytecode", error = e.to_string().as_str());
            eprintln!("Error: {}", e);
            exit(e.exit_code())
        }
    }
}
