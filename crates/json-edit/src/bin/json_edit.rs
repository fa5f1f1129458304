//! `json-edit`: show or edit the node at a path in a JSON document.
//!
//! Usage:
//!   json-edit [--indent N] show '<path>'
//!   json-edit [--indent N] set '<path>' '<text>'
//!
//! The document is read from stdin. Paths use the display notation, e.g.
//! `$["customer"][0]`. Set `RUST_LOG=json_edit=debug` for logs on stderr.

use std::io::{self, Read, Write};

use json_edit::json_cli::{parse_args, run};

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn")),
        )
        .with_writer(io::stderr)
        .init();

    let args: Vec<String> = std::env::args().skip(1).collect();
    let (command, options) = match parse_args(&args) {
        Ok(parsed) => parsed,
        Err(e) => {
            eprintln!("{e}");
            std::process::exit(1);
        }
    };

    let mut buf = String::new();
    if let Err(e) = io::stdin().read_to_string(&mut buf) {
        eprintln!("{e}");
        std::process::exit(1);
    }

    match run(&command, &buf, &options) {
        Ok(result) => {
            let mut stdout = io::stdout().lock();
            if let Err(e) = writeln!(stdout, "{result}") {
                eprintln!("{e}");
                std::process::exit(1);
            }
        }
        Err(e) => {
            eprintln!("{e}");
            std::process::exit(1);
        }
    }
}
