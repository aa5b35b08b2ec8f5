//! csvserve entry point
//!
//! Minimal by design: parse arguments, dispatch to the CLI module, print
//! errors to stderr, exit non-zero on failure. All real logic lives in the
//! library.

use csvserve::cli;

fn main() {
    if let Err(e) = cli::run() {
        eprintln!("{}", e);
        std::process::exit(1);
    }
}
