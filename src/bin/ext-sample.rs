//! Runs a fixture scenario and exits with its result.
//!
//! With no arguments, builds one node, sums its field with 1 and exits with
//! 124. `ext-sample foo` calls `ext_foo` instead and exits with 123.

use std::process::ExitCode;

fn main() -> ExitCode {
    if let Err(err) = ext_fixtures::logging::init_from_env() {
        eprintln!("ext-sample: {err}");
    }
    let result = match std::env::args().nth(1).as_deref() {
        None => ext_fixtures::sample_entry(),
        Some("foo") => ext_fixtures::foo_print(),
        Some(other) => {
            eprintln!("ext-sample: unknown scenario `{other}`");
            return ExitCode::FAILURE;
        }
    };
    log::debug!("scenario returned {result}");
    // Exit statuses carry the low eight bits, as with a C `main`.
    ExitCode::from((result & 0xff) as u8)
}
