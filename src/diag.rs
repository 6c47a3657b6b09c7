//! Diagnostic fixture with a console side effect.

use std::io::{self, Write};

/// Line written by [`foo_print`], without the trailing newline.
pub const FOO_MESSAGE: &str = "this is ext_foo";

/// Value returned by [`foo_print`].
pub const FOO_RESULT: i64 = 123;

/// Writes [`FOO_MESSAGE`] as one line to stdout and returns [`FOO_RESULT`].
///
/// Write failures are not reported.
#[unsafe(export_name = "ext_foo")]
pub extern "C" fn foo_print() -> i64 {
    let stdout = io::stdout();
    let mut out = stdout.lock();
    let result = foo_print_to(&mut out);
    let _ = out.flush();
    result
}

/// Same as [`foo_print`] but writes to `out`.
pub fn foo_print_to<W: Write>(out: &mut W) -> i64 {
    log::debug!("writing diagnostic line");
    let _ = writeln!(out, "{FOO_MESSAGE}");
    FOO_RESULT
}
