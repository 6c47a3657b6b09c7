//! C ABI fixture functions for exercising a foreign call boundary.
//!
//! Every fixture is exported under a stable `ext_*` symbol and is also
//! callable from Rust under its descriptive name.

mod arith;
mod diag;
mod error;
mod ffi;
pub mod logging;
mod node;
mod quad;

pub use arith::{const2, double_value, sum6, sum7, sum7_sub8, test_entry};
pub use diag::{FOO_MESSAGE, FOO_RESULT, foo_print, foo_print_to};
pub use error::{FixtureError, ext_error_free, ext_error_message, ext_error_t};
pub use node::{Node, ext_field_sum, ext_node_t, field_sum, sample_entry};
pub use quad::{QUAD_LEN, alloc_quad, ext_alloc_quad, ext_quad_free};
