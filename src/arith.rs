//! Integer arithmetic fixtures.
//!
//! These are the exported symbols themselves, so a call from Rust and a call
//! through the C ABI take the same path. Composite fixtures call the smaller
//! ones instead of inlining them and all arithmetic wraps on overflow.

/// Returns the constant 2.
#[inline(never)]
#[unsafe(export_name = "ext_2")]
pub extern "C" fn const2() -> i64 {
    2
}

/// Returns `a * const2()`.
#[unsafe(export_name = "ext_double")]
pub extern "C" fn double_value(a: i64) -> i64 {
    a.wrapping_mul(const2())
}

/// Returns the sum of six values.
#[unsafe(export_name = "ext_sum")]
pub extern "C" fn sum6(a: i64, b: i64, c: i64, d: i64, e: i64, f: i64) -> i64 {
    a.wrapping_add(b)
        .wrapping_add(c)
        .wrapping_add(d)
        .wrapping_add(e)
        .wrapping_add(f)
}

/// Returns the sum of seven values.
///
/// Seven integer arguments is one more than the six integer argument
/// registers of the SysV x86-64 ABI, so `g` is passed on the stack.
#[inline(never)]
#[unsafe(export_name = "ext_sum7")]
pub extern "C" fn sum7(a: i64, b: i64, c: i64, d: i64, e: i64, f: i64, g: i64) -> i64 {
    a.wrapping_add(b)
        .wrapping_add(c)
        .wrapping_add(d)
        .wrapping_add(e)
        .wrapping_add(f)
        .wrapping_add(g)
}

/// Returns `sum7(a, .., g) - h`.
#[allow(clippy::too_many_arguments)]
#[inline(never)]
#[unsafe(export_name = "ext_sum7_sub8")]
pub extern "C" fn sum7_sub8(
    a: i64,
    b: i64,
    c: i64,
    d: i64,
    e: i64,
    f: i64,
    g: i64,
    h: i64,
) -> i64 {
    sum7(a, b, c, d, e, f, g).wrapping_sub(h)
}

/// Fixed self-check: `sum7_sub8(1, 2, 3, 4, 5, 6, 7, 8)`, always 20.
#[unsafe(export_name = "ext_test")]
pub extern "C" fn test_entry() -> i64 {
    sum7_sub8(1, 2, 3, 4, 5, 6, 7, 8)
}
