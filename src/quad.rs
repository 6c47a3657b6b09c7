//! Four-element heap allocation fixture.
//!
//! The block is allocated with the global allocator using the layout of
//! `[i32; QUAD_LEN]`, so it can be handed out as a raw pointer and later
//! rebuilt into the `Box` it came from.

use std::alloc::{self, Layout};
use std::ptr;

use crate::error::FixtureError;

/// Number of elements in a quad buffer.
pub const QUAD_LEN: usize = 4;

type Quad = [i32; QUAD_LEN];

/// Allocates a quad buffer holding `[a0, a1, a2, a3]`.
///
/// The caller owns the returned block; dropping it releases the memory.
/// Allocator failure is reported as [`FixtureError::OutOfMemory`].
pub fn alloc_quad(a0: i32, a1: i32, a2: i32, a3: i32) -> Result<Box<Quad>, FixtureError> {
    let layout = Layout::new::<Quad>();
    // Safety: the layout has non-zero size.
    let raw = unsafe { alloc::alloc(layout) } as *mut Quad;
    if raw.is_null() {
        log::error!("quad allocation of {} bytes failed", layout.size());
        return Err(FixtureError::OutOfMemory {
            bytes: layout.size(),
        });
    }
    // Safety: raw is non-null, aligned for Quad and was allocated with
    // Layout::new::<Quad>(), which is what Box<Quad> expects.
    let quad = unsafe {
        raw.write([a0, a1, a2, a3]);
        Box::from_raw(raw)
    };
    log::trace!("allocated quad buffer at {raw:p}");
    Ok(quad)
}

/// Allocates a quad buffer and stores its address through `out`.
///
/// Ownership of the block moves to the caller. On allocation failure null is
/// stored instead. A null `out` is ignored. The block may be released with
/// `ext_quad_free`.
#[unsafe(no_mangle)]
pub extern "C" fn ext_alloc_quad(out: *mut *mut i32, a0: i32, a1: i32, a2: i32, a3: i32) {
    if out.is_null() {
        return;
    }
    let value = match alloc_quad(a0, a1, a2, a3) {
        Ok(quad) => Box::into_raw(quad) as *mut i32,
        Err(_) => ptr::null_mut(),
    };
    // Safety: out is non-null and points to writable memory.
    unsafe {
        *out = value;
    }
}

/// Frees a block written by `ext_alloc_quad`.
#[unsafe(no_mangle)]
pub extern "C" fn ext_quad_free(quad: *mut i32) {
    if quad.is_null() {
        return;
    }
    // Safety: quad must come from ext_alloc_quad and not have been freed.
    unsafe {
        drop(Box::from_raw(quad as *mut Quad));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn holds_values_in_order() {
        let quad = alloc_quad(10, 20, 30, 40).unwrap();
        assert_eq!(*quad, [10, 20, 30, 40]);
    }

    #[test]
    fn blocks_are_independent() {
        let mut first = alloc_quad(1, 2, 3, 4).unwrap();
        first[0] = 99;
        let second = alloc_quad(1, 2, 3, 4).unwrap();
        assert_eq!(*second, [1, 2, 3, 4]);
        assert_eq!(*first, [99, 2, 3, 4]);
    }

    #[test]
    fn extremes_are_stored_verbatim() {
        let quad = alloc_quad(i32::MIN, -1, 0, i32::MAX).unwrap();
        assert_eq!(*quad, [i32::MIN, -1, 0, i32::MAX]);
    }

    #[test]
    fn c_form_writes_through_out() {
        let mut raw: *mut i32 = ptr::null_mut();
        ext_alloc_quad(&mut raw, 10, 20, 30, 40);
        assert!(!raw.is_null());
        let values = unsafe { std::slice::from_raw_parts(raw, QUAD_LEN) };
        assert_eq!(values, &[10, 20, 30, 40]);
        ext_quad_free(raw);
    }

    #[test]
    fn null_out_and_null_free_are_ignored() {
        ext_alloc_quad(ptr::null_mut(), 1, 2, 3, 4);
        ext_quad_free(ptr::null_mut());
    }
}
