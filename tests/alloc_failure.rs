//! Allocator failure surfaces as `OutOfMemory` and a null out pointer.

use std::alloc::{GlobalAlloc, Layout, System};
use std::ptr;
use std::sync::atomic::{AtomicBool, Ordering};

use ext_fixtures::{FixtureError, alloc_quad, ext_alloc_quad};

static FAIL_QUADS: AtomicBool = AtomicBool::new(false);

struct QuadFailingAlloc;

unsafe impl GlobalAlloc for QuadFailingAlloc {
    unsafe fn alloc(&self, layout: Layout) -> *mut u8 {
        if FAIL_QUADS.load(Ordering::SeqCst) && layout == Layout::new::<[i32; 4]>() {
            return ptr::null_mut();
        }
        unsafe { System.alloc(layout) }
    }

    unsafe fn dealloc(&self, ptr: *mut u8, layout: Layout) {
        unsafe { System.dealloc(ptr, layout) }
    }
}

#[global_allocator]
static ALLOCATOR: QuadFailingAlloc = QuadFailingAlloc;

#[test]
fn failed_allocation_is_reported() {
    let mut out: *mut i32 = ptr::dangling_mut();

    FAIL_QUADS.store(true, Ordering::SeqCst);
    let result = alloc_quad(10, 20, 30, 40);
    ext_alloc_quad(&mut out, 10, 20, 30, 40);
    FAIL_QUADS.store(false, Ordering::SeqCst);

    assert!(matches!(result, Err(FixtureError::OutOfMemory { bytes: 16 })));
    assert!(out.is_null());
    assert_eq!(
        result.unwrap_err().to_string(),
        "allocator could not provide 16 bytes"
    );

    let quad = alloc_quad(10, 20, 30, 40).unwrap();
    assert_eq!(*quad, [10, 20, 30, 40]);
}
