use std::ffi::CString;
use std::os::raw::c_char;
use std::ptr;

use thiserror::Error;

/// Errors raised by the Rust-facing API.
#[derive(Debug, Error)]
pub enum FixtureError {
    #[error("allocator could not provide {bytes} bytes")]
    OutOfMemory { bytes: usize },
    #[error("invalid {origin} `{filter}`: {reason}")]
    InvalidLogFilter {
        origin: &'static str,
        filter: String,
        reason: String,
    },
    #[error("logging already initialized by another logger")]
    LoggerUnavailable,
}

/// Opaque error type for C callers.
#[allow(non_camel_case_types)]
#[repr(C)]
pub struct ext_error_t;

struct ErrorHandle {
    message: CString,
}

pub(crate) fn cstring_lossy(value: &str) -> CString {
    let bytes: Vec<u8> = value
        .bytes()
        .map(|b| if b == 0 { b' ' } else { b })
        .collect();
    CString::new(bytes).unwrap_or_default()
}

pub(crate) fn clear_error(out_error: *mut *mut ext_error_t) {
    if out_error.is_null() {
        return;
    }
    // Safety: caller provided a valid out_error pointer.
    unsafe {
        *out_error = ptr::null_mut();
    }
}

pub(crate) fn write_error(out_error: *mut *mut ext_error_t, error: &FixtureError) {
    if out_error.is_null() {
        return;
    }
    let handle = Box::new(ErrorHandle {
        message: cstring_lossy(&error.to_string()),
    });
    // Safety: out_error is non-null and points to writable memory.
    unsafe {
        *out_error = Box::into_raw(handle) as *mut ext_error_t;
    }
}

/// Returns the message of an error written by this library.
///
/// The pointer stays valid until the handle is passed to `ext_error_free`.
#[unsafe(no_mangle)]
pub extern "C" fn ext_error_message(error: *const ext_error_t) -> *const c_char {
    if error.is_null() {
        return ptr::null();
    }
    // Safety: error must be a valid handle allocated by this library.
    let handle = unsafe { &*(error as *const ErrorHandle) };
    handle.message.as_ptr()
}

/// Frees an error written by this library.
#[unsafe(no_mangle)]
pub extern "C" fn ext_error_free(error: *mut ext_error_t) {
    if error.is_null() {
        return;
    }
    // Safety: error must be a valid handle allocated by this library.
    unsafe {
        drop(Box::from_raw(error as *mut ErrorHandle));
    }
}
