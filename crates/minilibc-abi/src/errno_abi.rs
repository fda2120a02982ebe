//! ABI layer for `<errno.h>`: the process-wide error-status cell.
//!
//! One zero-initialized cell per loaded instance of this library. The address
//! handed out never changes, so callers may cache it.

use std::ffi::c_int;
use std::sync::atomic::AtomicI32;

static ERRNO: AtomicI32 = AtomicI32::new(0);

#[cfg_attr(not(debug_assertions), unsafe(no_mangle))]
pub unsafe extern "C" fn __errno_location() -> *mut c_int {
    ERRNO.as_ptr()
}
