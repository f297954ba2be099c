//! Small WDM helpers on top of `wdk-sys`.

use alloc::{string::String, vec::Vec};
use core::ffi::CStr;
use core::slice;

use wdk_sys::{
    IRP, NTSTATUS, PIO_STACK_LOCATION, STATUS_INVALID_PARAMETER, UNICODE_STRING,
    ntddk::RtlInitUnicodeString,
};

/// An owned `UNICODE_STRING`: keeps the UTF-16 buffer alive for as long as
/// the kernel may look at the string.
pub struct NtUnicode {
    raw: UNICODE_STRING,
    _buf: Vec<u16>,
}

impl NtUnicode {
    pub fn new(s: &str) -> Self {
        let buf: Vec<u16> = s.encode_utf16().chain(Some(0)).collect();
        let mut raw = UNICODE_STRING::default();
        // SAFETY: `buf` is NUL-terminated and owned by the returned value, so
        // the pointer stored in `raw` stays valid.
        unsafe { RtlInitUnicodeString(&mut raw, buf.as_ptr()) };
        Self { raw, _buf: buf }
    }

    pub fn as_ptr(&self) -> *const UNICODE_STRING {
        &self.raw
    }
}

/// Safe wrapper that validates `CurrentLocation` before handing back the
/// current `IO_STACK_LOCATION`.
///
/// # Safety
/// Caller guarantees `irp` is valid.
pub unsafe fn io_get_current_irp_stack_location(
    irp: *mut IRP,
) -> Result<PIO_STACK_LOCATION, NTSTATUS> {
    unsafe {
        if (*irp).CurrentLocation > (*irp).StackCount + 1 {
            return Err(STATUS_INVALID_PARAMETER);
        }
        Ok((*irp).Tail.Overlay.__bindgen_anon_2.__bindgen_anon_1.CurrentStackLocation)
    }
}

/// Convert a `UNICODE_STRING*` to a Rust `String`.
///
/// # Safety
/// `uni` must be a valid, initialised pointer from the kernel, or null.
pub unsafe fn uni_to_string(uni: *const UNICODE_STRING) -> String {
    if uni.is_null() {
        return String::new();
    }
    let u = unsafe { &*uni };
    let len = (u.Length / 2) as usize;
    // SAFETY: buffer points to `len` UTF-16 code units.
    let buf = unsafe { slice::from_raw_parts(u.Buffer, len) };
    String::from_utf16_lossy(buf)
}

/// Read a caller-supplied NUL-terminated byte string. A null pointer reads
/// as the empty string, same convention as [`uni_to_string`].
///
/// # Safety
/// A non-null `ptr` must be NUL-terminated and readable in the context of
/// the current request.
pub unsafe fn cstr_to_string(ptr: *const u8) -> String {
    if ptr.is_null() {
        return String::new();
    }
    // SAFETY: caller guarantees termination.
    let bytes = unsafe { CStr::from_ptr(ptr.cast()) }.to_bytes();
    String::from_utf8_lossy(bytes).into_owned()
}
