//! DeviceIoControl interface to the hellodrv device.
//!
//! Wraps handle acquisition and the one control operation behind a safe
//! type; all failures carry the Win32 error code of the call that produced
//! them.

use std::ffi::CString;
use std::mem::size_of;
use std::ptr;

use shared::{IOCTL_HELLO_SEND_MESSAGE, MessagePayload, USER_DEVICE_PATH};
use thiserror::Error;
use windows_sys::Win32::{
    Foundation::{CloseHandle, GENERIC_WRITE, GetLastError, HANDLE, INVALID_HANDLE_VALUE},
    Storage::FileSystem::{CreateFileW, FILE_SHARE_WRITE, OPEN_EXISTING},
    System::IO::DeviceIoControl,
};

/// All the ways talking to the driver can go wrong.
#[derive(Debug, Error)]
pub enum DeviceError {
    #[error("cannot open {path} (win32 error {code})")]
    Open { path: &'static str, code: u32 },

    #[error("DeviceIoControl failed (win32 error {code})")]
    Control { code: u32 },

    #[error("message contains an interior NUL byte")]
    InteriorNul,
}

/// An open handle to the driver, closed on drop.
pub struct Device {
    handle: HANDLE,
}

impl Device {
    /// Open the device through its user-visible alias. The driver must
    /// already be loaded; nothing is created here.
    pub fn open() -> Result<Self, DeviceError> {
        let path: Vec<u16> = USER_DEVICE_PATH.encode_utf16().chain(Some(0)).collect();

        // SAFETY: `path` is NUL-terminated and outlives the call.
        let handle = unsafe {
            CreateFileW(
                path.as_ptr(),
                GENERIC_WRITE,
                FILE_SHARE_WRITE,
                ptr::null(),
                OPEN_EXISTING,
                0,
                ptr::null_mut(),
            )
        };
        if handle == INVALID_HANDLE_VALUE {
            return Err(DeviceError::Open {
                path: USER_DEVICE_PATH,
                // SAFETY: plain FFI call, no preconditions.
                code: unsafe { GetLastError() },
            });
        }
        Ok(Self { handle })
    }

    /// Send one string through the recognized control code. Input-only: the
    /// driver reports no returned bytes even on success.
    pub fn send_message(&self, text: &str) -> Result<(), DeviceError> {
        let text = CString::new(text).map_err(|_| DeviceError::InteriorNul)?;
        let payload = MessagePayload {
            buffer: text.as_ptr().cast(),
        };

        let mut returned: u32 = 0;
        // SAFETY: `payload` and the string behind it outlive this synchronous
        // call; the input length matches the structure handed in.
        let ok = unsafe {
            DeviceIoControl(
                self.handle,
                IOCTL_HELLO_SEND_MESSAGE,
                &payload as *const _ as _,
                size_of::<MessagePayload>() as u32,
                ptr::null_mut(),
                0,
                &mut returned,
                ptr::null_mut(),
            )
        };
        if ok == 0 {
            // SAFETY: plain FFI call, no preconditions.
            return Err(DeviceError::Control {
                code: unsafe { GetLastError() },
            });
        }
        Ok(())
    }
}

impl Drop for Device {
    fn drop(&mut self) {
        // SAFETY: `handle` came from CreateFileW and is closed exactly once.
        unsafe { CloseHandle(self.handle) };
    }
}
