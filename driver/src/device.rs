//! Device object + symbolic link lifecycle.
//!
//! The two names are created and torn down as a pair: `install` deletes the
//! fresh device if the link cannot be made, `remove` drops the link before
//! the device.

use core::ptr;

use shared::{DOS_DEVICE_PATH, FILE_DEVICE_HELLO, NT_DEVICE_PATH};
use wdk::println;
use wdk_sys::{
    DRIVER_OBJECT, NTSTATUS, PDEVICE_OBJECT, STATUS_SUCCESS,
    ntddk::{IoCreateDevice, IoCreateSymbolicLink, IoDeleteDevice, IoDeleteSymbolicLink},
};

use crate::dispatch;
use crate::helpers::NtUnicode;

/// Where the device lives in the object namespace. Injected into `install`
/// and `remove` so the name strings stay plain schema constants instead of
/// process-wide mutable state.
pub struct DeviceEndpoint {
    pub nt_path: &'static str,
    pub dos_path: &'static str,
}

impl DeviceEndpoint {
    pub const fn from_schema() -> Self {
        Self {
            nt_path: NT_DEVICE_PATH,
            dos_path: DOS_DEVICE_PATH,
        }
    }
}

/// Create the named device, link its DOS alias, and install the dispatch
/// table.
///
/// # Safety
/// `driver` must be the driver object handed to `DriverEntry`; call once.
pub unsafe fn install(
    driver: *mut DRIVER_OBJECT,
    endpoint: &DeviceEndpoint,
) -> Result<(), NTSTATUS> {
    let dev_name = NtUnicode::new(endpoint.nt_path);
    let mut dev_obj: PDEVICE_OBJECT = ptr::null_mut();
    let status = unsafe {
        IoCreateDevice(
            driver,
            0,
            dev_name.as_ptr() as _,
            FILE_DEVICE_HELLO,
            0,
            0,
            &mut dev_obj,
        )
    };
    if status != STATUS_SUCCESS {
        println!("hellodrv: IoCreateDevice failed: {:#010x}", status);
        return Err(status);
    }

    let sym_name = NtUnicode::new(endpoint.dos_path);
    let status = unsafe { IoCreateSymbolicLink(sym_name.as_ptr() as _, dev_name.as_ptr() as _) };
    if status != STATUS_SUCCESS {
        println!("hellodrv: IoCreateSymbolicLink failed: {:#010x}", status);
        // the pair invariant: no link, no device
        unsafe { IoDeleteDevice(dev_obj) };
        return Err(status);
    }

    unsafe { dispatch::install(driver) };
    Ok(())
}

/// Delete the alias, then the device.
///
/// # Safety
/// Call at most once, from the unload routine of a driver whose `install`
/// succeeded.
pub unsafe fn remove(driver: *mut DRIVER_OBJECT, endpoint: &DeviceEndpoint) {
    let sym_name = NtUnicode::new(endpoint.dos_path);
    unsafe {
        IoDeleteSymbolicLink(sym_name.as_ptr() as _);
        IoDeleteDevice((*driver).DeviceObject);
    }
}
