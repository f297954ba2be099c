//! hellodrv: a minimal software driver for learning the WDM request path.
//!
//! `DriverEntry` creates one named device object, exposes it to user mode
//! through a symbolic link, and installs dispatch routines for CREATE, CLOSE
//! and DEVICE_CONTROL. The single recognized control code carries a pointer
//! to a NUL-terminated string, which the driver echoes to the kernel debug
//! sink. Everything a user-mode client must agree with lives in the `shared`
//! crate.

#![no_std]

extern crate alloc;
#[cfg(not(test))]
extern crate wdk_panic;

use wdk::println;
#[cfg(not(test))]
use wdk_alloc::WdkAllocator;
use wdk_sys::{DRIVER_OBJECT, NTSTATUS, PCUNICODE_STRING, STATUS_SUCCESS};

mod device;
mod dispatch;
mod helpers;

use device::DeviceEndpoint;

#[cfg(not(test))]
#[global_allocator]
static GLOBAL: WdkAllocator = WdkAllocator;

/*------------ DriverEntry -------------------------------*/

#[allow(non_snake_case)]
#[unsafe(export_name = "DriverEntry")]
pub extern "system" fn driver_entry(
    driver: *mut DRIVER_OBJECT,
    registry_path: PCUNICODE_STRING,
) -> NTSTATUS {
    println!("hellodrv loading...");

    // Nothing created in DriverEntry survives a failed return; install()
    // rolls back the device itself if the symbolic link cannot be made.
    let endpoint = DeviceEndpoint::from_schema();
    if let Err(status) = unsafe { device::install(driver, &endpoint) } {
        return status;
    }

    unsafe { (*driver).DriverUnload = Some(driver_exit) };

    let reg_path = unsafe { helpers::uni_to_string(registry_path) };
    println!("hellodrv loaded. Registry path: {}", reg_path);

    STATUS_SUCCESS
}

/*------------ unload ------------------------------------*/

extern "C" fn driver_exit(driver: *mut DRIVER_OBJECT) {
    println!("hellodrv unloading...");

    let endpoint = DeviceEndpoint::from_schema();
    unsafe { device::remove(driver, &endpoint) };

    println!("hellodrv unloaded.");
}
