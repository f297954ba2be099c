//! Single source of truth for everything the driver and the client must agree
//! on: device paths, the control code, the payload layout, and the rule that
//! decides whether a device-control request is acceptable.
//!
//! Built with the `kernel` feature this crate is `no_std` so the driver can
//! link it; the default `std` feature is what the client and the tests use.

#![cfg_attr(feature = "kernel", no_std)]

pub mod constants;
pub mod protocol;

pub use constants::{DOS_DEVICE_PATH, NT_DEVICE_PATH, USER_DEVICE_PATH};
pub use protocol::{
    ControlVerdict, FILE_DEVICE_HELLO, IOCTL_HELLO_SEND_MESSAGE, MessagePayload, classify_control,
};
