//! Fixed namespace paths for the hellodrv device.
//!
//! `NT_DEVICE_PATH` and `DOS_DEVICE_PATH` are created and deleted as a pair
//! by the driver; `USER_DEVICE_PATH` is the same alias as seen from user
//! mode, and is what the client hands to `CreateFileW`.

pub const NT_DEVICE_PATH: &str = r"\Device\HelloDrv";
pub const DOS_DEVICE_PATH: &str = r"\DosDevices\HelloDrv";
pub const USER_DEVICE_PATH: &str = r"\\.\HelloDrv";
