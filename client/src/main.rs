//! hellodrv test client.
//!
//! 1. Set up structured logging
//! 2. Open a handle to the driver through its alias
//! 3. Issue one device-control request carrying the message
//! 4. Map the outcome to a distinct process exit code

mod device;

use std::env;
use std::process::ExitCode;

use chrono::Local;
use fern::Dispatch;
use log::LevelFilter;

use crate::device::{Device, DeviceError};

const DEFAULT_MESSAGE: &str = "Hello Driver!";

// Distinct exit codes per failure kind; 0 means the driver accepted the
// message.
const EXIT_OPEN_FAILED: u8 = 1;
const EXIT_SEND_FAILED: u8 = 2;

/// Timestamped stdout logging; level picked up from `HELLODRV_LOG`.
fn setup_logging() -> Result<(), fern::InitError> {
    let level = match env::var("HELLODRV_LOG").unwrap_or_default().to_uppercase().as_str() {
        "ERROR" => LevelFilter::Error,
        "WARN" => LevelFilter::Warn,
        "DEBUG" => LevelFilter::Debug,
        "TRACE" => LevelFilter::Trace,
        _ => LevelFilter::Info,
    };

    Dispatch::new()
        .format(|out, msg, record| {
            out.finish(format_args!(
                "[{}][{:5}][{}] {}",
                Local::now().to_rfc3339(),
                record.level(),
                record.target(),
                msg
            ))
        })
        .level(level)
        .chain(std::io::stdout())
        .apply()?;
    Ok(())
}

fn exit_code_for(err: &DeviceError) -> u8 {
    match err {
        DeviceError::Open { .. } => EXIT_OPEN_FAILED,
        DeviceError::Control { .. } | DeviceError::InteriorNul => EXIT_SEND_FAILED,
    }
}

fn run(message: &str) -> Result<(), DeviceError> {
    let device = Device::open()?;
    log::debug!("Opened {}", shared::USER_DEVICE_PATH);

    device.send_message(message)?;
    log::info!(
        "Sent {:?} ({} bytes incl. terminator)",
        message,
        message.len() + 1
    );
    Ok(())
}

fn main() -> ExitCode {
    setup_logging().expect("Logging setup failed");

    // Optional first argument overrides the message text.
    let args: Vec<String> = env::args().collect();
    let message = args.get(1).map_or(DEFAULT_MESSAGE, String::as_str);

    match run(message) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            log::error!("{e}");
            ExitCode::from(exit_code_for(&e))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_message_matches_the_wire_scenario() {
        // 13 characters, 14 bytes once the terminator goes on the wire
        assert_eq!(DEFAULT_MESSAGE, "Hello Driver!");
        assert_eq!(DEFAULT_MESSAGE.len() + 1, 14);
    }

    #[test]
    fn failure_kinds_map_to_distinct_exit_codes() {
        let open = DeviceError::Open {
            path: shared::USER_DEVICE_PATH,
            code: 2,
        };
        let send = DeviceError::Control { code: 31 };

        assert_eq!(exit_code_for(&open), EXIT_OPEN_FAILED);
        assert_eq!(exit_code_for(&send), EXIT_SEND_FAILED);
        assert_ne!(exit_code_for(&open), exit_code_for(&send));
    }

    #[test]
    fn open_error_reports_the_win32_code() {
        let err = DeviceError::Open {
            path: shared::USER_DEVICE_PATH,
            code: 2,
        };
        let text = err.to_string();
        assert!(text.contains(shared::USER_DEVICE_PATH));
        assert!(text.contains("error 2"));
    }
}
