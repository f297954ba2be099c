// tests/control.rs
//
// The acceptance rule for device-control requests, exercised the way the
// driver's dispatch routine consumes it.

use std::ffi::CString;
use std::mem::size_of;

use shared::{
    ControlVerdict, DOS_DEVICE_PATH, IOCTL_HELLO_SEND_MESSAGE, MessagePayload, NT_DEVICE_PATH,
    USER_DEVICE_PATH, classify_control,
};

#[test]
fn recognized_code_with_full_payload_is_accepted() {
    let verdict = classify_control(IOCTL_HELLO_SEND_MESSAGE, size_of::<MessagePayload>());
    assert_eq!(verdict, ControlVerdict::Accepted);

    // anything larger than the structure is accepted too
    let verdict = classify_control(IOCTL_HELLO_SEND_MESSAGE, size_of::<MessagePayload>() + 64);
    assert_eq!(verdict, ControlVerdict::Accepted);
}

#[test]
fn short_input_is_rejected_as_too_small() {
    for len in 0..size_of::<MessagePayload>() {
        assert_eq!(
            classify_control(IOCTL_HELLO_SEND_MESSAGE, len),
            ControlVerdict::InputTooShort,
            "input_len={len}"
        );
    }
}

#[test]
fn zero_length_input_is_too_small() {
    assert_eq!(
        classify_control(IOCTL_HELLO_SEND_MESSAGE, 0),
        ControlVerdict::InputTooShort
    );
}

#[test]
fn foreign_code_is_unknown_regardless_of_size() {
    let foreign = IOCTL_HELLO_SEND_MESSAGE ^ 0x4;
    assert_eq!(classify_control(foreign, 0), ControlVerdict::UnknownCode);
    assert_eq!(
        classify_control(foreign, size_of::<MessagePayload>()),
        ControlVerdict::UnknownCode
    );
    assert_eq!(classify_control(0, 4096), ControlVerdict::UnknownCode);
}

#[test]
fn code_check_precedes_length_check() {
    // a request that is both foreign and undersized reads as unknown
    assert_eq!(classify_control(0xDEAD_BEEF, 1), ControlVerdict::UnknownCode);
}

#[test]
fn payload_wraps_a_caller_owned_string() {
    let text = CString::new("Hello Driver!").unwrap();
    let payload = MessagePayload {
        buffer: text.as_ptr().cast(),
    };

    // 13 characters plus the terminator, the scenario's 14 bytes
    assert_eq!(text.as_bytes_with_nul().len(), 14);

    // reading back through the payload pointer sees the same bytes
    let round_trip = unsafe { std::ffi::CStr::from_ptr(payload.buffer.cast()) };
    assert_eq!(round_trip.to_str().unwrap(), "Hello Driver!");
}

#[test]
fn device_paths_name_the_same_endpoint() {
    assert_eq!(NT_DEVICE_PATH, r"\Device\HelloDrv");
    assert_eq!(DOS_DEVICE_PATH, r"\DosDevices\HelloDrv");

    // the user-mode face of the DOS alias ends in the same short name
    let alias = DOS_DEVICE_PATH.rsplit('\\').next().unwrap();
    assert!(USER_DEVICE_PATH.ends_with(alias));
    assert!(NT_DEVICE_PATH.ends_with(alias));
}
