//! IRP dispatch: CREATE/CLOSE plus the one recognized IOCTL.
//!
//! Every handler completes its IRP exactly once, with no priority boost.
//! CREATE and CLOSE acquire and release nothing; per-handle state is
//! deliberately absent in this example.

use wdk::println;
use wdk_sys::{
    DEVICE_OBJECT, DRIVER_OBJECT, IO_NO_INCREMENT, IRP_MJ_CLOSE, IRP_MJ_CREATE,
    IRP_MJ_DEVICE_CONTROL, NTSTATUS, PIRP, STATUS_BUFFER_TOO_SMALL,
    STATUS_INVALID_DEVICE_REQUEST, STATUS_SUCCESS,
    ntddk::IofCompleteRequest,
};

use shared::{ControlVerdict, MessagePayload, classify_control};

use crate::helpers::{cstr_to_string, io_get_current_irp_stack_location};

/*──────────────────────────── IRP helpers ───────────────────────────────*/

/// Finish an IRP and return the given status. Information is always zero:
/// nothing is ever handed back through the output buffer.
///
/// # Safety
///   * `irp` must point to a valid IRP not yet completed.
///   * Caller must guarantee IRQL == `DISPATCH_LEVEL` or lower.
pub unsafe fn complete(irp: PIRP, status: NTSTATUS) -> NTSTATUS {
    unsafe {
        // union field produced by bindgen
        (*irp).IoStatus.__bindgen_anon_1.Status = status as _;
        (*irp).IoStatus.Information = 0;
        IofCompleteRequest(irp, IO_NO_INCREMENT as i8);
    }
    status
}

/*──────────────────────────── handlers ──────────────────────────────────*/

/// CREATE and CLOSE: succeed, touch nothing.
unsafe extern "C" fn dispatch_ok(_dev: *mut DEVICE_OBJECT, irp: PIRP) -> NTSTATUS {
    unsafe { complete(irp, STATUS_SUCCESS) }
}

/// DEVICE_CONTROL: validate the code, then the input size, then read the
/// caller's string out of the system buffer and echo it to the debug sink.
unsafe extern "C" fn dispatch_device_control(_dev: *mut DEVICE_OBJECT, irp: PIRP) -> NTSTATUS {
    let stack = match unsafe { io_get_current_irp_stack_location(irp) } {
        Ok(stack) => stack,
        Err(status) => return unsafe { complete(irp, status) },
    };

    let (code, input_len) = unsafe {
        (
            (*stack).Parameters.DeviceIoControl.IoControlCode,
            (*stack).Parameters.DeviceIoControl.InputBufferLength as usize,
        )
    };

    match classify_control(code, input_len) {
        ControlVerdict::UnknownCode => unsafe { complete(irp, STATUS_INVALID_DEVICE_REQUEST) },
        ControlVerdict::InputTooShort => unsafe { complete(irp, STATUS_BUFFER_TOO_SMALL) },
        ControlVerdict::Accepted => {
            // input_len >= size_of::<MessagePayload>() was just checked; the
            // string behind the payload pointer is caller-owned and valid for
            // the duration of this request.
            let text = unsafe {
                let payload = (*irp).AssociatedIrp.SystemBuffer.cast::<MessagePayload>();
                cstr_to_string((*payload).buffer)
            };
            println!("hellodrv: {}", text);
            unsafe { complete(irp, STATUS_SUCCESS) }
        }
    }
}

/*──────────────────────────── dispatch table ────────────────────────────*/

/// Install major-function pointers.
///
/// # Safety
/// Must be called exactly once, with the driver object that owns the device
/// created in `device::install`.
pub unsafe fn install(driver: *mut DRIVER_OBJECT) {
    unsafe {
        let drv = &mut *driver;
        drv.MajorFunction[IRP_MJ_CREATE as usize] = Some(dispatch_ok);
        drv.MajorFunction[IRP_MJ_CLOSE as usize] = Some(dispatch_ok);
        drv.MajorFunction[IRP_MJ_DEVICE_CONTROL as usize] = Some(dispatch_device_control);
    }
}
