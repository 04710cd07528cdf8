//! Monitor enumeration

use crate::error::{ColorClockError, Result, StringError};
use crate::geometry::Rect;
use std::mem;
use tracing::{debug, warn};
use windows::Win32::Foundation::{LPARAM, RECT};
use windows::Win32::Graphics::Gdi::{EnumDisplayMonitors, GetMonitorInfoW, HDC, HMONITOR, MONITORINFO};
use windows::core::BOOL;

/// Bounds of every active monitor in virtual-screen coordinates
#[allow(unsafe_code)] // Windows FFI for monitor enumeration
pub fn monitor_bounds() -> Result<Vec<Rect>> {
    unsafe extern "system" fn enum_callback(
        hmonitor: HMONITOR,
        _hdc: HDC,
        _clip: *mut RECT,
        lparam: LPARAM,
    ) -> BOOL {
        // SAFETY: lparam carries the `&mut Vec<Rect>` owned by `monitor_bounds`,
        // which outlives the synchronous EnumDisplayMonitors call.
        let monitors = unsafe { &mut *(lparam.0 as *mut Vec<Rect>) };

        #[expect(
            clippy::cast_possible_truncation,
            reason = "size_of::<MONITORINFO>() is a compile-time constant that fits in u32"
        )]
        let mut info = MONITORINFO {
            cbSize: mem::size_of::<MONITORINFO>() as u32,
            ..Default::default()
        };

        if unsafe { GetMonitorInfoW(hmonitor, &raw mut info) }.as_bool() {
            let rect = info.rcMonitor;
            monitors.push(Rect::from_edges(rect.left, rect.top, rect.right, rect.bottom));
        } else {
            warn!("GetMonitorInfoW failed for monitor {:?}", hmonitor);
        }

        BOOL(1) // Continue enumeration
    }

    let mut monitors: Vec<Rect> = Vec::new();
    let ok = unsafe {
        EnumDisplayMonitors(
            None,
            None,
            Some(enum_callback),
            LPARAM(&raw mut monitors as isize),
        )
    };

    if !ok.as_bool() {
        return Err(ColorClockError::DisplayEnumerationFailed(Box::new(
            windows::core::Error::from_thread(),
        )));
    }

    if monitors.is_empty() {
        return Err(ColorClockError::DisplayEnumerationFailed(
            StringError::new("EnumDisplayMonitors reported no monitors"),
        ));
    }

    debug!("Enumerated {} monitor(s)", monitors.len());
    Ok(monitors)
}
