//! Clock windows
//!
//! Every surface is a window of one shared class. The window procedure looks
//! up the surface's `SurfaceState` in a thread-local registry keyed by window
//! handle, so several monitors can each run their own input session,
//! background cache and GDI buffers on the single UI thread.

use crate::error::{ColorClockError, Result, StringError};
use crate::geometry::{Point, Rect, Size};
use crate::render::{BackgroundCache, FramePlan};
use crate::saver::{EmbeddableSurface, HostHandle, InputSession, InputVerdict};
use crate::win32::gdi::SurfaceCanvas;
use std::cell::RefCell;
use std::collections::HashMap;
use std::time::Duration;
use tracing::{debug, error, info, trace, warn};
use windows::Win32::Foundation::{HINSTANCE, HWND, LPARAM, LRESULT, RECT, WPARAM};
use windows::Win32::Graphics::Gdi::{
    BeginPaint, EndPaint, InvalidateRect, PAINTSTRUCT, UpdateWindow,
};
use windows::Win32::System::LibraryLoader::GetModuleHandleW;
use windows::Win32::UI::WindowsAndMessaging::{
    CS_HREDRAW, CS_VREDRAW, CreateWindowExW, DefWindowProcW, GWL_STYLE, GetClientRect,
    GetWindowLongPtrW, IDC_ARROW, IsChild, IsWindow, KillTimer, LoadCursorW, PostQuitMessage,
    RegisterClassW, SW_SHOW, SWP_FRAMECHANGED, SWP_NOACTIVATE, SWP_NOZORDER, SetParent,
    SetTimer, SetWindowLongPtrW, SetWindowPos, ShowWindow, UnregisterClassW, WINDOW_EX_STYLE,
    WM_DESTROY, WM_ERASEBKGND, WM_KEYDOWN, WM_LBUTTONDOWN, WM_MBUTTONDOWN, WM_MOUSEMOVE,
    WM_PAINT, WM_RBUTTONDOWN, WM_SYSKEYDOWN, WM_TIMER, WNDCLASSW, WS_CHILD, WS_EX_TOPMOST,
    WS_POPUP,
};
use windows::core::{HSTRING, PCWSTR};

/// Identifier of the repaint timer on every surface
const REPAINT_TIMER_ID: usize = 1;

/// Per-window state reached from the window procedure
struct SurfaceState {
    input: InputSession,
    cache: BackgroundCache,
    canvas: SurfaceCanvas,
}

thread_local! {
    static SURFACES: RefCell<HashMap<isize, SurfaceState>> = RefCell::new(HashMap::new());
}

fn registry_key(hwnd: HWND) -> isize {
    hwnd.0 as isize
}

/// The window class shared by every surface of the process
pub struct SurfaceClass {
    name: HSTRING,
    instance: HINSTANCE,
}

impl SurfaceClass {
    /// Register the class under `name`
    #[allow(unsafe_code)] // Windows FFI for class registration
    pub fn register(name: &str) -> Result<Self> {
        let name = HSTRING::from(name);

        unsafe {
            let instance: HINSTANCE = GetModuleHandleW(None)?.into();
            let wnd_class = WNDCLASSW {
                style: CS_HREDRAW | CS_VREDRAW,
                lpfnWndProc: Some(window_proc),
                hInstance: instance,
                hCursor: LoadCursorW(None, IDC_ARROW)?,
                lpszClassName: PCWSTR(name.as_ptr()),
                ..Default::default()
            };

            if RegisterClassW(&raw const wnd_class) == 0 {
                return Err(ColorClockError::WindowsApiError(
                    windows::core::Error::from_thread(),
                ));
            }
        }

        debug!("Registered window class: {}", name);
        Ok(Self { name, instance })
    }

    /// Create a hidden surface window covering `bounds`
    ///
    /// Surfaces that exit on input are top-most popups over their monitor.
    /// Passive surfaces are plain popups waiting to be re-parented.
    #[allow(unsafe_code)] // Windows FFI for window creation
    pub fn create_surface(
        &self,
        title: &str,
        bounds: Rect,
        input: InputSession,
        font_face: &str,
    ) -> Result<Win32Surface> {
        let title = HSTRING::from(title);
        let ex_style = if input.exits_on_input() {
            WS_EX_TOPMOST
        } else {
            WINDOW_EX_STYLE(0)
        };

        let hwnd = unsafe {
            CreateWindowExW(
                ex_style,
                PCWSTR(self.name.as_ptr()),
                PCWSTR(title.as_ptr()),
                WS_POPUP,
                bounds.x,
                bounds.y,
                bounds.width,
                bounds.height,
                None,
                None,
                Some(self.instance),
                None,
            )?
        };

        SURFACES.with(|cell| {
            cell.borrow_mut().insert(
                registry_key(hwnd),
                SurfaceState {
                    input,
                    cache: BackgroundCache::new(),
                    canvas: SurfaceCanvas::new(font_face),
                },
            );
        });

        debug!(
            "Created surface {:?} at ({}, {}) {}x{}",
            hwnd, bounds.x, bounds.y, bounds.width, bounds.height
        );
        Ok(Win32Surface { hwnd })
    }

    /// Unregister the class once every surface is gone
    #[allow(unsafe_code)] // Windows FFI for class cleanup
    pub fn unregister(self) {
        let result = unsafe { UnregisterClassW(PCWSTR(self.name.as_ptr()), Some(self.instance)) };
        match result {
            Ok(()) => debug!("Unregistered window class: {}", self.name),
            Err(e) => warn!("Failed to unregister window class {}: {}", self.name, e),
        }
    }
}

/// A clock window
#[derive(Debug)]
pub struct Win32Surface {
    hwnd: HWND,
}

impl EmbeddableSurface for Win32Surface {
    #[allow(unsafe_code)] // Windows FFI for re-parenting
    fn attach_to(&mut self, host: HostHandle) -> Result<()> {
        let parent = host_hwnd(host)?;

        unsafe {
            // The child style must be in place before SetParent
            let style = GetWindowLongPtrW(self.hwnd, GWL_STYLE);
            #[expect(
                clippy::cast_possible_wrap,
                reason = "window style bits are a u32 bitfield stored in a pointer-sized slot"
            )]
            let child_style = (style & !(WS_POPUP.0 as isize)) | WS_CHILD.0 as isize;
            SetWindowLongPtrW(self.hwnd, GWL_STYLE, child_style);

            let _ = SetParent(self.hwnd, Some(parent));
            if !IsChild(parent, self.hwnd).as_bool() {
                return Err(ColorClockError::SurfaceError(StringError::new(format!(
                    "failed to attach surface to host window {host}"
                ))));
            }
        }

        info!("Attached surface {:?} to host window {}", self.hwnd, host);
        Ok(())
    }

    #[allow(unsafe_code)] // Windows FFI for window placement
    fn resize(&mut self, size: Size) -> Result<()> {
        let width = i32::try_from(size.width).unwrap_or(i32::MAX);
        let height = i32::try_from(size.height).unwrap_or(i32::MAX);
        unsafe {
            SetWindowPos(
                self.hwnd,
                None,
                0,
                0,
                width,
                height,
                SWP_NOZORDER | SWP_NOACTIVATE | SWP_FRAMECHANGED,
            )?;
        }
        debug!("Resized surface {:?} to {}x{}", self.hwnd, width, height);
        Ok(())
    }

    #[allow(unsafe_code)] // Windows FFI for the repaint timer
    fn start_repaint_timer(&mut self, interval: Duration) -> Result<()> {
        let millis = u32::try_from(interval.as_millis()).unwrap_or(u32::MAX).max(1);
        let id = unsafe { SetTimer(Some(self.hwnd), REPAINT_TIMER_ID, millis, None) };
        if id == 0 {
            return Err(ColorClockError::WindowsApiError(
                windows::core::Error::from_thread(),
            ));
        }
        debug!("Started {}ms repaint timer on surface {:?}", millis, self.hwnd);
        Ok(())
    }

    #[allow(unsafe_code)] // Windows FFI for window visibility
    fn show(&mut self) -> Result<()> {
        unsafe {
            let _ = ShowWindow(self.hwnd, SW_SHOW);
            let _ = UpdateWindow(self.hwnd);
        }
        Ok(())
    }
}

/// Validate a preview host handle and turn it into a window handle
#[allow(unsafe_code)] // Windows FFI for handle validation
pub fn host_hwnd(host: HostHandle) -> Result<HWND> {
    let hwnd = HWND(host.raw() as *mut std::ffi::c_void);
    if unsafe { IsWindow(Some(hwnd)) }.as_bool() {
        Ok(hwnd)
    } else {
        Err(ColorClockError::InvalidPreviewHandle(host.to_string()))
    }
}

/// Client-area size of `hwnd`
#[allow(unsafe_code)] // Windows FFI for window geometry
pub fn client_size(hwnd: HWND) -> Result<Size> {
    let mut rect = RECT::default();
    unsafe { GetClientRect(hwnd, &raw mut rect)? };
    Ok(Rect::from_edges(rect.left, rect.top, rect.right, rect.bottom).size())
}

/// Number of surfaces still alive on this thread
pub fn live_surface_count() -> usize {
    SURFACES.with(|cell| cell.borrow().len())
}

/// Window procedure shared by all surfaces
#[allow(unsafe_code)] // Windows FFI callback
unsafe extern "system" fn window_proc(
    hwnd: HWND,
    msg: u32,
    wparam: WPARAM,
    lparam: LPARAM,
) -> LRESULT {
    match msg {
        WM_PAINT => {
            paint(hwnd);
            LRESULT(0)
        }
        // The back buffer covers every pixel
        WM_ERASEBKGND => LRESULT(1),
        WM_TIMER if wparam.0 == REPAINT_TIMER_ID => {
            unsafe {
                let _ = InvalidateRect(Some(hwnd), None, false);
            }
            LRESULT(0)
        }
        WM_KEYDOWN | WM_SYSKEYDOWN => {
            handle_input(hwnd, "key press", InputSession::on_key);
            LRESULT(0)
        }
        WM_LBUTTONDOWN | WM_RBUTTONDOWN | WM_MBUTTONDOWN => {
            handle_input(hwnd, "mouse click", InputSession::on_click);
            LRESULT(0)
        }
        WM_MOUSEMOVE => {
            let position = pointer_position(lparam);
            handle_input(hwnd, "mouse movement", |session| {
                session.on_mouse_move(position)
            });
            LRESULT(0)
        }
        WM_DESTROY => {
            debug!("Surface {:?} destroyed", hwnd);
            unsafe {
                let _ = KillTimer(Some(hwnd), REPAINT_TIMER_ID);
            }
            SURFACES.with(|cell| cell.borrow_mut().remove(&registry_key(hwnd)));
            unsafe {
                PostQuitMessage(0);
            }
            LRESULT(0)
        }
        _ => unsafe { DefWindowProcW(hwnd, msg, wparam, lparam) },
    }
}

/// Route an input event to the surface's session and quit if it says so
fn handle_input(
    hwnd: HWND,
    event: &str,
    apply: impl FnOnce(&mut InputSession) -> InputVerdict,
) {
    let verdict = SURFACES.with(|cell| {
        cell.borrow_mut()
            .get_mut(&registry_key(hwnd))
            .map_or(InputVerdict::Continue, |state| apply(&mut state.input))
    });

    if verdict == InputVerdict::Exit {
        info!("Surface {:?} received {}, ending the session", hwnd, event);
        #[allow(unsafe_code)] // Windows FFI to end the message loop
        unsafe {
            PostQuitMessage(0);
        }
    }
}

/// Client coordinates packed into a mouse message's `LPARAM`
fn pointer_position(lparam: LPARAM) -> Point {
    #[expect(
        clippy::cast_possible_truncation,
        clippy::cast_possible_wrap,
        reason = "the low and high words are signed 16-bit coordinates by definition"
    )]
    let (x, y) = (lparam.0 as u16 as i16, (lparam.0 >> 16) as u16 as i16);
    Point::new(i32::from(x), i32::from(y))
}

/// Compose and present one frame for `hwnd`
#[allow(unsafe_code)] // Windows FFI for painting
fn paint(hwnd: HWND) {
    let mut ps = PAINTSTRUCT::default();
    let window_dc = unsafe { BeginPaint(hwnd, &raw mut ps) };

    let result = client_size(hwnd).and_then(|size| {
        if size.is_empty() {
            return Ok(());
        }
        SURFACES.with(|cell| {
            let mut surfaces = cell.borrow_mut();
            let Some(state) = surfaces.get_mut(&registry_key(hwnd)) else {
                return Ok(());
            };

            let plan = FramePlan::now(size);
            state.canvas.prepare(window_dc, size)?;
            plan.paint(&mut state.canvas, &mut state.cache)?;
            state.canvas.present(window_dc)?;
            trace!("Painted {} on surface {:?}", plan.sample, hwnd);
            Ok(())
        })
    });

    if let Err(e) = result {
        error!("Failed to paint surface {:?}: {}", hwnd, e);
    }

    unsafe {
        let _ = EndPaint(hwnd, &raw const ps);
    }
}
