//! Windows platform implementation for the clock container
//!
//! A borderless popup window painted with `SetDIBitsToDevice`. Topmost
//! state is switched with `SetWindowPos`.

use std::mem;

use windows::Win32::Foundation::{HWND, LPARAM, LRESULT, WPARAM};
use windows::Win32::Graphics::Gdi::{
    BI_RGB, BITMAPINFO, BITMAPINFOHEADER, DIB_RGB_COLORS, GetDC, ReleaseDC, SetDIBitsToDevice,
    ValidateRect,
};
use windows::Win32::System::LibraryLoader::GetModuleHandleW;
use windows::Win32::UI::WindowsAndMessaging::{
    CS_HREDRAW, CS_VREDRAW, CreateWindowExW, DefWindowProcW, DestroyWindow, DispatchMessageW,
    GetSystemMetrics, HWND_NOTOPMOST, HWND_TOPMOST, IDC_ARROW, LoadCursorW, MB_ICONINFORMATION,
    MB_OK, MSG, MessageBoxW, PM_REMOVE, PeekMessageW, PostQuitMessage, RegisterClassExW,
    SM_CXSCREEN, SM_CYSCREEN, SW_SHOWNOACTIVATE, SWP_NOACTIVATE, SWP_NOMOVE, SWP_NOSIZE,
    SWP_NOZORDER, SetWindowPos, ShowWindow, TranslateMessage, WM_DESTROY, WM_ERASEBKGND,
    WM_LBUTTONDOWN, WM_PAINT, WM_QUIT, WM_RBUTTONDOWN, WNDCLASSEXW, WS_EX_TOOLWINDOW,
    WS_EX_TOPMOST, WS_POPUP,
};
use windows::core::PCWSTR;

use super::{OverlayConfig, OverlayPlatform, PlatformError};

const CLASS_NAME: &str = "WorldClockContainer";

/// Windows container implementation
pub struct WindowsOverlay {
    hwnd: HWND,
    width: u32,
    height: u32,
    x: i32,
    y: i32,
    pixel_data: Vec<u8>,
    bgra_buffer: Vec<u8>, // Pre-allocated buffer for RGBA->BGRA conversion
    pending_click: Option<(f32, f32)>,
    running: bool,
}

// HWND handles must be used from the thread that created them; the event
// loop runs on a current-thread runtime so the window never moves.

impl WindowsOverlay {
    fn register_class() -> Result<(), PlatformError> {
        unsafe {
            let class_name = wide_string(CLASS_NAME);
            let hinstance = GetModuleHandleW(None)
                .map_err(|e| PlatformError::Other(format!("GetModuleHandleW failed: {}", e)))?;

            let wc = WNDCLASSEXW {
                cbSize: mem::size_of::<WNDCLASSEXW>() as u32,
                style: CS_HREDRAW | CS_VREDRAW,
                lpfnWndProc: Some(window_proc),
                hInstance: hinstance.into(),
                hCursor: LoadCursorW(None, IDC_ARROW).unwrap_or_default(),
                lpszClassName: PCWSTR(class_name.as_ptr()),
                ..Default::default()
            };

            let atom = RegisterClassExW(&wc);
            if atom == 0 {
                // Class may already be registered, which is fine
                let err = std::io::Error::last_os_error();
                if err.raw_os_error() != Some(1410) {
                    // ERROR_CLASS_ALREADY_EXISTS
                    return Err(PlatformError::Other(format!(
                        "RegisterClassExW failed: {}",
                        err
                    )));
                }
            }
        }
        Ok(())
    }

    fn resize_buffers(&mut self) {
        let size = (self.width * self.height * 4) as usize;
        self.pixel_data.resize(size, 0);
        self.bgra_buffer.resize(size, 0);
    }

    fn paint(&mut self) {
        if self.width == 0 || self.height == 0 {
            return;
        }

        // Convert RGBA to BGRA using pre-allocated buffer
        for (src, dst) in self
            .pixel_data
            .chunks_exact(4)
            .zip(self.bgra_buffer.chunks_exact_mut(4))
        {
            dst[0] = src[2];
            dst[1] = src[1];
            dst[2] = src[0];
            dst[3] = src[3];
        }

        let bmi = BITMAPINFO {
            bmiHeader: BITMAPINFOHEADER {
                biSize: mem::size_of::<BITMAPINFOHEADER>() as u32,
                biWidth: self.width as i32,
                biHeight: -(self.height as i32), // Top-down DIB
                biPlanes: 1,
                biBitCount: 32,
                biCompression: BI_RGB.0,
                ..Default::default()
            },
            ..Default::default()
        };

        unsafe {
            let hdc = GetDC(self.hwnd);
            SetDIBitsToDevice(
                hdc,
                0,
                0,
                self.width,
                self.height,
                0,
                0,
                0,
                self.height,
                self.bgra_buffer.as_ptr() as *const _,
                &bmi,
                DIB_RGB_COLORS,
            );
            ReleaseDC(self.hwnd, hdc);
        }
    }
}

impl OverlayPlatform for WindowsOverlay {
    fn new(config: OverlayConfig) -> Result<Self, PlatformError> {
        Self::register_class()?;

        let hwnd = unsafe {
            let class_name = wide_string(CLASS_NAME);
            let window_name = wide_string(&config.namespace);
            let hinstance = GetModuleHandleW(None)
                .map_err(|e| PlatformError::Other(format!("GetModuleHandleW failed: {}", e)))?;

            let mut ex_style = WS_EX_TOOLWINDOW;
            if config.always_on_top {
                ex_style |= WS_EX_TOPMOST;
            }

            CreateWindowExW(
                ex_style,
                PCWSTR(class_name.as_ptr()),
                PCWSTR(window_name.as_ptr()),
                WS_POPUP,
                config.x,
                config.y,
                config.width as i32,
                config.height as i32,
                None,
                None,
                hinstance,
                None,
            )
            .map_err(|e| PlatformError::Other(format!("CreateWindowExW failed: {}", e)))?
        };

        let size = (config.width * config.height * 4) as usize;
        let overlay = Self {
            hwnd,
            width: config.width,
            height: config.height,
            x: config.x,
            y: config.y,
            pixel_data: vec![0u8; size],
            bgra_buffer: vec![0u8; size],
            pending_click: None,
            running: true,
        };

        unsafe {
            let _ = ShowWindow(hwnd, SW_SHOWNOACTIVATE);
        }
        tracing::debug!(hwnd = ?hwnd, "Win32 container window created");

        Ok(overlay)
    }

    fn width(&self) -> u32 {
        self.width
    }

    fn height(&self) -> u32 {
        self.height
    }

    fn x(&self) -> i32 {
        self.x
    }

    fn y(&self) -> i32 {
        self.y
    }

    fn screen_size(&self) -> (u32, u32) {
        unsafe {
            (
                GetSystemMetrics(SM_CXSCREEN).max(0) as u32,
                GetSystemMetrics(SM_CYSCREEN).max(0) as u32,
            )
        }
    }

    fn set_position(&mut self, x: i32, y: i32) {
        if x == self.x && y == self.y {
            return;
        }
        self.x = x;
        self.y = y;
        unsafe {
            let _ = SetWindowPos(
                self.hwnd,
                None,
                x,
                y,
                0,
                0,
                SWP_NOSIZE | SWP_NOZORDER | SWP_NOACTIVATE,
            );
        }
    }

    fn set_size(&mut self, width: u32, height: u32) {
        if width == self.width && height == self.height {
            return;
        }
        self.width = width;
        self.height = height;
        self.resize_buffers();

        unsafe {
            let _ = SetWindowPos(
                self.hwnd,
                None,
                0,
                0,
                width as i32,
                height as i32,
                SWP_NOMOVE | SWP_NOZORDER | SWP_NOACTIVATE,
            );
        }
    }

    fn set_always_on_top(&mut self, on_top: bool) {
        let insert_after = if on_top { HWND_TOPMOST } else { HWND_NOTOPMOST };
        unsafe {
            let _ = SetWindowPos(
                self.hwnd,
                insert_after,
                0,
                0,
                0,
                0,
                SWP_NOMOVE | SWP_NOSIZE | SWP_NOACTIVATE,
            );
        }
    }

    fn take_pending_click(&mut self) -> Option<(f32, f32)> {
        self.pending_click.take()
    }

    fn pixel_buffer(&mut self) -> Option<&mut [u8]> {
        Some(&mut self.pixel_data)
    }

    fn commit(&mut self) {
        self.paint();
    }

    fn poll_events(&mut self) -> bool {
        unsafe {
            let mut msg = MSG::default();
            // WM_QUIT is a thread message, so do not filter by window
            while PeekMessageW(&mut msg, None, 0, 0, PM_REMOVE).as_bool() {
                match msg.message {
                    WM_QUIT => {
                        self.running = false;
                        return false;
                    }
                    WM_LBUTTONDOWN | WM_RBUTTONDOWN if msg.hwnd == self.hwnd => {
                        let x = (msg.lParam.0 & 0xFFFF) as i16 as i32;
                        let y = ((msg.lParam.0 >> 16) & 0xFFFF) as i16 as i32;
                        self.pending_click = Some((x as f32, y as f32));
                    }
                    WM_PAINT if msg.hwnd == self.hwnd => {
                        self.paint();
                        let _ = ValidateRect(self.hwnd, None);
                    }
                    _ => {
                        let _ = TranslateMessage(&msg);
                        DispatchMessageW(&msg);
                    }
                }
            }
        }
        self.running
    }

    fn show_message(&mut self, title: &str, message: &str) {
        let title = wide_string(title);
        let message = wide_string(message);
        unsafe {
            MessageBoxW(
                self.hwnd,
                PCWSTR(message.as_ptr()),
                PCWSTR(title.as_ptr()),
                MB_OK | MB_ICONINFORMATION,
            );
        }
    }
}

impl Drop for WindowsOverlay {
    fn drop(&mut self) {
        unsafe {
            if !self.hwnd.is_invalid() {
                let _ = DestroyWindow(self.hwnd);
            }
        }
    }
}

/// Window procedure for the container window
unsafe extern "system" fn window_proc(
    hwnd: HWND,
    msg: u32,
    wparam: WPARAM,
    lparam: LPARAM,
) -> LRESULT {
    match msg {
        WM_ERASEBKGND => LRESULT(1), // Don't erase background
        WM_DESTROY => {
            unsafe { PostQuitMessage(0) };
            LRESULT(0)
        }
        _ => unsafe { DefWindowProcW(hwnd, msg, wparam, lparam) },
    }
}

/// Convert a &str to a null-terminated wide string
fn wide_string(s: &str) -> Vec<u16> {
    s.encode_utf16().chain(std::iter::once(0)).collect()
}
