#![allow(clippy::unwrap_used)]
//! Integration tests for `ColorClock`
//!
//! Drives the mode selector end to end against a recording platform and checks
//! which surfaces it creates, how they are configured, and what the event loop
//! receives.

use colorclock::{
    config::SaverSettings,
    error::{ColorClockError, Result, StringError},
    geometry::{Point, Rect, Size},
    saver::{
        EmbeddableSurface, HostHandle, InputSession, InputVerdict, LaunchMode, SaverPlatform,
        ScreenSaver,
    },
};
use std::cell::RefCell;
use std::rc::Rc;
use std::time::Duration;

/// Everything the mode selector asked the platform to do, in order
#[derive(Debug, Clone, PartialEq)]
enum Call {
    DisplayRegions,
    HostClientSize(HostHandle),
    CreateSurface(usize, Rect),
    AttachTo(usize, HostHandle),
    Resize(usize, Size),
    StartTimer(usize, Duration),
    Show(usize),
    HideCursor,
    ShowMessage(String, String),
    RunEventLoop(Vec<usize>),
}

type CallLog = Rc<RefCell<Vec<Call>>>;

struct FakeSurface {
    id: usize,
    input: InputSession,
    log: CallLog,
}

impl EmbeddableSurface for FakeSurface {
    fn attach_to(&mut self, host: HostHandle) -> Result<()> {
        self.log.borrow_mut().push(Call::AttachTo(self.id, host));
        Ok(())
    }

    fn resize(&mut self, size: Size) -> Result<()> {
        self.log.borrow_mut().push(Call::Resize(self.id, size));
        Ok(())
    }

    fn start_repaint_timer(&mut self, interval: Duration) -> Result<()> {
        self.log.borrow_mut().push(Call::StartTimer(self.id, interval));
        Ok(())
    }

    fn show(&mut self) -> Result<()> {
        self.log.borrow_mut().push(Call::Show(self.id));
        Ok(())
    }
}

#[derive(Default)]
struct RecordingPlatform {
    regions: Vec<Rect>,
    host_size: Size,
    fail_create: bool,
    log: CallLog,
    next_id: usize,
    loop_sessions: Vec<InputSession>,
}

impl RecordingPlatform {
    fn with_regions(regions: Vec<Rect>) -> Self {
        Self {
            regions,
            ..Self::default()
        }
    }

    fn with_host(size: Size) -> Self {
        Self {
            host_size: size,
            ..Self::default()
        }
    }

    fn calls(&self) -> Vec<Call> {
        self.log.borrow().clone()
    }

    fn created(&self) -> Vec<Rect> {
        self.calls()
            .into_iter()
            .filter_map(|call| match call {
                Call::CreateSurface(_, bounds) => Some(bounds),
                _ => None,
            })
            .collect()
    }
}

impl SaverPlatform for RecordingPlatform {
    type Surface = FakeSurface;

    fn display_regions(&mut self) -> Result<Vec<Rect>> {
        self.log.borrow_mut().push(Call::DisplayRegions);
        Ok(self.regions.clone())
    }

    fn host_client_size(&mut self, host: HostHandle) -> Result<Size> {
        self.log.borrow_mut().push(Call::HostClientSize(host));
        Ok(self.host_size)
    }

    fn create_surface(&mut self, bounds: Rect, input: InputSession) -> Result<Self::Surface> {
        if self.fail_create {
            return Err(ColorClockError::SurfaceError(StringError::new(
                "CreateWindowExW failed",
            )));
        }
        let id = self.next_id;
        self.next_id += 1;
        self.log.borrow_mut().push(Call::CreateSurface(id, bounds));
        Ok(FakeSurface {
            id,
            input,
            log: Rc::clone(&self.log),
        })
    }

    fn hide_cursor(&mut self) -> Result<()> {
        self.log.borrow_mut().push(Call::HideCursor);
        Ok(())
    }

    fn show_message(&mut self, title: &str, message: &str) -> Result<()> {
        self.log
            .borrow_mut()
            .push(Call::ShowMessage(title.to_string(), message.to_string()));
        Ok(())
    }

    fn run_event_loop(&mut self, surfaces: Vec<Self::Surface>) -> Result<()> {
        let ids = surfaces.iter().map(|s| s.id).collect();
        self.log.borrow_mut().push(Call::RunEventLoop(ids));
        self.loop_sessions = surfaces.into_iter().map(|s| s.input).collect();
        Ok(())
    }
}

fn run(mode: LaunchMode, platform: &mut RecordingPlatform) -> Result<()> {
    ScreenSaver::default().run(mode, platform)
}

/// Test that full-screen mode covers every display with its own surface
#[test]
fn test_full_screen_creates_one_surface_per_display() {
    let left = Rect::new(-1920, 0, 1920, 1080);
    let right = Rect::new(0, 0, 2560, 1440);
    let mut platform = RecordingPlatform::with_regions(vec![left, right]);

    run(LaunchMode::FullScreen, &mut platform).unwrap();

    assert_eq!(platform.created(), vec![left, right]);
    let calls = platform.calls();
    assert!(calls.contains(&Call::HideCursor));
    assert_eq!(calls.last(), Some(&Call::RunEventLoop(vec![0, 1])));
    assert!(!calls.iter().any(|c| matches!(c, Call::AttachTo(..))));
}

/// Test that full-screen surfaces repaint at about 60 Hz
#[test]
fn test_full_screen_starts_repaint_timers() {
    let mut platform = RecordingPlatform::with_regions(vec![Rect::new(0, 0, 800, 600)]);

    run(LaunchMode::FullScreen, &mut platform).unwrap();

    let calls = platform.calls();
    assert!(calls.contains(&Call::StartTimer(0, Duration::from_millis(16))));
    assert!(calls.contains(&Call::Show(0)));
}

/// Test that the cursor is hidden before any surface becomes visible
#[test]
fn test_full_screen_hides_cursor_before_showing() {
    let mut platform = RecordingPlatform::with_regions(vec![
        Rect::new(0, 0, 800, 600),
        Rect::new(800, 0, 800, 600),
    ]);

    run(LaunchMode::FullScreen, &mut platform).unwrap();

    let calls = platform.calls();
    let hide = calls.iter().position(|c| *c == Call::HideCursor).unwrap();
    let first_show = calls
        .iter()
        .position(|c| matches!(c, Call::Show(_)))
        .unwrap();
    assert!(hide < first_show);
}

/// Test that full-screen surfaces exit on input with the 20 px tolerance
#[test]
fn test_full_screen_sessions_exit_on_input() {
    let mut platform = RecordingPlatform::with_regions(vec![Rect::new(0, 0, 800, 600)]);

    run(LaunchMode::FullScreen, &mut platform).unwrap();

    let mut session = platform.loop_sessions.pop().unwrap();
    assert!(session.exits_on_input());
    assert_eq!(
        session.on_mouse_move(Point::new(100, 100)),
        InputVerdict::Continue
    );
    assert_eq!(
        session.on_mouse_move(Point::new(120, 80)),
        InputVerdict::Continue
    );
    assert_eq!(
        session.on_mouse_move(Point::new(121, 100)),
        InputVerdict::Exit
    );
}

/// Test that full-screen mode fails when no display is reported
#[test]
fn test_full_screen_without_displays_fails() {
    let mut platform = RecordingPlatform::with_regions(Vec::new());

    let result = run(LaunchMode::FullScreen, &mut platform);

    assert!(matches!(
        result,
        Err(ColorClockError::DisplayEnumerationFailed(_))
    ));
    assert!(platform.created().is_empty());
    assert!(!platform.calls().contains(&Call::HideCursor));
}

/// Test that surface creation errors propagate without entering the loop
#[test]
fn test_surface_creation_failure_propagates() {
    let mut platform = RecordingPlatform {
        fail_create: true,
        ..RecordingPlatform::with_regions(vec![Rect::new(0, 0, 800, 600)])
    };

    let result = run(LaunchMode::FullScreen, &mut platform);

    assert!(matches!(result, Err(ColorClockError::SurfaceError(_))));
    assert!(
        !platform
            .calls()
            .iter()
            .any(|c| matches!(c, Call::RunEventLoop(_)))
    );
}

/// Test that preview mode embeds exactly one surface filling the host
#[test]
fn test_preview_embeds_single_surface_in_host() {
    let host = HostHandle(0x0004_0A2C);
    let mut platform = RecordingPlatform::with_host(Size::new(152, 112));

    run(LaunchMode::Preview(host), &mut platform).unwrap();

    assert_eq!(
        platform.calls(),
        vec![
            Call::HostClientSize(host),
            Call::CreateSurface(0, Rect::new(0, 0, 152, 112)),
            Call::AttachTo(0, host),
            Call::Resize(0, Size::new(152, 112)),
            Call::Show(0),
            Call::RunEventLoop(vec![0]),
        ]
    );
}

/// Test that the preview surface ignores input and keeps the cursor
#[test]
fn test_preview_is_passive() {
    let mut platform = RecordingPlatform::with_host(Size::new(152, 112));

    run(LaunchMode::Preview(HostHandle(42)), &mut platform).unwrap();

    let mut session = platform.loop_sessions.pop().unwrap();
    assert!(!session.exits_on_input());
    assert_eq!(session.on_key(), InputVerdict::Continue);
    assert_eq!(
        session.on_mouse_move(Point::new(500, 500)),
        InputVerdict::Continue
    );
    assert!(!platform.calls().contains(&Call::HideCursor));
}

/// Test that configure mode only shows the informational message
#[test]
fn test_configure_shows_message_without_surfaces() {
    let mut platform = RecordingPlatform::with_regions(vec![Rect::new(0, 0, 800, 600)]);

    run(LaunchMode::Configure, &mut platform).unwrap();

    let settings = SaverSettings::default();
    assert_eq!(
        platform.calls(),
        vec![Call::ShowMessage(
            settings.title,
            "This screensaver has no options that you can set".to_string()
        )]
    );
}

/// Test the path from raw arguments to platform calls
#[test]
fn test_arguments_select_mode() {
    let cases: [(&[&str], fn(&Call) -> bool); 4] = [
        (&["/s"], |c| matches!(c, Call::DisplayRegions)),
        (&[], |c| matches!(c, Call::DisplayRegions)),
        (&["/P", "1234"], |c| {
            matches!(c, Call::HostClientSize(HostHandle(1234)))
        }),
        (&["/c:4567"], |c| matches!(c, Call::ShowMessage(..))),
    ];

    for (args, first_call) in cases {
        let mut platform = RecordingPlatform {
            regions: vec![Rect::new(0, 0, 640, 480)],
            host_size: Size::new(152, 112),
            ..RecordingPlatform::default()
        };
        let mode = LaunchMode::from_args(args.iter().copied()).unwrap();

        run(mode, &mut platform).unwrap();

        let calls = platform.calls();
        assert!(
            calls.first().is_some_and(first_call),
            "unexpected first call for {args:?}: {calls:?}"
        );
    }
}

/// Test that an unusable preview handle never reaches the platform
#[test]
fn test_invalid_preview_handle_is_rejected() {
    assert!(matches!(
        LaunchMode::from_args(["/p", "not-a-window"]),
        Err(ColorClockError::InvalidPreviewHandle(_))
    ));
    assert!(matches!(
        LaunchMode::from_args(["/p"]),
        Err(ColorClockError::MissingPreviewHandle)
    ));
}

/// Test that only preview handle failures are reported as failed launches
#[test]
fn test_only_preview_handle_failures_are_invalid_launches() {
    let parse_error = LaunchMode::from_args(["/p", "0xZZ"]).unwrap_err();
    assert!(parse_error.is_invalid_launch());

    let mut platform = RecordingPlatform::with_regions(Vec::new());
    let display_error = run(LaunchMode::FullScreen, &mut platform).unwrap_err();
    assert!(!display_error.is_invalid_launch());

    let mut platform = RecordingPlatform {
        fail_create: true,
        ..RecordingPlatform::with_regions(vec![Rect::new(0, 0, 800, 600)])
    };
    let surface_error = run(LaunchMode::FullScreen, &mut platform).unwrap_err();
    assert!(!surface_error.is_invalid_launch());
}
