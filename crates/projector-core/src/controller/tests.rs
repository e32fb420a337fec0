use super::*;
use crate::fake::{self, FakeBackend};

fn controller(backend: FakeBackend) -> SecondaryWindowController<FakeBackend> {
    SecondaryWindowController::new(backend, ControllerSettings::default())
}

fn windowed(monitor_index: i64, x: i32, y: i32) -> OpenRequest {
    OpenRequest {
        monitor_index,
        fullscreen: false,
        width: 800,
        height: 600,
        x,
        y,
    }
}

#[test]
fn get_monitors_returns_contiguous_indices() {
    // Arrange
    let mut monitors = fake::dual_monitors();
    monitors[1].index = 5;
    let mut ctl = controller(FakeBackend::with_monitors(monitors));

    // Act
    let indices: Vec<usize> = ctl.get_monitors().iter().map(|m| m.index).collect();

    // Assert
    assert_eq!(indices, [0, 1]);
    assert_eq!(ctl.monitors().iter().filter(|m| m.is_primary).count(), 1);
}

#[test]
fn get_monitors_replaces_previous_snapshot() {
    // Arrange
    let mut ctl = controller(FakeBackend::dual());
    ctl.get_monitors();
    ctl.backend_mut().monitors.truncate(1);

    // Act
    let count = ctl.get_monitors().len();

    // Assert
    assert_eq!(count, 1);
    assert_eq!(ctl.backend().enumerations, 2);
}

#[test]
fn fullscreen_open_covers_requested_monitor() {
    // Arrange
    let mut ctl = controller(FakeBackend::dual());
    let request = OpenRequest {
        monitor_index: 1,
        ..OpenRequest::default()
    };

    // Act
    let opened = ctl.open_secondary_window(&request);

    // Assert
    assert!(opened);
    assert!(ctl.is_secondary_window_open());
    let window = ctl.backend().only_window().unwrap();
    assert_eq!(window.rect, Rect::new(1920, 0, 2560, 1440));
    assert_eq!(window.style, WindowStyle::Fullscreen);
    assert_eq!(ctl.window_rect(), Some(Rect::new(1920, 0, 2560, 1440)));
}

#[test]
fn windowed_open_offsets_from_monitor_origin() {
    // Arrange
    let mut ctl = controller(FakeBackend::dual());

    // Act
    assert!(ctl.open_secondary_window(&windowed(0, 50, 50)));

    // Assert
    let window = ctl.backend().only_window().unwrap();
    assert_eq!(window.rect, Rect::new(50, 50, 800, 600));
    assert_eq!(window.style, WindowStyle::Windowed);
}

#[test]
fn windowed_open_on_second_monitor_is_relative() {
    let mut ctl = controller(FakeBackend::dual());

    assert!(ctl.open_secondary_window(&windowed(1, 10, 20)));

    assert_eq!(ctl.window_rect(), Some(Rect::new(1930, 20, 800, 600)));
}

#[test]
fn windowed_open_on_negative_origin_monitor() {
    // Arrange
    let monitors = vec![
        fake::monitor(0, Rect::new(0, 0, 1920, 1080), true),
        fake::monitor(1, Rect::new(-1280, -200, 1280, 1024), false),
    ];
    let mut ctl = controller(FakeBackend::with_monitors(monitors));

    // Act
    assert!(ctl.open_secondary_window(&windowed(1, 100, 100)));

    // Assert
    assert_eq!(ctl.window_rect(), Some(Rect::new(-1180, -100, 800, 600)));
}

#[test]
fn out_of_range_index_falls_back_to_primary() {
    // Arrange
    let monitors = vec![
        fake::monitor(0, Rect::new(-1920, 0, 1920, 1080), false),
        fake::monitor(1, Rect::new(0, 0, 2560, 1440), true),
    ];
    let mut ctl = controller(FakeBackend::with_monitors(monitors));

    // Act
    assert!(ctl.open_secondary_window(&OpenRequest {
        monitor_index: 9,
        ..OpenRequest::default()
    }));

    // Assert
    assert_eq!(ctl.window_rect(), Some(Rect::new(0, 0, 2560, 1440)));
}

#[test]
fn default_index_without_primary_flag_uses_first_monitor() {
    // Arrange
    let mut monitors = fake::dual_monitors();
    monitors[0].is_primary = false;
    let mut ctl = controller(FakeBackend::with_monitors(monitors));

    // Act
    assert!(ctl.open_secondary_window(&OpenRequest::default()));

    // Assert
    assert_eq!(ctl.window_rect(), Some(Rect::new(0, 0, 1920, 1080)));
}

#[test]
fn open_fails_without_monitors() {
    // Arrange
    let mut ctl = controller(FakeBackend::with_monitors(Vec::new()));

    // Act
    let opened = ctl.open_secondary_window(&OpenRequest::default());

    // Assert
    assert!(!opened);
    assert!(!ctl.is_secondary_window_open());
    assert_eq!(ctl.backend().created, 0);
}

#[test]
fn open_fails_when_backend_cannot_create_window() {
    let mut backend = FakeBackend::dual();
    backend.fail_create = true;
    let mut ctl = controller(backend);

    assert!(!ctl.open_secondary_window(&OpenRequest::default()));
    assert!(!ctl.is_secondary_window_open());
}

#[test]
fn open_rejects_empty_windowed_size() {
    let mut ctl = controller(FakeBackend::dual());
    let request = OpenRequest {
        width: 0,
        ..windowed(0, 0, 0)
    };

    assert!(!ctl.open_secondary_window(&request));
    assert_eq!(ctl.backend().created, 0);
}

#[test]
fn second_open_is_a_successful_no_op() {
    // Arrange
    let mut ctl = controller(FakeBackend::dual());
    assert!(ctl.open_secondary_window(&OpenRequest::default()));

    // Act
    let reopened = ctl.open_secondary_window(&windowed(1, 0, 0));

    // Assert
    assert!(reopened);
    assert_eq!(ctl.backend().created, 1);
    assert_eq!(ctl.window_style(), Some(WindowStyle::Fullscreen));
}

#[test]
fn spec_carries_configured_title_and_placeholder() {
    // Arrange
    let settings = ControllerSettings {
        title: "Lyrics".into(),
        placeholder: "Waiting for the first verse".into(),
        ..ControllerSettings::default()
    };
    let mut ctl = SecondaryWindowController::new(FakeBackend::dual(), settings);

    // Act
    ctl.open_secondary_window(&OpenRequest::default());

    // Assert
    let window = ctl.backend().only_window().unwrap();
    assert_eq!(window.title, "Lyrics");
    assert_eq!(window.placeholder, "Waiting for the first verse");
}

#[test]
fn escape_setting_reaches_the_window() {
    // Arrange
    let settings = ControllerSettings {
        close_on_escape: false,
        ..ControllerSettings::default()
    };
    let mut strict = SecondaryWindowController::new(FakeBackend::dual(), settings);
    let mut default = controller(FakeBackend::dual());

    // Act
    strict.open_secondary_window(&OpenRequest::default());
    default.open_secondary_window(&OpenRequest::default());

    // Assert
    assert!(!strict.backend().only_window().unwrap().close_on_escape);
    assert!(default.backend().only_window().unwrap().close_on_escape);
}

#[test]
fn dropping_controller_closes_its_window() {
    // Arrange
    let mut ctl = controller(FakeBackend::dual());
    ctl.open_secondary_window(&windowed(1, 0, 0));
    let hook = ctl.backend().only_window().unwrap().hook.clone();

    // Act
    drop(ctl);

    // Assert
    assert!(hook.is_fired());
}

#[test]
fn close_is_idempotent() {
    // Arrange
    let mut ctl = controller(FakeBackend::dual());
    ctl.open_secondary_window(&OpenRequest::default());

    // Act
    let first = ctl.close_secondary_window();
    let second = ctl.close_secondary_window();

    // Assert
    assert!(first);
    assert!(second);
    assert!(!ctl.is_secondary_window_open());
    assert!(ctl.backend().windows.is_empty());
}

#[test]
fn close_without_window_succeeds() {
    let mut ctl = controller(FakeBackend::dual());

    assert!(ctl.close_secondary_window());
}

#[test]
fn os_destroy_returns_controller_to_closed() {
    // Arrange
    let mut ctl = controller(FakeBackend::dual());
    ctl.open_secondary_window(&OpenRequest::default());

    // Act
    ctl.backend_mut().os_destroy_all();

    // Assert
    assert!(!ctl.is_secondary_window_open());
    assert!(!ctl.move_to_monitor(0));
    assert!(!ctl.update_content("verse 1"));
    assert!(ctl.close_secondary_window());
}

#[test]
fn open_after_os_destroy_creates_new_window() {
    // Arrange
    let mut ctl = controller(FakeBackend::dual());
    ctl.open_secondary_window(&OpenRequest::default());
    ctl.backend_mut().os_destroy_all();

    // Act
    let reopened = ctl.open_secondary_window(&OpenRequest::default());

    // Assert
    assert!(reopened);
    assert_eq!(ctl.backend().created, 2);
    assert!(ctl.is_secondary_window_open());
}

#[test]
fn move_to_monitor_only_repositions() {
    // Arrange
    let mut ctl = controller(FakeBackend::dual());
    ctl.open_secondary_window(&windowed(0, 100, 100));

    // Act
    let moved = ctl.move_to_monitor(1);

    // Assert
    assert!(moved);
    let window = ctl.backend().only_window().unwrap();
    assert_eq!(window.rect, Rect::new(1920, 0, 800, 600));
    assert_eq!(window.style, WindowStyle::Windowed);
}

#[test]
fn move_and_fullscreen_fail_when_closed() {
    let mut ctl = controller(FakeBackend::dual());
    ctl.get_monitors();

    assert!(!ctl.move_to_monitor(0));
    assert!(!ctl.set_fullscreen_on_monitor(0));
}

#[test]
fn move_and_fullscreen_fail_outside_snapshot() {
    // Arrange
    let mut ctl = controller(FakeBackend::dual());
    ctl.open_secondary_window(&windowed(0, 0, 0));

    // Act / Assert
    assert!(!ctl.move_to_monitor(2));
    assert!(!ctl.move_to_monitor(-1));
    assert!(!ctl.set_fullscreen_on_monitor(2));
    assert!(!ctl.set_fullscreen_on_monitor(-1));
    assert_eq!(ctl.window_rect(), Some(Rect::new(0, 0, 800, 600)));
}

#[test]
fn set_fullscreen_resizes_and_restyles() {
    // Arrange
    let mut ctl = controller(FakeBackend::dual());
    ctl.open_secondary_window(&windowed(0, 100, 100));

    // Act
    let done = ctl.set_fullscreen_on_monitor(1);

    // Assert
    assert!(done);
    let window = ctl.backend().only_window().unwrap();
    assert_eq!(window.rect, Rect::new(1920, 0, 2560, 1440));
    assert_eq!(window.style, WindowStyle::Fullscreen);
    assert_eq!(ctl.window_style(), Some(WindowStyle::Fullscreen));
}

#[test]
fn indexed_operations_use_stale_snapshot_by_default() {
    // Arrange
    let mut ctl = controller(FakeBackend::dual());
    ctl.open_secondary_window(&windowed(0, 0, 0));
    ctl.backend_mut().monitors.truncate(1);

    // Act
    let moved = ctl.move_to_monitor(1);

    // Assert
    assert!(moved, "snapshot still lists monitor 1");
    assert_eq!(ctl.backend().enumerations, 1);
}

#[test]
fn always_refresh_revalidates_indices() {
    // Arrange
    let settings = ControllerSettings {
        refresh: MonitorRefresh::Always,
        ..ControllerSettings::default()
    };
    let mut ctl = SecondaryWindowController::new(FakeBackend::dual(), settings);
    ctl.open_secondary_window(&windowed(0, 0, 0));
    ctl.backend_mut().monitors.truncate(1);

    // Act
    let moved = ctl.move_to_monitor(1);

    // Assert
    assert!(!moved);
    assert_eq!(ctl.monitors().len(), 1);
}

#[test]
fn update_content_redraws_open_window() {
    // Arrange
    let mut ctl = controller(FakeBackend::dual());
    ctl.open_secondary_window(&OpenRequest::default());

    // Act
    let updated = ctl.update_content("Amazing grace");

    // Assert
    assert!(updated);
    assert_eq!(ctl.content(), "Amazing grace");
    let window = ctl.backend().only_window().unwrap();
    assert_eq!(window.redraws, ["Amazing grace"]);
}

#[test]
fn update_content_fails_when_closed() {
    let mut ctl = controller(FakeBackend::dual());

    assert!(!ctl.update_content("verse"));
    assert_eq!(ctl.content(), "");
}

#[test]
fn close_clears_content() {
    let mut ctl = controller(FakeBackend::dual());
    ctl.open_secondary_window(&OpenRequest::default());
    ctl.update_content("chorus");

    ctl.close_secondary_window();

    assert_eq!(ctl.content(), "");
}

#[test]
fn initialize_reports_backend_readiness() {
    let mut ok = controller(FakeBackend::dual());
    assert!(ok.initialize());

    let mut backend = FakeBackend::dual();
    backend.fail_initialize = true;
    let mut failing = controller(backend);
    assert!(!failing.initialize());
}

#[test]
fn settings_follow_config() {
    // Arrange
    let mut config = Config::default();
    config.window.title = "Hymns".into();
    config.window.close_on_escape = false;
    config.monitors.refresh = MonitorRefresh::Always;

    // Act
    let settings = ControllerSettings::from_config(&config);

    // Assert
    assert_eq!(settings.title, "Hymns");
    assert!(!settings.close_on_escape);
    assert_eq!(settings.refresh, MonitorRefresh::Always);
}
