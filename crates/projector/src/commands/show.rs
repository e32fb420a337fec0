use std::thread;
use std::time::Duration;

use clap::Args;

use projector_core::{BackendKind, OpenRequest};

use super::host;

/// Delay between event pumps while the window is open.
pub(super) const PUMP_INTERVAL: Duration = Duration::from_millis(16);

/// Arguments for the `show` subcommand.
#[derive(Args)]
pub struct ShowArgs {
    /// Target monitor index (out of range selects the primary monitor)
    #[arg(long, default_value_t = -1, allow_negative_numbers = true)]
    monitor: i64,
    /// Open a decorated window instead of covering the monitor
    #[arg(long)]
    windowed: bool,
    /// Window width in pixels (windowed only)
    #[arg(long, default_value_t = 1280)]
    width: i32,
    /// Window height in pixels (windowed only)
    #[arg(long, default_value_t = 720)]
    height: i32,
    /// Horizontal offset from the monitor's left edge (windowed only)
    #[arg(long, default_value_t = 100, allow_negative_numbers = true)]
    x: i32,
    /// Vertical offset from the monitor's top edge (windowed only)
    #[arg(long, default_value_t = 100, allow_negative_numbers = true)]
    y: i32,
    /// Text to show instead of the placeholder
    #[arg(long)]
    content: Option<String>,
}

impl ShowArgs {
    fn request(&self) -> OpenRequest {
        OpenRequest {
            monitor_index: self.monitor,
            fullscreen: !self.windowed,
            width: self.width,
            height: self.height,
            x: self.x,
            y: self.y,
        }
    }
}

pub fn execute(backend: Option<BackendKind>, args: &ShowArgs) {
    let mut controller = host::controller(backend);
    if !controller.initialize() {
        eprintln!(
            "Error: the {} backend is not available.",
            controller.backend().name()
        );
        std::process::exit(1);
    }

    if !controller.open_secondary_window(&args.request()) {
        eprintln!("Error: could not open the secondary window.");
        std::process::exit(1);
    }

    if let Some(content) = &args.content {
        controller.update_content(content);
    }

    println!("Secondary window open. Close it (or press Escape) to exit.");
    loop {
        controller.pump_events();
        if !controller.is_secondary_window_open() {
            break;
        }
        thread::sleep(PUMP_INTERVAL);
    }
    println!("Secondary window closed.");
}
