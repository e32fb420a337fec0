use projector_core::{
    BackendKind, ControllerSettings, DisabledBackend, DisplayBackend,
    SecondaryWindowController, config, log, log_info,
};

/// Controller over whichever backend this build and config select.
pub type Controller = SecondaryWindowController<Box<dyn DisplayBackend>>;

/// Loads the config, starts logging, and builds the controller.
///
/// `backend` overrides the `backend` key from `config.toml`.
pub fn controller(backend: Option<BackendKind>) -> Controller {
    let config = config::load();
    log::init(&config.log);

    let kind = backend.unwrap_or(config.backend);
    let backend = select(kind);
    log_info!("starting with the {} backend", backend.name());

    SecondaryWindowController::new(backend, ControllerSettings::from_config(&config))
}

fn select(kind: BackendKind) -> Box<dyn DisplayBackend> {
    match kind {
        BackendKind::Native => native(),
        BackendKind::Disabled => Box::new(DisabledBackend::default()),
    }
}

#[cfg(windows)]
fn native() -> Box<dyn DisplayBackend> {
    Box::new(projector_windows::Win32Backend::new())
}

#[cfg(target_os = "linux")]
fn native() -> Box<dyn DisplayBackend> {
    projector_gtk::backend()
}

#[cfg(not(any(windows, target_os = "linux")))]
fn native() -> Box<dyn DisplayBackend> {
    Box::new(DisabledBackend::new("no native backend for this platform"))
}
