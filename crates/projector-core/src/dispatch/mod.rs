//! Call bridge: named operations with loosely typed arguments.
//!
//! A host runtime sends a [`MethodCall`] (operation name plus a JSON
//! argument map) and gets exactly one [`MethodResponse`] back. Operational
//! failures come back as `Success { result: false }`; malformed requests come
//! back as `Error` with a machine-readable [`ErrorCode`]; unknown operation
//! names come back as `NotImplemented`.

mod args;

use std::fmt;

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::controller::{OpenRequest, SecondaryWindowController};
use crate::{DisplayBackend, MonitorInfo, log_debug, log_error, log_warn};

use args::Arguments;

/// Operations understood by the dispatcher.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Method {
    Initialize,
    GetMonitors,
    OpenSecondaryWindow,
    CloseSecondaryWindow,
    MoveToMonitor,
    SetFullscreenOnMonitor,
    UpdateContent,
}

impl Method {
    pub const ALL: [Method; 7] = [
        Method::Initialize,
        Method::GetMonitors,
        Method::OpenSecondaryWindow,
        Method::CloseSecondaryWindow,
        Method::MoveToMonitor,
        Method::SetFullscreenOnMonitor,
        Method::UpdateContent,
    ];

    /// Wire name of the operation.
    pub fn name(self) -> &'static str {
        match self {
            Self::Initialize => "initialize",
            Self::GetMonitors => "getMonitors",
            Self::OpenSecondaryWindow => "openSecondaryWindow",
            Self::CloseSecondaryWindow => "closeSecondaryWindow",
            Self::MoveToMonitor => "moveToMonitor",
            Self::SetFullscreenOnMonitor => "setFullscreenOnMonitor",
            Self::UpdateContent => "updateContent",
        }
    }

    /// Looks up an operation by its exact wire name.
    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|m| m.name() == name)
    }
}

/// An incoming call from the host runtime.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MethodCall {
    pub method: String,
    /// Argument map. Absent or `null` means no arguments.
    #[serde(default)]
    pub arguments: Value,
}

impl MethodCall {
    pub fn new(method: impl Into<String>, arguments: Value) -> Self {
        Self {
            method: method.into(),
            arguments,
        }
    }
}

/// Category of a malformed request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ErrorCode {
    /// A required argument is absent.
    MissingArgument,
    /// The payload is not a map, or a value has the wrong type.
    InvalidArguments,
}

impl ErrorCode {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::MissingArgument => "MISSING_ARGUMENT",
            Self::InvalidArguments => "INVALID_ARGUMENTS",
        }
    }
}

/// Structured error for requests that could not be interpreted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MethodError {
    pub code: ErrorCode,
    pub message: String,
}

impl MethodError {
    pub fn missing_argument(message: impl Into<String>) -> Self {
        Self {
            code: ErrorCode::MissingArgument,
            message: message.into(),
        }
    }

    pub fn invalid_arguments(message: impl Into<String>) -> Self {
        Self {
            code: ErrorCode::InvalidArguments,
            message: message.into(),
        }
    }
}

impl fmt::Display for MethodError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.code.as_str(), self.message)
    }
}

impl std::error::Error for MethodError {}

/// The single answer to a [`MethodCall`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "camelCase")]
pub enum MethodResponse {
    /// The operation ran; `result` is a boolean or the monitor list.
    Success { result: Value },
    /// The request was malformed.
    Error(MethodError),
    /// The operation name is unknown.
    NotImplemented,
}

impl MethodResponse {
    pub fn success(result: impl Into<Value>) -> Self {
        Self::Success {
            result: result.into(),
        }
    }

    pub fn result(&self) -> Option<&Value> {
        match self {
            Self::Success { result } => Some(result),
            _ => None,
        }
    }

    pub fn error(&self) -> Option<&MethodError> {
        match self {
            Self::Error(e) => Some(e),
            _ => None,
        }
    }
}

/// Routes named operations to a [`SecondaryWindowController`].
pub struct Dispatcher<B: DisplayBackend> {
    controller: SecondaryWindowController<B>,
}

impl<B: DisplayBackend> Dispatcher<B> {
    pub fn new(controller: SecondaryWindowController<B>) -> Self {
        Self { controller }
    }

    pub fn controller(&self) -> &SecondaryWindowController<B> {
        &self.controller
    }

    pub fn controller_mut(&mut self) -> &mut SecondaryWindowController<B> {
        &mut self.controller
    }

    /// Handles one call. Never panics on malformed input.
    pub fn handle(&mut self, call: &MethodCall) -> MethodResponse {
        let Some(method) = Method::from_name(&call.method) else {
            log_warn!("unknown method '{}'", call.method);
            return MethodResponse::NotImplemented;
        };

        log_debug!("dispatching {}", method.name());
        match self.invoke(method, &call.arguments) {
            Ok(result) => MethodResponse::Success { result },
            Err(e) => {
                log_warn!("{} rejected: {e}", method.name());
                MethodResponse::Error(e)
            }
        }
    }

    /// Parses one JSON-encoded [`MethodCall`] and handles it.
    ///
    /// Text that is not a valid call yields an `INVALID_ARGUMENTS` error.
    pub fn handle_json(&mut self, line: &str) -> MethodResponse {
        match serde_json::from_str::<MethodCall>(line) {
            Ok(call) => self.handle(&call),
            Err(e) => MethodResponse::Error(MethodError::invalid_arguments(format!(
                "malformed method call: {e}"
            ))),
        }
    }

    fn invoke(&mut self, method: Method, arguments: &Value) -> Result<Value, MethodError> {
        let ctl = &mut self.controller;
        match method {
            Method::Initialize => Ok(ctl.initialize().into()),
            Method::GetMonitors => Ok(monitors_value(ctl.get_monitors())),
            Method::OpenSecondaryWindow => {
                let args = Arguments::parse(arguments)?;
                let defaults = OpenRequest::default();
                let request = OpenRequest {
                    monitor_index: args.optional_index("monitorIndex", defaults.monitor_index)?,
                    fullscreen: args.optional_bool("fullscreen", defaults.fullscreen)?,
                    width: args.optional_i32("width", defaults.width)?,
                    height: args.optional_i32("height", defaults.height)?,
                    x: args.optional_i32("x", defaults.x)?,
                    y: args.optional_i32("y", defaults.y)?,
                };
                Ok(ctl.open_secondary_window(&request).into())
            }
            Method::CloseSecondaryWindow => Ok(ctl.close_secondary_window().into()),
            Method::MoveToMonitor => {
                let index = Arguments::parse(arguments)?.required_index("monitorIndex")?;
                Ok(ctl.move_to_monitor(index).into())
            }
            Method::SetFullscreenOnMonitor => {
                let index = Arguments::parse(arguments)?.required_index("monitorIndex")?;
                Ok(ctl.set_fullscreen_on_monitor(index).into())
            }
            Method::UpdateContent => {
                let args = Arguments::parse(arguments)?;
                let content = args.optional_str("content")?;
                Ok(ctl.update_content(content).into())
            }
        }
    }
}

fn monitors_value(monitors: &[MonitorInfo]) -> Value {
    serde_json::to_value(monitors).unwrap_or_else(|e| {
        log_error!("failed to encode monitor list: {e}");
        Value::Array(Vec::new())
    })
}
