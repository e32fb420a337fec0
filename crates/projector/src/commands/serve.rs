use std::io::{self, BufRead, Write};
use std::sync::mpsc::{self, RecvTimeoutError};
use std::thread;

use projector_core::{BackendKind, Dispatcher, MethodResponse, log_error, log_info};

use super::host;
use super::show::PUMP_INTERVAL;

/// Serves method calls from stdin until it closes.
///
/// Each input line is one JSON call such as
/// `{"method":"moveToMonitor","arguments":{"monitorIndex":1}}` and gets
/// exactly one JSON response line on stdout. Calls run on the main thread;
/// OS events are pumped between them.
pub fn execute(backend: Option<BackendKind>) {
    let mut dispatcher = Dispatcher::new(host::controller(backend));
    let lines = spawn_stdin_reader();
    let mut stdout = io::stdout().lock();

    log_info!("serving method calls on stdin");
    loop {
        match lines.recv_timeout(PUMP_INTERVAL) {
            Ok(line) => {
                let response = dispatcher.handle_json(&line);
                if let Err(e) = write_response(&mut stdout, &response) {
                    log_error!("failed to write response: {e}");
                    break;
                }
            }
            Err(RecvTimeoutError::Timeout) => {}
            Err(RecvTimeoutError::Disconnected) => break,
        }
        dispatcher.controller_mut().pump_events();
    }
    log_info!("stdin closed, shutting down");
}

/// Forwards non-empty stdin lines to the main thread.
fn spawn_stdin_reader() -> mpsc::Receiver<String> {
    let (tx, rx) = mpsc::channel();
    thread::spawn(move || {
        for line in io::stdin().lock().lines() {
            let Ok(line) = line else { break };
            if line.trim().is_empty() {
                continue;
            }
            if tx.send(line).is_err() {
                break;
            }
        }
    });
    rx
}

fn write_response(out: &mut impl Write, response: &MethodResponse) -> io::Result<()> {
    let json = serde_json::to_string(response)?;
    writeln!(out, "{json}")?;
    out.flush()
}
