//! Background worker thread for remote store access.

use crate::backend::{CoreCmd, CoreEvent, Operation, RemoteUserStore, RequestId};
use crossbeam_channel::{unbounded, Receiver, Sender};
use std::thread;
use std::time::{Duration, Instant};
use tracing::{info, warn};
use userdeck_core::config::env_flag_enabled;

/// Handle for sending commands to, and receiving events from, the backend worker.
///
/// Dropping the handle closes the command channel, which ends the worker loop
/// once the call in progress returns.
pub struct BackendHandle {
    pub cmd_tx: Sender<CoreCmd>,
    pub evt_rx: Receiver<CoreEvent>,
}

impl BackendHandle {
    /// Wrap externally owned channels; tests drive both ends by hand.
    pub fn from_test_channels(cmd_tx: Sender<CoreCmd>, evt_rx: Receiver<CoreEvent>) -> Self {
        Self { cmd_tx, evt_rx }
    }
}

fn log_call_perf(
    enabled: bool,
    operation: Operation,
    request: RequestId,
    elapsed: Duration,
    succeeded: bool,
) {
    if !enabled {
        return;
    }
    info!(
        target: "userdeck_gui::backend_perf",
        op = operation.verb(),
        request = request.0,
        succeeded = succeeded,
        elapsed_ms = elapsed.as_secs_f64() * 1000.0,
        "backend call perf"
    );
}

fn execute<S: RemoteUserStore>(store: &S, cmd: CoreCmd) -> CoreEvent {
    let request = cmd.request();
    let operation = cmd.operation();
    let result = match cmd {
        CoreCmd::ListUsers { .. } => store
            .list()
            .map(|users| CoreEvent::UsersLoaded { request, users }),
        CoreCmd::CreateUser { draft, .. } => store
            .create(&draft)
            .map(|user| CoreEvent::UserCreated { request, user }),
        CoreCmd::UpdateUser { id, patch, .. } => store
            .update(id, &patch)
            .map(|changes| CoreEvent::UserUpdated {
                request,
                id,
                changes,
            }),
        CoreCmd::RemoveUser { id, .. } => store
            .remove(id)
            .map(|()| CoreEvent::UserRemoved { request, id }),
    };
    result.unwrap_or_else(|error| {
        warn!("backend {} {} failed: {}", operation.verb(), request, error);
        CoreEvent::Failed {
            request,
            operation,
            error,
        }
    })
}

/// Spawn the backend worker thread that performs blocking remote calls.
///
/// Commands are executed one at a time in arrival order; each produces exactly
/// one [`CoreEvent`], polled by the UI thread every frame.
///
/// # Returns
/// A [`BackendHandle`] containing the command sender and event receiver.
///
/// # Errors
/// Returns the I/O error if the worker thread cannot be spawned.
pub fn spawn_backend<S>(store: S) -> std::io::Result<BackendHandle>
where
    S: RemoteUserStore + 'static,
{
    let (cmd_tx, cmd_rx) = unbounded::<CoreCmd>();
    let (evt_tx, evt_rx) = unbounded();

    thread::Builder::new()
        .name("userdeck-backend".to_string())
        .spawn(move || {
            let perf_log_enabled = env_flag_enabled("USERDECK_BACKEND_PERF_LOG");
            for cmd in cmd_rx.iter() {
                let started = Instant::now();
                let request = cmd.request();
                let operation = cmd.operation();
                let event = execute(&store, cmd);
                log_call_perf(
                    perf_log_enabled,
                    operation,
                    request,
                    started.elapsed(),
                    !matches!(event, CoreEvent::Failed { .. }),
                );
                if evt_tx.send(event).is_err() {
                    break;
                }
            }
            info!("backend worker stopped");
        })?;

    Ok(BackendHandle { cmd_tx, evt_rx })
}
