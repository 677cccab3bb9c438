//! In-process users service, used by the desktop client's headless tests.

use crate::{resolve_bind_address, serve_router, AppState};
use std::{
    io,
    net::SocketAddr,
    sync::mpsc,
    thread::{self, JoinHandle},
};
use tokio::{net::TcpListener, runtime::Runtime, sync::oneshot};
use tracing::{info, warn};

type Ready = Result<(SocketAddr, bool), String>;

/// Users service running on its own thread and tokio runtime.
///
/// Dropping the handle stops the server and joins the thread.
pub struct EmbeddedServer {
    shutdown: Option<oneshot::Sender<()>>,
    thread: Option<JoinHandle<()>>,
    addr: SocketAddr,
    used_fallback: bool,
}

/// Binds `addr`, retrying on an OS-assigned port of the same interface when
/// it is taken. The flag reports whether the retry happened.
fn bind_listener(rt: &Runtime, addr: SocketAddr) -> io::Result<(TcpListener, bool)> {
    match rt.block_on(TcpListener::bind(addr)) {
        Ok(listener) => Ok((listener, false)),
        Err(err) if err.kind() == io::ErrorKind::AddrInUse => {
            warn!("{} already in use; binding an ephemeral port", addr);
            let listener = rt.block_on(TcpListener::bind(SocketAddr::new(addr.ip(), 0)))?;
            Ok((listener, true))
        }
        Err(err) => Err(err),
    }
}

fn run(
    state: AppState,
    allow_public: bool,
    ready: mpsc::Sender<Ready>,
    stop: oneshot::Receiver<()>,
) {
    let rt = match tokio::runtime::Builder::new_multi_thread()
        .worker_threads(2)
        .enable_all()
        .build()
    {
        Ok(rt) => rt,
        Err(err) => {
            let _ = ready.send(Err(format!("tokio runtime: {}", err)));
            return;
        }
    };

    let requested = resolve_bind_address(&state.config, allow_public);
    let (listener, used_fallback) = match bind_listener(&rt, requested) {
        Ok(bound) => bound,
        Err(err) => {
            let _ = ready.send(Err(format!("bind {}: {}", requested, err)));
            return;
        }
    };
    let addr = listener.local_addr().unwrap_or(requested);
    info!("users API listening on http://{}", addr);
    let _ = ready.send(Ok((addr, used_fallback)));

    let shutdown = async {
        let _ = stop.await;
    };
    if let Err(err) = rt.block_on(serve_router(listener, state, allow_public, shutdown)) {
        warn!("embedded users API stopped with error: {}", err);
    }
}

impl EmbeddedServer {
    /// Starts serving `state` and returns once the socket is bound.
    ///
    /// # Errors
    /// Fails if the thread, runtime, or listener cannot be created.
    pub fn start(state: AppState, allow_public: bool) -> io::Result<Self> {
        let (shutdown_tx, shutdown_rx) = oneshot::channel();
        let (ready_tx, ready_rx) = mpsc::channel();
        let thread = thread::Builder::new()
            .name("userdeck-users-api".into())
            .spawn(move || run(state, allow_public, ready_tx, shutdown_rx))?;

        let ready = ready_rx
            .recv()
            .unwrap_or_else(|_| Err("embedded server exited before binding".to_string()));
        match ready {
            Ok((addr, used_fallback)) => Ok(Self {
                shutdown: Some(shutdown_tx),
                thread: Some(thread),
                addr,
                used_fallback,
            }),
            Err(message) => {
                let _ = thread.join();
                Err(io::Error::other(message))
            }
        }
    }

    pub fn addr(&self) -> SocketAddr {
        self.addr
    }

    /// Base URL for clients, e.g. `http://127.0.0.1:38412`.
    pub fn base_url(&self) -> String {
        format!("http://{}", self.addr)
    }

    /// True when the configured port was taken and an ephemeral one was used.
    pub fn used_fallback(&self) -> bool {
        self.used_fallback
    }
}

impl Drop for EmbeddedServer {
    fn drop(&mut self) {
        if let Some(stop) = self.shutdown.take() {
            let _ = stop.send(());
        }
        if let Some(thread) = self.thread.take() {
            let _ = thread.join();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use userdeck_core::env::{env_lock, ScopedEnv};
    use userdeck_core::Config;

    fn ephemeral() -> Config {
        Config {
            port: 0,
            ..Config::default()
        }
    }

    #[test]
    fn serves_on_loopback_until_dropped() {
        let _lock = env_lock();
        let _env = ScopedEnv::new().remove("BIND");
        let server =
            EmbeddedServer::start(AppState::with_sample_users(ephemeral()), false).expect("server");
        let addr = server.addr();
        assert!(addr.ip().is_loopback());
        assert_ne!(addr.port(), 0);
        assert!(!server.used_fallback());
        assert_eq!(server.base_url(), format!("http://{}", addr));

        drop(server);
        assert!(std::net::TcpStream::connect(addr).is_err());
    }

    #[test]
    fn taken_port_falls_back_to_ephemeral() {
        let _lock = env_lock();
        let _env = ScopedEnv::new().remove("BIND");
        let occupied = std::net::TcpListener::bind("127.0.0.1:0").expect("occupy");
        let port = occupied.local_addr().expect("addr").port();
        let config = Config {
            port,
            ..Config::default()
        };
        let server =
            EmbeddedServer::start(AppState::with_sample_users(config), false).expect("server");
        assert!(server.used_fallback());
        assert_ne!(server.addr().port(), port);
    }
}
