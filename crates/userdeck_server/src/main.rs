//! `userdeck-server`: the reference users API as a standalone process.

use anyhow::bail;
use tracing::{info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};
use userdeck_core::config::env_flag_enabled;
use userdeck_server::{resolve_bind_address, serve_router, AppState, Config, DEFAULT_PORT};

const DEFAULT_LOG_FILTER: &str = "userdeck_server=info,tower_http=warn";

/// Returns true when `--help` was requested. Anything else is rejected since
/// the server is configured through the environment.
fn wants_help(args: &[String]) -> anyhow::Result<bool> {
    let mut help = false;
    for arg in args.iter().skip(1) {
        match arg.as_str() {
            "--help" | "-h" => help = true,
            flag if flag.starts_with('-') => bail!("unknown flag '{}' (try --help)", flag),
            other => bail!("unexpected argument '{}' (try --help)", other),
        }
    }
    Ok(help)
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| DEFAULT_LOG_FILTER.into());
    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer())
        .init();

    let args: Vec<String> = std::env::args().collect();
    if wants_help(&args)? {
        print_help();
        return Ok(());
    }

    let config = Config::from_env();
    let allow_public = env_flag_enabled("ALLOW_PUBLIC_ACCESS");
    let addr = resolve_bind_address(&config, allow_public);
    if allow_public {
        warn!("ALLOW_PUBLIC_ACCESS set: any origin may call the API");
    }

    let listener = tokio::net::TcpListener::bind(addr).await?;
    let bound = listener.local_addr().unwrap_or(addr);
    let state = AppState::with_sample_users(config);
    info!("users API running at http://{}/users", bound);

    serve_router(listener, state, allow_public, shutdown_signal()).await?;
    info!("users API stopped");
    Ok(())
}

fn print_help() {
    println!(
        "\
userdeck-server: reference users API for UserDeck

Usage: userdeck-server [--help]

Environment:
  PORT                   listen port (default {port})
  BIND                   full listen address, e.g. 0.0.0.0:{port}
  ALLOW_PUBLIC_ACCESS    allow non-loopback binds and any CORS origin
  USERDECK_FORM_PROFILE  validation profile: standard | extended
  RUST_LOG               log filter (default {filter})",
        port = DEFAULT_PORT,
        filter = DEFAULT_LOG_FILTER,
    );
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(err) = tokio::signal::ctrl_c().await {
            warn!("Ctrl+C handler unavailable: {}", err);
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        use tokio::signal::unix::{signal, SignalKind};
        match signal(SignalKind::terminate()) {
            Ok(mut sigterm) => {
                sigterm.recv().await;
            }
            Err(err) => {
                warn!("SIGTERM handler unavailable: {}", err);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }
}

#[cfg(test)]
mod tests {
    use super::wants_help;

    fn argv(values: &[&str]) -> Vec<String> {
        values.iter().map(|value| value.to_string()).collect()
    }

    #[test]
    fn help_flag_is_optional() {
        assert!(wants_help(&argv(&["userdeck-server", "--help"])).expect("args"));
        assert!(wants_help(&argv(&["userdeck-server", "-h"])).expect("args"));
        assert!(!wants_help(&argv(&["userdeck-server"])).expect("args"));
    }

    #[test]
    fn other_arguments_are_rejected() {
        for (input, fragment) in [
            (["userdeck-server", "--port"], "unknown flag"),
            (["userdeck-server", "serve"], "unexpected argument"),
        ] {
            let err = wants_help(&argv(&input)).expect_err("rejected");
            assert!(err.to_string().contains(fragment), "{}", err);
        }
    }
}
