//! Process bootstrap shared by the `producto` and `inventario` binaries.

use std::future::Future;
use std::process::ExitCode;

use configs::AppConfig;
use dotenvy::dotenv;
use tracing::{error, info};
use uuid::Uuid;

/// Load `.env`, configure logging and configuration, then run `run` until it ends or Ctrl+C arrives.
pub fn launch<F, Fut>(service: &'static str, config_path: &str, run: F) -> ExitCode
where
    F: FnOnce(AppConfig) -> Fut,
    Fut: Future<Output = anyhow::Result<()>> + Send + 'static,
{
    // .env first so RUST_LOG / LOG_FORMAT are visible to the subscriber
    dotenv().ok();
    common::utils::logging::init_logging_from_env();
    info!(service, event = "logger_init", "tracing subscriber initialized");

    let service_id = Uuid::new_v4();
    let pid = std::process::id();
    std::panic::set_hook(Box::new(move |info| {
        error!(service, event = "panic", %service_id, pid, message = %info, "unhandled panic occurred");
    }));

    match serve(service, service_id, AppConfig::load_and_validate(config_path), run) {
        Ok(()) => ExitCode::SUCCESS,
        Err(_) => ExitCode::FAILURE,
    }
}

/// Build the runtime sized by the config and drive `run` on it. Failures are logged before being returned.
pub fn serve<F, Fut>(
    service: &'static str,
    service_id: Uuid,
    cfg: anyhow::Result<AppConfig>,
    run: F,
) -> anyhow::Result<()>
where
    F: FnOnce(AppConfig) -> Fut,
    Fut: Future<Output = anyhow::Result<()>> + Send + 'static,
{
    let pid = std::process::id();
    let cfg = match cfg {
        Ok(cfg) => cfg,
        Err(e) => {
            error!(service, event = "config_invalid", error = %e, "failed to load configuration");
            return Err(e);
        }
    };

    let mut builder = tokio::runtime::Builder::new_multi_thread();
    builder.enable_all();
    if let Some(w) = cfg.server.worker_threads {
        builder.worker_threads(w);
    }
    let rt = match builder.build() {
        Ok(rt) => rt,
        Err(e) => {
            error!(service, event = "runtime_build_failed", error = %e, "failed to build tokio runtime");
            return Err(e.into());
        }
    };

    info!(
        service,
        event = "start",
        %service_id,
        pid,
        version = env!("CARGO_PKG_VERSION"),
        threads = cfg.server.worker_threads.unwrap_or_default(),
        "service starting"
    );

    let server = run(cfg);
    rt.block_on(async move {
        let server_task = tokio::spawn(server);

        tokio::select! {
            res = server_task => match res {
                Ok(Ok(())) => {
                    info!(service, event = "stop", %service_id, pid, "service stopped normally");
                    Ok(())
                }
                Ok(Err(e)) => {
                    error!(service, event = "run_failed", error = %e, "server returned error");
                    Err(e)
                }
                Err(e) => {
                    error!(service, event = "task_join_error", error = %e, "server task join error");
                    Err(e.into())
                }
            },
            _ = tokio::signal::ctrl_c() => {
                info!(service, event = "shutdown_signal", %service_id, pid, "received Ctrl+C, shutting down");
                Ok(())
            }
        }
    })
}
