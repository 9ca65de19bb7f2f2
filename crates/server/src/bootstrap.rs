//! Process entry shared by the three binaries: logging, panic hook, config,
//! Tokio runtime and Ctrl+C handling.

use std::process::ExitCode;

use configs::AppConfig;
use dotenvy::dotenv;
use tracing::{error, info};
use uuid::Uuid;

use crate::startup::{self, ServiceKind};

fn init_logging(kind: ServiceKind) {
    // 提前加载 .env，使得 RUST_LOG / LOG_FORMAT 等环境变量生效
    dotenv().ok();
    common::utils::logging::init_logging_from_env();
    info!(service = kind.name(), event = "logger_init", "tracing subscriber initialized");
}

pub fn main_for(kind: ServiceKind) -> ExitCode {
    init_logging(kind);
    let service = kind.name();

    let service_id = Uuid::new_v4();
    let pid = std::process::id();
    let version = env!("CARGO_PKG_VERSION");

    // Panic 钩子：捕获异常并输出错误日志，便于排查问题
    std::panic::set_hook(Box::new(move |info| {
        error!(service, event = "panic", %service_id, pid, message = %info, "unhandled panic occurred");
    }));

    let cfg = match AppConfig::load_for(kind.defaults()) {
        Ok(cfg) => cfg,
        Err(e) => {
            error!(service, event = "config_invalid", error = %e, "configuration rejected");
            return ExitCode::FAILURE;
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
            return ExitCode::FAILURE;
        }
    };

    info!(
        service,
        event = "start",
        %service_id,
        pid,
        version,
        threads = cfg.server.worker_threads.unwrap_or_default(),
        peer = %cfg.peer.gerenciamento_url,
        "service starting"
    );

    rt.block_on(async move {
        let server_task = tokio::spawn(async move {
            let res = startup::run(kind, cfg).await;
            if let Err(e) = &res {
                error!(service, event = "run_failed", error = %e, "server returned error");
            }
            res
        });

        tokio::select! {
            res = server_task => match res {
                Ok(Ok(())) => {
                    info!(service, event = "stop", %service_id, pid, "server stopped normally");
                    ExitCode::SUCCESS
                }
                // 错误已在上面记录
                Ok(Err(_)) => ExitCode::FAILURE,
                Err(e) => {
                    error!(service, event = "task_join_error", error = %e, "server task join error");
                    ExitCode::FAILURE
                }
            },
            _ = tokio::signal::ctrl_c() => {
                // 进行中的请求不做取消传播，直接退出进程
                info!(service, event = "shutdown_signal", %service_id, pid, "received Ctrl+C, shutting down");
                ExitCode::SUCCESS
            }
        }
    })
}
