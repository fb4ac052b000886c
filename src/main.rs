mod api;
mod cli;
mod collect;
mod config;
mod constants;
mod host;
mod init;

use anyhow::bail;
use clap::Parser;
use tokio::sync::watch;
use tokio::task::JoinSet;
use tracing::{error, info, info_span, warn, Instrument};

use crate::api::unifi::UnifiClient;
use crate::cli::CmdArgs;
use crate::collect::poller::StationSource;
use crate::config::controller_config::ControllerConfig;
use crate::config::MonitoringConfig;
use crate::host::entry::{setup_entry, unload_entry, EntryContext};
use crate::host::registry::LogRegistry;
use crate::init::init_tracing;

#[tokio::main(flavor = "current_thread")]
async fn main() -> anyhow::Result<()> {
    let args = CmdArgs::parse();
    init_tracing(&args)?;

    let config = MonitoringConfig::load(&args.config)?;
    info!(controllers = config.controllers.len(), config = ?args.config, "Configuration loaded");

    if args.once {
        return run_once(config.controllers, UnifiClient::new).await;
    }

    let (shutdown_tx, shutdown_rx) = watch::channel(false);
    let mut entries = JoinSet::new();
    for controller in config.controllers {
        let span = info_span!("controller", host = %controller.host);
        entries.spawn(run_entry(controller, shutdown_rx.clone()).instrument(span));
    }

    tokio::signal::ctrl_c().await?;
    info!("Shutting down");
    shutdown_tx.send_replace(true);

    while let Some(result) = entries.join_next().await {
        if let Err(err) = result {
            error!(?err, "Controller task failed");
        }
    }

    Ok(())
}

/// Keeps retrying setup at the update interval until the controller answers,
/// then polls until shutdown and unloads the entry.
async fn run_entry(config: ControllerConfig, mut shutdown: watch::Receiver<bool>) {
    let mut registry = LogRegistry::default();

    let mut entry = loop {
        match setup_entry(&config, &mut registry).await {
            Ok(entry) => break entry,
            Err(err) => {
                warn!(
                    ?err,
                    retry_in = %humantime::format_duration(config.update_interval),
                    "Setup failed"
                );
                tokio::select! {
                    _ = tokio::time::sleep(config.update_interval) => {}
                    _ = shutdown.changed() => return,
                }
            }
        }
    };

    entry.run(&mut registry, shutdown).await;

    if !unload_entry(entry, &mut registry) {
        warn!("Some entities were already gone at unload");
    }
}

/// Polls every controller once. A controller that fails setup is logged and
/// skipped; the call fails afterwards if any did.
async fn run_once<S, F>(controllers: Vec<ControllerConfig>, connect: F) -> anyhow::Result<()>
where
    S: StationSource,
    F: Fn(&ControllerConfig) -> anyhow::Result<S>,
{
    let mut failed = 0;
    for controller in &controllers {
        let span = info_span!("controller", host = %controller.host);
        let result = async {
            let mut registry = LogRegistry::default();
            let source = connect(controller)?;
            let entry = EntryContext::setup(source, controller.update_interval, &mut registry).await?;
            info!(
                clients = entry.poller().snapshot().len(),
                sensors = entry.sensors().len(),
                "Controller polled"
            );
            unload_entry(entry, &mut registry);
            anyhow::Ok(())
        }
        .instrument(span.clone())
        .await;

        if let Err(err) = result {
            span.in_scope(|| error!(?err, "Setup failed"));
            failed += 1;
        }
    }

    if failed > 0 {
        bail!("{failed} of {} controllers could not be polled", controllers.len());
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use std::cell::RefCell;
    use std::time::Duration;

    use super::*;
    use crate::collect::fake_source::FakeSource;
    use crate::config::controller_config::ApiKey;

    fn controller(host: &str) -> ControllerConfig {
        ControllerConfig {
            host: host.to_string(),
            api_key: ApiKey::new("secret"),
            verify_ssl: true,
            update_interval: Duration::from_secs(30),
        }
    }

    #[tokio::test]
    async fn test_run_once_continues_after_failed_controller() {
        let polled = RefCell::new(Vec::new());
        let connect = |config: &ControllerConfig| {
            polled.borrow_mut().push(config.host.clone());
            let source = match config.host.as_str() {
                "gw-down" => FakeSource::default().with_body("502 bad gateway"),
                _ => FakeSource::default().with_body(r#"{"data":[{"mac":"aa:bb"}]}"#),
            };
            anyhow::Ok(source)
        };

        let result = run_once(
            vec![controller("gw-down"), controller("gw-up"), controller("gw-office")],
            connect,
        )
        .await;

        assert_eq!(*polled.borrow(), vec!["gw-down", "gw-up", "gw-office"]);
        let err = result.unwrap_err();
        assert_eq!(err.to_string(), "1 of 3 controllers could not be polled");
    }

    #[tokio::test]
    async fn test_run_once_all_controllers_up() {
        let result = run_once(vec![controller("gw-a"), controller("gw-b")], |_| {
            anyhow::Ok(FakeSource::default().with_body(r#"{"data":[]}"#))
        })
        .await;
        assert!(result.is_ok());
    }
}
