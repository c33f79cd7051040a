// bin/vasemon.rs

#![warn(clippy::large_futures)]

use std::sync::Arc;

use tokio::sync::Mutex;
use tokio::time::{sleep, Duration};
use tracing::*;
use tracing_subscriber::EnvFilter;
use vasemon::*;

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()))
        .init();

    info!("Hello.");
    info!("vasemon {FW_VERSION} starting up.");

    let config = Arc::new(MonitorConfig::default());
    config.validate()?;
    info!("My config:\n{config:#?}");

    let (writer, reader) = sensor_state();

    // hardware stand-ins; on a device these come from the board support crate
    let ambient = SimAmbient::new(22.0, 55.0);
    let probes = SimProbeBus::new(18.0);
    let adc = SimMoisture::new(config.adc_full_scale);

    let net = Arc::new(Mutex::new(HostLink::new()));
    let tele = Arc::new(Mutex::new(ThingsBoard::new(&config.device_id)));

    let stagger = Duration::from_millis(config.start_stagger);
    let (cfg_sup, cfg_poll, cfg_send) = (config.clone(), config.clone(), config.clone());
    let (net_send, tele_send) = (net.clone(), tele.clone());

    tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()?
        .block_on(Box::pin(async move {
            info!("Entering main loop...");
            tokio::select! {
                _ = Box::pin(run_supervisor(cfg_sup, net, tele)) => {
                    error!("run_supervisor() ended.");
                }
                _ = Box::pin(async move {
                    sleep(stagger).await;
                    run_poller(cfg_poll, writer, ambient, probes, adc).await
                }) => {
                    error!("run_poller() ended.");
                }
                _ = Box::pin(async move {
                    sleep(stagger * 2).await;
                    run_sender(cfg_send, reader, net_send, tele_send).await
                }) => {
                    error!("run_sender() ended.");
                }
            };
        }));

    info!("main() finished.");
    Ok(())
}

// EOF
