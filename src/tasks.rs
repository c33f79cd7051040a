// tasks.rs

use std::sync::Arc;

use tokio::sync::Mutex;
use tokio::time::{sleep, Duration};
use tracing::*;

use crate::*;

/// Connection supervisor: keeps the WiFi link and the telemetry session up
/// and pumps the telemetry event loop. Never returns.
pub async fn run_supervisor<N, T>(
    cfg: Arc<MonitorConfig>,
    net: Arc<Mutex<N>>,
    tele: Arc<Mutex<T>>,
) -> anyhow::Result<()>
where
    N: NetworkLink,
    T: TelemetryLink,
{
    loop {
        supervisor_tick(&cfg, &net, &tele).await;
        sleep(Duration::from_millis(cfg.supervisor_delay)).await;
    }
}

pub async fn supervisor_tick<N, T>(cfg: &MonitorConfig, net: &Mutex<N>, tele: &Mutex<T>)
where
    N: NetworkLink,
    T: TelemetryLink,
{
    {
        let mut net = net.lock().await;
        if !net.is_connected() {
            warn!("WiFi down, reconnecting to {}", cfg.wifi_ssid);
            // unbounded retry with a fixed backoff, the link always comes back
            loop {
                if let Err(e) = net.connect(&cfg.wifi_ssid, &cfg.wifi_pass) {
                    debug!("WiFi connect attempt failed: {e}");
                }
                if net.is_connected() {
                    break;
                }
                sleep(Duration::from_millis(cfg.wifi_retry_delay)).await;
            }
            info!("WiFi connected.");
        }
    }

    let mut tele = tele.lock().await;
    if !tele.is_connected() {
        info!("Telemetry connecting to {}...", cfg.server);
        // single attempt, failure is left to the next tick
        if let Err(e) = tele.connect(&cfg.server, &cfg.token).await {
            error!("Telemetry connect failed: {e}");
        }
    }

    if let Err(e) = tele.pump().await {
        error!("Telemetry pump failed: {e}");
    }
}

/// Sensor polling: refreshes the shared sensor state on a fixed period.
/// Never returns.
pub async fn run_poller<A, B, M>(
    cfg: Arc<MonitorConfig>,
    writer: ReadingsWriter,
    mut ambient: A,
    mut probes: B,
    mut adc: M,
) -> anyhow::Result<()>
where
    A: AmbientSensor,
    B: TempProbeBus,
    M: MoistureAdc,
{
    loop {
        poll_tick(&cfg, &writer, &mut ambient, &mut probes, &mut adc).await;
        sleep(Duration::from_millis(cfg.poll_delay)).await;
    }
}

pub async fn poll_tick<A, B, M>(
    cfg: &MonitorConfig,
    writer: &ReadingsWriter,
    ambient: &mut A,
    probes: &mut B,
    adc: &mut M,
) where
    A: AmbientSensor,
    B: TempProbeBus,
    M: MoistureAdc,
{
    debug!("Updating sensors...");

    let sample = ambient.sample();
    if sample.is_valid() {
        writer.set_ambient(sample.temperature, sample.humidity).await;
    } else {
        // hold the last good pair until the next successful poll
        warn!("Invalid ambient reading, keeping previous values");
    }

    // The probe bus and the ADC carry no validity signal, slots are
    // overwritten with whatever came back.
    for (slot, addr) in cfg.probe_addrs.iter().enumerate() {
        writer.set_vase_temp(slot, probes.read_temperature(*addr)).await;
    }

    for (slot, pin) in cfg.moisture_pins.iter().enumerate() {
        let raw = adc.read_raw(*pin);
        writer
            .set_vase_hum(slot, moisture_percent(raw, cfg.adc_full_scale))
            .await;
    }
}

/// Telemetry upload: publishes the current sensor state on a fixed period,
/// gated on connectivity. Never returns.
pub async fn run_sender<N, T>(
    cfg: Arc<MonitorConfig>,
    reader: ReadingsReader,
    net: Arc<Mutex<N>>,
    tele: Arc<Mutex<T>>,
) -> anyhow::Result<()>
where
    N: NetworkLink,
    T: TelemetryLink,
{
    loop {
        send_tick(&reader, &net, &tele).await;
        sleep(Duration::from_millis(cfg.send_delay)).await;
    }
}

pub async fn send_tick<N, T>(reader: &ReadingsReader, net: &Mutex<N>, tele: &Mutex<T>)
where
    N: NetworkLink,
    T: TelemetryLink,
{
    if !net.lock().await.is_connected() {
        info!("No WiFi, nothing sent.");
        return;
    }

    let mut tele = tele.lock().await;
    if !tele.is_connected() {
        info!("Telemetry down, nothing sent.");
        return;
    }

    debug!("Sending data...");
    let snap = reader.snapshot().await;
    for (name, value) in snap.metrics() {
        if let Err(e) = tele.publish(name, value).await {
            error!("Publish {name} failed: {e}");
        }
    }
}

// EOF
