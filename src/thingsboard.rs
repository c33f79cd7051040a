// thingsboard.rs

use rumqttc::{AsyncClient, Event, EventLoop, MqttOptions, Packet, QoS};
use tokio::time::{timeout, Duration};
use tracing::*;

use crate::*;

const DEFAULT_PORT: u16 = 1883;
const TELEMETRY_TOPIC: &str = "v1/devices/me/telemetry";
const KEEPALIVE: Duration = Duration::from_secs(25);
const CONNECT_TIMEOUT: Duration = Duration::from_secs(10);

/// How long one pump call may wait for protocol traffic before yielding
/// the tick back to the supervisor.
const PUMP_BUDGET: Duration = Duration::from_millis(10);

/// ThingsBoard device session over MQTT. The device auth token is the MQTT
/// username; every metric goes to the fixed telemetry topic as a one-key
/// JSON object.
pub struct ThingsBoard {
    device_id: String,
    session: Option<Session>,
}

struct Session {
    client: AsyncClient,
    eventloop: EventLoop,
}

impl ThingsBoard {
    pub fn new(device_id: &str) -> Self {
        ThingsBoard {
            device_id: device_id.to_string(),
            session: None,
        }
    }
}

impl TelemetryLink for ThingsBoard {
    async fn connect(&mut self, server: &str, token: &str) -> anyhow::Result<()> {
        self.session = None;

        let (host, port) = match server.rsplit_once(':') {
            Some((h, p)) => (h.to_string(), p.parse::<u16>()?),
            None => (server.to_string(), DEFAULT_PORT),
        };

        let mut opts = MqttOptions::new(&self.device_id, host, port);
        opts.set_credentials(token, "");
        opts.set_keep_alive(KEEPALIVE);

        let (client, mut eventloop) = AsyncClient::new(opts, 10);

        // The eventloop sends CONNECT on its first poll; wait for the ack.
        let ack = timeout(CONNECT_TIMEOUT, async {
            loop {
                match eventloop.poll().await {
                    Ok(Event::Incoming(Packet::ConnAck(_))) => return Ok(()),
                    Ok(event) => trace!("telemetry event: {event:?}"),
                    Err(e) => return Err(anyhow::Error::new(e)),
                }
            }
        })
        .await;

        match ack {
            Ok(Ok(())) => {
                info!("Telemetry connected to {server}");
                self.session = Some(Session { client, eventloop });
                Ok(())
            }
            Ok(Err(e)) => bail!("Telemetry connect failed: {e}"),
            Err(_) => bail!("Telemetry connect timed out"),
        }
    }

    fn is_connected(&self) -> bool {
        self.session.is_some()
    }

    async fn publish(&mut self, name: &str, value: f32) -> anyhow::Result<()> {
        let Some(session) = self.session.as_mut() else {
            bail!("Telemetry not connected");
        };

        let mut body = serde_json::Map::new();
        body.insert(name.to_string(), serde_json::Value::from(value));
        let payload = serde_json::Value::Object(body).to_string();

        session
            .client
            .publish(TELEMETRY_TOPIC, QoS::AtLeastOnce, false, payload)
            .await?;
        Ok(())
    }

    async fn pump(&mut self) -> anyhow::Result<()> {
        let Some(session) = self.session.as_mut() else {
            return Ok(());
        };

        match timeout(PUMP_BUDGET, session.eventloop.poll()).await {
            // nothing pending within the budget
            Err(_) => Ok(()),
            Ok(Ok(event)) => {
                trace!("telemetry event: {event:?}");
                Ok(())
            }
            Ok(Err(e)) => {
                self.session = None;
                bail!("Telemetry connection lost: {e}");
            }
        }
    }
}

// EOF
