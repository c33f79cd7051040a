// state.rs

use std::sync::Arc;

use serde::Serialize;
use tokio::sync::RwLock;

use crate::*;

/// Latest-known value of every sensor channel, plus the wall-clock time of
/// the last write. Slots hold [`NO_READING`] until the first successful poll.
#[derive(Clone, Debug, Serialize)]
pub struct Readings {
    pub ambient_temperature: f32,
    pub ambient_humidity: f32,
    pub vase_temp: [f32; PROBE_COUNT],
    pub vase_hum: [f32; MOISTURE_COUNT],
    pub last_update: i64,
}

impl Readings {
    pub fn new() -> Self {
        Readings {
            ambient_temperature: NO_READING,
            ambient_humidity: NO_READING,
            vase_temp: [NO_READING; PROBE_COUNT],
            vase_hum: [NO_READING; MOISTURE_COUNT],
            last_update: 0,
        }
    }

    /// The eight fixed metrics of the telemetry wire contract.
    pub fn metrics(&self) -> [(&'static str, f32); 8] {
        [
            ("ambientTemperature", self.ambient_temperature),
            ("ambientHumidity", self.ambient_humidity),
            ("vaseOneTemp", self.vase_temp[0]),
            ("vaseTwoTemp", self.vase_temp[1]),
            ("vaseOneHum", self.vase_hum[0]),
            ("vaseTwoHum", self.vase_hum[1]),
            ("vaseThreeHum", self.vase_hum[2]),
            ("vaseFourHum", self.vase_hum[3]),
        ]
    }
}

impl Default for Readings {
    fn default() -> Self {
        Self::new()
    }
}

/// Build the shared sensor state and split it into its two handles:
/// the polling task gets the writer, the upload task gets the reader.
pub fn sensor_state() -> (ReadingsWriter, ReadingsReader) {
    let shared = Arc::new(RwLock::new(Readings::new()));
    (ReadingsWriter(shared.clone()), ReadingsReader(shared))
}

/// Write half of the shared sensor state. Held only by the polling task.
pub struct ReadingsWriter(Arc<RwLock<Readings>>);

impl ReadingsWriter {
    pub async fn set_ambient(&self, temperature: f32, humidity: f32) {
        let mut r = self.0.write().await;
        r.ambient_temperature = temperature;
        r.ambient_humidity = humidity;
        r.last_update = Utc::now().timestamp();
    }

    pub async fn set_vase_temp(&self, slot: usize, value: f32) {
        let mut r = self.0.write().await;
        r.vase_temp[slot] = value;
        r.last_update = Utc::now().timestamp();
    }

    pub async fn set_vase_hum(&self, slot: usize, value: f32) {
        let mut r = self.0.write().await;
        r.vase_hum[slot] = value;
        r.last_update = Utc::now().timestamp();
    }
}

/// Read half of the shared sensor state.
#[derive(Clone)]
pub struct ReadingsReader(Arc<RwLock<Readings>>);

impl ReadingsReader {
    pub async fn snapshot(&self) -> Readings {
        self.0.read().await.clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn writer_updates_are_visible_to_reader() {
        let (writer, reader) = sensor_state();

        writer.set_ambient(21.5, 48.0).await;
        writer.set_vase_temp(1, 17.25).await;
        writer.set_vase_hum(3, 62.0).await;

        let snap = reader.snapshot().await;
        assert_eq!(snap.ambient_temperature, 21.5);
        assert_eq!(snap.ambient_humidity, 48.0);
        assert_eq!(snap.vase_temp[0], NO_READING);
        assert_eq!(snap.vase_temp[1], 17.25);
        assert_eq!(snap.vase_hum[3], 62.0);
        assert!(snap.last_update > 0);
    }

    #[tokio::test]
    async fn metrics_carry_the_fixed_names_in_order() {
        let (_, reader) = sensor_state();
        let names: Vec<&str> = reader
            .snapshot()
            .await
            .metrics()
            .iter()
            .map(|(n, _)| *n)
            .collect();
        assert_eq!(
            names,
            [
                "ambientTemperature",
                "ambientHumidity",
                "vaseOneTemp",
                "vaseTwoTemp",
                "vaseOneHum",
                "vaseTwoHum",
                "vaseThreeHum",
                "vaseFourHum",
            ]
        );
    }
}

// EOF
