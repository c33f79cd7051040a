// config.rs

use serde::{Deserialize, Serialize};

use crate::*;

const DEFAULT_SUPERVISOR_DELAY_MS: u64 = 20;
const DEFAULT_POLL_DELAY_MS: u64 = 500;
const DEFAULT_SEND_DELAY_MS: u64 = 1000;
const DEFAULT_START_STAGGER_MS: u64 = 500;
const DEFAULT_WIFI_RETRY_MS: u64 = 500;

const DEFAULT_ADC_FULL_SCALE: u16 = 1023;
const DEFAULT_DHT_PIN: u8 = 33;
const DEFAULT_ONEWIRE_PIN: u8 = 15;
const DEFAULT_MOISTURE_PINS: [u8; MOISTURE_COUNT] = [36, 39, 34, 35];

const DEFAULT_PROBE_ADDRS: [ProbeAddress; PROBE_COUNT] = [
    ProbeAddress([0x28, 0xFF, 0x77, 0x62, 0x40, 0x17, 0x04, 0x31]),
    ProbeAddress([0x28, 0xFF, 0xB4, 0x06, 0x33, 0x17, 0x03, 0x4B]),
];

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct MonitorConfig {
    pub wifi_ssid: String,
    pub wifi_pass: String,

    pub server: String,
    pub token: String,
    pub device_id: String,

    /// Tick intervals, milliseconds.
    pub supervisor_delay: u64,
    pub poll_delay: u64,
    pub send_delay: u64,
    pub start_stagger: u64,
    pub wifi_retry_delay: u64,

    pub dht_pin: u8,
    pub onewire_pin: u8,
    pub probe_addrs: [ProbeAddress; PROBE_COUNT],
    pub moisture_pins: [u8; MOISTURE_COUNT],
    pub adc_full_scale: u16,
}

impl Default for MonitorConfig {
    fn default() -> Self {
        Self {
            wifi_ssid: option_env!("WIFI_SSID").unwrap_or("internet").into(),
            wifi_pass: option_env!("WIFI_PASS").unwrap_or("password").into(),

            server: option_env!("TB_SERVER").unwrap_or("thingsboard.local").into(),
            token: option_env!("TB_TOKEN").unwrap_or("token").into(),
            device_id: "vasemon".into(),

            supervisor_delay: DEFAULT_SUPERVISOR_DELAY_MS,
            poll_delay: DEFAULT_POLL_DELAY_MS,
            send_delay: DEFAULT_SEND_DELAY_MS,
            start_stagger: DEFAULT_START_STAGGER_MS,
            wifi_retry_delay: DEFAULT_WIFI_RETRY_MS,

            dht_pin: DEFAULT_DHT_PIN,
            onewire_pin: DEFAULT_ONEWIRE_PIN,
            probe_addrs: DEFAULT_PROBE_ADDRS,
            moisture_pins: DEFAULT_MOISTURE_PINS,
            adc_full_scale: DEFAULT_ADC_FULL_SCALE,
        }
    }
}

impl MonitorConfig {
    /// Startup sanity check. A config that fails here never reaches the tasks.
    pub fn validate(&self) -> anyhow::Result<()> {
        if self.wifi_ssid.is_empty() {
            bail!("wifi_ssid is empty");
        }
        if self.server.is_empty() {
            bail!("server is empty");
        }
        if self.token.is_empty() {
            bail!("token is empty");
        }
        if self.device_id.is_empty() {
            bail!("device_id is empty");
        }

        for (name, ms) in [
            ("supervisor_delay", self.supervisor_delay),
            ("poll_delay", self.poll_delay),
            ("send_delay", self.send_delay),
            ("wifi_retry_delay", self.wifi_retry_delay),
        ] {
            if ms == 0 {
                bail!("{name} must be nonzero");
            }
        }

        if self.adc_full_scale == 0 {
            bail!("adc_full_scale must be nonzero");
        }

        for (i, pin) in self.moisture_pins.iter().enumerate() {
            if self.moisture_pins[..i].contains(pin) {
                bail!("moisture pin {pin} assigned twice");
            }
            if *pin == self.dht_pin || *pin == self.onewire_pin {
                bail!("moisture pin {pin} collides with a sensor pin");
            }
        }
        if self.dht_pin == self.onewire_pin {
            bail!("dht_pin and onewire_pin collide");
        }

        for (i, addr) in self.probe_addrs.iter().enumerate() {
            if addr.0 == [0u8; 8] {
                bail!("probe address {i} is all zeroes");
            }
            if self.probe_addrs[..i].contains(addr) {
                bail!("probe address {addr} assigned twice");
            }
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_is_valid() {
        MonitorConfig::default().validate().unwrap();
    }

    #[test]
    fn rejects_zero_tick() {
        let mut c = MonitorConfig::default();
        c.poll_delay = 0;
        assert!(c.validate().is_err());
    }

    #[test]
    fn rejects_duplicate_moisture_pin() {
        let mut c = MonitorConfig::default();
        c.moisture_pins = [36, 39, 36, 35];
        assert!(c.validate().is_err());
    }

    #[test]
    fn rejects_duplicate_probe_address() {
        let mut c = MonitorConfig::default();
        c.probe_addrs[1] = c.probe_addrs[0];
        assert!(c.validate().is_err());
    }

    #[test]
    fn rejects_pin_collision() {
        let mut c = MonitorConfig::default();
        c.moisture_pins[0] = c.dht_pin;
        assert!(c.validate().is_err());
    }
}

// EOF
