// sensors.rs

use std::fmt;

use serde::{Deserialize, Serialize};

pub const PROBE_COUNT: usize = 2;
pub const MOISTURE_COUNT: usize = 4;

/// 64-bit ROM address of a one-wire temperature probe.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProbeAddress(pub [u8; 8]);

impl fmt::Display for ProbeAddress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut sep = "";
        for b in self.0 {
            write!(f, "{sep}{b:02x}")?;
            sep = ":";
        }
        Ok(())
    }
}

#[derive(Clone, Copy, Debug)]
pub struct AmbientSample {
    pub temperature: f32,
    pub humidity: f32,
}

impl AmbientSample {
    pub fn is_valid(&self) -> bool {
        !self.temperature.is_nan() && !self.humidity.is_nan()
    }
}

/// Combined temperature/humidity sensor (DHT22 class).
pub trait AmbientSensor {
    fn sample(&mut self) -> AmbientSample;
}

/// One-wire temperature probe bus (DS18B20 class). Readings are taken
/// at face value, there is no validity signal on this bus.
pub trait TempProbeBus {
    fn read_temperature(&mut self, addr: ProbeAddress) -> f32;
}

/// Analog input for the resistive moisture probes (HL-69 class).
pub trait MoistureAdc {
    fn read_raw(&mut self, pin: u8) -> u16;
}

/// Rescale a raw ADC value onto an inverted 0..=100 percentage:
/// a dry probe conducts poorly and reads high, so full scale maps to 0 %.
pub fn moisture_percent(raw: u16, full_scale: u16) -> f32 {
    let pct = 100.0 - (raw as f32) * 100.0 / (full_scale as f32);
    pct.clamp(0.0, 100.0)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn moisture_extremes() {
        assert_eq!(moisture_percent(0, 1023), 100.0);
        assert_eq!(moisture_percent(1023, 1023), 0.0);
    }

    #[test]
    fn moisture_monotone_and_bounded() {
        let mut prev = f32::INFINITY;
        for raw in 0..=1023u16 {
            let pct = moisture_percent(raw, 1023);
            assert!((0.0..=100.0).contains(&pct), "raw {raw} gave {pct}");
            assert!(pct <= prev, "not decreasing at raw {raw}");
            prev = pct;
        }
    }

    #[test]
    fn moisture_clamps_out_of_range_raw() {
        assert_eq!(moisture_percent(4095, 1023), 0.0);
    }

    #[test]
    fn nan_sample_is_invalid() {
        let s = AmbientSample {
            temperature: f32::NAN,
            humidity: 40.0,
        };
        assert!(!s.is_valid());
        let s = AmbientSample {
            temperature: 21.0,
            humidity: f32::NAN,
        };
        assert!(!s.is_valid());
        let s = AmbientSample {
            temperature: 21.0,
            humidity: 40.0,
        };
        assert!(s.is_valid());
    }

    #[test]
    fn probe_address_display() {
        let a = ProbeAddress([0x28, 0xFF, 0x77, 0x62, 0x40, 0x17, 0x04, 0x31]);
        assert_eq!(a.to_string(), "28:ff:77:62:40:17:04:31");
    }
}

// EOF
