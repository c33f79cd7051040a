// sim.rs
//
// Host-side stand-ins for the hardware collaborators, so the monitor can
// run against a real telemetry server without a greenhouse attached.

use tracing::*;

use crate::*;

struct Lcg(u64);

impl Lcg {
    fn new(seed: u64) -> Self {
        Lcg(seed | 1)
    }

    fn next(&mut self) -> u64 {
        self.0 = self
            .0
            .wrapping_mul(6364136223846793005)
            .wrapping_add(1442695040888963407);
        self.0
    }

    /// Uniform-ish jitter in -1.0..=1.0.
    fn jitter(&mut self) -> f32 {
        ((self.next() >> 40) as f32 / 8_388_608.0) - 1.0
    }
}

/// Drifting fake DHT22. `nan_every` > 0 makes every Nth sample invalid,
/// the way a flaky sensor on a long cable behaves.
pub struct SimAmbient {
    temperature: f32,
    humidity: f32,
    nan_every: u32,
    count: u32,
    rng: Lcg,
}

impl SimAmbient {
    pub fn new(temperature: f32, humidity: f32) -> Self {
        SimAmbient {
            temperature,
            humidity,
            nan_every: 0,
            count: 0,
            rng: Lcg::new(0xd1e7),
        }
    }

    pub fn with_nan_every(mut self, n: u32) -> Self {
        self.nan_every = n;
        self
    }
}

impl AmbientSensor for SimAmbient {
    fn sample(&mut self) -> AmbientSample {
        self.count += 1;
        if self.nan_every > 0 && self.count % self.nan_every == 0 {
            return AmbientSample {
                temperature: f32::NAN,
                humidity: f32::NAN,
            };
        }

        self.temperature += 0.05 * self.rng.jitter();
        self.humidity = (self.humidity + 0.2 * self.rng.jitter()).clamp(0.0, 100.0);
        AmbientSample {
            temperature: self.temperature,
            humidity: self.humidity,
        }
    }
}

/// Fake one-wire bus: each probe address hashes to its own stable offset
/// around a base temperature.
pub struct SimProbeBus {
    base: f32,
    rng: Lcg,
}

impl SimProbeBus {
    pub fn new(base: f32) -> Self {
        SimProbeBus {
            base,
            rng: Lcg::new(0x1b05),
        }
    }
}

impl TempProbeBus for SimProbeBus {
    fn read_temperature(&mut self, addr: ProbeAddress) -> f32 {
        let spread = addr.0.iter().fold(0u32, |a, b| a.wrapping_add(*b as u32));
        self.base + (spread % 5) as f32 * 0.5 + 0.1 * self.rng.jitter()
    }
}

/// Fake moisture ADC: each pin sits at its own raw level with some noise.
pub struct SimMoisture {
    full_scale: u16,
    rng: Lcg,
}

impl SimMoisture {
    pub fn new(full_scale: u16) -> Self {
        SimMoisture {
            full_scale,
            rng: Lcg::new(0xada0),
        }
    }
}

impl MoistureAdc for SimMoisture {
    fn read_raw(&mut self, pin: u8) -> u16 {
        let level = (pin as u32 * 97) % (self.full_scale as u32 + 1);
        let noise = (8.0 * self.rng.jitter()) as i32;
        (level as i32 + noise).clamp(0, self.full_scale as i32) as u16
    }
}

/// Network link on a dev host: the OS already owns the association, the
/// "connect" is only a state flip.
pub struct HostLink {
    up: bool,
}

impl HostLink {
    pub fn new() -> Self {
        HostLink { up: false }
    }
}

impl Default for HostLink {
    fn default() -> Self {
        Self::new()
    }
}

impl NetworkLink for HostLink {
    fn connect(&mut self, ssid: &str, _pass: &str) -> anyhow::Result<()> {
        debug!("Host link: pretending to associate with {ssid}");
        self.up = true;
        Ok(())
    }

    fn is_connected(&self) -> bool {
        self.up
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sim_ambient_injects_nan_on_schedule() {
        let mut s = SimAmbient::new(21.0, 50.0).with_nan_every(3);
        assert!(s.sample().is_valid());
        assert!(s.sample().is_valid());
        assert!(!s.sample().is_valid());
        assert!(s.sample().is_valid());
    }

    #[test]
    fn sim_moisture_stays_in_range() {
        let mut adc = SimMoisture::new(1023);
        for pin in [36u8, 39, 34, 35] {
            for _ in 0..100 {
                assert!(adc.read_raw(pin) <= 1023);
            }
        }
    }
}

// EOF
