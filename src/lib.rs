// lib.rs
#![warn(clippy::large_futures)]

pub use std::sync::Arc;

pub use anyhow::bail;
pub use chrono::*;
pub use serde::{Deserialize, Serialize};
pub use tokio::{
    sync::{Mutex, RwLock},
    time::{sleep, Duration},
};
pub use tracing::*;

mod config;
pub use config::*;

mod state;
pub use state::*;

mod sensors;
pub use sensors::*;

mod net;
pub use net::*;

mod telemetry;
pub use telemetry::*;

mod thingsboard;
pub use thingsboard::*;

mod tasks;
pub use tasks::*;

mod sim;
pub use sim::*;

pub const FW_VERSION: &str = env!("CARGO_PKG_VERSION");

/// Sentinel carried in a sensor slot until the first successful poll.
pub const NO_READING: f32 = -1000.0;

// EOF
