#![cfg_attr(not(test), no_std)]

pub mod util;

pub mod commutation;
pub mod config;
pub mod current_sensing;
pub mod encoder;
pub mod hysteresis;
pub mod reference;
pub mod spectral;
pub mod strain;
pub mod telemetry;
pub mod timer;

pub use config::{BUCKETS, SPECTRAL_POINTS};

static_assertions::const_assert!(BUCKETS % SPECTRAL_POINTS == 0);

// The drive as deployed: 1024 buckets, 32-point spectral pass, square-wave reference.
pub type SrmDrive = commutation::Drive<reference::SquareWave, BUCKETS, SPECTRAL_POINTS>;
