use crate::config::DriveConfig;

/// Periods of the two control interrupts, in the form the board layer programs its timers with.
/// Gate control runs at the sampling frequency; the strain read runs `strain_rate_multiplier` times
/// as often.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ControlSchedule {
    pub gate_control_period_us: f32,
    pub strain_read_period_us: f32,
    // Inverter dead time between complementary gate edges.
    pub dead_time_ns: u32,
}

impl ControlSchedule {
    pub fn from_config(config: &DriveConfig) -> ControlSchedule {
        ControlSchedule {
            gate_control_period_us: 1e6 / config.sampling_frequency,
            strain_read_period_us: 1e6 / config.strain_frequency(),
            dead_time_ns: config.dead_time_ns,
        }
    }
}
