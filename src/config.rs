//! Drive tunables.
//!
//! Everything here is plain data handed to the drive at construction. The defaults are the values
//! the drive was commissioned with on the bench; none of them are meant to be "improved" without
//! re-running the strain-gauge characterisation.

use core::fmt;

use log::warn;

use crate::current_sensing::Phase;

/// Number of rotor-angle buckets (encoder counts per electrical period).
pub const BUCKETS: usize = 1024;
/// Number of points in the spectral compensation pass.
pub const SPECTRAL_POINTS: usize = 32;

/// Compensation written to buckets whose reference profile is below the cutoff.
pub const DISABLED_COMPENSATION: f32 = -100.;

const DEG_TO_RAD: f32 = 0.017_453_292_519_94;

pub fn deg2rad(degrees: f32) -> f32 {
    degrees * DEG_TO_RAD
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ConfigError {
    NonPositive(&'static str),
    NotFinite(&'static str),
    Negative(&'static str),
    OffsetWindow { start: usize, end: usize, buckets: usize },
    WrapThreshold { threshold: usize, buckets: usize },
    DeadTime { dead_time_ns: u32, period_ns: f32 },
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::NonPositive(field) => write!(f, "{} must be greater than zero", field),
            ConfigError::NotFinite(field) => write!(f, "{} must be finite", field),
            ConfigError::Negative(field) => write!(f, "{} must not be negative", field),
            ConfigError::OffsetWindow {
                start,
                end,
                buckets,
            } => write!(
                f,
                "offset window {}..={} does not fit in {} buckets",
                start, end, buckets
            ),
            ConfigError::WrapThreshold { threshold, buckets } => write!(
                f,
                "wrap threshold {} must be between 1 and {}",
                threshold,
                buckets - 1
            ),
            ConfigError::DeadTime {
                dead_time_ns,
                period_ns,
            } => write!(
                f,
                "dead time {} ns does not fit in a {} ns gate-control period",
                dead_time_ns, period_ns
            ),
        }
    }
}

/// Which phases the reference generator is allowed to energise. Inactive phases are held at 0A.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ActivePhases {
    pub u: bool,
    pub v: bool,
    pub w: bool,
}

impl ActivePhases {
    pub const fn all() -> ActivePhases {
        ActivePhases {
            u: true,
            v: true,
            w: true,
        }
    }

    pub const fn only(phase: Phase) -> ActivePhases {
        ActivePhases {
            u: matches!(phase, Phase::U),
            v: matches!(phase, Phase::V),
            w: matches!(phase, Phase::W),
        }
    }

    pub fn contains(&self, phase: Phase) -> bool {
        match phase {
            Phase::U => self.u,
            Phase::V => self.v,
            Phase::W => self.w,
        }
    }
}

impl Default for ActivePhases {
    fn default() -> Self {
        Self::all()
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AveragingConfig {
    // A bucket's running average is published once its sample count exceeds this.
    pub cap: u32,
    // Inclusive bucket range assumed strain-free, used for the baseline offset.
    pub offset_window_start: usize,
    pub offset_window_end: usize,
}

impl Default for AveragingConfig {
    fn default() -> Self {
        AveragingConfig {
            cap: 200,
            offset_window_start: 801,
            offset_window_end: 1000,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CycleConfig {
    // Backwards jump in bucket index that counts as a completed period.
    pub wrap_threshold: usize,
    // Spectral pass runs after more than `cap * revolution_factor` periods.
    pub revolution_factor: u32,
}

impl Default for CycleConfig {
    fn default() -> Self {
        CycleConfig {
            wrap_threshold: 500,
            revolution_factor: 1,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CompensationConfig {
    // Scale applied to the reference strain profile before comparison.
    pub torque_scale: f32,
    // Half-width of the dead band around the scaled reference.
    pub band: f32,
    // Current added or removed per pass, in amps.
    pub step: f32,
    // Buckets whose unscaled reference is below this are disabled.
    pub cutoff: f32,
    // When false, any out-of-band bucket is reset to zero instead of stepped.
    pub enabled: bool,
}

impl Default for CompensationConfig {
    fn default() -> Self {
        CompensationConfig {
            torque_scale: 0.25,
            band: 0.1,
            step: 0.,
            cutoff: 0.,
            enabled: true,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum RpmSource {
    Fixed(f32),
    Measured,
}

/// Linear phase correction for the strain gauge's speed-dependent delay. Bin `k` is advanced by
/// `coefficient * k * rpm / divisor` radians (mirrored for bins above Nyquist).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PhaseCorrection {
    pub coefficient: f32,
    pub divisor: f32,
    pub rpm: RpmSource,
}

impl PhaseCorrection {
    pub const fn none() -> PhaseCorrection {
        PhaseCorrection {
            coefficient: 0.,
            divisor: 1.,
            rpm: RpmSource::Fixed(0.),
        }
    }

    // Radians of correction per bin at the given measured speed.
    pub fn per_bin(&self, measured_rpm: f32) -> f32 {
        let rpm = match self.rpm {
            RpmSource::Fixed(rpm) => rpm,
            RpmSource::Measured => measured_rpm,
        };
        self.coefficient * rpm / self.divisor
    }
}

impl Default for PhaseCorrection {
    fn default() -> Self {
        PhaseCorrection {
            coefficient: 0.001419,
            divisor: 5.,
            rpm: RpmSource::Fixed(300.),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SpeedConfig {
    // Period of one free-run timer tick.
    pub timer_tick_s: f32,
    // The free-run timer counts in `0..timer_wrap`.
    pub timer_wrap: u32,
    // Encoder counter wraps per mechanical revolution.
    pub wraps_per_revolution: u32,
}

impl Default for SpeedConfig {
    fn default() -> Self {
        SpeedConfig {
            timer_tick_s: 20e-9,
            timer_wrap: 1_000_000_000,
            wraps_per_revolution: 3,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DriveConfig {
    // Gate control rate.
    pub sampling_frequency: f32,
    // Strain reads run this many times faster than gate control.
    pub strain_rate_multiplier: u32,
    // Must be shorter than one gate-control period.
    pub dead_time_ns: u32,
    // Raw encoder count at which phase U is aligned.
    pub alignment_offset: u32,
    // Upper clamp for the square-wave reference.
    pub max_phase_current: f32,
    pub hysteresis_limit: f32,
    pub active_phases: ActivePhases,
    pub averaging: AveragingConfig,
    pub cycle: CycleConfig,
    pub compensation: CompensationConfig,
    pub phase_correction: PhaseCorrection,
    pub speed: SpeedConfig,
}

impl Default for DriveConfig {
    fn default() -> Self {
        DriveConfig {
            sampling_frequency: 20_000.,
            strain_rate_multiplier: 5,
            dead_time_ns: 3500,
            alignment_offset: 5,
            max_phase_current: 13.,
            hysteresis_limit: 1.,
            active_phases: ActivePhases::all(),
            averaging: AveragingConfig::default(),
            cycle: CycleConfig::default(),
            compensation: CompensationConfig::default(),
            phase_correction: PhaseCorrection::default(),
            speed: SpeedConfig::default(),
        }
    }
}

fn positive(field: &'static str, value: f32) -> Result<(), ConfigError> {
    if !value.is_finite() {
        return Err(ConfigError::NotFinite(field));
    }
    if value <= 0. {
        return Err(ConfigError::NonPositive(field));
    }
    Ok(())
}

fn non_negative(field: &'static str, value: f32) -> Result<(), ConfigError> {
    if !value.is_finite() {
        return Err(ConfigError::NotFinite(field));
    }
    if value < 0. {
        return Err(ConfigError::Negative(field));
    }
    Ok(())
}

fn non_zero(field: &'static str, value: u32) -> Result<(), ConfigError> {
    match value {
        0 => Err(ConfigError::NonPositive(field)),
        _ => Ok(()),
    }
}

impl DriveConfig {
    pub fn validate(&self, buckets: usize) -> Result<(), ConfigError> {
        let result = self.check(buckets);
        if let Err(ref e) = result {
            warn!("rejected drive config: {}", e);
        }
        result
    }

    fn check(&self, buckets: usize) -> Result<(), ConfigError> {
        positive("sampling_frequency", self.sampling_frequency)?;
        non_zero("strain_rate_multiplier", self.strain_rate_multiplier)?;
        let period_ns = 1e9 / self.sampling_frequency;
        if self.dead_time_ns as f32 >= period_ns {
            return Err(ConfigError::DeadTime {
                dead_time_ns: self.dead_time_ns,
                period_ns,
            });
        }
        positive("max_phase_current", self.max_phase_current)?;
        non_negative("hysteresis_limit", self.hysteresis_limit)?;

        let AveragingConfig {
            cap,
            offset_window_start: start,
            offset_window_end: end,
        } = self.averaging;
        non_zero("averaging.cap", cap)?;
        if start > end || end >= buckets {
            return Err(ConfigError::OffsetWindow {
                start,
                end,
                buckets,
            });
        }

        let threshold = self.cycle.wrap_threshold;
        if threshold == 0 || threshold >= buckets {
            return Err(ConfigError::WrapThreshold { threshold, buckets });
        }
        non_zero("cycle.revolution_factor", self.cycle.revolution_factor)?;

        let c = &self.compensation;
        non_negative("compensation.band", c.band)?;
        non_negative("compensation.step", c.step)?;
        if !c.torque_scale.is_finite() {
            return Err(ConfigError::NotFinite("compensation.torque_scale"));
        }
        if !c.cutoff.is_finite() {
            return Err(ConfigError::NotFinite("compensation.cutoff"));
        }

        let p = &self.phase_correction;
        if !p.coefficient.is_finite() {
            return Err(ConfigError::NotFinite("phase_correction.coefficient"));
        }
        positive("phase_correction.divisor", p.divisor)?;
        if let RpmSource::Fixed(rpm) = p.rpm {
            if !rpm.is_finite() {
                return Err(ConfigError::NotFinite("phase_correction.rpm"));
            }
        }

        positive("speed.timer_tick_s", self.speed.timer_tick_s)?;
        non_zero("speed.timer_wrap", self.speed.timer_wrap)?;
        non_zero("speed.wraps_per_revolution", self.speed.wraps_per_revolution)?;
        Ok(())
    }

    // Rate of the strain-read interrupt.
    pub fn strain_frequency(&self) -> f32 {
        self.sampling_frequency * self.strain_rate_multiplier as f32
    }

    // Number of wraps after which the spectral pass runs.
    pub fn revolutions_per_pass(&self) -> u32 {
        self.averaging
            .cap
            .saturating_mul(self.cycle.revolution_factor)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_is_valid() {
        assert_eq!(DriveConfig::default().validate(BUCKETS), Ok(()));
    }

    #[test]
    fn offset_window_must_fit() {
        let mut config = DriveConfig::default();
        assert!(config.validate(512).is_err());
        config.averaging.offset_window_start = 100;
        config.averaging.offset_window_end = 200;
        config.cycle.wrap_threshold = 250;
        assert_eq!(config.validate(512), Ok(()));
    }

    #[test]
    fn rejects_bad_values() {
        let mut config = DriveConfig::default();
        config.averaging.cap = 0;
        assert_eq!(
            config.validate(BUCKETS),
            Err(ConfigError::NonPositive("averaging.cap"))
        );

        let mut config = DriveConfig::default();
        config.compensation.band = -0.1;
        assert_eq!(
            config.validate(BUCKETS),
            Err(ConfigError::Negative("compensation.band"))
        );

        let mut config = DriveConfig::default();
        config.cycle.wrap_threshold = BUCKETS;
        assert!(matches!(
            config.validate(BUCKETS),
            Err(ConfigError::WrapThreshold { .. })
        ));

        let mut config = DriveConfig::default();
        config.dead_time_ns = 50_000;
        assert!(matches!(
            config.validate(BUCKETS),
            Err(ConfigError::DeadTime {
                dead_time_ns: 50_000,
                ..
            })
        ));

        let mut config = DriveConfig::default();
        config.sampling_frequency = f32::NAN;
        assert_eq!(
            config.validate(BUCKETS),
            Err(ConfigError::NotFinite("sampling_frequency"))
        );
    }

    #[test]
    fn phase_correction_speed_source() {
        let fixed = PhaseCorrection::default();
        approx::assert_relative_eq!(fixed.per_bin(1234.), 0.001419 * 300. / 5.);

        let measured = PhaseCorrection {
            rpm: RpmSource::Measured,
            ..PhaseCorrection::default()
        };
        approx::assert_relative_eq!(measured.per_bin(100.), 0.001419 * 100. / 5.);
        assert_eq!(PhaseCorrection::none().per_bin(500.), 0.);
    }

    #[test]
    fn degrees_to_radians() {
        approx::assert_relative_eq!(deg2rad(180.), core::f32::consts::PI, epsilon = 1e-6);
    }
}
