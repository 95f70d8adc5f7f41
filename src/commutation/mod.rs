use core::sync::atomic::{AtomicBool, Ordering};

use log::info;

use crate::{
    config::{ConfigError, DriveConfig},
    current_sensing::{CurrentMeasurement, CurrentSensor},
    encoder::{AngleTracker, SpeedTracker},
    hysteresis::GateCode,
    reference::{ReferenceGenerator, ReferenceShape},
    spectral::{compensation::CompensationRule, SpectralEngine, SpectralFrame},
    strain::{cycle::CycleDetector, StrainAverager},
    telemetry::{GateTelemetry, StrainTelemetry, TelemetryReader},
    timer::ControlSchedule,
    util::{buffered_state::BufferedState, seq_lock::SeqLock},
};

pub mod gate_control;
pub mod strain_read;

pub use gate_control::{GateControl, GateHardware};
pub use strain_read::{StrainHardware, StrainRead, StrainStep};

// Raw position counter, wrapping once per electrical period.
pub trait QuadratureCounter {
    fn count(&mut self) -> u32;
}

// Returns `None` when no new conversion is ready.
pub trait PhaseCurrentAdc {
    fn sample(&mut self) -> Option<CurrentMeasurement>;
}

// Returns `None` when no new conversion is ready.
pub trait StrainGauge {
    fn sample(&mut self) -> Option<f32>;
}

pub trait GateDriver {
    fn write(&mut self, code: GateCode);
}

// Free-running counter used to time encoder wraps.
pub trait FreeRunTimer {
    fn count(&mut self) -> u32;
}

/// State only the strain read touches.
pub(crate) struct StrainState<const B: usize, const N: usize> {
    pub averager: StrainAverager<B>,
    pub cycle: CycleDetector,
    pub speed: SpeedTracker,
    pub engine: SpectralEngine<N>,
    pub frame: SpectralFrame<N>,
    pub filtered: [f32; B],
    pub passes: u32,
}

/// Everything the drive owns. Nothing runs until it is [`split`](Drive::split) into the pieces each
/// execution context is allowed to hold.
///
/// Ownership after the split:
///   * gate control owns the current sensor and writes gate telemetry. It reads the compensation
///     table and the inverter enable.
///   * the strain read owns the averager, the spectral engine and the compensation table writer,
///     and writes strain telemetry.
///   * the idle loop can read telemetry and flip the inverter enable.
///
/// The compensation table is double-buffered, so gate control must run at a higher priority than
/// the strain read (or in the same context). Telemetry readers must run at a lower priority than
/// both handlers.
pub struct Drive<S: ReferenceShape, const B: usize, const N: usize> {
    config: DriveConfig,
    generator: ReferenceGenerator<S>,
    reference_profile: &'static [f32; B],
    sensor: CurrentSensor,
    strain: StrainState<B, N>,
    compensation: BufferedState<[f32; B]>,
    inverter_on: AtomicBool,
    gate_telemetry: SeqLock<GateTelemetry>,
    strain_telemetry: SeqLock<StrainTelemetry<N>>,
}

pub struct DriveParts<'a, S: ReferenceShape, const B: usize, const N: usize> {
    pub gate_control: GateControl<'a, S, B>,
    pub strain_read: StrainRead<'a, B, N>,
    pub telemetry: TelemetryReader<'a, N>,
    pub inverter: InverterSwitch<'a>,
}

impl<S: ReferenceShape, const B: usize, const N: usize> Drive<S, B, N> {
    pub fn new(
        config: DriveConfig,
        shape: S,
        reference_profile: &'static [f32; B],
    ) -> Result<Drive<S, B, N>, ConfigError> {
        config.validate(B)?;
        let schedule = ControlSchedule::from_config(&config);
        info!(
            "drive configured: gate control every {} us, strain read every {} us, {} buckets, {} spectral points",
            schedule.gate_control_period_us, schedule.strain_read_period_us, B, N
        );
        Ok(Drive {
            config,
            generator: ReferenceGenerator::new(shape, config.active_phases),
            reference_profile,
            sensor: CurrentSensor::new(),
            strain: StrainState {
                averager: StrainAverager::new(config.averaging),
                cycle: CycleDetector::from_config(&config),
                speed: SpeedTracker::new(config.speed),
                engine: SpectralEngine::new(),
                frame: SpectralFrame::new(),
                filtered: [0.; B],
                passes: 0,
            },
            compensation: BufferedState::new([0.; B]),
            inverter_on: AtomicBool::new(false),
            gate_telemetry: SeqLock::new(GateTelemetry::new()),
            strain_telemetry: SeqLock::new(StrainTelemetry::new()),
        })
    }

    pub fn config(&self) -> &DriveConfig {
        &self.config
    }

    // Interrupt periods and dead time for the board layer to program.
    pub fn schedule(&self) -> ControlSchedule {
        ControlSchedule::from_config(&self.config)
    }

    // Seed the compensation table, e.g. from a previous run. Only possible before splitting.
    pub fn compensation_mut(&mut self) -> &mut [f32; B] {
        self.compensation.get_mut()
    }

    pub fn split(&mut self) -> DriveParts<'_, S, B, N> {
        let config = self.config;
        let (reader, writer) = self.compensation.split();
        DriveParts {
            gate_control: GateControl::new(
                &self.generator,
                AngleTracker::new(config.alignment_offset),
                config.hysteresis_limit,
                &mut self.sensor,
                reader,
                &self.inverter_on,
                &self.gate_telemetry,
            ),
            strain_read: StrainRead::new(
                AngleTracker::new(config.alignment_offset),
                CompensationRule::new(config.compensation),
                config.phase_correction,
                self.reference_profile,
                &mut self.strain,
                writer,
                &self.strain_telemetry,
            ),
            telemetry: TelemetryReader::new(&self.gate_telemetry, &self.strain_telemetry),
            inverter: InverterSwitch {
                on: &self.inverter_on,
            },
        }
    }
}

/// Administrative inverter enable. While off, gate control writes [`GateCode::ALL_OFF`] regardless
/// of the computed code.
pub struct InverterSwitch<'a> {
    on: &'a AtomicBool,
}

impl<'a> InverterSwitch<'a> {
    pub fn enable(&self) {
        info!("inverter enabled");
        self.on.store(true, Ordering::Release);
    }

    pub fn disable(&self) {
        info!("inverter disabled");
        self.on.store(false, Ordering::Release);
    }

    pub fn is_on(&self) -> bool {
        self.on.load(Ordering::Acquire)
    }
}
