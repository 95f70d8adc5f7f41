//! Read-only mirror of the control state for the idle loop.
//!
//! Each handler publishes its own half through a [`SeqLock`] at the end of every cycle it does
//! work in. Readers copy; nothing here feeds back into control.

use crate::current_sensing::PhaseCurrents;
use crate::encoder::{AngleSample, Speed};
use crate::hysteresis::GateCode;
use crate::util::seq_lock::SeqLock;

/// Published by gate control every fast cycle.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GateTelemetry {
    pub angle: AngleSample,
    pub measured: PhaseCurrents,
    pub dc_bus: f32,
    pub reference: PhaseCurrents,
    pub compensation: f32,
    pub gate: GateCode,
    pub inverter_on: bool,
}

impl GateTelemetry {
    pub const fn new() -> GateTelemetry {
        GateTelemetry {
            angle: AngleSample {
                bucket: 0,
                theta: 0.,
            },
            measured: PhaseCurrents::zero(),
            dc_bus: 0.,
            reference: PhaseCurrents::zero(),
            compensation: 0.,
            gate: GateCode::ALL_OFF,
            inverter_on: false,
        }
    }
}

impl Default for GateTelemetry {
    fn default() -> Self {
        Self::new()
    }
}

/// Published by the strain read whenever it records a sample. Per-bucket values are taken at
/// `angle.bucket`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct StrainTelemetry<const N: usize> {
    pub angle: AngleSample,
    pub speed: Speed,
    pub last_sample: f32,
    // Finalized average minus the baseline offset.
    pub strain_average: f32,
    pub offset: f32,
    // Target profile after torque scaling.
    pub strain_reference: f32,
    pub filtered_strain: f32,
    pub compensation: f32,
    pub magnitude: [f32; N],
    pub phase: [f32; N],
    pub passes: u32,
}

impl<const N: usize> StrainTelemetry<N> {
    pub const fn new() -> StrainTelemetry<N> {
        StrainTelemetry {
            angle: AngleSample {
                bucket: 0,
                theta: 0.,
            },
            speed: Speed { rpm: 0., omega: 0. },
            last_sample: 0.,
            strain_average: 0.,
            offset: 0.,
            strain_reference: 0.,
            filtered_strain: 0.,
            compensation: 0.,
            magnitude: [0.; N],
            phase: [0.; N],
            passes: 0,
        }
    }
}

impl<const N: usize> Default for StrainTelemetry<N> {
    fn default() -> Self {
        Self::new()
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Telemetry<const N: usize> {
    pub gate: GateTelemetry,
    pub strain: StrainTelemetry<N>,
    // Number of fast cycles published so far.
    pub gate_cycles: usize,
}

pub struct TelemetryReader<'a, const N: usize> {
    gate: &'a SeqLock<GateTelemetry>,
    strain: &'a SeqLock<StrainTelemetry<N>>,
}

impl<'a, const N: usize> TelemetryReader<'a, N> {
    pub(crate) fn new(
        gate: &'a SeqLock<GateTelemetry>,
        strain: &'a SeqLock<StrainTelemetry<N>>,
    ) -> TelemetryReader<'a, N> {
        TelemetryReader { gate, strain }
    }

    pub fn gate(&self) -> GateTelemetry {
        self.gate.read()
    }

    pub fn strain(&self) -> StrainTelemetry<N> {
        self.strain.read()
    }

    // The two halves are copied independently and may come from different cycles.
    pub fn snapshot(&self) -> Telemetry<N> {
        Telemetry {
            gate: self.gate.read(),
            strain: self.strain.read(),
            gate_cycles: self.gate.version(),
        }
    }
}
