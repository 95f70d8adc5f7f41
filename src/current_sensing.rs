use crate::commutation::PhaseCurrentAdc;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    U,
    V,
    W,
}

impl Phase {
    // Electrical lag of this phase behind phase U, in radians.
    pub fn offset(&self) -> f32 {
        use core::f32::consts::PI;
        match self {
            Phase::U => 0.,
            Phase::V => 2. * PI / 3.,
            Phase::W => 4. * PI / 3.,
        }
    }
}

/// One value per motor phase, in amps. Used for both measured and reference currents.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct PhaseCurrents {
    pub u: f32,
    pub v: f32,
    pub w: f32,
}

impl PhaseCurrents {
    pub const fn new(u: f32, v: f32, w: f32) -> PhaseCurrents {
        PhaseCurrents { u, v, w }
    }

    pub const fn zero() -> PhaseCurrents {
        PhaseCurrents::new(0., 0., 0.)
    }

    pub fn from_fn(mut f: impl FnMut(Phase) -> f32) -> PhaseCurrents {
        PhaseCurrents {
            u: f(Phase::U),
            v: f(Phase::V),
            w: f(Phase::W),
        }
    }

    pub fn get(&self, phase: Phase) -> f32 {
        match phase {
            Phase::U => self.u,
            Phase::V => self.v,
            Phase::W => self.w,
        }
    }
}

/// A full sample from the inverter ADC group: the three phase currents plus DC bus current.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct CurrentMeasurement {
    pub phases: PhaseCurrents,
    pub dc_bus: f32,
}

impl CurrentMeasurement {
    pub const fn new() -> CurrentMeasurement {
        CurrentMeasurement {
            phases: PhaseCurrents::zero(),
            dc_bus: 0.,
        }
    }
}

// Wraps the ADC driver and holds the last good sample. When the driver reports that no new
// conversion is available, the previous measurement is kept.
pub struct CurrentSensor {
    last: CurrentMeasurement,
    stale_samples: u32,
}

impl CurrentSensor {
    pub const fn new() -> CurrentSensor {
        CurrentSensor {
            last: CurrentMeasurement::new(),
            stale_samples: 0,
        }
    }

    pub fn sample(&mut self, adc: &mut impl PhaseCurrentAdc) -> CurrentMeasurement {
        match adc.sample() {
            Some(measurement) => {
                self.last = measurement;
                self.stale_samples = 0;
            }
            None => self.stale_samples = self.stale_samples.saturating_add(1),
        }
        self.last
    }

    // Consecutive cycles without a fresh conversion.
    pub fn stale_samples(&self) -> u32 {
        self.stale_samples
    }
}

impl Default for CurrentSensor {
    fn default() -> Self {
        Self::new()
    }
}
