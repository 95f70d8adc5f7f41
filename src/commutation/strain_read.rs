use log::info;

use crate::{
    config::PhaseCorrection,
    encoder::{AngleSample, AngleTracker},
    spectral::compensation::{CompensationRule, CompensationStats},
    strain::{cycle::CycleEvent, AverageUpdate},
    telemetry::StrainTelemetry,
    util::{buffered_state::StateWriter, seq_lock::SeqLock},
};

use super::{FreeRunTimer, QuadratureCounter, StrainGauge, StrainState};

pub struct StrainHardware<Q, S, T> {
    pub encoder: Q,
    pub gauge: S,
    pub timer: T,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum StrainStep {
    // Rotor hasn't left the previous bucket.
    Skipped,
    Recorded,
    // Recorded and the rotor completed an electrical period.
    Wrapped,
    // Wrapped, and the spectral pass rewrote the compensation table.
    Compensated(CompensationStats),
}

/// The slow handler: strain averaging, period counting and, once enough periods have passed, the
/// spectral compensation pass.
///
/// The pass is O(N²) plus two sweeps over the `B` buckets and runs inside this handler. Check
/// [`SpectralEngine::multiply_accumulates`](crate::spectral::SpectralEngine::multiply_accumulates)
/// against the handler period when changing `N`.
pub struct StrainRead<'a, const B: usize, const N: usize> {
    tracker: AngleTracker<B>,
    rule: CompensationRule,
    phase_correction: PhaseCorrection,
    reference: &'a [f32; B],
    state: &'a mut StrainState<B, N>,
    compensation: StateWriter<'a, [f32; B]>,
    telemetry: &'a SeqLock<StrainTelemetry<N>>,
}

impl<'a, const B: usize, const N: usize> StrainRead<'a, B, N> {
    pub(crate) fn new(
        tracker: AngleTracker<B>,
        rule: CompensationRule,
        phase_correction: PhaseCorrection,
        reference: &'a [f32; B],
        state: &'a mut StrainState<B, N>,
        compensation: StateWriter<'a, [f32; B]>,
        telemetry: &'a SeqLock<StrainTelemetry<N>>,
    ) -> StrainRead<'a, B, N> {
        StrainRead {
            tracker,
            rule,
            phase_correction,
            reference,
            state,
            compensation,
            telemetry,
        }
    }

    pub fn run<Q, S, T>(&mut self, hw: &mut StrainHardware<Q, S, T>) -> StrainStep
    where
        Q: QuadratureCounter,
        S: StrainGauge,
        T: FreeRunTimer,
    {
        let angle = self.tracker.read(&mut hw.encoder);
        if !self.state.averager.accepts(angle.bucket) {
            return StrainStep::Skipped;
        }

        let sample = hw.gauge.sample();
        if let AverageUpdate::Skipped = self.state.averager.record(angle.bucket, sample) {
            return StrainStep::Skipped;
        }

        let event = self.state.cycle.update(angle.bucket);
        if event.wrapped() {
            self.state.speed.read_wrap(&mut hw.timer);
        }
        let step = match event {
            CycleEvent::None => StrainStep::Recorded,
            CycleEvent::Wrapped => StrainStep::Wrapped,
            CycleEvent::PassDue => StrainStep::Compensated(self.compensate()),
        };

        self.publish(angle);
        step
    }

    fn compensate(&mut self) -> CompensationStats {
        let state = &mut *self.state;
        let per_bin = self.phase_correction.per_bin(state.speed.speed().rpm);
        state.frame = state.engine.run(
            state.averager.finalized(),
            state.averager.offset(),
            per_bin,
            &mut state.filtered,
        );

        let stats = {
            let mut table = self.compensation.update();
            self.rule.apply(&mut *table, &state.filtered, self.reference)
        };
        state.passes = state.passes.wrapping_add(1);
        info!(
            "spectral pass {}: offset {}, {} rad/bin phase correction",
            state.passes,
            state.averager.offset(),
            per_bin
        );
        stats
    }

    fn publish(&self, angle: AngleSample) {
        let state = &*self.state;
        let bucket = angle.bucket;
        // This handler is the only writer of strain telemetry.
        let written = self.telemetry.write(StrainTelemetry {
            angle,
            speed: state.speed.speed(),
            last_sample: state.averager.last_sample(),
            strain_average: state.averager.corrected(bucket),
            offset: state.averager.offset(),
            strain_reference: self.rule.target(self.reference[bucket]),
            filtered_strain: state.filtered[bucket],
            compensation: self.compensation.published()[bucket],
            magnitude: state.frame.magnitude,
            phase: state.frame.phase,
            passes: state.passes,
        });
        debug_assert!(written.is_ok(), "second writer on strain telemetry");
    }
}
