use core::sync::atomic::{AtomicBool, Ordering};

use crate::{
    current_sensing::CurrentSensor,
    encoder::AngleTracker,
    hysteresis::GateCode,
    reference::{ReferenceGenerator, ReferenceShape},
    telemetry::GateTelemetry,
    util::{buffered_state::StateReader, seq_lock::SeqLock},
};

use super::{GateDriver, PhaseCurrentAdc, QuadratureCounter};

pub struct GateHardware<Q, A, G> {
    pub encoder: Q,
    pub adc: A,
    pub gates: G,
}

/// The fast handler: angle, reference currents, hysteresis comparison, gate write. Runs in bounded
/// time with no branches on history other than the stale-sample fallback.
pub struct GateControl<'a, S: ReferenceShape, const B: usize> {
    generator: &'a ReferenceGenerator<S>,
    tracker: AngleTracker<B>,
    hysteresis_limit: f32,
    sensor: &'a mut CurrentSensor,
    compensation: StateReader<'a, [f32; B]>,
    inverter_on: &'a AtomicBool,
    telemetry: &'a SeqLock<GateTelemetry>,
}

impl<'a, S: ReferenceShape, const B: usize> GateControl<'a, S, B> {
    pub(crate) fn new(
        generator: &'a ReferenceGenerator<S>,
        tracker: AngleTracker<B>,
        hysteresis_limit: f32,
        sensor: &'a mut CurrentSensor,
        compensation: StateReader<'a, [f32; B]>,
        inverter_on: &'a AtomicBool,
        telemetry: &'a SeqLock<GateTelemetry>,
    ) -> GateControl<'a, S, B> {
        GateControl {
            generator,
            tracker,
            hysteresis_limit,
            sensor,
            compensation,
            inverter_on,
            telemetry,
        }
    }

    // One fast cycle. Returns the code that was written to the gates.
    pub fn run<Q, A, G>(&mut self, hw: &mut GateHardware<Q, A, G>) -> GateCode
    where
        Q: QuadratureCounter,
        A: PhaseCurrentAdc,
        G: GateDriver,
    {
        let measurement = self.sensor.sample(&mut hw.adc);
        let angle = self.tracker.read(&mut hw.encoder);
        let compensation = self.compensation.read()[angle.bucket];

        let reference = self.generator.generate(&angle, compensation);
        let computed = GateCode::from_currents(&reference, &measurement.phases, self.hysteresis_limit);

        let inverter_on = self.inverter_on.load(Ordering::Acquire);
        let gate = if inverter_on {
            computed
        } else {
            GateCode::ALL_OFF
        };
        hw.gates.write(gate);

        // This handler is the only writer of gate telemetry.
        let written = self.telemetry.write(GateTelemetry {
            angle,
            measured: measurement.phases,
            dc_bus: measurement.dc_bus,
            reference,
            compensation,
            gate,
            inverter_on,
        });
        debug_assert!(written.is_ok(), "second writer on gate telemetry");
        gate
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        config::ActivePhases, current_sensing::CurrentMeasurement, reference::SquareWave,
        util::buffered_state::BufferedState,
    };

    struct Fixed;

    impl QuadratureCounter for Fixed {
        fn count(&mut self) -> u32 {
            16
        }
    }

    impl PhaseCurrentAdc for Fixed {
        fn sample(&mut self) -> Option<CurrentMeasurement> {
            None
        }
    }

    impl GateDriver for Fixed {
        fn write(&mut self, _code: GateCode) {}
    }

    #[test]
    #[should_panic(expected = "second writer on gate telemetry")]
    fn competing_telemetry_writer_is_caught() {
        let generator =
            ReferenceGenerator::new(SquareWave::new(0., 3., 10., 13.), ActivePhases::all());
        let mut sensor = CurrentSensor::new();
        let mut compensation = BufferedState::new([0.; 64]);
        let (reader, _writer) = compensation.split();
        let inverter_on = AtomicBool::new(true);
        let telemetry = SeqLock::new(GateTelemetry::new());

        let mut gate_control = GateControl::new(
            &generator,
            AngleTracker::<64>::new(0),
            1.,
            &mut sensor,
            reader,
            &inverter_on,
            &telemetry,
        );
        let _held = telemetry.try_lock_write();
        gate_control.run(&mut GateHardware {
            encoder: Fixed,
            adc: Fixed,
            gates: Fixed,
        });
    }
}
