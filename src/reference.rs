//! Reference current synthesis.
//!
//! The shaping law is a type parameter of [`ReferenceGenerator`], so a deployment picks exactly one
//! at build time. Both laws are evaluated per phase at `θ`, `θ - 2π/3` and `θ - 4π/3`.

use core::f32::consts::TAU;

use num_traits::Float;

use crate::config::{deg2rad, ActivePhases};
use crate::current_sensing::{Phase, PhaseCurrents};
use crate::encoder::AngleSample;

// Fold an angle into `[0, 2π)`.
pub fn wrap_angle(theta: f32) -> f32 {
    let wrapped = theta % TAU;
    if wrapped < 0. {
        wrapped + TAU
    } else {
        wrapped
    }
}

pub trait ReferenceShape {
    /// Reference for one phase. `theta` is already shifted for the phase and lies in `[0, 2π)`.
    /// `compensation` is the table entry for the current bucket.
    fn phase_reference(&self, theta: f32, compensation: f32) -> f32;
}

/// Constant `peak` inside the conduction window `(theta_on, theta_off)`, zero outside.
///
/// The window may wrap past 2π, i.e. `theta_on > theta_off` conducts from `theta_on` through zero
/// to `theta_off`, and `(0, 2π)` conducts everywhere except at zero. Equal angles mean no
/// conduction at all. Both window edges are exclusive. The compensation is added on top and the sum
/// is clamped to `[0, max_current]`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SquareWave {
    theta_on: f32,
    // Window length in `(0, 2π]`, or zero for an empty window.
    span: f32,
    peak: f32,
    max_current: f32,
}

// Length of the window from `on` to `off` on a circle of `period`. Only equal edges give zero.
fn window_span(on: f32, off: f32, period: f32) -> f32 {
    if on == off {
        return 0.;
    }
    let span = (off - on) % period;
    if span <= 0. {
        span + period
    } else {
        span
    }
}

impl SquareWave {
    pub fn new(theta_on: f32, theta_off: f32, peak: f32, max_current: f32) -> SquareWave {
        SquareWave {
            theta_on: wrap_angle(theta_on),
            span: window_span(theta_on, theta_off, TAU),
            peak,
            max_current,
        }
    }

    // The span is taken in degrees so whole-turn windows stay exact.
    pub fn from_degrees(theta_on: f32, theta_off: f32, peak: f32, max_current: f32) -> SquareWave {
        SquareWave {
            theta_on: wrap_angle(deg2rad(theta_on)),
            span: deg2rad(window_span(theta_on, theta_off, 360.)),
            peak,
            max_current,
        }
    }

    pub fn conducts(&self, theta: f32) -> bool {
        let into = wrap_angle(theta - self.theta_on);
        into > 0. && into < self.span
    }
}

impl ReferenceShape for SquareWave {
    fn phase_reference(&self, theta: f32, compensation: f32) -> f32 {
        let base = if self.conducts(theta) { self.peak } else { 0. };
        (base + compensation).clamp(0., self.max_current)
    }
}

/// `i0 + i1·sin(θ + p1) + i2·sin(2θ + p2) + i3·sin(3θ + p3)`, floored at zero.
///
/// Not compensated: the harmonic coefficients are tuned offline and the per-bucket table is not
/// applied to them. There is no upper clamp.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Harmonic {
    pub offset: f32,
    pub amplitudes: [f32; 3],
    // Radians.
    pub phases: [f32; 3],
}

impl Harmonic {
    pub fn from_degrees(offset: f32, amplitudes: [f32; 3], phases: [f32; 3]) -> Harmonic {
        Harmonic {
            offset,
            amplitudes,
            phases: phases.map(deg2rad),
        }
    }
}

impl ReferenceShape for Harmonic {
    fn phase_reference(&self, theta: f32, _compensation: f32) -> f32 {
        let mut current = self.offset;
        for (n, (amplitude, phase)) in self.amplitudes.iter().zip(self.phases.iter()).enumerate() {
            let order = (n + 1) as f32;
            current += amplitude * (order * theta + phase).sin();
        }
        current.max(0.)
    }
}

pub struct ReferenceGenerator<S: ReferenceShape> {
    shape: S,
    active: ActivePhases,
}

impl<S: ReferenceShape> ReferenceGenerator<S> {
    pub const fn new(shape: S, active: ActivePhases) -> ReferenceGenerator<S> {
        ReferenceGenerator { shape, active }
    }

    pub fn shape(&self) -> &S {
        &self.shape
    }

    pub fn generate(&self, angle: &AngleSample, compensation: f32) -> PhaseCurrents {
        PhaseCurrents::from_fn(|phase: Phase| {
            if !self.active.contains(phase) {
                return 0.;
            }
            let theta = wrap_angle(angle.theta - phase.offset());
            self.shape.phase_reference(theta, compensation)
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use core::f32::consts::PI;

    fn at(theta: f32) -> AngleSample {
        AngleSample { bucket: 0, theta }
    }

    #[test]
    fn square_wave_window() {
        let square = SquareWave::new(0., PI, 10., 13.);
        assert_eq!(square.phase_reference(PI / 2., 0.), 10.);
        assert_eq!(square.phase_reference(3. * PI / 2., 0.), 0.);
        // Edges are exclusive.
        assert_eq!(square.phase_reference(0., 0.), 0.);
        assert_eq!(square.phase_reference(PI, 0.), 0.);
    }

    #[test]
    fn square_wave_wraps_past_zero() {
        let square = SquareWave::from_degrees(300., 60., 5., 13.);
        assert!(square.conducts(deg2rad(330.)));
        assert!(square.conducts(deg2rad(30.)));
        assert!(!square.conducts(deg2rad(180.)));

        // 420° is the same window edge as 60°.
        let wrapped = SquareWave::from_degrees(300., 420., 5., 13.);
        assert!(wrapped.conducts(deg2rad(30.)));
        assert!(!wrapped.conducts(deg2rad(90.)));
    }

    #[test]
    fn full_turn_window_conducts_everywhere_but_the_edge() {
        let square = SquareWave::new(0., TAU, 10., 13.);
        assert_eq!(square.phase_reference(PI / 2., 0.), 10.);
        assert_eq!(square.phase_reference(3. * PI / 2., 0.), 10.);
        assert_eq!(square.phase_reference(0., 0.), 0.);

        let degrees = SquareWave::from_degrees(0., 360., 10., 13.);
        assert_eq!(degrees.phase_reference(PI, 0.), 10.);
        assert_eq!(degrees.phase_reference(0.01, 0.), 10.);
        assert_eq!(degrees.phase_reference(TAU - 0.01, 0.), 10.);

        // A full turn starting elsewhere.
        let shifted = SquareWave::from_degrees(90., 450., 10., 13.);
        assert!(shifted.conducts(deg2rad(45.)));
        assert!(!shifted.conducts(deg2rad(90.)));
    }

    #[test]
    fn empty_window_never_conducts() {
        let square = SquareWave::new(1., 1., 10., 13.);
        for i in 0..64 {
            assert!(!square.conducts(i as f32 * TAU / 64.));
        }
    }

    #[test]
    fn compensation_is_added_then_clamped() {
        let square = SquareWave::new(0., PI, 10., 13.);
        assert_eq!(square.phase_reference(1., 2.), 12.);
        assert_eq!(square.phase_reference(1., 5.), 13.);
        assert_eq!(square.phase_reference(4., 1.5), 1.5);
        assert_eq!(square.phase_reference(4., -100.), 0.);
    }

    #[test]
    fn phases_are_shifted() {
        let generator =
            ReferenceGenerator::new(SquareWave::new(0., PI / 3., 10., 13.), ActivePhases::all());
        // Phase V conducts when θ - 2π/3 is in (0, π/3).
        let refs = generator.generate(&at(2. * PI / 3. + 0.5), 0.);
        assert_eq!(refs, PhaseCurrents::new(0., 10., 0.));
        let refs = generator.generate(&at(4. * PI / 3. + 0.5), 0.);
        assert_eq!(refs, PhaseCurrents::new(0., 0., 10.));
    }

    #[test]
    fn inactive_phases_are_zero() {
        let generator = ReferenceGenerator::new(
            SquareWave::new(0., TAU - 0.01, 10., 13.),
            ActivePhases::only(Phase::V),
        );
        let refs = generator.generate(&at(3.), 1.);
        assert_eq!(refs.u, 0.);
        assert_eq!(refs.w, 0.);
        assert_eq!(refs.v, 11.);
    }

    #[test]
    fn harmonic_sum_floors_at_zero() {
        let harmonic = Harmonic::from_degrees(2., [3., 0., 0.], [0., 0., 0.]);
        assert_relative_eq!(harmonic.phase_reference(PI / 2., 0.), 5.);
        assert_eq!(harmonic.phase_reference(3. * PI / 2., 0.), 0.);
        // No upper clamp, no compensation.
        let big = Harmonic::from_degrees(50., [0.; 3], [0.; 3]);
        assert_eq!(big.phase_reference(1., 7.), 50.);
    }

    #[test]
    fn harmonic_orders_and_phases() {
        let harmonic = Harmonic::from_degrees(0., [0., 1., 1.], [0., 90., 0.]);
        // sin(2θ + π/2) + sin(3θ) at θ = π/6 is cos(π/3) + 1.
        assert_relative_eq!(harmonic.phase_reference(PI / 6., 0.), 1.5, epsilon = 1e-5);
    }
}
