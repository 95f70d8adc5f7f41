//! Spectral filtering of the finalized strain average.
//!
//! One pass downsamples the `B`-bucket average to `N` points, takes a direct DFT, advances each
//! bin's phase to cancel the gauge's speed-dependent delay, transforms back and linearly
//! interpolates (circularly) up to `B` buckets again. `N` is small, so a plain O(N²) transform
//! with precomputed twiddles is used.

pub mod compensation;

use core::f32::consts::TAU;

use num_complex::Complex32;
use num_traits::Float;

/// Buckets per spectral point. Evaluating this for a `B` that is not a multiple of `N` fails to
/// compile.
struct Stride<const B: usize, const N: usize>;

impl<const B: usize, const N: usize> Stride<B, N> {
    const VALUE: usize = {
        assert!(N > 0 && B % N == 0, "bucket count must be a multiple of the spectral points");
        B / N
    };
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SpectralFrame<const N: usize> {
    // Phase-corrected coefficients.
    pub coefficients: [Complex32; N],
    pub magnitude: [f32; N],
    // Radians, after correction.
    pub phase: [f32; N],
}

impl<const N: usize> SpectralFrame<N> {
    pub const fn new() -> SpectralFrame<N> {
        SpectralFrame {
            coefficients: [Complex32::new(0., 0.); N],
            magnitude: [0.; N],
            phase: [0.; N],
        }
    }

    pub fn from_coefficients(coefficients: [Complex32; N]) -> SpectralFrame<N> {
        let mut frame = SpectralFrame::new();
        for (k, c) in coefficients.iter().enumerate() {
            let (magnitude, phase) = c.to_polar();
            frame.magnitude[k] = magnitude;
            frame.phase[k] = phase;
        }
        frame.coefficients = coefficients;
        frame
    }

    /// Advance bin `k` by `k * per_bin` radians and retard its mirror `N - k` by the same amount,
    /// then rebuild the coefficients from the corrected polar form.
    pub fn correct_phase(&mut self, per_bin: f32) {
        for k in 0..N {
            if k > N / 2 {
                self.phase[k] -= per_bin * (N - k) as f32;
            } else {
                self.phase[k] += per_bin * k as f32;
            }
            self.coefficients[k] = Complex32::from_polar(self.magnitude[k], self.phase[k]);
        }
    }
}

impl<const N: usize> Default for SpectralFrame<N> {
    fn default() -> Self {
        Self::new()
    }
}

pub struct SpectralEngine<const N: usize> {
    // e^(i·2πj/N) for j in 0..N.
    twiddles: [Complex32; N],
}

impl<const N: usize> SpectralEngine<N> {
    pub fn new() -> SpectralEngine<N> {
        let mut twiddles = [Complex32::new(0., 0.); N];
        for (j, twiddle) in twiddles.iter_mut().enumerate() {
            let angle = TAU * j as f32 / N as f32;
            *twiddle = Complex32::new(angle.cos(), angle.sin());
        }
        SpectralEngine { twiddles }
    }

    // Real multiply-accumulates per pass (forward plus inverse).
    pub const fn multiply_accumulates() -> usize {
        2 * N * N
    }

    /// Forward DFT of a real sequence.
    pub fn dft(&self, x: &[f32; N]) -> [Complex32; N] {
        let mut out = [Complex32::new(0., 0.); N];
        for (k, bin) in out.iter_mut().enumerate() {
            for (i, sample) in x.iter().enumerate() {
                *bin += self.twiddles[(i * k) % N].conj() * *sample;
            }
        }
        out
    }

    /// Inverse DFT, keeping only the real part.
    pub fn idft(&self, coefficients: &[Complex32; N]) -> [f32; N] {
        let mut out = [0.; N];
        let scale = 1. / N as f32;
        for (k, sample) in out.iter_mut().enumerate() {
            let mut sum = Complex32::new(0., 0.);
            for (i, c) in coefficients.iter().enumerate() {
                sum += c * self.twiddles[(i * k) % N];
            }
            *sample = sum.re * scale;
        }
        out
    }

    // Every `B / N`th bucket, with the baseline removed.
    pub fn downsample<const B: usize>(finalized: &[f32; B], offset: f32) -> [f32; N] {
        let stride = Stride::<B, N>::VALUE;
        let mut out = [0.; N];
        for (i, x) in out.iter_mut().enumerate() {
            *x = finalized[i * stride] - offset;
        }
        out
    }

    /// Linear interpolation from `N` points back to `B` buckets. The segment after the last point
    /// wraps to the first.
    pub fn interpolate<const B: usize>(samples: &[f32; N], out: &mut [f32; B]) {
        let stride = Stride::<B, N>::VALUE;
        let width = stride as f32;
        for (i, bucket) in out.iter_mut().enumerate() {
            let m = i / stride;
            let n = (i % stride) as f32;
            let next = (m + 1) % N;
            *bucket = samples[m] * ((width - n) / width) + samples[next] * (n / width);
        }
    }

    /// Run a full pass over the finalized averages, writing the filtered strain into `filtered`.
    pub fn run<const B: usize>(
        &self,
        finalized: &[f32; B],
        offset: f32,
        per_bin: f32,
        filtered: &mut [f32; B],
    ) -> SpectralFrame<N> {
        let x = Self::downsample(finalized, offset);
        let mut frame = SpectralFrame::from_coefficients(self.dft(&x));
        frame.correct_phase(per_bin);
        Self::interpolate(&self.idft(&frame.coefficients), filtered);
        frame
    }
}

impl<const N: usize> Default for SpectralEngine<N> {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::{assert_abs_diff_eq, assert_relative_eq};

    fn sequence() -> [f32; 32] {
        let mut x = [0.; 32];
        for (i, v) in x.iter_mut().enumerate() {
            let t = i as f32;
            *v = 0.5 + (t * 0.7).sin() - 0.25 * (t * 1.9).cos() + (i % 5) as f32 * 0.1;
        }
        x
    }

    #[test]
    fn round_trip() {
        let engine = SpectralEngine::<32>::new();
        let x = sequence();
        let back = engine.idft(&engine.dft(&x));
        for (a, b) in x.iter().zip(back.iter()) {
            assert_relative_eq!(a, b, max_relative = 1e-4, epsilon = 1e-5);
        }
    }

    #[test]
    fn dft_of_pure_tone() {
        let engine = SpectralEngine::<32>::new();
        let mut x = [0.; 32];
        for (i, v) in x.iter_mut().enumerate() {
            *v = (TAU * 3. * i as f32 / 32.).cos();
        }
        let bins = engine.dft(&x);
        assert_abs_diff_eq!(bins[3].re, 16., epsilon = 1e-3);
        assert_abs_diff_eq!(bins[29].re, 16., epsilon = 1e-3);
        assert_abs_diff_eq!(bins[0].norm(), 0., epsilon = 1e-3);
        assert_abs_diff_eq!(bins[4].norm(), 0., epsilon = 1e-3);
    }

    #[test]
    fn zero_correction_is_identity() {
        let engine = SpectralEngine::<32>::new();
        let x = sequence();
        let mut frame = SpectralFrame::from_coefficients(engine.dft(&x));
        frame.correct_phase(0.);
        let back = engine.idft(&frame.coefficients);
        for (a, b) in x.iter().zip(back.iter()) {
            assert_abs_diff_eq!(a, b, epsilon = 1e-4);
        }
    }

    #[test]
    fn phase_correction_shifts_a_tone() {
        let engine = SpectralEngine::<32>::new();
        let mut x = [0.; 32];
        for (i, v) in x.iter_mut().enumerate() {
            *v = (TAU * i as f32 / 32.).cos();
        }
        let mut frame = SpectralFrame::from_coefficients(engine.dft(&x));
        // Advancing the fundamental by one sample period turns cos(2πi/32) into cos(2π(i+1)/32).
        frame.correct_phase(TAU / 32.);
        let back = engine.idft(&frame.coefficients);
        for (i, v) in back.iter().enumerate() {
            assert_abs_diff_eq!(*v, x[(i + 1) % 32], epsilon = 1e-4);
        }
    }

    #[test]
    fn mirrored_bins_move_opposite() {
        let mut frame = SpectralFrame::<8>::new();
        frame.magnitude = [1.; 8];
        frame.correct_phase(0.1);
        assert_relative_eq!(frame.phase[1], 0.1);
        assert_relative_eq!(frame.phase[4], 0.4);
        assert_relative_eq!(frame.phase[5], -0.3);
        assert_relative_eq!(frame.phase[7], -0.1);
        assert_relative_eq!(frame.coefficients[1].im, 0.1f32.sin());
    }

    #[test]
    fn interpolation_wraps() {
        let samples = [0., 4., 8., 12.];
        let mut out = [0.; 16];
        SpectralEngine::<4>::interpolate(&samples, &mut out);
        assert_eq!(&out[..5], &[0., 1., 2., 3., 4.]);
        // Last segment runs from 12 back to 0.
        assert_eq!(&out[12..], &[12., 9., 6., 3.]);
    }

    #[test]
    fn downsample_removes_offset() {
        let mut finalized = [0.; 16];
        for (i, v) in finalized.iter_mut().enumerate() {
            *v = i as f32;
        }
        assert_eq!(
            SpectralEngine::<4>::downsample(&finalized, 1.),
            [-1., 3., 7., 11.]
        );
    }

    #[test]
    fn full_pass_shifts_each_harmonic_by_its_order() {
        use crate::config::PhaseCorrection;

        let per_bin = PhaseCorrection::default().per_bin(0.);
        let engine = SpectralEngine::<32>::new();
        let mut finalized = [0.; 1024];
        for (b, v) in finalized.iter_mut().enumerate() {
            let theta = TAU * b as f32 / 1024.;
            *v = 2. + 3. * (2. * theta).cos() + 1.5 * (5. * theta).sin();
        }
        let mut filtered = [0.; 1024];
        let frame = engine.run(&finalized, 2., per_bin, &mut filtered);

        assert_relative_eq!(frame.magnitude[2], 48., max_relative = 1e-4);
        assert_relative_eq!(frame.magnitude[5], 24., max_relative = 1e-4);
        assert_abs_diff_eq!(frame.phase[2], 2. * per_bin, epsilon = 1e-4);
        assert_abs_diff_eq!(frame.phase[30], -2. * per_bin, epsilon = 1e-4);
        assert_abs_diff_eq!(frame.phase[5], 5. * per_bin - TAU / 4., epsilon = 1e-4);

        // Baseline gone, every harmonic advanced by order × per-bin, linear between points.
        let point = |i: usize| {
            let theta = TAU * (i % 32) as f32 / 32.;
            3. * (2. * theta + 2. * per_bin).cos() + 1.5 * (5. * theta + 5. * per_bin).sin()
        };
        for (b, v) in filtered.iter().enumerate() {
            let (m, n) = (b / 32, (b % 32) as f32 / 32.);
            let expected = point(m) * (1. - n) + point(m + 1) * n;
            assert_abs_diff_eq!(*v, expected, epsilon = 2e-4);
        }
    }

    #[test]
    fn cost_estimate() {
        assert_eq!(SpectralEngine::<32>::multiply_accumulates(), 2048);
    }
}
