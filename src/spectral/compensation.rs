use log::info;

use crate::config::{CompensationConfig, DISABLED_COMPENSATION};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct CompensationStats {
    pub raised: usize,
    pub lowered: usize,
    pub disabled: usize,
}

/// Bang-bang update of the per-bucket reference correction.
///
/// Each pass compares the filtered strain in every bucket against the scaled target profile. Above
/// the band the correction steps down, below it steps up, inside it is left alone. Buckets whose
/// unscaled target is under the cutoff are pinned to [`DISABLED_COMPENSATION`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CompensationRule {
    config: CompensationConfig,
}

impl CompensationRule {
    pub const fn new(config: CompensationConfig) -> CompensationRule {
        CompensationRule { config }
    }

    pub fn config(&self) -> &CompensationConfig {
        &self.config
    }

    pub fn target(&self, reference: f32) -> f32 {
        reference * self.config.torque_scale
    }

    // New compensation for one bucket.
    pub fn step(&self, compensation: f32, filtered: f32, reference: f32) -> f32 {
        let c = &self.config;
        let target = self.target(reference);
        let mut next = compensation;
        if filtered > target + c.band {
            next = if c.enabled { next - c.step } else { 0. };
        }
        if filtered < target - c.band {
            next = if c.enabled { next + c.step } else { 0. };
        }
        if reference < c.cutoff {
            next = DISABLED_COMPENSATION;
        }
        next
    }

    pub fn apply<const B: usize>(
        &self,
        table: &mut [f32; B],
        filtered: &[f32; B],
        reference: &[f32; B],
    ) -> CompensationStats {
        let mut stats = CompensationStats::default();
        for ((compensation, filtered), reference) in
            table.iter_mut().zip(filtered.iter()).zip(reference.iter())
        {
            let next = self.step(*compensation, *filtered, *reference);
            if *reference < self.config.cutoff {
                stats.disabled += 1;
            } else if next > *compensation {
                stats.raised += 1;
            } else if next < *compensation {
                stats.lowered += 1;
            }
            *compensation = next;
        }
        info!(
            "compensation updated: {} raised, {} lowered, {} disabled",
            stats.raised, stats.lowered, stats.disabled
        );
        stats
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;

    fn rule(step: f32, band: f32) -> CompensationRule {
        CompensationRule::new(CompensationConfig {
            torque_scale: 1.,
            band,
            step,
            cutoff: -1.,
            enabled: true,
        })
    }

    #[test]
    fn steps_toward_target() {
        let rule = rule(0.2, 0.1);
        assert_abs_diff_eq!(rule.step(1., 0.5, 0.), 0.8);
        assert_abs_diff_eq!(rule.step(1., -0.5, 0.), 1.2);
        assert_eq!(rule.step(1., 0.05, 0.), 1.);
    }

    #[test]
    fn torque_scale_applies_to_reference() {
        let rule = CompensationRule::new(CompensationConfig {
            step: 0.2,
            ..CompensationConfig::default()
        });
        // Target is 0.25 * 2 = 0.5, band 0.1.
        assert_eq!(rule.step(0., 0.55, 2.), 0.);
        assert_abs_diff_eq!(rule.step(0., 0.7, 2.), -0.2);
    }

    #[test]
    fn disabled_method_resets_out_of_band_buckets() {
        let rule = CompensationRule::new(CompensationConfig {
            torque_scale: 1.,
            step: 0.2,
            enabled: false,
            ..CompensationConfig::default()
        });
        assert_eq!(rule.step(3., 5., 1.), 0.);
        assert_eq!(rule.step(3., 1.05, 1.), 3.);
    }

    #[test]
    fn below_cutoff_is_disabled() {
        let rule = CompensationRule::new(CompensationConfig {
            cutoff: 0.5,
            ..CompensationConfig::default()
        });
        let mut table = [1., 1., 1.];
        let stats = rule.apply(&mut table, &[0.; 3], &[0.1, 0.6, 0.4]);
        assert_eq!(table, [DISABLED_COMPENSATION, 1., DISABLED_COMPENSATION]);
        assert_eq!(stats.disabled, 2);
    }

    // The strain follows the compensation one-to-one, so the loop is closed through `filtered`.
    fn settle(rule: &CompensationRule, start: f32, passes: usize) -> [f32; 2] {
        let mut table = [start];
        let mut last = [0.; 2];
        for pass in 0..passes {
            let strain = table;
            rule.apply(&mut table, &strain, &[0.]);
            last[pass % 2] = table[0];
        }
        last
    }

    #[test]
    fn small_step_converges() {
        let rule = rule(0.05, 0.1);
        let [a, b] = settle(&rule, 0.5, 40);
        assert_eq!(a, b);
        assert!(a.abs() <= 0.1);
    }

    #[test]
    fn large_step_oscillates() {
        let rule = rule(0.3, 0.1);
        let [a, b] = settle(&rule, 0.15, 41);
        assert_abs_diff_eq!(a, -b, epsilon = 1e-5);
        assert_abs_diff_eq!(a.abs(), 0.15, epsilon = 1e-5);
    }
}
