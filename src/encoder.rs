use core::f32::consts::PI;

use log::{trace, warn};

use crate::commutation::{FreeRunTimer, QuadratureCounter};
use crate::config::SpeedConfig;

/// Aligned rotor position for one control cycle.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct AngleSample {
    // Always in `0..B`.
    pub bucket: usize,
    // Electrical angle in radians, `2π * bucket / B`.
    pub theta: f32,
}

// Map a raw counter value onto a bucket, with bucket 0 aligned to phase U.
pub fn bucket<const B: usize>(raw: u32, alignment_offset: u32) -> usize {
    let b = B as u64;
    ((raw as u64 % b + b - alignment_offset as u64 % b) % b) as usize
}

pub fn bucket_angle<const B: usize>(bucket: usize) -> f32 {
    2. * PI * bucket as f32 / B as f32
}

pub struct AngleTracker<const B: usize> {
    alignment_offset: u32,
}

impl<const B: usize> AngleTracker<B> {
    pub const fn new(alignment_offset: u32) -> AngleTracker<B> {
        AngleTracker { alignment_offset }
    }

    pub fn sample(&self, raw: u32) -> AngleSample {
        let bucket = bucket::<B>(raw, self.alignment_offset);
        AngleSample {
            bucket,
            theta: bucket_angle::<B>(bucket),
        }
    }

    pub fn read(&self, counter: &mut impl QuadratureCounter) -> AngleSample {
        self.sample(counter.count())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Speed {
    pub rpm: f32,
    // Electrical, rad/s.
    pub omega: f32,
}

/// Rotor speed from the free-run timer, updated once per encoder wrap.
///
/// The encoder counter wraps several times per mechanical revolution, so the time between wraps is
/// one electrical period. The timer counts up and is cleared at `timer_wrap`, which bounds the
/// slowest speed that can be measured.
pub struct SpeedTracker {
    config: SpeedConfig,
    last_count: Option<u32>,
    speed: Speed,
}

impl SpeedTracker {
    pub const fn new(config: SpeedConfig) -> SpeedTracker {
        SpeedTracker {
            config,
            last_count: None,
            speed: Speed { rpm: 0., omega: 0. },
        }
    }

    // Record a wrap at timer value `count`. Returns the new speed, or `None` if there is no
    // previous wrap to measure against or no time has elapsed.
    pub fn on_wrap(&mut self, count: u32) -> Option<Speed> {
        let wrap = self.config.timer_wrap;
        let count = count % wrap;
        let last = self.last_count.replace(count)?;

        let ticks = if count >= last {
            count - last
        } else {
            wrap - last + count
        };
        if ticks == 0 {
            warn!("speed sample with zero elapsed time, keeping {} rpm", self.speed.rpm);
            return None;
        }

        let dt = ticks as f32 * self.config.timer_tick_s;
        self.speed = Speed {
            rpm: 60. / (self.config.wraps_per_revolution as f32 * dt),
            omega: 2. * PI / dt,
        };
        trace!("speed: {} rpm", self.speed.rpm);
        Some(self.speed)
    }

    pub fn read_wrap(&mut self, timer: &mut impl FreeRunTimer) -> Option<Speed> {
        self.on_wrap(timer.count())
    }

    pub fn speed(&self) -> Speed {
        self.speed
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn bucket_is_in_range_and_periodic() {
        for offset in [0, 5, 1023, 1024, 4000] {
            for raw in (0..5000).step_by(7) {
                let b = bucket::<1024>(raw, offset);
                assert!(b < 1024);
                assert_eq!(b, bucket::<1024>(raw + 1024, offset));
            }
        }
    }

    #[test]
    fn alignment_offset_moves_zero() {
        assert_eq!(bucket::<1024>(5, 5), 0);
        assert_eq!(bucket::<1024>(4, 5), 1023);
        assert_eq!(bucket::<1024>(1029, 5), 0);
        assert_eq!(bucket::<1024>(u32::MAX, 0), 1023);
    }

    #[test]
    fn angle_follows_bucket() {
        let tracker = AngleTracker::<1024>::new(5);
        let sample = tracker.sample(5 + 256);
        assert_eq!(sample.bucket, 256);
        assert_relative_eq!(sample.theta, PI / 2.);
        assert_eq!(tracker.sample(5).theta, 0.);
    }

    #[test]
    fn first_wrap_only_primes() {
        let mut tracker = SpeedTracker::new(SpeedConfig::default());
        assert_eq!(tracker.on_wrap(1000), None);
        assert_eq!(tracker.speed(), Speed::default());
    }

    #[test]
    fn speed_from_timer_delta() {
        let mut tracker = SpeedTracker::new(SpeedConfig::default());
        tracker.on_wrap(0);
        // 1/15 s per wrap at 20ns per tick, 3 wraps per revolution: 300 rpm.
        let speed = tracker.on_wrap(3_333_333).unwrap();
        assert_relative_eq!(speed.rpm, 300., max_relative = 1e-4);
        assert_relative_eq!(speed.omega, 2. * PI * 15., max_relative = 1e-4);
    }

    #[test]
    fn timer_wraparound() {
        let mut tracker = SpeedTracker::new(SpeedConfig::default());
        tracker.on_wrap(999_000_000);
        let speed = tracker.on_wrap(2_333_333).unwrap();
        assert_relative_eq!(speed.rpm, 300., max_relative = 1e-4);
    }

    #[test]
    fn zero_delta_keeps_previous_speed() {
        let mut tracker = SpeedTracker::new(SpeedConfig::default());
        tracker.on_wrap(0);
        let speed = tracker.on_wrap(1_000_000).unwrap();
        assert_eq!(tracker.on_wrap(1_000_000), None);
        assert_eq!(tracker.speed(), speed);
    }
}
