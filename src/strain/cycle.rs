use crate::config::DriveConfig;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CycleEvent {
    None,
    // The bucket index jumped backwards by more than the threshold.
    Wrapped,
    // Wrapped, and enough periods have been counted that the spectral pass should run.
    PassDue,
}

impl CycleEvent {
    pub fn wrapped(&self) -> bool {
        !matches!(self, CycleEvent::None)
    }
}

pub fn is_wrap(previous: usize, current: usize, threshold: usize) -> bool {
    previous.saturating_sub(current) > threshold
}

/// Counts electrical periods by watching the bucket index fall back towards zero.
pub struct CycleDetector {
    threshold: usize,
    revolutions_per_pass: u32,
    previous: Option<usize>,
    revolutions: u32,
}

impl CycleDetector {
    pub const fn new(threshold: usize, revolutions_per_pass: u32) -> CycleDetector {
        CycleDetector {
            threshold,
            revolutions_per_pass,
            previous: None,
            revolutions: 0,
        }
    }

    pub fn from_config(config: &DriveConfig) -> CycleDetector {
        Self::new(config.cycle.wrap_threshold, config.revolutions_per_pass())
    }

    pub fn update(&mut self, bucket: usize) -> CycleEvent {
        let previous = self.previous.replace(bucket);
        let wrapped = match previous {
            Some(previous) => is_wrap(previous, bucket, self.threshold),
            None => false,
        };
        if !wrapped {
            return CycleEvent::None;
        }

        self.revolutions += 1;
        if self.revolutions > self.revolutions_per_pass {
            self.revolutions = 0;
            CycleEvent::PassDue
        } else {
            CycleEvent::Wrapped
        }
    }

    pub fn revolutions(&self) -> u32 {
        self.revolutions
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn wrap_detection() {
        assert!(is_wrap(1020, 5, 500));
        assert!(!is_wrap(10, 5, 500));
        assert!(!is_wrap(5, 1020, 500));
        assert!(!is_wrap(505, 5, 500));
    }

    #[test]
    fn first_sample_never_wraps() {
        let mut detector = CycleDetector::new(500, 1);
        assert_eq!(detector.update(5), CycleEvent::None);
        assert_eq!(detector.revolutions(), 0);
    }

    #[test]
    fn pass_after_more_than_configured_revolutions() {
        let mut detector = CycleDetector::new(500, 2);
        let mut events = [CycleEvent::None; 3];
        for event in events.iter_mut() {
            detector.update(1000);
            *event = detector.update(10);
        }
        assert_eq!(
            events,
            [CycleEvent::Wrapped, CycleEvent::Wrapped, CycleEvent::PassDue]
        );
        assert_eq!(detector.revolutions(), 0);
    }

    #[test]
    fn forward_motion_does_not_count() {
        let mut detector = CycleDetector::new(500, 1);
        for bucket in (0..1024).step_by(16) {
            assert_eq!(detector.update(bucket), CycleEvent::None);
        }
        assert!(detector.update(0).wrapped());
    }
}
