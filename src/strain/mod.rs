//! Strain-gauge averaging per rotor bucket.
//!
//! Each bucket keeps an incremental mean of the samples taken while the rotor was in it. As soon as
//! any bucket has seen more than `cap` samples the whole table is published as the finalized
//! average and accumulation restarts from zero. The baseline offset is the mean of the finalized
//! averages over a window of buckets where the rotor produces no torque.

pub mod cycle;
pub mod profile;

use log::debug;

use crate::config::AveragingConfig;

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum AverageUpdate {
    // Same bucket as last time; nothing recorded.
    Skipped,
    Accumulated { average: f32, count: u32 },
    // This sample pushed a bucket over the cap and the table was published.
    Snapshot,
}

pub struct StrainAverager<const B: usize> {
    config: AveragingConfig,
    running: [f32; B],
    counts: [u32; B],
    finalized: [f32; B],
    offset: f32,
    last_bucket: Option<usize>,
    last_sample: f32,
    snapshots: u32,
}

impl<const B: usize> StrainAverager<B> {
    pub const fn new(config: AveragingConfig) -> StrainAverager<B> {
        StrainAverager {
            config,
            running: [0.; B],
            counts: [0; B],
            finalized: [0.; B],
            offset: 0.,
            last_bucket: None,
            last_sample: 0.,
            snapshots: 0,
        }
    }

    // Whether `bucket` differs from the last recorded bucket. A stationary rotor must not weight
    // one bucket more heavily than its neighbours.
    pub fn accepts(&self, bucket: usize) -> bool {
        self.last_bucket != Some(bucket.min(B - 1))
    }

    /// Fold one sample into the bucket's running mean. A `None` sample reuses the last good one.
    pub fn record(&mut self, bucket: usize, sample: Option<f32>) -> AverageUpdate {
        let bucket = bucket.min(B - 1);
        if !self.accepts(bucket) {
            return AverageUpdate::Skipped;
        }
        self.last_bucket = Some(bucket);
        if let Some(sample) = sample {
            self.last_sample = sample;
        }

        self.counts[bucket] += 1;
        let count = self.counts[bucket];
        let average = &mut self.running[bucket];
        *average += (self.last_sample - *average) / count as f32;
        let average = *average;

        if count > self.config.cap {
            self.snapshot();
            return AverageUpdate::Snapshot;
        }
        AverageUpdate::Accumulated { average, count }
    }

    fn snapshot(&mut self) {
        self.finalized = self.running;
        self.running = [0.; B];
        self.counts = [0; B];
        self.snapshots = self.snapshots.wrapping_add(1);
        self.offset = self.window_mean();
        debug!(
            "strain snapshot {} published, offset {}",
            self.snapshots, self.offset
        );
    }

    fn window_mean(&self) -> f32 {
        let start = self.config.offset_window_start.min(B - 1);
        let end = self.config.offset_window_end.min(B - 1);
        if start > end {
            return 0.;
        }
        let window = &self.finalized[start..=end];
        window.iter().sum::<f32>() / window.len() as f32
    }

    pub fn finalized(&self) -> &[f32; B] {
        &self.finalized
    }

    pub fn offset(&self) -> f32 {
        self.offset
    }

    // Finalized average at `bucket` with the baseline removed.
    pub fn corrected(&self, bucket: usize) -> f32 {
        self.finalized[bucket.min(B - 1)] - self.offset
    }

    pub fn running_average(&self, bucket: usize) -> f32 {
        self.running[bucket.min(B - 1)]
    }

    pub fn count(&self, bucket: usize) -> u32 {
        self.counts[bucket.min(B - 1)]
    }

    pub fn last_sample(&self) -> f32 {
        self.last_sample
    }

    pub fn snapshots(&self) -> u32 {
        self.snapshots
    }
}
