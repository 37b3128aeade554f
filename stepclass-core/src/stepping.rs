//! Per-step driver
//!
//! Called once for every step the engine takes. Encodes qualifying steps into
//! the sink and tells the engine whether the track should continue.

use crate::encoder::{StepData, StepRecordEncoder};
use crate::sink::TableSink;
use tracing::{debug, warn};

/// Instruction returned to the engine after a step
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TrackStatus {
    Alive,
    /// Stop the track and every secondary it produced
    KillTrackAndSecondaries,
}

/// Counters for one stepping action
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct StepStats {
    pub recorded: u64,
    /// Transport steps
    pub filtered: u64,
    /// Steps without a post-step point or limiting process
    pub malformed: u64,
    pub sink_errors: u64,
}

pub struct SteppingAction<S: TableSink> {
    encoder: StepRecordEncoder,
    sink: S,
    kill_after_first_step: bool,
    stats: StepStats,
}

impl<S: TableSink> SteppingAction<S> {
    pub fn new(encoder: StepRecordEncoder, sink: S) -> Self {
        Self {
            encoder,
            sink,
            kill_after_first_step: false,
            stats: StepStats::default(),
        }
    }

    /// Record only the first step of every track
    pub fn with_kill_after_first_step(mut self, kill: bool) -> Self {
        self.kill_after_first_step = kill;
        self
    }

    pub fn stats(&self) -> StepStats {
        self.stats
    }

    pub fn sink(&self) -> &S {
        &self.sink
    }

    pub fn into_sink(self) -> S {
        self.sink
    }

    pub fn on_step(&mut self, step: &StepData) -> TrackStatus {
        if step.post.is_none() || step.process.is_none() {
            debug!(
                event = step.event_id,
                track = step.track_id,
                step = step.step_number,
                "skipping step without post-step information"
            );
            self.stats.malformed += 1;
            return TrackStatus::Alive;
        }

        let status = if self.kill_after_first_step && step.step_number >= 1 {
            TrackStatus::KillTrackAndSecondaries
        } else {
            TrackStatus::Alive
        };

        match self.encoder.encode(step) {
            Some(record) => match self.sink.add_row(record) {
                Ok(()) => self.stats.recorded += 1,
                Err(e) => {
                    warn!(event = step.event_id, track = step.track_id, "{}", e);
                    self.stats.sink_errors += 1;
                }
            },
            None => self.stats.filtered += 1,
        }

        status
    }

    /// Flush the sink, logging rather than failing
    pub fn finish(&mut self) {
        if let Err(e) = self.sink.flush() {
            warn!("{}", e);
            self.stats.sink_errors += 1;
        }
    }
}
