//! `CohortOutputObserver<W>` — bridges `CohortObserver` to an `OutputWriter`.

use sdc_cohort::{AgentSnapshot, CohortObserver, GenerationSummary, TickSummary};
use sdc_core::Tick;

use crate::row::{AgentSnapshotRow, GenerationRow, TickSummaryRow};
use crate::writer::OutputWriter;
use crate::{OutputError, OutputResult};

/// A [`CohortObserver`] that writes agent snapshots, tick summaries and
/// generation results to any [`OutputWriter`] backend.
///
/// Errors from the writer are stored internally because `CohortObserver`
/// methods have no return value.  After the run, call
/// [`finish`][Self::finish] and check [`take_error`][Self::take_error].
pub struct CohortOutputObserver<W: OutputWriter> {
    writer:      W,
    /// Skip per-tick rows, keep snapshots and generations.
    skip_ticks:  bool,
    last_error:  Option<OutputError>,
}

impl<W: OutputWriter> CohortOutputObserver<W> {
    pub fn new(writer: W) -> Self {
        Self { writer, skip_ticks: false, last_error: None }
    }

    /// Do not write a `tick_summaries` row for every tick.
    pub fn without_tick_summaries(mut self) -> Self {
        self.skip_ticks = true;
        self
    }

    /// Flush and close the writer.  Idempotent.
    pub fn finish(&mut self) {
        let result = self.writer.finish();
        self.store_err(result);
    }

    /// Take the stored write error (if any).
    ///
    /// Returns `None` if all writes succeeded.
    pub fn take_error(&mut self) -> Option<OutputError> {
        self.last_error.take()
    }

    /// Unwrap the inner writer (e.g. to inspect files after the run).
    pub fn into_writer(self) -> W {
        self.writer
    }

    fn store_err(&mut self, result: OutputResult<()>) {
        if let Err(e) = result {
            // Keep only the first error.
            if self.last_error.is_none() {
                self.last_error = Some(e);
            }
        }
    }
}

impl<W: OutputWriter> CohortObserver for CohortOutputObserver<W> {
    fn on_tick_end(&mut self, summary: &TickSummary) {
        if self.skip_ticks {
            return;
        }
        let result = self.writer.write_tick_summary(&TickSummaryRow::from(summary));
        self.store_err(result);
    }

    fn on_snapshot(&mut self, generation: u64, tick: Tick, agents: &[AgentSnapshot]) {
        let rows: Vec<AgentSnapshotRow> = agents
            .iter()
            .map(|s| AgentSnapshotRow::from_snapshot(generation, tick, s))
            .collect();

        if !rows.is_empty() {
            let result = self.writer.write_snapshots(&rows);
            self.store_err(result);
        }
    }

    fn on_generation_end(&mut self, summary: &GenerationSummary) {
        let result = self.writer.write_generation(&GenerationRow::from(summary));
        self.store_err(result);
    }
}
