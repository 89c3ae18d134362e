//! The sink side of the output pipeline.

use crate::{AgentSnapshotRow, GenerationRow, OutputResult, TickSummaryRow};

/// A backend that persists cohort rows: CSV, SQLite or Parquet.
///
/// The observer driving a writer cannot propagate errors, so it keeps the
/// first one for [`CohortOutputObserver::take_error`][crate::CohortOutputObserver::take_error].
pub trait OutputWriter {
    /// Agent snapshots of one tick, in slot order.
    fn write_snapshots(&mut self, rows: &[AgentSnapshotRow]) -> OutputResult<()>;

    fn write_tick_summary(&mut self, row: &TickSummaryRow) -> OutputResult<()>;

    /// One row per ended generation, whatever the end reason.
    fn write_generation(&mut self, row: &GenerationRow) -> OutputResult<()>;

    /// Flush and close the underlying files.  Calling it again is a no-op.
    fn finish(&mut self) -> OutputResult<()>;
}
