//! CSV output backend.
//!
//! Creates three files in the configured output directory:
//! - `agent_snapshots.csv`
//! - `tick_summaries.csv`
//! - `generations.csv`

use std::fs::File;
use std::path::Path;

use csv::Writer;

use crate::writer::OutputWriter;
use crate::{AgentSnapshotRow, GenerationRow, OutputResult, TickSummaryRow};

/// Writes cohort output to three CSV files.
pub struct CsvWriter {
    snapshots:   Writer<File>,
    summaries:   Writer<File>,
    generations: Writer<File>,
    finished:    bool,
}

impl CsvWriter {
    /// Open (or create) the CSV files in `dir` and write the header rows.
    pub fn new(dir: &Path) -> OutputResult<Self> {
        let mut snapshots = Writer::from_path(dir.join("agent_snapshots.csv"))?;
        snapshots.write_record([
            "generation", "tick", "agent_id", "x", "y", "heading", "velocity", "alive", "terminal", "score",
        ])?;

        let mut summaries = Writer::from_path(dir.join("tick_summaries.csv"))?;
        summaries.write_record(["generation", "tick", "dt", "alive", "best_score", "mean_score"])?;

        let mut generations = Writer::from_path(dir.join("generations.csv"))?;
        generations.write_record([
            "generation", "ticks", "reason", "agents", "collided", "parked", "survivors",
            "best_agent", "best_fitness", "mean_fitness",
        ])?;

        Ok(Self {
            snapshots,
            summaries,
            generations,
            finished: false,
        })
    }
}

impl OutputWriter for CsvWriter {
    fn write_snapshots(&mut self, rows: &[AgentSnapshotRow]) -> OutputResult<()> {
        for row in rows {
            self.snapshots.write_record(&[
                row.generation.to_string(),
                row.tick.to_string(),
                row.agent_id.to_string(),
                row.x.to_string(),
                row.y.to_string(),
                row.heading.to_string(),
                row.velocity.to_string(),
                (row.alive as u8).to_string(),
                row.terminal.to_string(),
                row.score.to_string(),
            ])?;
        }
        Ok(())
    }

    fn write_tick_summary(&mut self, row: &TickSummaryRow) -> OutputResult<()> {
        self.summaries.write_record(&[
            row.generation.to_string(),
            row.tick.to_string(),
            row.dt.to_string(),
            row.alive.to_string(),
            row.best_score.to_string(),
            row.mean_score.to_string(),
        ])?;
        Ok(())
    }

    fn write_generation(&mut self, row: &GenerationRow) -> OutputResult<()> {
        self.generations.write_record(&[
            row.generation.to_string(),
            row.ticks.to_string(),
            row.reason.to_string(),
            row.agents.to_string(),
            row.collided.to_string(),
            row.parked.to_string(),
            row.survivors.to_string(),
            row.best_agent.map(|a| a.to_string()).unwrap_or_default(),
            row.best_fitness.to_string(),
            row.mean_fitness.to_string(),
        ])?;
        Ok(())
    }

    fn finish(&mut self) -> OutputResult<()> {
        if self.finished {
            return Ok(());
        }
        self.finished = true;
        self.snapshots.flush()?;
        self.summaries.flush()?;
        self.generations.flush()?;
        Ok(())
    }
}
