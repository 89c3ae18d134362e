//! Parquet output backend (feature `parquet`).
//!
//! Creates three files in the configured output directory:
//! - `agent_snapshots.parquet`
//! - `tick_summaries.parquet`
//! - `generations.parquet`

use std::fs::File;
use std::path::Path;
use std::sync::Arc;

use arrow::array::{BooleanBuilder, Float32Builder, StringBuilder, UInt32Builder, UInt64Builder};
use arrow::datatypes::{DataType, Field, Schema};
use arrow::record_batch::RecordBatch;
use parquet::arrow::ArrowWriter;
use parquet::basic::Compression;
use parquet::file::properties::WriterProperties;

use crate::writer::OutputWriter;
use crate::{AgentSnapshotRow, GenerationRow, OutputResult, TickSummaryRow};

fn snapshot_schema() -> Arc<Schema> {
    Arc::new(Schema::new(vec![
        Field::new("generation", DataType::UInt64,  false),
        Field::new("tick",       DataType::UInt64,  false),
        Field::new("agent_id",   DataType::UInt32,  false),
        Field::new("x",          DataType::Float32, false),
        Field::new("y",          DataType::Float32, false),
        Field::new("heading",    DataType::Float32, false),
        Field::new("velocity",   DataType::Float32, false),
        Field::new("alive",      DataType::Boolean, false),
        Field::new("terminal",   DataType::Utf8,    false),
        Field::new("score",      DataType::Float32, false),
    ]))
}

fn summary_schema() -> Arc<Schema> {
    Arc::new(Schema::new(vec![
        Field::new("generation", DataType::UInt64,  false),
        Field::new("tick",       DataType::UInt64,  false),
        Field::new("dt",         DataType::Float32, false),
        Field::new("alive",      DataType::UInt32,  false),
        Field::new("best_score", DataType::Float32, false),
        Field::new("mean_score", DataType::Float32, false),
    ]))
}

fn generation_schema() -> Arc<Schema> {
    Arc::new(Schema::new(vec![
        Field::new("generation",   DataType::UInt64,  false),
        Field::new("ticks",        DataType::UInt64,  false),
        Field::new("reason",       DataType::Utf8,    false),
        Field::new("agents",       DataType::UInt32,  false),
        Field::new("collided",     DataType::UInt32,  false),
        Field::new("parked",       DataType::UInt32,  false),
        Field::new("survivors",    DataType::UInt32,  false),
        Field::new("best_agent",   DataType::UInt32,  true),
        Field::new("best_fitness", DataType::Float32, false),
        Field::new("mean_fitness", DataType::Float32, false),
    ]))
}

fn snappy_props() -> WriterProperties {
    WriterProperties::builder()
        .set_compression(Compression::SNAPPY)
        .build()
}

fn open(dir: &Path, name: &str, schema: &Arc<Schema>) -> OutputResult<ArrowWriter<File>> {
    let file = File::create(dir.join(name))?;
    Ok(ArrowWriter::try_new(file, Arc::clone(schema), Some(snappy_props()))?)
}

/// Writes cohort output to three Parquet files.
///
/// `finish()` **must** be called to write the Parquet file footers; files
/// written without calling `finish()` cannot be opened by Parquet readers.
pub struct ParquetWriter {
    snapshots:   Option<ArrowWriter<File>>,
    summaries:   Option<ArrowWriter<File>>,
    generations: Option<ArrowWriter<File>>,
    snap_schema: Arc<Schema>,
    summ_schema: Arc<Schema>,
    gen_schema:  Arc<Schema>,
}

impl ParquetWriter {
    /// Create the Parquet files in `dir`.
    pub fn new(dir: &Path) -> OutputResult<Self> {
        let snap_schema = snapshot_schema();
        let summ_schema = summary_schema();
        let gen_schema = generation_schema();

        Ok(Self {
            snapshots:   Some(open(dir, "agent_snapshots.parquet", &snap_schema)?),
            summaries:   Some(open(dir, "tick_summaries.parquet", &summ_schema)?),
            generations: Some(open(dir, "generations.parquet", &gen_schema)?),
            snap_schema,
            summ_schema,
            gen_schema,
        })
    }
}

impl OutputWriter for ParquetWriter {
    fn write_snapshots(&mut self, rows: &[AgentSnapshotRow]) -> OutputResult<()> {
        if rows.is_empty() {
            return Ok(());
        }
        let Some(writer) = self.snapshots.as_mut() else {
            return Ok(());
        };

        let mut generations = UInt64Builder::new();
        let mut ticks       = UInt64Builder::new();
        let mut agent_ids   = UInt32Builder::new();
        let mut xs          = Float32Builder::new();
        let mut ys          = Float32Builder::new();
        let mut headings    = Float32Builder::new();
        let mut velocities  = Float32Builder::new();
        let mut alive       = BooleanBuilder::new();
        let mut terminals   = StringBuilder::new();
        let mut scores      = Float32Builder::new();

        for row in rows {
            generations.append_value(row.generation);
            ticks.append_value(row.tick);
            agent_ids.append_value(row.agent_id);
            xs.append_value(row.x);
            ys.append_value(row.y);
            headings.append_value(row.heading);
            velocities.append_value(row.velocity);
            alive.append_value(row.alive);
            terminals.append_value(row.terminal);
            scores.append_value(row.score);
        }

        let batch = RecordBatch::try_new(
            Arc::clone(&self.snap_schema),
            vec![
                Arc::new(generations.finish()),
                Arc::new(ticks.finish()),
                Arc::new(agent_ids.finish()),
                Arc::new(xs.finish()),
                Arc::new(ys.finish()),
                Arc::new(headings.finish()),
                Arc::new(velocities.finish()),
                Arc::new(alive.finish()),
                Arc::new(terminals.finish()),
                Arc::new(scores.finish()),
            ],
        )?;
        writer.write(&batch)?;
        Ok(())
    }

    fn write_tick_summary(&mut self, row: &TickSummaryRow) -> OutputResult<()> {
        let Some(writer) = self.summaries.as_mut() else {
            return Ok(());
        };

        let mut generations = UInt64Builder::new();
        let mut ticks       = UInt64Builder::new();
        let mut dts         = Float32Builder::new();
        let mut alive       = UInt32Builder::new();
        let mut best        = Float32Builder::new();
        let mut mean        = Float32Builder::new();

        generations.append_value(row.generation);
        ticks.append_value(row.tick);
        dts.append_value(row.dt);
        alive.append_value(row.alive);
        best.append_value(row.best_score);
        mean.append_value(row.mean_score);

        let batch = RecordBatch::try_new(
            Arc::clone(&self.summ_schema),
            vec![
                Arc::new(generations.finish()),
                Arc::new(ticks.finish()),
                Arc::new(dts.finish()),
                Arc::new(alive.finish()),
                Arc::new(best.finish()),
                Arc::new(mean.finish()),
            ],
        )?;
        writer.write(&batch)?;
        Ok(())
    }

    fn write_generation(&mut self, row: &GenerationRow) -> OutputResult<()> {
        let Some(writer) = self.generations.as_mut() else {
            return Ok(());
        };

        let mut generations = UInt64Builder::new();
        let mut ticks       = UInt64Builder::new();
        let mut reasons     = StringBuilder::new();
        let mut agents      = UInt32Builder::new();
        let mut collided    = UInt32Builder::new();
        let mut parked      = UInt32Builder::new();
        let mut survivors   = UInt32Builder::new();
        let mut best_agent  = UInt32Builder::new();
        let mut best        = Float32Builder::new();
        let mut mean        = Float32Builder::new();

        generations.append_value(row.generation);
        ticks.append_value(row.ticks);
        reasons.append_value(row.reason);
        agents.append_value(row.agents);
        collided.append_value(row.collided);
        parked.append_value(row.parked);
        survivors.append_value(row.survivors);
        best_agent.append_option(row.best_agent);
        best.append_value(row.best_fitness);
        mean.append_value(row.mean_fitness);

        let batch = RecordBatch::try_new(
            Arc::clone(&self.gen_schema),
            vec![
                Arc::new(generations.finish()),
                Arc::new(ticks.finish()),
                Arc::new(reasons.finish()),
                Arc::new(agents.finish()),
                Arc::new(collided.finish()),
                Arc::new(parked.finish()),
                Arc::new(survivors.finish()),
                Arc::new(best_agent.finish()),
                Arc::new(best.finish()),
                Arc::new(mean.finish()),
            ],
        )?;
        writer.write(&batch)?;
        Ok(())
    }

    fn finish(&mut self) -> OutputResult<()> {
        for slot in [&mut self.snapshots, &mut self.summaries, &mut self.generations] {
            if let Some(w) = slot.take() {
                w.close()?;
            }
        }
        Ok(())
    }
}
