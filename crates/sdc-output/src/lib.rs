//! `sdc-output` — cohort output writers for the rust_sdc framework.
//!
//! Three backends are provided behind Cargo features:
//!
//! | Feature   | Backend     | Files created                                                          |
//! |-----------|-------------|------------------------------------------------------------------------|
//! | *(none)*  | CSV         | `agent_snapshots.csv`, `tick_summaries.csv`, `generations.csv`         |
//! | `sqlite`  | SQLite      | `output.db`                                                            |
//! | `parquet` | Parquet     | `agent_snapshots.parquet`, `tick_summaries.parquet`, `generations.parquet` |
//!
//! All backends implement [`OutputWriter`] and are driven by
//! [`CohortOutputObserver`], which implements `sdc_cohort::CohortObserver`.
//!
//! # Usage
//!
//! ```rust,ignore
//! use sdc_output::{CohortOutputObserver, CsvWriter};
//!
//! let writer = CsvWriter::new(Path::new("./output"))?;
//! let mut obs = CohortOutputObserver::new(writer);
//! trainer.run(&mut cohort, &mut obs)?;
//! obs.finish();
//! obs.take_error().map(|e| eprintln!("output error: {e}"));
//! ```

pub mod csv;
pub mod error;
pub mod observer;
pub mod row;
pub mod writer;

#[cfg(feature = "sqlite")]
pub mod sqlite;

#[cfg(feature = "parquet")]
pub mod parquet;


pub use csv::CsvWriter;
pub use error::{OutputError, OutputResult};
pub use observer::CohortOutputObserver;
pub use row::{AgentSnapshotRow, GenerationRow, TickSummaryRow};
pub use writer::OutputWriter;

#[cfg(feature = "sqlite")]
pub use sqlite::SqliteWriter;

#[cfg(feature = "parquet")]
pub use parquet::ParquetWriter;
