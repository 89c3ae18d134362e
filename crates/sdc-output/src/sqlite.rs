//! SQLite output backend (feature `sqlite`).
//!
//! Creates a single `output.db` file in the configured output directory with
//! three tables: `agent_snapshots`, `tick_summaries` and `generations`.

use std::path::Path;

use rusqlite::Connection;

use crate::writer::OutputWriter;
use crate::{AgentSnapshotRow, GenerationRow, OutputResult, TickSummaryRow};

/// Writes cohort output to an SQLite database.
pub struct SqliteWriter {
    conn:     Connection,
    finished: bool,
}

impl SqliteWriter {
    /// Open (or create) `output.db` in `dir` and initialise the schema.
    pub fn new(dir: &Path) -> OutputResult<Self> {
        let conn = Connection::open(dir.join("output.db"))?;

        conn.execute_batch(
            "PRAGMA journal_mode = WAL;
             PRAGMA synchronous  = NORMAL;
             CREATE TABLE IF NOT EXISTS agent_snapshots (
                 generation INTEGER NOT NULL,
                 tick       INTEGER NOT NULL,
                 agent_id   INTEGER NOT NULL,
                 x          REAL    NOT NULL,
                 y          REAL    NOT NULL,
                 heading    REAL    NOT NULL,
                 velocity   REAL    NOT NULL,
                 alive      INTEGER NOT NULL,
                 terminal   TEXT    NOT NULL,
                 score      REAL    NOT NULL
             );
             CREATE TABLE IF NOT EXISTS tick_summaries (
                 generation INTEGER NOT NULL,
                 tick       INTEGER NOT NULL,
                 dt         REAL    NOT NULL,
                 alive      INTEGER NOT NULL,
                 best_score REAL    NOT NULL,
                 mean_score REAL    NOT NULL,
                 PRIMARY KEY (generation, tick)
             );
             CREATE TABLE IF NOT EXISTS generations (
                 generation   INTEGER PRIMARY KEY,
                 ticks        INTEGER NOT NULL,
                 reason       TEXT    NOT NULL,
                 agents       INTEGER NOT NULL,
                 collided     INTEGER NOT NULL,
                 parked       INTEGER NOT NULL,
                 survivors    INTEGER NOT NULL,
                 best_agent   INTEGER,
                 best_fitness REAL    NOT NULL,
                 mean_fitness REAL    NOT NULL
             );",
        )?;

        Ok(Self { conn, finished: false })
    }
}

impl OutputWriter for SqliteWriter {
    fn write_snapshots(&mut self, rows: &[AgentSnapshotRow]) -> OutputResult<()> {
        if rows.is_empty() {
            return Ok(());
        }
        let tx = self.conn.unchecked_transaction()?;
        {
            let mut stmt = tx.prepare_cached(
                "INSERT INTO agent_snapshots \
                 (generation, tick, agent_id, x, y, heading, velocity, alive, terminal, score) \
                 VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10)",
            )?;
            for row in rows {
                stmt.execute(rusqlite::params![
                    row.generation,
                    row.tick,
                    row.agent_id,
                    row.x as f64,
                    row.y as f64,
                    row.heading as f64,
                    row.velocity as f64,
                    row.alive as i64,
                    row.terminal,
                    row.score as f64,
                ])?;
            }
        }
        tx.commit()?;
        Ok(())
    }

    fn write_tick_summary(&mut self, row: &TickSummaryRow) -> OutputResult<()> {
        self.conn.prepare_cached(
            "INSERT INTO tick_summaries (generation, tick, dt, alive, best_score, mean_score) \
             VALUES (?1, ?2, ?3, ?4, ?5, ?6)",
        )?
        .execute(rusqlite::params![
            row.generation,
            row.tick,
            row.dt as f64,
            row.alive,
            row.best_score as f64,
            row.mean_score as f64,
        ])?;
        Ok(())
    }

    fn write_generation(&mut self, row: &GenerationRow) -> OutputResult<()> {
        self.conn.execute(
            "INSERT INTO generations \
             (generation, ticks, reason, agents, collided, parked, survivors, best_agent, best_fitness, mean_fitness) \
             VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10)",
            rusqlite::params![
                row.generation,
                row.ticks,
                row.reason,
                row.agents,
                row.collided,
                row.parked,
                row.survivors,
                row.best_agent,
                row.best_fitness as f64,
                row.mean_fitness as f64,
            ],
        )?;
        Ok(())
    }

    fn finish(&mut self) -> OutputResult<()> {
        if self.finished {
            return Ok(());
        }
        self.finished = true;
        self.conn
            .execute_batch("PRAGMA wal_checkpoint(TRUNCATE);")?;
        Ok(())
    }
}
