//! Score entry: editable table with a derived penalty column
//!
//! Rows are competitors identified by position, columns are fixed:
//!
//! ```text
//! name | time (%.2f) | faults | refusals | penalty (read-only)
//! ```
//!
//! One user action ("計算") accepts the edited table and then derives
//! `penalty = faults * 5 + refusals * 5`. Saving ("保存") writes a Parquet
//! snapshot of the whole table.

mod reconciler;
pub mod snapshot;
mod table;

pub use reconciler::TableReconciler;
pub use table::{ColumnSpec, ScoreRow, ScoreTable, COLUMNS, COLUMN_NAMES, PENALTY_PER_FAULT};
