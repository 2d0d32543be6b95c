//! Score table: fixed columns, positional rows, Arrow conversion

use crate::{Error, Result};
use arrow::array::{Array, ArrayRef, Float64Array, Int64Array, StringArray};
use arrow::datatypes::{DataType, Field, Schema, SchemaRef};
use arrow::record_batch::RecordBatch;
use serde::{Deserialize, Serialize};
use std::sync::Arc;

/// Points added per fault and per refusal.
pub const PENALTY_PER_FAULT: i64 = 5;

/// Column names in display order.
pub const COLUMN_NAMES: [&str; 5] = ["name", "time", "faults", "refusals", "penalty"];

/// How a column is presented to the score editor.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ColumnSpec {
    /// Column name
    pub name: &'static str,
    /// Header shown in the editor
    pub label: &'static str,
    /// Whether the editor accepts input for this column
    pub editable: bool,
    /// Input step for numeric columns
    pub step: Option<f64>,
    /// printf-style display format
    pub format: Option<&'static str>,
}

/// Editor layout, in the fixed column order.
pub const COLUMNS: [ColumnSpec; 5] = [
    ColumnSpec {
        name: "name",
        label: "犬名",
        editable: true,
        step: None,
        format: None,
    },
    ColumnSpec {
        name: "time",
        label: "タイム",
        editable: true,
        step: Some(0.01),
        format: Some("%.2f"),
    },
    ColumnSpec {
        name: "faults",
        label: "失敗",
        editable: true,
        step: Some(1.0),
        format: None,
    },
    ColumnSpec {
        name: "refusals",
        label: "拒絶",
        editable: true,
        step: Some(1.0),
        format: None,
    },
    ColumnSpec {
        name: "penalty",
        label: "減点",
        editable: false,
        step: None,
        format: Some("%d"),
    },
];

/// One competitor's run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScoreRow {
    /// Dog name
    pub name: String,
    /// Course time in seconds
    pub time: f64,
    /// Fault count
    pub faults: i64,
    /// Refusal count
    pub refusals: i64,
    /// Derived: `faults * 5 + refusals * 5`
    pub penalty: i64,
}

impl ScoreRow {
    /// Fresh row with zeroed scores.
    #[must_use]
    pub fn seeded(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            time: 0.0,
            faults: 0,
            refusals: 0,
            penalty: 0,
        }
    }

    /// Penalty implied by the current faults and refusals.
    #[must_use]
    pub const fn derived_penalty(&self) -> i64 {
        self.faults
            .saturating_mul(PENALTY_PER_FAULT)
            .saturating_add(self.refusals.saturating_mul(PENALTY_PER_FAULT))
    }

    /// Time rendered with two decimals.
    #[must_use]
    pub fn display_time(&self) -> String {
        format!("{:.2}", self.time)
    }
}

/// Rows addressed by position; the row count never changes after creation.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct ScoreTable {
    rows: Vec<ScoreRow>,
}

impl ScoreTable {
    /// Create a table from rows.
    #[must_use]
    pub fn new(rows: Vec<ScoreRow>) -> Self {
        Self { rows }
    }

    /// Zeroed rows, one per name.
    #[must_use]
    pub fn seeded<S: AsRef<str>>(names: &[S]) -> Self {
        Self {
            rows: names.iter().map(|n| ScoreRow::seeded(n.as_ref())).collect(),
        }
    }

    /// Number of rows.
    #[must_use]
    pub fn row_count(&self) -> usize {
        self.rows.len()
    }

    /// Whether the table has no rows.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// All rows.
    #[must_use]
    pub fn rows(&self) -> &[ScoreRow] {
        &self.rows
    }

    /// Row by position.
    #[must_use]
    pub fn row(&self, index: usize) -> Option<&ScoreRow> {
        self.rows.get(index)
    }

    /// Mutable row by position. Row count stays fixed.
    pub fn row_mut(&mut self, index: usize) -> Option<&mut ScoreRow> {
        self.rows.get_mut(index)
    }

    pub(crate) fn rows_mut(&mut self) -> impl Iterator<Item = &mut ScoreRow> {
        self.rows.iter_mut()
    }

    /// Arrow schema of a snapshot.
    #[must_use]
    pub fn schema() -> SchemaRef {
        Arc::new(Schema::new(vec![
            Field::new("name", DataType::Utf8, false),
            Field::new("time", DataType::Float64, false),
            Field::new("faults", DataType::Int64, false),
            Field::new("refusals", DataType::Int64, false),
            Field::new("penalty", DataType::Int64, false),
        ]))
    }

    /// Convert to a single columnar batch.
    ///
    /// # Errors
    /// Returns error if Arrow rejects the columns
    pub fn to_record_batch(&self) -> Result<RecordBatch> {
        let name: ArrayRef = Arc::new(StringArray::from_iter_values(
            self.rows.iter().map(|r| r.name.as_str()),
        ));
        let time: ArrayRef = Arc::new(Float64Array::from_iter_values(
            self.rows.iter().map(|r| r.time),
        ));
        let faults: ArrayRef = Arc::new(Int64Array::from_iter_values(
            self.rows.iter().map(|r| r.faults),
        ));
        let refusals: ArrayRef = Arc::new(Int64Array::from_iter_values(
            self.rows.iter().map(|r| r.refusals),
        ));
        let penalty: ArrayRef = Arc::new(Int64Array::from_iter_values(
            self.rows.iter().map(|r| r.penalty),
        ));

        Ok(RecordBatch::try_new(
            Self::schema(),
            vec![name, time, faults, refusals, penalty],
        )?)
    }

    /// Rebuild from batches that carry the snapshot schema.
    ///
    /// # Errors
    /// Returns error if a batch's schema differs from [`ScoreTable::schema`]
    pub fn from_record_batches(batches: &[RecordBatch]) -> Result<Self> {
        let expected = Self::schema();
        let mut rows = Vec::new();

        for batch in batches {
            if batch.schema().fields() != expected.fields() {
                return Err(Error::Persistence(format!(
                    "Schema mismatch: expected {:?}, got {:?}",
                    expected.fields(),
                    batch.schema().fields()
                )));
            }

            let name = column::<StringArray>(batch, 0)?;
            let time = column::<Float64Array>(batch, 1)?;
            let faults = column::<Int64Array>(batch, 2)?;
            let refusals = column::<Int64Array>(batch, 3)?;
            let penalty = column::<Int64Array>(batch, 4)?;

            for i in 0..batch.num_rows() {
                rows.push(ScoreRow {
                    name: name.value(i).to_string(),
                    time: time.value(i),
                    faults: faults.value(i),
                    refusals: refusals.value(i),
                    penalty: penalty.value(i),
                });
            }
        }

        Ok(Self { rows })
    }
}

fn column<T: Array + 'static>(batch: &RecordBatch, index: usize) -> Result<&T> {
    batch
        .column(index)
        .as_any()
        .downcast_ref::<T>()
        .ok_or_else(|| {
            Error::Persistence(format!(
                "Column '{}' has unexpected type {:?}",
                COLUMN_NAMES[index],
                batch.column(index).data_type()
            ))
        })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> ScoreTable {
        ScoreTable::new(vec![
            ScoreRow {
                name: "フェリーチェ".to_string(),
                time: 12.34,
                faults: 2,
                refusals: 1,
                penalty: 15,
            },
            ScoreRow::seeded("カーロ"),
        ])
    }

    #[test]
    fn test_seeded_rows_are_zeroed() {
        let table = ScoreTable::seeded(&["a", "b", "c"]);
        assert_eq!(table.row_count(), 3);
        assert!(table.rows().iter().all(|r| r.penalty == 0 && r.faults == 0));
    }

    #[test]
    fn test_derived_penalty() {
        let mut row = ScoreRow::seeded("x");
        row.faults = 2;
        row.refusals = 1;
        assert_eq!(row.derived_penalty(), 15);
    }

    #[test]
    fn test_display_time_two_decimals() {
        let mut row = ScoreRow::seeded("x");
        row.time = 7.5;
        assert_eq!(row.display_time(), "7.50");
    }

    #[test]
    fn test_columns_in_fixed_order() {
        let names: Vec<_> = COLUMNS.iter().map(|c| c.name).collect();
        assert_eq!(names, COLUMN_NAMES);
        assert!(!COLUMNS[4].editable);
        assert!(COLUMNS[..4].iter().all(|c| c.editable));
    }

    #[test]
    fn test_record_batch_conversion() {
        let table = sample();
        let batch = table.to_record_batch().unwrap();

        assert_eq!(batch.num_rows(), 2);
        assert_eq!(batch.num_columns(), 5);
        assert_eq!(batch.schema(), ScoreTable::schema());

        let back = ScoreTable::from_record_batches(&[batch]).unwrap();
        assert_eq!(back, table);
    }

    #[test]
    fn test_from_record_batches_rejects_foreign_schema() {
        let schema = Arc::new(Schema::new(vec![Field::new(
            "different_field",
            DataType::Int64,
            false,
        )]));
        let batch = RecordBatch::try_new(
            schema,
            vec![Arc::new(Int64Array::from(vec![1, 2, 3]))],
        )
        .unwrap();

        let result = ScoreTable::from_record_batches(&[batch]);
        assert!(result.unwrap_err().to_string().contains("Schema mismatch"));
    }
}
