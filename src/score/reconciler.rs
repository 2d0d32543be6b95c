//! Accept-then-derive reconciliation of edited score tables

use super::{snapshot, ScoreTable};
use crate::{Error, Result};
use std::path::Path;
use tracing::{debug, info};

/// Owns the authoritative score table for one session.
///
/// The table is created lazily from the seed names on first access and is
/// then only changed through [`reconcile`](Self::reconcile),
/// [`recompute_derived`](Self::recompute_derived),
/// [`restore`](Self::restore) and [`replace`](Self::replace).
///
/// # Example
///
/// ```rust
/// use agility_compe::score::TableReconciler;
///
/// let mut reconciler = TableReconciler::new(vec!["フェリーチェ".to_string()]);
/// let mut candidate = reconciler.present_editable_view();
/// if let Some(row) = candidate.row_mut(0) {
///     row.faults = 2;
///     row.refusals = 1;
/// }
///
/// reconciler.reconcile(&candidate)?;
/// reconciler.recompute_derived();
/// assert_eq!(reconciler.present_editable_view().rows()[0].penalty, 15);
/// # Ok::<(), agility_compe::Error>(())
/// ```
#[derive(Debug, Clone)]
pub struct TableReconciler {
    seed_names: Vec<String>,
    authoritative: Option<ScoreTable>,
}

impl TableReconciler {
    /// Create an uninitialized reconciler.
    #[must_use]
    pub const fn new(seed_names: Vec<String>) -> Self {
        Self {
            seed_names,
            authoritative: None,
        }
    }

    /// Whether the authoritative table exists yet.
    #[must_use]
    pub const fn is_initialized(&self) -> bool {
        self.authoritative.is_some()
    }

    /// Seed the table if it does not exist. No-op afterwards.
    pub fn initialize(&mut self) {
        self.table_mut();
    }

    fn table_mut(&mut self) -> &mut ScoreTable {
        let seed_names = &self.seed_names;
        self.authoritative.get_or_insert_with(|| {
            info!(rows = seed_names.len(), "Seeding score table");
            ScoreTable::seeded(seed_names)
        })
    }

    /// Current authoritative table, for the editor to copy and edit.
    pub fn present_editable_view(&mut self) -> ScoreTable {
        self.table_mut().clone()
    }

    /// Overwrite the editable columns of every row with the candidate's.
    ///
    /// The candidate's `penalty` is ignored; call
    /// [`recompute_derived`](Self::recompute_derived) afterwards.
    ///
    /// # Errors
    /// Returns [`Error::ShapeMismatch`] if the row counts differ; the
    /// authoritative table is left untouched
    pub fn reconcile(&mut self, candidate: &ScoreTable) -> Result<()> {
        let table = self.table_mut();
        if candidate.row_count() != table.row_count() {
            return Err(Error::ShapeMismatch {
                expected: table.row_count(),
                actual: candidate.row_count(),
            });
        }

        for (row, edited) in table.rows_mut().zip(candidate.rows()) {
            row.name.clone_from(&edited.name);
            row.time = edited.time;
            row.faults = edited.faults;
            row.refusals = edited.refusals;
        }

        debug!(rows = candidate.row_count(), "Reconciled candidate edits");
        Ok(())
    }

    /// Recompute `penalty` for every row from the accepted values.
    pub fn recompute_derived(&mut self) {
        for row in self.table_mut().rows_mut() {
            row.penalty = row.derived_penalty();
        }
        debug!("Recomputed penalties");
    }

    /// Write the full table (penalty included) to `destination`.
    ///
    /// A failed write leaves the in-memory table as it was.
    ///
    /// # Errors
    /// Returns [`Error::Persistence`] if the destination is unwritable
    pub fn persist<P: AsRef<Path>>(&mut self, destination: P) -> Result<()> {
        snapshot::write_parquet(self.table_mut(), destination.as_ref())?;
        info!(path = %destination.as_ref().display(), "Persisted score snapshot");
        Ok(())
    }

    /// Replace the authoritative table with a previously persisted snapshot.
    ///
    /// # Errors
    /// Returns [`Error::Load`] if the snapshot cannot be read; the current
    /// table is kept in that case
    pub fn restore<P: AsRef<Path>>(&mut self, source: P) -> Result<()> {
        let table = snapshot::read_parquet(source.as_ref())?;
        info!(path = %source.as_ref().display(), "Restored score snapshot");
        self.replace(table);
        Ok(())
    }

    /// Install `table` as the authoritative table, as-is.
    pub fn replace(&mut self, table: ScoreTable) {
        debug!(rows = table.row_count(), "Replaced score table");
        self.authoritative = Some(table);
    }
}
