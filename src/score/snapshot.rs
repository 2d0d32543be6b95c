//! Parquet snapshots of the score table

use super::ScoreTable;
use crate::{Error, Result};
use parquet::arrow::arrow_reader::ParquetRecordBatchReaderBuilder;
use parquet::arrow::ArrowWriter;
use std::fs::{self, File};
use std::path::{Path, PathBuf};

/// Write the full table, replacing any prior snapshot at `path`.
///
/// The table is written to a sibling `.tmp` file and renamed over `path`, so
/// a failed write leaves the previous snapshot in place.
///
/// # Errors
/// Returns [`Error::Persistence`] if the file cannot be created or written
pub fn write_parquet<P: AsRef<Path>>(table: &ScoreTable, path: P) -> Result<()> {
    let path = path.as_ref();
    let tmp = temp_path(path);

    if let Err(e) = write_file(table, &tmp) {
        fs::remove_file(&tmp).ok();
        return Err(e);
    }

    fs::rename(&tmp, path).map_err(|e| {
        fs::remove_file(&tmp).ok();
        Error::Persistence(format!("Failed to replace snapshot {}: {e}", path.display()))
    })
}

fn temp_path(path: &Path) -> PathBuf {
    let mut tmp = path.as_os_str().to_owned();
    tmp.push(".tmp");
    PathBuf::from(tmp)
}

fn write_file(table: &ScoreTable, path: &Path) -> Result<()> {
    let batch = table.to_record_batch()?;

    let file = File::create(path).map_err(|e| {
        Error::Persistence(format!("Failed to create snapshot {}: {e}", path.display()))
    })?;

    let mut writer = ArrowWriter::try_new(file, ScoreTable::schema(), None)
        .map_err(|e| Error::Persistence(format!("Failed to create Parquet writer: {e}")))?;
    writer
        .write(&batch)
        .map_err(|e| Error::Persistence(format!("Failed to write record batch: {e}")))?;
    writer
        .close()
        .map_err(|e| Error::Persistence(format!("Failed to finalize snapshot: {e}")))?;

    Ok(())
}

/// Read a snapshot written by [`write_parquet`].
///
/// # Errors
/// Returns [`Error::Load`] if the file cannot be read or has a foreign schema
pub fn read_parquet<P: AsRef<Path>>(path: P) -> Result<ScoreTable> {
    read_file(path.as_ref()).map_err(Error::load)
}

fn read_file(path: &Path) -> Result<ScoreTable> {
    let file = File::open(path).map_err(|e| {
        Error::Persistence(format!("Failed to open snapshot {}: {e}", path.display()))
    })?;

    let builder = ParquetRecordBatchReaderBuilder::try_new(file)
        .map_err(|e| Error::Persistence(format!("Failed to parse Parquet file: {e}")))?;

    let reader = builder
        .build()
        .map_err(|e| Error::Persistence(format!("Failed to create Parquet reader: {e}")))?;

    let mut batches = Vec::new();
    for batch in reader {
        let batch = batch
            .map_err(|e| Error::Persistence(format!("Failed to read record batch: {e}")))?;
        batches.push(batch);
    }

    ScoreTable::from_record_batches(&batches)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::score::ScoreRow;

    fn scratch_path(name: &str) -> std::path::PathBuf {
        std::env::temp_dir().join(format!("agility_{}_{name}.parquet", std::process::id()))
    }

    #[test]
    fn test_snapshot_round_trip() {
        let path = scratch_path("snapshot_round_trip");
        let mut table = ScoreTable::seeded(&["フェリーチェ", "カーロ"]);
        if let Some(row) = table.row_mut(1) {
            row.time = 33.01;
            row.refusals = 3;
            row.penalty = 15;
        }

        write_parquet(&table, &path).unwrap();
        let loaded = read_parquet(&path).unwrap();
        assert_eq!(loaded, table);

        std::fs::remove_file(&path).ok();
    }

    #[test]
    fn test_snapshot_overwrites_previous() {
        let path = scratch_path("snapshot_overwrite");
        write_parquet(&ScoreTable::seeded(&["a", "b", "c"]), &path).unwrap();
        write_parquet(&ScoreTable::new(vec![ScoreRow::seeded("only")]), &path).unwrap();

        let loaded = read_parquet(&path).unwrap();
        assert_eq!(loaded.row_count(), 1);
        assert_eq!(loaded.rows()[0].name, "only");

        std::fs::remove_file(&path).ok();
    }

    #[test]
    fn test_unwritable_destination() {
        let path = std::env::temp_dir()
            .join("agility_missing_dir_for_snapshot")
            .join("nested")
            .join("edited.parquet");
        let result = write_parquet(&ScoreTable::seeded(&["a"]), &path);
        assert!(matches!(result, Err(Error::Persistence(_))));
    }

    #[test]
    fn test_write_leaves_no_temp_file() {
        let path = scratch_path("snapshot_no_temp");
        write_parquet(&ScoreTable::seeded(&["a"]), &path).unwrap();

        assert!(path.exists());
        assert!(!temp_path(&path).exists());

        std::fs::remove_file(&path).ok();
    }

    #[test]
    fn test_failed_write_keeps_previous_snapshot() {
        let path = scratch_path("snapshot_keep_previous");
        write_parquet(&ScoreTable::seeded(&["kept"]), &path).unwrap();

        // A directory squatting on the temp path makes the write fail
        let tmp = temp_path(&path);
        std::fs::create_dir_all(&tmp).unwrap();
        let result = write_parquet(&ScoreTable::seeded(&["lost", "lost"]), &path);
        std::fs::remove_dir_all(&tmp).ok();

        assert!(matches!(result, Err(Error::Persistence(_))));
        let loaded = read_parquet(&path).unwrap();
        assert_eq!(loaded.rows()[0].name, "kept");
        assert_eq!(loaded.row_count(), 1);

        std::fs::remove_file(&path).ok();
    }

    #[test]
    fn test_read_missing_file() {
        let result = read_parquet(scratch_path("does_not_exist"));
        let error = result.unwrap_err();
        assert!(matches!(error, Error::Load(_)));
        assert!(error.to_string().contains("Failed to open snapshot"));
    }

    #[test]
    fn test_read_foreign_file() {
        let path = scratch_path("snapshot_foreign");
        std::fs::write(&path, b"not parquet").unwrap();

        assert!(matches!(read_parquet(&path), Err(Error::Load(_))));

        std::fs::remove_file(&path).ok();
    }
}
