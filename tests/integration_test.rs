//! Integration test for the score entry workflow
//!
//! Tests the complete pipeline:
//! 1. Seed the session table
//! 2. Edit, reconcile, recompute
//! 3. Persist to Parquet and read back

use agility_compe::app::{Action, App, View};
use agility_compe::auth::MemoryAuthService;
use agility_compe::config::Config;
use agility_compe::messages;
use agility_compe::registry::MemoryRecordStore;
use agility_compe::score::{snapshot, ScoreRow, ScoreTable, TableReconciler};
use agility_compe::session::SessionId;
use std::path::PathBuf;

fn seeds() -> Vec<String> {
    vec![
        "フェリーチェ".to_string(),
        "カーロ".to_string(),
        "ディーノ".to_string(),
    ]
}

fn temp_snapshot(name: &str) -> PathBuf {
    std::env::temp_dir().join(format!("agility_it_{}_{name}.parquet", std::process::id()))
}

fn app_with_snapshot(path: PathBuf) -> App<MemoryAuthService, MemoryRecordStore> {
    let config = Config {
        snapshot_path: path,
        ..Config::default()
    };
    App::new(config, MemoryAuthService::new(), MemoryRecordStore::new())
}

fn score_view(view: View) -> agility_compe::app::ScoreView {
    match view {
        View::Scores(v) => v,
        other => panic!("expected score view, got {other:?}"),
    }
}

#[test]
fn test_end_to_end_penalty_scenario() {
    let mut reconciler = TableReconciler::new(seeds());
    reconciler.initialize();

    let seeded = reconciler.present_editable_view();
    assert_eq!(seeded.row_count(), 3);
    assert!(seeded.rows().iter().all(|r| r.penalty == 0));

    let mut candidate = seeded.clone();
    {
        let row = candidate.row_mut(0).expect("row 0");
        row.faults = 2;
        row.refusals = 1;
        row.time = 12.34;
    }

    reconciler.reconcile(&candidate).expect("reconcile");
    reconciler.recompute_derived();

    let table = reconciler.present_editable_view();
    assert_eq!(
        table.rows()[0],
        ScoreRow {
            name: "フェリーチェ".to_string(),
            time: 12.34,
            faults: 2,
            refusals: 1,
            penalty: 15,
        }
    );
    assert_eq!(table.rows()[0].display_time(), "12.34");
    assert_eq!(table.rows()[1], seeded.rows()[1]);
    assert_eq!(table.rows()[2], seeded.rows()[2]);
}

#[test]
fn test_persist_then_read_back() {
    let path = temp_snapshot("persist_read_back");
    let mut reconciler = TableReconciler::new(seeds());

    let mut candidate = reconciler.present_editable_view();
    candidate.row_mut(1).expect("row 1").faults = 3;
    candidate.row_mut(2).expect("row 2").time = 41.5;
    reconciler.reconcile(&candidate).expect("reconcile");
    reconciler.recompute_derived();

    reconciler.persist(&path).expect("persist");
    let expected = reconciler.present_editable_view();

    let loaded = snapshot::read_parquet(&path).expect("read back");
    assert_eq!(loaded, expected);
    assert_eq!(loaded.rows()[1].penalty, 15);

    let mut restored = TableReconciler::new(vec![]);
    restored.restore(&path).expect("restore");
    assert_eq!(restored.present_editable_view(), expected);

    std::fs::remove_file(&path).ok();
}

#[test]
fn test_snapshot_keeps_stale_penalty_as_is() {
    // Saving between accept and derive writes what the table holds
    let path = temp_snapshot("stale_penalty");
    let mut reconciler = TableReconciler::new(seeds());
    let mut candidate = reconciler.present_editable_view();
    candidate.row_mut(0).expect("row 0").faults = 1;
    reconciler.reconcile(&candidate).expect("reconcile");

    reconciler.persist(&path).expect("persist");
    let loaded = snapshot::read_parquet(&path).expect("read back");
    assert_eq!(loaded.rows()[0].faults, 1);
    assert_eq!(loaded.rows()[0].penalty, 0);

    std::fs::remove_file(&path).ok();
}

#[tokio::test]
async fn test_score_actions_through_app() {
    let path = temp_snapshot("app_actions");
    let app = app_with_snapshot(path.clone());
    let session = SessionId::new("scores-1");

    let view = score_view(app.handle(&session, Action::ShowScores).await);
    assert_eq!(view.table.row_count(), 3);
    assert_eq!(view.columns.len(), 5);

    let mut candidate = view.table;
    {
        let row = candidate.row_mut(0).expect("row 0");
        row.faults = 2;
        row.refusals = 1;
        row.time = 12.34;
        row.penalty = 999;
    }

    let view = score_view(app.handle(&session, Action::ComputeScores(candidate)).await);
    assert_eq!(view.error, None);
    assert_eq!(view.table.rows()[0].penalty, 15);

    let view = score_view(app.handle(&session, Action::SaveScores).await);
    assert_eq!(view.flash.as_deref(), Some(messages::SAVED));

    // Flash is shown once
    let view = score_view(app.handle(&session, Action::ShowScores).await);
    assert_eq!(view.flash, None);

    // A different session starts from the seed and can restore the snapshot
    let other = SessionId::new("scores-2");
    let view = score_view(app.handle(&other, Action::ShowScores).await);
    assert_eq!(view.table.rows()[0].penalty, 0);

    let view = score_view(app.handle(&other, Action::LoadScores).await);
    assert_eq!(view.flash.as_deref(), Some(messages::LOADED));
    assert_eq!(view.table.rows()[0].penalty, 15);

    std::fs::remove_file(&path).ok();
}

#[tokio::test]
async fn test_shape_mismatch_reported_inline() {
    let app = app_with_snapshot(temp_snapshot("shape_mismatch"));
    let session = SessionId::new("scores-3");
    let before = score_view(app.handle(&session, Action::ShowScores).await).table;

    let candidate = ScoreTable::seeded(&["only-one"]);
    let view = score_view(app.handle(&session, Action::ComputeScores(candidate)).await);

    assert_eq!(view.error.as_deref(), Some(messages::SCORE_SHAPE_MISMATCH));
    assert_eq!(view.table, before);
}

#[tokio::test]
async fn test_save_failure_keeps_table() {
    let bad = std::env::temp_dir()
        .join("agility_it_missing_dir")
        .join("edited.parquet");
    let app = app_with_snapshot(bad);
    let session = SessionId::new("scores-4");

    let mut candidate = score_view(app.handle(&session, Action::ShowScores).await).table;
    candidate.row_mut(2).expect("row 2").refusals = 2;
    let computed = score_view(app.handle(&session, Action::ComputeScores(candidate)).await).table;

    let view = score_view(app.handle(&session, Action::SaveScores).await);
    let error = view.error.expect("save should fail");
    assert!(error.starts_with(messages::SAVE_FAILED));
    assert_eq!(view.flash, None);
    assert_eq!(view.table, computed);
}

#[tokio::test]
async fn test_load_missing_snapshot_reports_load_failure() {
    let app = app_with_snapshot(temp_snapshot("never_written"));
    let session = SessionId::new("scores-5");

    let mut candidate = score_view(app.handle(&session, Action::ShowScores).await).table;
    candidate.row_mut(1).expect("row 1").faults = 1;
    let computed = score_view(app.handle(&session, Action::ComputeScores(candidate)).await).table;

    let view = score_view(app.handle(&session, Action::LoadScores).await);
    let error = view.error.expect("load should fail");
    assert!(error.starts_with(messages::LOAD_FAILED));
    assert!(!error.contains(messages::SAVE_FAILED));
    assert_eq!(view.flash, None);
    assert_eq!(view.table, computed);
}

#[tokio::test]
async fn test_load_foreign_schema_keeps_table() {
    use arrow::array::Int64Array;
    use arrow::datatypes::{DataType, Field, Schema};
    use arrow::record_batch::RecordBatch;
    use parquet::arrow::ArrowWriter;
    use std::sync::Arc;

    let path = temp_snapshot("foreign_schema");
    let schema = Arc::new(Schema::new(vec![Field::new("bib", DataType::Int64, false)]));
    let batch = RecordBatch::try_new(
        schema.clone(),
        vec![Arc::new(Int64Array::from(vec![1, 2, 3]))],
    )
    .expect("batch");
    let file = std::fs::File::create(&path).expect("create");
    let mut writer = ArrowWriter::try_new(file, schema, None).expect("writer");
    writer.write(&batch).expect("write");
    writer.close().expect("close");

    let app = app_with_snapshot(path.clone());
    let session = SessionId::new("scores-6");
    let before = score_view(app.handle(&session, Action::ShowScores).await).table;

    let view = score_view(app.handle(&session, Action::LoadScores).await);
    let error = view.error.expect("load should fail");
    assert!(error.starts_with(messages::LOAD_FAILED));
    assert_eq!(view.table, before);

    std::fs::remove_file(&path).ok();
}
