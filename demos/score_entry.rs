//! Score Entry Demo
//!
//! Run with: `cargo run --example score_entry`
//!
//! Walks one session through the score grid: seed, edit, compute, save,
//! and restore from the snapshot in a second session.

use agility_compe::app::{Action, App, ScoreView, View};
use agility_compe::auth::MemoryAuthService;
use agility_compe::config::Config;
use agility_compe::registry::MemoryRecordStore;
use agility_compe::score::ScoreTable;
use agility_compe::session::SessionId;
use anyhow::{bail, Context};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()))
        .init();

    println!("=== Score Entry Demo ===\n");

    let config = Config::from_env().context("loading configuration")?;
    let snapshot = config.snapshot_path.clone();
    let app = App::new(config, MemoryAuthService::new(), MemoryRecordStore::new());
    let session = SessionId::new("demo-session");

    let view = scores(app.handle(&session, Action::ShowScores).await)?;
    println!("1. Seeded table");
    print_table(&view.table);

    let mut candidate = view.table;
    if let Some(row) = candidate.row_mut(0) {
        row.time = 12.34;
        row.faults = 2;
        row.refusals = 1;
    }
    if let Some(row) = candidate.row_mut(2) {
        row.time = 38.0;
        row.refusals = 3;
    }

    let view = scores(app.handle(&session, Action::ComputeScores(candidate)).await)?;
    println!("2. After 計算");
    print_table(&view.table);

    let view = scores(app.handle(&session, Action::SaveScores).await)?;
    println!(
        "3. 保存 -> {} ({})",
        snapshot.display(),
        view.flash.or(view.error).unwrap_or_default()
    );

    let other = SessionId::new("demo-session-2");
    let view = scores(app.handle(&other, Action::LoadScores).await)?;
    println!("\n4. Restored in a new session");
    print_table(&view.table);

    app.end_session(&session);
    app.end_session(&other);
    println!("Demo completed successfully!");
    Ok(())
}

fn scores(view: View) -> anyhow::Result<ScoreView> {
    match view {
        View::Scores(v) => Ok(v),
        other => bail!("unexpected page {:?}", other.page()),
    }
}

fn print_table(table: &ScoreTable) {
    println!("   {:<12} {:>8} {:>6} {:>6} {:>6}", "犬名", "タイム", "失敗", "拒絶", "減点");
    for row in table.rows() {
        println!(
            "   {:<12} {:>8} {:>6} {:>6} {:>6}",
            row.name,
            row.display_time(),
            row.faults,
            row.refusals,
            row.penalty
        );
    }
    println!();
}
