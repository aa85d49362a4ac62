//! In-memory integration tests draining dispatcher completions into a board.

use std::sync::Arc;

use super::helpers::{Team, seeded_store, stored_task, team};
use eyre::{ensure, eyre};
use rstest::rstest;
use tasktrack::task::{
    domain::{BoardEvent, NewTask, TaskBoard, TaskPatch, TaskPriority, TaskStatus},
    services::{TaskRequestDispatcher, WorkflowConfig},
};

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn rapid_status_edits_settle_on_latest(team: Team) -> eyre::Result<()> {
    let seeded = stored_task("toggle", TaskStatus::Todo, TaskPriority::Low, None)?;
    let store = seeded_store(&team, vec![seeded.clone()]);
    let (dispatcher, mut completions) =
        TaskRequestDispatcher::new(Arc::clone(&store), &WorkflowConfig::default());
    let mut board = TaskBoard::new();

    dispatcher.fetch_tasks();
    board.apply(BoardEvent::FetchStarted);
    let loaded = completions.recv().await.ok_or_else(|| eyre!("channel closed"))?;
    if let Some(event) = dispatcher.accept(loaded) {
        board.apply(event);
    }
    ensure!(!board.is_loading());
    ensure!(board.tasks().len() == 1);

    dispatcher.update_task(seeded.id(), TaskPatch::status(TaskStatus::InProgress));
    let stale = completions.recv().await.ok_or_else(|| eyre!("channel closed"))?;
    let latest = dispatcher.update_task(seeded.id(), TaskPatch::status(TaskStatus::Todo));
    let current = completions.recv().await.ok_or_else(|| eyre!("channel closed"))?;

    // Deliver out of order: the newest response first.
    for completion in [current, stale] {
        if let Some(event) = dispatcher.accept(completion) {
            board.apply(event);
        }
    }

    ensure!(!dispatcher.is_pending(latest));
    ensure!(board.find(seeded.id()).map(|task| task.status()) == Some(TaskStatus::Todo));
    Ok(())
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn created_tasks_all_land_on_board(team: Team) -> eyre::Result<()> {
    let store = seeded_store(&team, Vec::new());
    let (dispatcher, mut completions) =
        TaskRequestDispatcher::new(Arc::clone(&store), &WorkflowConfig::default());
    let mut board = TaskBoard::new();

    for title in ["one", "two", "three"] {
        dispatcher.create_task(NewTask::new(title)?);
    }
    for _ in 0..3 {
        let completion = completions.recv().await.ok_or_else(|| eyre!("channel closed"))?;
        if let Some(event) = dispatcher.accept(completion) {
            board.apply(event);
        }
    }

    ensure!(board.tasks().len() == 3);
    Ok(())
}
