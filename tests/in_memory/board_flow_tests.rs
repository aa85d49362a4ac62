//! In-memory integration tests for board loading, filtering and editing.

use super::helpers::{Team, seeded_store, service_for, stored_task, team};
use eyre::ensure;
use rstest::rstest;
use tasktrack::task::{
    domain::{
        BoardEvent, BulkDeleteOutcome, BulkStatusOutcome, FilterPatch, StatusCounts, TaskBoard,
        TaskPriority, TaskStatus,
    },
    services::{EditTaskRequest, TaskWorkflowError},
};

fn titles(board: &TaskBoard) -> Vec<String> {
    board
        .visible_tasks()
        .iter()
        .map(|task| task.title().as_str().to_owned())
        .collect()
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn loaded_board_filters_counts_and_names_assignees(team: Team) -> eyre::Result<()> {
    let store = seeded_store(
        &team,
        vec![
            stored_task("Draft roadmap", TaskStatus::Todo, TaskPriority::Medium, Some(team.alice))?,
            stored_task("Fix login", TaskStatus::InProgress, TaskPriority::High, Some(team.bob))?,
            stored_task("Roadmap review", TaskStatus::InProgress, TaskPriority::Low, None)?,
            stored_task("Publish notes", TaskStatus::Done, TaskPriority::Low, Some(team.alice))?,
        ],
    );
    let service = service_for(&store);
    let mut board = TaskBoard::new();

    service.load_tasks(&mut board).await?;
    service.load_users(&mut board).await?;

    ensure!(
        board.status_counts()
            == StatusCounts {
                all: 4,
                todo: 1,
                in_progress: 2,
                done: 1
            }
    );
    ensure!(board.statistics().completion_rate == 25);
    ensure!(board.statistics().high_priority == 1);

    board.apply(BoardEvent::FilterChanged(FilterPatch::search("ROADMAP")));
    ensure!(titles(&board) == vec!["Draft roadmap", "Roadmap review"]);

    board.apply(BoardEvent::FilterChanged(FilterPatch::status(TaskStatus::InProgress)));
    ensure!(titles(&board) == vec!["Roadmap review"]);

    board.apply(BoardEvent::FilterChanged(FilterPatch::search("")));
    board.apply(BoardEvent::FilterChanged(FilterPatch::assignee(Some(team.bob))));
    ensure!(titles(&board) == vec!["Fix login"]);

    let fix_login = board
        .visible_tasks()
        .first()
        .copied()
        .cloned()
        .ok_or_else(|| eyre::eyre!("filtered task missing"))?;
    ensure!(board.assignee_name(&fix_login) == Some("Bob"));
    Ok(())
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn select_all_then_bulk_operations_respect_rules(team: Team) -> eyre::Result<()> {
    let store = seeded_store(
        &team,
        vec![
            stored_task("a", TaskStatus::Todo, TaskPriority::Low, None)?,
            stored_task("b", TaskStatus::InProgress, TaskPriority::Medium, None)?,
            stored_task("c", TaskStatus::Done, TaskPriority::High, Some(team.alice))?,
        ],
    );
    let service = service_for(&store);
    let mut board = TaskBoard::new();
    service.load_tasks(&mut board).await?;

    board.apply(BoardEvent::AllSelected(board.visible_task_ids()));
    let moved = service
        .bulk_change_status(&mut board, TaskStatus::InProgress)
        .await?;
    ensure!(
        moved
            == BulkStatusOutcome::Applied {
                target: TaskStatus::InProgress,
                moved: 3,
                skipped: 0
            }
    );
    ensure!(board.tasks().iter().all(|task| task.status() == TaskStatus::InProgress));
    ensure!(board.selection().is_empty());

    board.apply(BoardEvent::AllSelected(board.visible_task_ids()));
    let deleted = service.bulk_delete(&mut board, &|_: &str| true).await?;
    ensure!(
        deleted
            == BulkDeleteOutcome::Deleted {
                deleted: 2,
                skipped: 1
            }
    );
    ensure!(
        deleted.skipped_notice().as_deref()
            == Some("1 high priority task(s) were skipped and not deleted.")
    );
    ensure!(titles(&board) == vec!["c"]);

    let mut reloaded = TaskBoard::new();
    service.load_tasks(&mut reloaded).await?;
    ensure!(titles(&reloaded) == vec!["c"]);
    Ok(())
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn edit_form_changes_persist_and_resort(team: Team) -> eyre::Result<()> {
    let store = seeded_store(
        &team,
        vec![
            stored_task("first", TaskStatus::Todo, TaskPriority::Low, None)?,
            stored_task("second", TaskStatus::Todo, TaskPriority::Low, None)?,
        ],
    );
    let service = service_for(&store);
    let mut board = TaskBoard::new();
    service.load_tasks(&mut board).await?;
    let first = board
        .tasks()
        .first()
        .map(|task| task.id())
        .ok_or_else(|| eyre::eyre!("seeded task missing"))?;

    let edited = service
        .edit_task(
            &mut board,
            first,
            EditTaskRequest::new()
                .with_status(TaskStatus::InProgress)
                .with_priority(TaskPriority::High)
                .with_assignee(Some(team.alice)),
        )
        .await?;

    ensure!(edited.updated_at() > edited.created_at());
    ensure!(titles(&board) == vec!["second", "first"]);

    let blank = service
        .edit_task(&mut board, first, EditTaskRequest::new().with_title("  "))
        .await;
    ensure!(matches!(blank, Err(TaskWorkflowError::Domain(_))));

    let mut reloaded = TaskBoard::new();
    service.load_tasks(&mut reloaded).await?;
    ensure!(reloaded.find(first) == Some(&edited));
    Ok(())
}
