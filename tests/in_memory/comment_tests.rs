//! In-memory integration tests for task comments.

use std::sync::Arc;

use super::helpers::{Team, seeded_store, service_for, stored_task, team};
use eyre::ensure;
use rstest::rstest;
use tasktrack::task::{
    domain::{BoardEvent, TaskBoard, TaskPriority, TaskStatus},
    services::TaskCommentService,
};

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn comments_belong_to_their_task_and_vanish_with_it(team: Team) -> eyre::Result<()> {
    let discussed = stored_task("discussed", TaskStatus::Todo, TaskPriority::Low, None)?;
    let quiet = stored_task("quiet", TaskStatus::Todo, TaskPriority::Low, None)?;
    let store = seeded_store(&team, vec![discussed.clone(), quiet.clone()]);
    let comments = TaskCommentService::new(Arc::clone(&store));

    let first = comments.add(discussed.id(), team.alice, "Looks good").await?;
    comments.add(discussed.id(), team.bob, "Ship it").await?;
    comments.add(quiet.id(), team.bob, "Later").await?;

    let listed = comments.list(discussed.id()).await?;
    ensure!(listed.len() == 2);
    ensure!(listed.first() == Some(&first));
    ensure!(listed.iter().all(|comment| comment.task_id() == discussed.id()));

    let service = service_for(&store);
    let mut board = TaskBoard::new();
    service.load_tasks(&mut board).await?;
    board.apply(BoardEvent::AllSelected(vec![discussed.id(), quiet.id()]));
    service
        .bulk_delete(&mut board, &|_: &str| true)
        .await?;

    ensure!(comments.list(discussed.id()).await?.is_empty());
    ensure!(comments.list(quiet.id()).await?.is_empty());
    Ok(())
}
