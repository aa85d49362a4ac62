//! Then steps for task status transition BDD scenarios.

use super::world::StatusWorld;
use rstest_bdd_macros::then;
use tasktrack::task::{domain::TaskStatus, services::TaskWorkflowError};

#[then(r#"task "{title}" has status "{status}""#)]
fn task_has_status(world: &StatusWorld, title: String, status: String) -> Result<(), eyre::Report> {
    let expected = TaskStatus::try_from(status.as_str())
        .map_err(|err| eyre::eyre!("invalid expected status in scenario: {err}"))?;
    let task = world.task_titled(&title)?;

    if task.status() != expected {
        return Err(eyre::eyre!(
            "expected status {}, found {}",
            expected.as_str(),
            task.status().as_str()
        ));
    }
    Ok(())
}

#[then(r#"the move fails with "{message}""#)]
fn move_fails_with(world: &StatusWorld, message: String) -> Result<(), eyre::Report> {
    let result = world
        .last_move_result
        .as_ref()
        .ok_or_else(|| eyre::eyre!("missing move result"))?;

    match result {
        Err(TaskWorkflowError::Domain(err)) if err.to_string() == message => Ok(()),
        other => Err(eyre::eyre!("expected rejection {message:?}, got {other:?}")),
    }
}

#[then(r#"the task list order is "{titles}""#)]
fn task_list_order(world: &StatusWorld, titles: String) -> Result<(), eyre::Report> {
    let expected: Vec<&str> = titles.split(", ").collect();
    let actual: Vec<&str> = world
        .board
        .tasks()
        .iter()
        .map(|task| task.title().as_str())
        .collect();

    if actual != expected {
        return Err(eyre::eyre!("expected order {expected:?}, found {actual:?}"));
    }
    Ok(())
}
