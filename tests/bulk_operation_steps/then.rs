//! Then steps for bulk operation BDD scenarios.

use super::world::{BulkWorld, run_async};
use rstest_bdd_macros::then;
use tasktrack::task::{domain::TaskStatus, ports::TaskRepository};

#[then(r#"the confirmation asked "{prompt}""#)]
fn confirmation_asked(world: &BulkWorld, prompt: String) -> Result<(), eyre::Report> {
    match world.asked_prompt.as_deref() {
        Some(asked) if asked == prompt => Ok(()),
        other => Err(eyre::eyre!("expected prompt {prompt:?}, got {other:?}")),
    }
}

#[then("no confirmation was asked")]
fn no_confirmation_asked(world: &BulkWorld) -> Result<(), eyre::Report> {
    if let Some(asked) = &world.asked_prompt {
        return Err(eyre::eyre!("unexpected confirmation prompt {asked:?}"));
    }
    Ok(())
}

#[then(r#"the bulk delete reports "{message}""#)]
fn bulk_delete_reports(world: &BulkWorld, message: String) -> Result<(), eyre::Report> {
    let result = world
        .delete_result
        .as_ref()
        .ok_or_else(|| eyre::eyre!("missing bulk delete result"))?;
    let outcome = result
        .as_ref()
        .map_err(|err| eyre::eyre!("bulk delete failed: {err}"))?;

    if outcome.to_string() != message {
        return Err(eyre::eyre!("expected {message:?}, got {:?}", outcome.to_string()));
    }
    Ok(())
}

#[then(r#"the bulk status change reports "{message}""#)]
fn bulk_status_change_reports(world: &BulkWorld, message: String) -> Result<(), eyre::Report> {
    let result = world
        .status_result
        .as_ref()
        .ok_or_else(|| eyre::eyre!("missing bulk status result"))?;
    let outcome = result
        .as_ref()
        .map_err(|err| eyre::eyre!("bulk status change failed: {err}"))?;

    if outcome.to_string() != message {
        return Err(eyre::eyre!("expected {message:?}, got {:?}", outcome.to_string()));
    }
    Ok(())
}

#[then(r#"the remaining tasks are "{titles}""#)]
fn remaining_tasks(world: &BulkWorld, titles: String) -> Result<(), eyre::Report> {
    let expected: Vec<&str> = titles.split(", ").collect();
    let on_board: Vec<&str> = world
        .board
        .tasks()
        .iter()
        .map(|task| task.title().as_str())
        .collect();
    let stored = run_async(world.store.fetch_all())
        .map_err(|err| eyre::eyre!("fetch stored tasks: {err}"))?;
    let in_store: Vec<&str> = stored.iter().map(|task| task.title().as_str()).collect();

    if on_board != expected || in_store != expected {
        return Err(eyre::eyre!(
            "expected {expected:?}, board has {on_board:?}, store has {in_store:?}"
        ));
    }
    Ok(())
}

#[then(r#"task "{title}" has status "{status}""#)]
fn task_has_status(world: &BulkWorld, title: String, status: String) -> Result<(), eyre::Report> {
    let expected = TaskStatus::try_from(status.as_str())
        .map_err(|err| eyre::eyre!("invalid expected status in scenario: {err}"))?;
    let actual = world.task_titled(&title)?.status();

    if actual != expected {
        return Err(eyre::eyre!(
            "expected status {}, found {}",
            expected.as_str(),
            actual.as_str()
        ));
    }
    Ok(())
}

#[then("the selection is empty")]
fn selection_is_empty(world: &BulkWorld) -> Result<(), eyre::Report> {
    if !world.board.selection().is_empty() {
        return Err(eyre::eyre!(
            "expected empty selection, found {} task(s)",
            world.board.selection().len()
        ));
    }
    Ok(())
}
