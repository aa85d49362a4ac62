//! When steps for task status transition BDD scenarios.

use super::world::{StatusWorld, run_async};
use rstest_bdd_macros::when;
use tasktrack::task::domain::TaskStatus;

#[when(r#"task "{title}" is moved to "{status}""#)]
fn task_is_moved(world: &mut StatusWorld, title: String, status: String) -> Result<(), eyre::Report> {
    let target = TaskStatus::try_from(status.as_str())
        .map_err(|err| eyre::eyre!("invalid status in scenario: {err}"))?;
    let id = world.task_titled(&title)?.id();

    let result = run_async(world.service.change_status(&mut world.board, id, target));
    world.last_move_result = Some(result);
    Ok(())
}
