//! When steps for bulk operation BDD scenarios.

use std::cell::RefCell;

use super::world::{BulkWorld, run_async};
use rstest_bdd_macros::when;
use tasktrack::task::domain::TaskStatus;

fn answer_bulk_delete(world: &mut BulkWorld, answer: bool) {
    let asked = RefCell::new(None);
    let confirmation = |prompt: &str| {
        asked.replace(Some(prompt.to_owned()));
        answer
    };

    let result = run_async(world.service.bulk_delete(&mut world.board, &confirmation));
    world.delete_result = Some(result);
    world.asked_prompt = asked.into_inner();
}

#[when("the user confirms the bulk delete")]
fn user_confirms_bulk_delete(world: &mut BulkWorld) {
    answer_bulk_delete(world, true);
}

#[when("the user declines the bulk delete")]
fn user_declines_bulk_delete(world: &mut BulkWorld) {
    answer_bulk_delete(world, false);
}

#[when(r#"the selected tasks are moved to "{status}""#)]
fn selected_tasks_moved(world: &mut BulkWorld, status: String) -> Result<(), eyre::Report> {
    let target = TaskStatus::try_from(status.as_str())
        .map_err(|err| eyre::eyre!("invalid status in scenario: {err}"))?;
    let result = run_async(world.service.bulk_change_status(&mut world.board, target));
    world.status_result = Some(result);
    Ok(())
}
