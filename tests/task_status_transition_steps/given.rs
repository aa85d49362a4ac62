//! Given steps for task status transition BDD scenarios.

use super::world::{StatusWorld, run_async};
use eyre::WrapErr;
use rstest_bdd_macros::given;
use tasktrack::task::{domain::TaskStatus, services::CreateTaskRequest};

#[given(r#"a task "{title}" in status "{status}""#)]
fn task_in_status(world: &mut StatusWorld, title: String, status: String) -> Result<(), eyre::Report> {
    let initial = TaskStatus::try_from(status.as_str())
        .map_err(|err| eyre::eyre!("invalid status in scenario: {err}"))?;
    run_async(
        world
            .service
            .create_task(&mut world.board, CreateTaskRequest::new(title).with_status(initial)),
    )
    .wrap_err("create task for transition scenario")?;
    Ok(())
}
