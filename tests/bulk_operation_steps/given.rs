//! Given steps for bulk operation BDD scenarios.

use super::world::{BulkWorld, run_async};
use eyre::WrapErr;
use rstest_bdd_macros::given;
use tasktrack::task::{
    domain::{BoardEvent, TaskPriority, TaskStatus},
    services::CreateTaskRequest,
};

fn create(world: &mut BulkWorld, request: CreateTaskRequest) -> Result<(), eyre::Report> {
    run_async(world.service.create_task(&mut world.board, request))
        .wrap_err("create task for bulk scenario")?;
    Ok(())
}

fn request_for(world: &BulkWorld, title: String, priority: &str) -> Result<CreateTaskRequest, eyre::Report> {
    let parsed = TaskPriority::try_from(priority)
        .map_err(|err| eyre::eyre!("invalid priority in scenario: {err}"))?;
    let request = CreateTaskRequest::new(title).with_priority(parsed);
    Ok(if parsed.is_high() {
        request.with_assignee(world.assignee)
    } else {
        request
    })
}

#[given(r#"a "{priority}" priority task "{title}""#)]
fn task_with_priority(world: &mut BulkWorld, priority: String, title: String) -> Result<(), eyre::Report> {
    let request = request_for(world, title, &priority)?;
    create(world, request)
}

#[given(r#"a "{priority}" priority task "{title}" already started"#)]
fn started_task_with_priority(
    world: &mut BulkWorld,
    priority: String,
    title: String,
) -> Result<(), eyre::Report> {
    let request = request_for(world, title, &priority)?.with_status(TaskStatus::InProgress);
    create(world, request)
}

#[given("every visible task is selected")]
fn every_visible_task_selected(world: &mut BulkWorld) {
    let visible = world.board.visible_task_ids();
    world.board.apply(BoardEvent::AllSelected(visible));
}
