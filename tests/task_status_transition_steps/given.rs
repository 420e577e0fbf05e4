//! Given steps for task status transition BDD scenarios.

use super::world::{TaskTransitionWorld, run_async};
use crate::test_helpers::request;
use eyre::WrapErr;
use rstest_bdd_macros::given;

#[given(r#"a "{priority}" priority task titled "{title}" due in {days:i64} days"#)]
fn pending_task(
    world: &mut TaskTransitionWorld,
    priority: String,
    title: String,
    days: i64,
) -> Result<(), eyre::Report> {
    let base = request(&title, days).with_priority(priority);
    let created = run_async(world.service.create_task(base.clone()))
        .wrap_err("create task for transition scenario")?;
    world.base_request = Some(base);
    world.task = Some(created);
    Ok(())
}

#[given(r#"the task status has been changed to "{status}""#)]
fn task_status_has_been_changed(
    world: &mut TaskTransitionWorld,
    status: String,
) -> Result<(), eyre::Report> {
    let id = world.created_task()?.id();
    let update = world.request_with_status(&status)?;
    let updated = run_async(world.service.update_task(id, update))
        .wrap_err("advance task status in scenario setup")?;
    world.task = Some(updated);
    Ok(())
}

#[given("a day has passed")]
fn a_day_has_passed(world: &mut TaskTransitionWorld) {
    world.clock.advance_days(1);
}
