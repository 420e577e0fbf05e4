//! Service rules exercised over the `PostgreSQL` adapter.

use rstest::rstest;
use std::sync::Arc;
use tasktrack::task::{
    domain::{TaskDomainError, TaskStatus},
    services::{TaskLifecycleError, TaskLifecycleService},
};

use crate::postgres::helpers::{BoxError, RepositoryContext, context};
use crate::test_helpers::{TestClock, memory_service, request, start_date};

#[rstest]
#[ignore = "requires PostgreSQL; set TASKTRACK_TEST_DATABASE_URL"]
#[tokio::test(flavor = "multi_thread")]
async fn postgres_service_enforces_quota_and_transitions(
    #[future] context: Result<RepositoryContext, BoxError>,
) -> Result<(), BoxError> {
    let ctx = context.await?;
    let clock = Arc::new(TestClock::at_noon(start_date()));
    let service = TaskLifecycleService::new(Arc::clone(&ctx.repository), Arc::clone(&clock));

    let mut created = Vec::new();
    for index in 0..5 {
        created.push(service.create_task(request(&format!("urgent {index}"), 3)).await?);
    }
    let blocked = service.create_task(request("sixth", 3)).await;
    assert!(matches!(
        blocked,
        Err(TaskLifecycleError::Domain(
            TaskDomainError::HighPriorityQuotaExceeded { .. }
        ))
    ));

    let first = created.first().ok_or("expected created tasks")?;
    service
        .update_task(first.id(), request("urgent 0", 3).with_status("in_progress"))
        .await?;
    let done = service
        .update_task(first.id(), request("urgent 0", 3).with_status("completed"))
        .await?;
    assert_eq!(done.status(), TaskStatus::Completed);
    assert!(done.completed_at().is_some());

    let stats = service.get_stats().await?;
    assert_eq!(stats.total, 5);
    assert_eq!(stats.completed, 1);
    assert_eq!(stats.high_priority_pending, 4);
    Ok(())
}

#[rstest]
#[ignore = "requires PostgreSQL; set TASKTRACK_TEST_DATABASE_URL"]
#[tokio::test(flavor = "multi_thread")]
async fn postgres_stats_match_in_memory_stats_as_time_passes(
    #[future] context: Result<RepositoryContext, BoxError>,
) -> Result<(), BoxError> {
    let ctx = context.await?;
    let pg_clock = Arc::new(TestClock::at_noon(start_date()));
    let postgres = TaskLifecycleService::new(Arc::clone(&ctx.repository), Arc::clone(&pg_clock));
    let (memory, memory_clock) = memory_service();

    for (title, priority, due_in) in [("a", "high", 1), ("b", "low", 2), ("c", "medium", 6)] {
        postgres
            .create_task(request(title, due_in).with_priority(priority))
            .await?;
        memory
            .create_task(request(title, due_in).with_priority(priority))
            .await?;
    }
    pg_clock.advance_days(3);
    memory_clock.advance_days(3);

    let from_postgres = postgres.get_stats().await?;
    let from_memory = memory.get_stats().await?;
    assert_eq!(from_postgres, from_memory);
    assert_eq!(from_postgres.overdue, 2);
    assert_eq!(from_postgres.high_priority_pending, 1);
    Ok(())
}
