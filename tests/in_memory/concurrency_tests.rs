//! Quota enforcement under concurrent writers.

use tasktrack::task::{domain::TaskDomainError, services::TaskLifecycleError};
use rstest::rstest;
use tokio::task::JoinSet;

use crate::test_helpers::{memory_service, request};

#[rstest]
#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn concurrent_high_priority_creates_never_exceed_quota() {
    let (service, _clock) = memory_service();
    let mut writers = JoinSet::new();
    for index in 0..20 {
        let handle = service.clone();
        writers.spawn(async move { handle.create_task(request(&format!("race {index}"), 4)).await });
    }

    let mut accepted = 0_u32;
    let mut rejected = 0_u32;
    while let Some(joined) = writers.join_next().await {
        match joined.expect("writer task should not panic") {
            Ok(_) => accepted += 1,
            Err(TaskLifecycleError::Domain(TaskDomainError::HighPriorityQuotaExceeded {
                ..
            })) => rejected += 1,
            Err(other) => panic!("unexpected error: {other}"),
        }
    }

    assert_eq!(accepted, 5);
    assert_eq!(rejected, 15);
    let stats = service.get_stats().await.expect("stats");
    assert_eq!(stats.high_priority_pending, 5);
}

#[rstest]
#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn concurrent_completions_stamp_once() {
    let (service, _clock) = memory_service();
    let task = service
        .create_task(request("contended", 4).with_priority("low"))
        .await
        .expect("create");
    service
        .update_task(
            task.id(),
            request("contended", 4).with_priority("low").with_status("in_progress"),
        )
        .await
        .expect("start");

    let mut writers = JoinSet::new();
    for _ in 0..8 {
        let handle = service.clone();
        let id = task.id();
        writers.spawn(async move {
            handle
                .update_task(
                    id,
                    request("contended", 4).with_priority("low").with_status("completed"),
                )
                .await
        });
    }

    let mut completed = 0_u32;
    while let Some(joined) = writers.join_next().await {
        if joined.expect("writer task should not panic").is_ok() {
            completed += 1;
        }
    }

    assert_eq!(completed, 1);
}

#[rstest]
#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn stats_stay_partitioned_while_tasks_change() {
    let (service, _clock) = memory_service();
    let writer_service = service.clone();
    let writer = tokio::spawn(async move {
        for index in 0..500 {
            let title = format!("churn {index}");
            let task = writer_service
                .create_task(request(&title, 4).with_priority("low"))
                .await
                .expect("create");
            writer_service
                .update_task(
                    task.id(),
                    request(&title, 4).with_priority("low").with_status("in_progress"),
                )
                .await
                .expect("start");
        }
    });

    while !writer.is_finished() {
        let stats = service.get_stats().await.expect("stats");
        assert_eq!(
            stats.pending + stats.in_progress + stats.completed,
            stats.total,
            "status counts must partition the total: {stats:?}"
        );
        tokio::task::yield_now().await;
    }
    writer.await.expect("writer task should not panic");

    let settled = service.get_stats().await.expect("stats");
    assert_eq!(settled.total, 500);
    assert_eq!(settled.in_progress, 500);
}
