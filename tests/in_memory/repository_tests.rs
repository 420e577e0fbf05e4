//! In-memory repository contract tests.

use chrono::NaiveDate;
use tasktrack::task::{
    adapters::memory::InMemoryTaskRepository,
    domain::{NewTask, PageRequest, TaskFilter, TaskId, TaskPriority, TaskStatus},
    ports::{TaskRepository, TaskRepositoryError},
};
use rstest::{fixture, rstest};

use crate::test_helpers::days_from_start;

#[fixture]
fn repository() -> InMemoryTaskRepository {
    InMemoryTaskRepository::new()
}

fn new_task(title: &str, priority: TaskPriority, status: TaskStatus, due: NaiveDate) -> NewTask {
    NewTask {
        title: title.to_owned(),
        description: None,
        priority,
        status,
        due_date: due,
        completed_at: None,
    }
}

#[rstest]
#[tokio::test]
async fn inserted_tasks_receive_ascending_identifiers(repository: InMemoryTaskRepository) {
    let first = repository
        .insert(&new_task("a", TaskPriority::Low, TaskStatus::Pending, days_from_start(1)))
        .await
        .expect("first insert");
    let second = repository
        .insert(&new_task("b", TaskPriority::Low, TaskStatus::Pending, days_from_start(1)))
        .await
        .expect("second insert");

    assert!(second.id() > first.id());
    assert_eq!(
        repository.find_by_id(first.id()).await.expect("lookup"),
        Some(first)
    );
}

#[rstest]
#[tokio::test]
async fn identifiers_are_not_reused_after_delete(repository: InMemoryTaskRepository) {
    let first = repository
        .insert(&new_task("a", TaskPriority::Low, TaskStatus::Pending, days_from_start(1)))
        .await
        .expect("insert");
    assert!(repository.delete(first.id()).await.expect("delete"));

    let second = repository
        .insert(&new_task("b", TaskPriority::Low, TaskStatus::Pending, days_from_start(1)))
        .await
        .expect("insert after delete");
    assert_ne!(second.id(), first.id());
}

#[rstest]
#[tokio::test]
async fn counts_and_lists_respect_filters(repository: InMemoryTaskRepository) {
    for (title, priority, status) in [
        ("one", TaskPriority::High, TaskStatus::Pending),
        ("two", TaskPriority::High, TaskStatus::InProgress),
        ("three", TaskPriority::Low, TaskStatus::Pending),
        ("four", TaskPriority::High, TaskStatus::Pending),
    ] {
        repository
            .insert(&new_task(title, priority, status, days_from_start(2)))
            .await
            .expect("insert");
    }

    let high_pending = TaskFilter::high_priority_pending();
    assert_eq!(repository.count(&high_pending).await.expect("count"), 2);

    let listed = repository
        .list(&high_pending, PageRequest::default())
        .await
        .expect("list");
    let titles: Vec<&str> = listed.iter().map(|task| task.title()).collect();
    assert_eq!(titles, vec!["one", "four"]);

    let low = TaskFilter::all().with_priority(TaskPriority::Low);
    assert_eq!(repository.count(&low).await.expect("count"), 1);
}

#[rstest]
#[tokio::test]
async fn overdue_filter_uses_reference_date_and_skips_completed(
    repository: InMemoryTaskRepository,
) {
    repository
        .insert(&new_task("late", TaskPriority::Low, TaskStatus::Pending, days_from_start(1)))
        .await
        .expect("insert");
    repository
        .insert(&new_task("done", TaskPriority::Low, TaskStatus::Completed, days_from_start(1)))
        .await
        .expect("insert");
    repository
        .insert(&new_task("future", TaskPriority::Low, TaskStatus::Pending, days_from_start(9)))
        .await
        .expect("insert");

    let overdue = TaskFilter::all().overdue_as_of(days_from_start(5));
    let listed = repository
        .list(&overdue, PageRequest::default())
        .await
        .expect("list");

    assert_eq!(listed.len(), 1);
    assert_eq!(listed.first().map(|task| task.title()), Some("late"));
}

#[rstest]
#[tokio::test]
async fn paging_skips_earlier_pages(repository: InMemoryTaskRepository) {
    for index in 0..7 {
        repository
            .insert(&new_task(
                &format!("task {index}"),
                TaskPriority::Medium,
                TaskStatus::Pending,
                days_from_start(3),
            ))
            .await
            .expect("insert");
    }

    let page = PageRequest::new(2, 3).expect("valid page");
    let listed = repository
        .list(&TaskFilter::all(), page)
        .await
        .expect("list");
    let titles: Vec<&str> = listed.iter().map(|task| task.title()).collect();
    assert_eq!(titles, vec!["task 3", "task 4", "task 5"]);

    let beyond = PageRequest::new(4, 3).expect("valid page");
    assert!(
        repository
            .list(&TaskFilter::all(), beyond)
            .await
            .expect("list")
            .is_empty()
    );
}

#[rstest]
#[tokio::test]
async fn update_of_missing_task_reports_not_found(repository: InMemoryTaskRepository) {
    let task = new_task("ghost", TaskPriority::Low, TaskStatus::Pending, days_from_start(1))
        .into_task(TaskId::new(404));

    let result = repository.update(&task).await;

    assert!(matches!(
        result,
        Err(TaskRepositoryError::NotFound(id)) if id == TaskId::new(404)
    ));
}

#[rstest]
#[tokio::test]
async fn delete_of_missing_task_returns_false(repository: InMemoryTaskRepository) {
    assert!(!repository.delete(TaskId::new(1)).await.expect("delete"));
}
