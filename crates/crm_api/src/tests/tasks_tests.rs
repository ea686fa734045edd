use shared::error::ErrorCode;

use super::*;
use crate::seed;

fn draft(title: &str, column: BoardColumn) -> TaskDraft {
    TaskDraft {
        title: title.into(),
        description: "Details".into(),
        category: TaskCategory::Meeting,
        priority: TaskPriority::Medium,
        column,
    }
}

#[tokio::test]
async fn board_lists_four_lanes_in_order() {
    let store = TaskStore::new(seed::tasks());
    let board = store.board(BoardFilter::default()).await;
    let columns: Vec<BoardColumn> = board.lanes.iter().map(|lane| lane.column).collect();
    assert_eq!(columns, BoardColumn::ALL.to_vec());
    assert_eq!(board.lanes[0].title, "To do");
    let counts: Vec<usize> = board.lanes.iter().map(|lane| lane.tasks.len()).collect();
    assert_eq!(counts, vec![2, 4, 2, 3]);
}

#[tokio::test]
async fn board_filters_by_category_and_priority() {
    let store = TaskStore::new(seed::tasks());
    let board = store
        .board(BoardFilter {
            category: Some(TaskCategory::FollowUp),
            priority: Some(TaskPriority::Medium),
        })
        .await;
    let titles: Vec<&str> = board
        .lanes
        .iter()
        .flat_map(|lane| lane.tasks.iter().map(|task| task.title.as_str()))
        .collect();
    assert_eq!(titles, vec!["Prepare project kickoff", "Schedule sprint review"]);
}

#[tokio::test]
async fn every_subscriber_sees_mutations() {
    let store = TaskStore::new(seed::tasks());
    let mut first = store.subscribe();
    let mut second = store.subscribe();

    let task = store
        .add(draft("Quarterly review", BoardColumn::Todo))
        .await
        .expect("add");
    store
        .move_task(&task.id, BoardColumn::Done)
        .await
        .expect("move");

    for receiver in [&mut first, &mut second] {
        match receiver.recv().await.expect("added event") {
            TaskEvent::Added { task: added } => assert_eq!(added.id, task.id),
            other => panic!("unexpected event {other:?}"),
        }
        match receiver.recv().await.expect("moved event") {
            TaskEvent::Moved { id, column } => {
                assert_eq!(id, task.id);
                assert_eq!(column, BoardColumn::Done);
            }
            other => panic!("unexpected event {other:?}"),
        }
    }
}

#[tokio::test]
async fn added_task_leads_its_lane() {
    let store = TaskStore::new(seed::tasks());
    let task = store
        .add(draft("Fresh", BoardColumn::InReview))
        .await
        .expect("add");
    let board = store.board(BoardFilter::default()).await;
    let lane = board.lane(BoardColumn::InReview).expect("lane");
    assert_eq!(lane.tasks[0].id, task.id);
}

#[tokio::test]
async fn update_keeps_avatars_and_last_added() {
    let store = TaskStore::new(seed::tasks());
    let before = store.get("3").await.expect("task 3");
    let updated = store
        .update("3", draft("Implement screens v2", BoardColumn::InReview))
        .await
        .expect("update");
    assert_eq!(updated.title, "Implement screens v2");
    assert_eq!(updated.avatars, before.avatars);
    assert_eq!(updated.last_added, before.last_added);
}

#[tokio::test]
async fn deleting_missing_task_is_not_found() {
    let store = TaskStore::new(seed::tasks());
    let err = store.delete("404").await.expect_err("missing");
    assert!(matches!(err.code, ErrorCode::NotFound));
}

#[tokio::test]
async fn bulk_delete_publishes_each_removed_id() {
    let store = TaskStore::new(seed::tasks());
    let mut events = store.subscribe();
    for id in ["1", "2"] {
        store
            .apply(TableCommand::SelectRow {
                id: id.into(),
                checked: true,
            })
            .await
            .expect("select");
    }
    let view = store.apply(TableCommand::DeleteSelected).await.expect("delete");
    assert_eq!(view.total_rows, 9);

    let mut deleted = Vec::new();
    for _ in 0..2 {
        if let TaskEvent::Deleted { id } = events.recv().await.expect("event") {
            deleted.push(id);
        }
    }
    deleted.sort();
    assert_eq!(deleted, vec!["1".to_string(), "2".to_string()]);
}

#[tokio::test]
async fn replace_all_swaps_the_board() {
    let store = TaskStore::new(seed::tasks());
    let mut events = store.subscribe();
    store.replace_all(Vec::new()).await;
    assert!(store.snapshot().await.is_empty());
    assert!(matches!(
        events.recv().await.expect("event"),
        TaskEvent::Replaced { tasks } if tasks.is_empty()
    ));
}
