//! Integration tests over a file-backed task store.

use taskstore::{Error, TaskStatus, TaskStore};
use tempfile::TempDir;

fn open_store() -> (TempDir, TaskStore) {
    let dir = TempDir::new().unwrap();
    let store = TaskStore::open(dir.path().join("tasks.db")).unwrap();
    (dir, store)
}

#[test]
fn test_duplicate_username_leaves_one_row() {
    let (_dir, store) = open_store();

    store.users.create("alice").unwrap();
    let result = store.users.create("alice");
    assert!(matches!(result, Err(Error::DuplicateUsername(_))));

    assert_eq!(store.users.list().unwrap().len(), 1);
}

#[test]
fn test_assignment_visible_from_both_sides_exactly_once() {
    let (_dir, store) = open_store();

    let user_id = store.users.create("alice").unwrap();
    let task_id = store.tasks.create("Write report", "").unwrap();
    store.assignments.assign(user_id, task_id).unwrap();

    let tasks = store.assignments.tasks_for_user(user_id).unwrap();
    assert_eq!(tasks.iter().filter(|t| t.id == task_id).count(), 1);

    let users = store.assignments.users_for_task(task_id).unwrap();
    assert_eq!(users.iter().filter(|u| u.id == user_id).count(), 1);
}

#[test]
fn test_double_assign_fails_with_one_row() {
    let (_dir, store) = open_store();

    let user_id = store.users.create("alice").unwrap();
    let task_id = store.tasks.create("Write report", "").unwrap();

    store.assignments.assign(user_id, task_id).unwrap();
    assert!(matches!(
        store.assignments.assign(user_id, task_id),
        Err(Error::DuplicateAssignment { .. })
    ));
    assert_eq!(store.assignments.tasks_for_user(user_id).unwrap().len(), 1);
}

#[test]
fn test_deleting_user_removes_all_its_assignments() {
    let (_dir, store) = open_store();

    let user_id = store.users.create("alice").unwrap();
    let mut task_ids = Vec::new();
    for title in ["Write report", "Clean house", "Buy milk"] {
        let id = store.tasks.create(title, "").unwrap();
        store.assignments.assign(user_id, id).unwrap();
        task_ids.push(id);
    }

    assert!(store.users.delete(user_id).unwrap());

    assert!(store.assignments.tasks_for_user(user_id).unwrap().is_empty());
    for id in task_ids {
        // No task rows are removed by the user cascade.
        assert!(store.tasks.get(id).unwrap().is_some());
        assert!(store.assignments.users_for_task(id).unwrap().is_empty());
    }
}

#[test]
fn test_deleting_task_removes_all_its_assignments() {
    let (_dir, store) = open_store();

    let task_id = store.tasks.create("Write report", "").unwrap();
    let mut user_ids = Vec::new();
    for name in ["alice", "bob", "carol"] {
        let id = store.users.create(name).unwrap();
        store.assignments.assign(id, task_id).unwrap();
        user_ids.push(id);
    }

    assert!(store.tasks.delete(task_id).unwrap());

    assert!(store.assignments.users_for_task(task_id).unwrap().is_empty());
    for id in user_ids {
        assert!(store.users.get(id).unwrap().is_some());
        assert!(store.assignments.tasks_for_user(id).unwrap().is_empty());
    }
}

#[test]
fn test_status_update_preserves_other_fields() {
    let (_dir, store) = open_store();

    let id = store.tasks.create("Buy milk", "").unwrap();
    assert!(store.tasks.set_status(id, TaskStatus::Done).unwrap());

    let task = store.tasks.get(id).unwrap().unwrap();
    assert_eq!(task.status, TaskStatus::Done);
    assert_eq!(task.title, "Buy milk");
    assert_eq!(task.description, "");
}

#[test]
fn test_todo_listing_for_dispatcher() {
    let (_dir, store) = open_store();

    // The presentation layer lists open tasks by filtering on status.
    assert!(store.tasks.list_by_status(TaskStatus::Todo).unwrap().is_empty());

    let a = store.tasks.create("Write report", "").unwrap();
    let b = store.tasks.create("Clean house", "").unwrap();
    store.tasks.set_status(a, TaskStatus::Done).unwrap();

    let todo = store.tasks.list_by_status(TaskStatus::Todo).unwrap();
    assert_eq!(todo.len(), 1);
    assert_eq!(todo[0].id, b);
}

#[test]
fn test_full_scenario() {
    let (_dir, store) = open_store();

    let alice = store.users.create("alice").unwrap();
    let bob = store.users.create("bob").unwrap();
    assert_eq!(alice, 1);
    assert_eq!(bob, 2);

    let report = store.tasks.create("Write report", "").unwrap();
    let house = store.tasks.create("Clean house", "").unwrap();
    assert_eq!(report, 1);
    assert_eq!(house, 2);

    store.assignments.assign(alice, report).unwrap();
    store.assignments.assign(alice, house).unwrap();
    store.assignments.assign(bob, house).unwrap();

    let alice_tasks = store.assignments.tasks_for_user(alice).unwrap();
    let titles: Vec<&str> = alice_tasks.iter().map(|t| t.title.as_str()).collect();
    assert_eq!(titles, vec!["Write report", "Clean house"]);

    let house_users = store.assignments.users_for_task(house).unwrap();
    let names: Vec<&str> = house_users.iter().map(|u| u.username.as_str()).collect();
    assert_eq!(names, vec!["alice", "bob"]);

    store.tasks.delete(report).unwrap();
    let alice_tasks = store.assignments.tasks_for_user(alice).unwrap();
    assert_eq!(alice_tasks.len(), 1);
    assert_eq!(alice_tasks[0].id, house);
}

#[test]
fn test_foreign_keys_enforced_per_connection() {
    let dir = TempDir::new().unwrap();
    let store = TaskStore::open(dir.path().join("tasks.db")).unwrap();

    // An assignment to rows that do not exist must be rejected, which
    // only happens when the pragma is on for the acquired connection.
    assert!(matches!(
        store.assignments.assign(7, 7),
        Err(Error::ForeignKeyViolation { user_id: 7, task_id: 7 })
    ));
}
