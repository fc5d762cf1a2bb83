//! Client behaviour against a live service.

use std::sync::Arc;

use taskboard::client::{shell, TaskClient, TodoApp};

mod common;

fn app_for(url: &str) -> TodoApp {
    TodoApp::new(TaskClient::new(url).unwrap())
}

#[tokio::test]
async fn test_unreachable_service_sets_load_error() {
    let addr = common::unused_addr().await;
    let mut app = app_for(&format!("http://{addr}/api/tasks"));

    app.load().await;

    let state = app.state();
    assert!(!state.loading);
    assert!(state.tasks.is_empty());
    assert!(state.error.as_deref().unwrap().starts_with("Could not load tasks."));
}

#[tokio::test]
async fn test_failed_load_then_add_clears_error() {
    let server = common::spawn_server(Arc::new(common::FlakyListStore::new())).await;
    let mut app = app_for(&server.tasks_url());

    app.load().await;
    assert!(app.state().tasks.is_empty());
    assert!(app.state().error.is_some());

    app.set_input("Buy milk");
    assert!(app.add().await);

    let state = app.state();
    assert_eq!(state.error, None);
    assert_eq!(state.tasks.len(), 1);
    assert_eq!(state.tasks[0].text, "Buy milk");
    assert!(!state.tasks[0].completed);
    assert_eq!(state.new_task_text, "");
}

#[tokio::test]
async fn test_add_toggle_delete_stay_in_sync() {
    let server = common::spawn_memory_server().await;
    let api = TaskClient::new(&server.tasks_url()).unwrap();
    let mut app = app_for(&server.tasks_url());

    app.load().await;
    assert!(app.state().tasks.is_empty());
    assert_eq!(app.state().error, None);

    app.set_input("   ");
    assert!(!app.add().await);
    assert!(api.list().await.unwrap().is_empty());

    app.set_input("Clean house");
    assert!(app.add().await);
    let id = app.state().tasks[0].id.clone();

    app.toggle(&id).await;
    assert!(app.state().tasks[0].completed);
    assert!(api.list().await.unwrap()[0].completed);

    app.toggle(&id).await;
    assert!(!app.state().tasks[0].completed);

    app.delete(&id).await;
    assert!(app.state().tasks.is_empty());
    assert_eq!(app.state().error, None);
    assert!(api.list().await.unwrap().is_empty());
}

#[tokio::test]
async fn test_toggle_of_task_deleted_elsewhere_reports_error() {
    let server = common::spawn_memory_server().await;
    let api = TaskClient::new(&server.tasks_url()).unwrap();
    let created = api.create("Walk dog").await.unwrap();

    let mut app = app_for(&server.tasks_url());
    app.load().await;
    assert_eq!(app.state().tasks.len(), 1);

    api.delete(&created.id).await.unwrap();
    app.toggle(&created.id).await;

    let state = app.state();
    let error = state.error.as_deref().unwrap();
    assert!(error.starts_with("Could not update task."));
    assert!(error.contains("Task not found"));
    assert_eq!(state.tasks.len(), 1);
    assert!(!state.tasks[0].completed);

    app.delete(&created.id).await;
    assert!(app.state().error.as_deref().unwrap().starts_with("Could not delete task."));
    assert_eq!(app.state().tasks.len(), 1);
}

#[tokio::test]
async fn test_load_reflects_server_order() {
    let server = common::spawn_memory_server().await;
    let api = TaskClient::new(&server.tasks_url()).unwrap();
    for text in ["first", "second"] {
        api.create(text).await.unwrap();
    }

    let mut app = app_for(&server.tasks_url());
    app.load().await;

    let texts: Vec<&str> = app.state().tasks.iter().map(|t| t.text.as_str()).collect();
    assert_eq!(texts, vec!["second", "first"]);
}

#[tokio::test]
async fn test_shell_session() {
    let server = common::spawn_memory_server().await;
    let mut app = app_for(&server.tasks_url());
    app.load().await;

    let script = "add Buy milk\ntoggle 1\nbogus\ndelete #7\nquit\nadd never\n";
    let mut out = Vec::new();
    shell::run(&mut app, script.as_bytes(), &mut out, false)
        .await
        .unwrap();
    let out = String::from_utf8(out).unwrap();

    assert!(out.contains("No tasks yet."));
    assert!(out.contains("[x] ~Buy milk~"));
    assert!(out.contains("1 of 1 tasks completed"));
    assert!(out.contains("unknown command 'bogus'"));
    assert!(out.contains("no task at position 7"));

    assert_eq!(app.state().tasks.len(), 1);
    assert!(!out.contains("never"));
}
