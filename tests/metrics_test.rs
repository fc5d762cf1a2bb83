//! Task-count gauge tracking. Kept in its own binary because it installs the
//! global metrics recorder.

use metrics_exporter_prometheus::{PrometheusBuilder, PrometheusHandle};
use reqwest::StatusCode;
use serde_json::json;

use taskboard::tasks::Task;

mod common;

fn gauge_value(handle: &PrometheusHandle, name: &str) -> Option<f64> {
    handle
        .render()
        .lines()
        .find_map(|line| line.strip_prefix(name)?.strip_prefix(' ')?.parse().ok())
}

#[tokio::test]
async fn test_task_gauge_follows_writes() {
    let handle = PrometheusBuilder::new().install_recorder().unwrap();
    let server = common::spawn_memory_server().await;
    let client = common::http_client();

    let mut created = Vec::new();
    for text in ["one", "two"] {
        let res = client
            .post(server.tasks_url())
            .json(&json!({"text": text}))
            .send()
            .await
            .unwrap();
        assert_eq!(res.status(), StatusCode::CREATED);
        created.push(res.json::<Task>().await.unwrap());
    }
    assert_eq!(gauge_value(&handle, "taskboard_tasks"), Some(2.0));

    let res = client
        .delete(server.task_url(&created[0].id))
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::OK);
    assert_eq!(gauge_value(&handle, "taskboard_tasks"), Some(1.0));

    assert!(handle.render().contains("taskboard_requests_total"));
}
