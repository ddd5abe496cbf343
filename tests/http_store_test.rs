use httpmock::prelude::*;
use project_costs::{
    create_project, Category, CostsError, HttpProjectStore, ProjectDraft, ProjectId, ProjectStore,
};
use rust_decimal::Decimal;
use std::collections::HashMap;
use std::time::Duration;

fn store_for(server: &MockServer) -> HttpProjectStore {
    HttpProjectStore::new(&server.base_url(), Duration::from_secs(5)).unwrap()
}

#[tokio::test]
async fn test_fetch_project_decodes_record() {
    let server = MockServer::start();
    let mock = server.mock(|when, then| {
        when.method(GET).path("/projects/1");
        then.status(200)
            .header("Content-Type", "application/json")
            .json_body(serde_json::json!({
                "id": 1,
                "name": "Website",
                "category": {"id": 1, "name": "Infra"},
                "budget": "1000",
                "cost": 300,
                "services": [
                    {"id": "s-1", "name": "Hosting", "cost": "300", "description": "yearly"}
                ]
            }));
    });

    let record = store_for(&server)
        .fetch_project(&ProjectId::new("1"))
        .await
        .unwrap();

    mock.assert();
    assert_eq!(record.id, ProjectId::new("1"));
    assert_eq!(record.budget, Decimal::from(1000));
    assert_eq!(record.services.len(), 1);
    assert!(record.is_consistent());
}

#[tokio::test]
async fn test_fetch_missing_project_is_not_found() {
    let server = MockServer::start();
    server.mock(|when, then| {
        when.method(GET).path("/projects/99");
        then.status(404).json_body(serde_json::json!({}));
    });

    let err = store_for(&server)
        .fetch_project(&ProjectId::new("99"))
        .await
        .unwrap_err();

    assert!(matches!(err, CostsError::NotFound { ref id } if id == "99"));
}

#[tokio::test]
async fn test_server_error_is_sync_failure() {
    let server = MockServer::start();
    server.mock(|when, then| {
        when.method(GET).path("/projects");
        then.status(500);
    });

    let err = store_for(&server).list_projects().await.unwrap_err();
    assert!(matches!(err, CostsError::SyncFailure { .. }));
    assert!(!err.is_local());
}

#[tokio::test]
async fn test_slow_store_times_out() {
    let server = MockServer::start();
    server.mock(|when, then| {
        when.method(GET).path("/projects/1");
        then.status(200)
            .delay(Duration::from_millis(500))
            .json_body(serde_json::json!({}));
    });

    let store = HttpProjectStore::new(&server.base_url(), Duration::from_millis(100)).unwrap();
    let err = store.fetch_project(&ProjectId::new("1")).await.unwrap_err();

    assert!(matches!(err, CostsError::SyncFailure { .. }));
}

#[tokio::test]
async fn test_create_project_posts_empty_services() {
    let server = MockServer::start();
    let mock = server.mock(|when, then| {
        when.method(POST)
            .path("/projects")
            .header("Content-Type", "application/json")
            .json_body_partial(r#"{"name": "Logo", "cost": "0", "services": []}"#);
        then.status(201).json_body(serde_json::json!({
            "id": 12,
            "name": "Logo",
            "category": {"id": 2, "name": "Design"},
            "budget": "500",
            "cost": 0,
            "services": []
        }));
    });

    let draft = ProjectDraft {
        name: "Logo".to_string(),
        budget: Decimal::from(500),
        category: Category {
            id: "2".to_string(),
            name: "Design".to_string(),
        },
    };
    let (record, feedback) = create_project(&store_for(&server), &draft).await.unwrap();

    mock.assert();
    assert_eq!(record.id, ProjectId::new("12"));
    assert_eq!(feedback.message, "Project created successfully!");
}

#[tokio::test]
async fn test_list_categories_and_delete() {
    let server = MockServer::start();
    server.mock(|when, then| {
        when.method(GET).path("/categories");
        then.status(200).json_body(serde_json::json!([
            {"id": 1, "name": "Infra"},
            {"id": "2", "name": "Design"}
        ]));
    });
    let delete_mock = server.mock(|when, then| {
        when.method(DELETE).path("/projects/3");
        then.status(200).json_body(serde_json::json!({}));
    });

    let store = store_for(&server);
    let categories = store.list_categories().await.unwrap();
    store.delete_project(&ProjectId::new("3")).await.unwrap();

    delete_mock.assert();
    assert_eq!(categories.len(), 2);
    assert_eq!(categories[0].id, "1");
    assert_eq!(categories[1].name, "Design");
}

#[tokio::test]
async fn test_custom_headers_are_sent() {
    let server = MockServer::start();
    let mock = server.mock(|when, then| {
        when.method(GET)
            .path("/projects")
            .header("Authorization", "Bearer token-1");
        then.status(200).json_body(serde_json::json!([]));
    });

    let headers = HashMap::from([(
        "Authorization".to_string(),
        "Bearer token-1".to_string(),
    )]);
    let store =
        HttpProjectStore::with_headers(&server.base_url(), Duration::from_secs(5), &headers)
            .unwrap();

    assert!(store.list_projects().await.unwrap().is_empty());
    mock.assert();
}
