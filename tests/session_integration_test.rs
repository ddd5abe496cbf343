use httpmock::prelude::*;
use httpmock::Method::PATCH;
use project_costs::{
    CostsError, HttpProjectStore, ProjectId, ProjectSession, SessionState, ServiceEntry, ServiceId,
};
use rust_decimal::Decimal;
use std::time::Duration;

fn project_json(budget: i64, cost: i64, services: serde_json::Value) -> serde_json::Value {
    serde_json::json!({
        "id": 1,
        "name": "Website",
        "category": {"id": 1, "name": "Infra"},
        "budget": budget,
        "cost": cost,
        "services": services
    })
}

async fn loaded_session(
    server: &MockServer,
    body: serde_json::Value,
) -> ProjectSession<HttpProjectStore> {
    server.mock(|when, then| {
        when.method(GET).path("/projects/1");
        then.status(200)
            .header("Content-Type", "application/json")
            .json_body(body);
    });

    let store = HttpProjectStore::new(&server.base_url(), Duration::from_secs(5)).unwrap();
    let mut session = ProjectSession::new(store);
    session.load(&ProjectId::new("1")).await.unwrap();
    assert_eq!(session.state(), SessionState::Ready);
    session
}

#[tokio::test]
async fn test_add_service_adopts_store_response() {
    let server = MockServer::start();
    let mut session = loaded_session(
        &server,
        project_json(100, 80, serde_json::json!([{"id": "a", "name": "Design", "cost": 80}])),
    )
    .await;

    let patch = server.mock(|when, then| {
        when.method(PATCH)
            .path("/projects/1")
            .json_body_partial(r#"{"cost": "100"}"#);
        then.status(200).json_body(project_json(
            100,
            100,
            serde_json::json!([
                {"id": "a", "name": "Design", "cost": 80},
                {"id": "b", "name": "Hosting", "cost": 20, "description": "stored"}
            ]),
        ));
    });

    session
        .add_service(ServiceEntry::new("Hosting", Decimal::from(20), ""))
        .await
        .unwrap();

    patch.assert();
    let record = session.record().unwrap();
    assert_eq!(record.cost, Decimal::from(100));
    assert_eq!(session.services().len(), 2);
    assert_eq!(session.services()[1].description, "stored");
}

#[tokio::test]
async fn test_add_service_over_budget_never_contacts_store() {
    let server = MockServer::start();
    let mut session = loaded_session(
        &server,
        project_json(100, 80, serde_json::json!([{"id": "a", "name": "Design", "cost": 80}])),
    )
    .await;

    let patch = server.mock(|when, then| {
        when.method(PATCH).path("/projects/1");
        then.status(200);
    });

    let err = session
        .add_service(ServiceEntry::new("Hosting", Decimal::from(30), ""))
        .await
        .unwrap_err();

    assert!(matches!(err, CostsError::BudgetExceeded { .. }));
    patch.assert_hits(0);
    assert_eq!(session.record().unwrap().cost, Decimal::from(80));
    assert_eq!(session.services().len(), 1);
}

#[tokio::test]
async fn test_remove_service_ignores_response_cost_field() {
    let server = MockServer::start();
    let mut session = loaded_session(
        &server,
        project_json(
            100,
            40,
            serde_json::json!([
                {"id": "a", "name": "Design", "cost": 25},
                {"id": "b", "name": "Hosting", "cost": 15}
            ]),
        ),
    )
    .await;

    server.mock(|when, then| {
        when.method(PATCH).path("/projects/1");
        then.status(200).json_body(project_json(
            100,
            999,
            serde_json::json!([{"id": "a", "name": "Design", "cost": 25}]),
        ));
    });

    session.remove_service(&ServiceId::new("b")).await.unwrap();

    assert_eq!(session.record().unwrap().cost, Decimal::from(25));
    assert_eq!(session.services().len(), 1);
    assert_eq!(session.services()[0].id, Some(ServiceId::new("a")));
}

#[tokio::test]
async fn test_edit_budget_below_cost_never_contacts_store() {
    let server = MockServer::start();
    let mut session = loaded_session(
        &server,
        project_json(50, 40, serde_json::json!([{"id": "a", "name": "Design", "cost": 40}])),
    )
    .await;

    let patch = server.mock(|when, then| {
        when.method(PATCH).path("/projects/1");
        then.status(200);
    });

    let mut updated = session.record().unwrap().clone();
    updated.budget = Decimal::from(30);
    let err = session.edit_project(updated).await.unwrap_err();

    assert!(matches!(err, CostsError::BudgetViolation { .. }));
    patch.assert_hits(0);
    assert_eq!(session.record().unwrap().budget, Decimal::from(50));
    assert_eq!(
        session.feedback().unwrap().message,
        "The budget cannot be lower than the project cost!"
    );
}

#[tokio::test]
async fn test_failed_patch_keeps_session_usable() {
    let server = MockServer::start();
    let mut session = loaded_session(&server, project_json(50, 0, serde_json::json!([]))).await;

    server.mock(|when, then| {
        when.method(PATCH).path("/projects/1");
        then.status(500);
    });

    let mut updated = session.record().unwrap().clone();
    updated.name = "Renamed".to_string();
    let err = session.edit_project(updated).await.unwrap_err();

    assert!(matches!(err, CostsError::SyncFailure { .. }));
    assert_eq!(session.state(), SessionState::Ready);
    assert_eq!(session.record().unwrap().name, "Website");
    assert_eq!(
        session.feedback().unwrap().message,
        "An error occurred while updating the project."
    );

    let view = session.view();
    assert!(view.feedback.unwrap().is_error());
}

#[tokio::test]
async fn test_add_service_rederives_cost_from_returned_services() {
    let server = MockServer::start();
    let mut session = loaded_session(
        &server,
        project_json(100, 30, serde_json::json!([{"id": "a", "name": "Design", "cost": 30}])),
    )
    .await;

    server.mock(|when, then| {
        when.method(PATCH).path("/projects/1");
        then.status(200).json_body(project_json(
            100,
            0,
            serde_json::json!([
                {"id": "a", "name": "Design", "cost": 30},
                {"id": "b", "name": "Hosting", "cost": 20}
            ]),
        ));
    });

    session
        .add_service(ServiceEntry::new("Hosting", Decimal::from(20), ""))
        .await
        .unwrap();

    let record = session.record().unwrap();
    assert_eq!(record.cost, Decimal::from(50));
    assert!(record.is_consistent());
}

#[tokio::test]
async fn test_loaded_drifted_record_is_checked_against_services() {
    let server = MockServer::start();
    let mut session = loaded_session(
        &server,
        project_json(100, 0, serde_json::json!([{"id": "a", "name": "Design", "cost": 90}])),
    )
    .await;

    let patch = server.mock(|when, then| {
        when.method(PATCH).path("/projects/1");
        then.status(200);
    });

    assert_eq!(session.record().unwrap().cost, Decimal::from(90));
    let err = session
        .add_service(ServiceEntry::new("Hosting", Decimal::from(20), ""))
        .await
        .unwrap_err();

    assert!(matches!(err, CostsError::BudgetExceeded { .. }));
    patch.assert_hits(0);
}

#[tokio::test]
async fn test_patch_of_missing_project_is_not_found() {
    let server = MockServer::start();
    let mut session = loaded_session(&server, project_json(100, 0, serde_json::json!([]))).await;

    server.mock(|when, then| {
        when.method(PATCH).path("/projects/1");
        then.status(404).json_body(serde_json::json!({}));
    });

    let err = session
        .add_service(ServiceEntry::new("Hosting", Decimal::from(20), ""))
        .await
        .unwrap_err();

    assert!(matches!(err, CostsError::NotFound { ref id } if id == "1"));
    assert!(session.services().is_empty());
    assert_eq!(session.record().unwrap().cost, Decimal::ZERO);
    assert_eq!(session.state(), SessionState::Ready);
}

#[tokio::test]
async fn test_failed_reload_keeps_session_usable() {
    let server = MockServer::start();
    let mut session = loaded_session(&server, project_json(100, 0, serde_json::json!([]))).await;

    server.mock(|when, then| {
        when.method(GET).path("/projects/2");
        then.status(404);
    });
    let err = session.load(&ProjectId::new("2")).await.unwrap_err();
    assert!(matches!(err, CostsError::NotFound { .. }));
    assert_eq!(session.state(), SessionState::Ready);

    server.mock(|when, then| {
        when.method(PATCH).path("/projects/1");
        then.status(200).json_body(project_json(
            100,
            20,
            serde_json::json!([{"id": "b", "name": "Hosting", "cost": 20}]),
        ));
    });
    session
        .add_service(ServiceEntry::new("Hosting", Decimal::from(20), ""))
        .await
        .unwrap();
    assert_eq!(session.record().unwrap().cost, Decimal::from(20));
}
