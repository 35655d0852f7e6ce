mod common;

use axum::http::StatusCode;
use common::{create_workout, TestApp};
use serde_json::{json, Value};

#[tokio::test]
async fn test_create_and_fetch() {
    let app = TestApp::new().await;
    let mut client = app.user("ana@gym.io").await;

    let id = create_workout(&mut client, "Push day").await;

    let res = client.get(&format!("/api/workouts/{id}")).await;
    assert_eq!(res.status, StatusCode::OK);
    assert_eq!(res.body["name"], "Push day");
    assert_eq!(res.body["isActive"], true);
    assert_eq!(res.body["aiGenerated"], false);

    let exercises = res.body["exercises"].as_array().unwrap();
    assert_eq!(exercises.len(), 2);
    assert_eq!(exercises[0]["name"], "Bench Press");
    assert_eq!(exercises[0]["order"], 0);
    assert_eq!(exercises[0]["weight"], 60.0);
    assert_eq!(exercises[1]["order"], 1);
    assert_eq!(exercises[1]["weight"], serde_json::Value::Null);
}

#[tokio::test]
async fn test_create_validation() {
    let app = TestApp::new().await;
    let mut client = app.user("ana@gym.io").await;

    let res = client
        .post(
            "/api/workouts",
            json!({
                "name": "",
                "exercises": [{ "name": "Squat", "sets": 0, "reps": 5 }]
            }),
        )
        .await;
    assert_eq!(res.status, StatusCode::BAD_REQUEST);
    assert!(res.body["errors"].as_array().unwrap().len() >= 2);
}

#[tokio::test]
async fn test_other_users_workout_is_forbidden() {
    let app = TestApp::new().await;
    let mut ana = app.user("ana@gym.io").await;
    let mut bob = app.user("bob@gym.io").await;

    let id = create_workout(&mut ana, "Push day").await;
    let uri = format!("/api/workouts/{id}");

    let res = bob.get(&uri).await;
    assert_eq!(res.status, StatusCode::FORBIDDEN);
    assert_eq!(res.body["error"], "Forbidden");

    assert_eq!(bob.patch(&uri, json!({ "name": "Mine now" })).await.status, StatusCode::FORBIDDEN);
    assert_eq!(bob.delete(&uri).await.status, StatusCode::FORBIDDEN);
    assert_eq!(
        bob.patch(&format!("{uri}/toggle"), json!({})).await.status,
        StatusCode::FORBIDDEN
    );

    assert!(bob.get("/api/workouts").await.body.as_array().unwrap().is_empty());
    assert_eq!(ana.get(&uri).await.body["name"], "Push day");
}

#[tokio::test]
async fn test_unknown_workout_is_not_found() {
    let app = TestApp::new().await;
    let mut client = app.user("ana@gym.io").await;

    let res = client
        .get("/api/workouts/67e55044-10b1-426f-9247-bb680e5fe0c8")
        .await;
    assert_eq!(res.status, StatusCode::NOT_FOUND);
    assert_eq!(res.body["error"], "NotFound");
}

#[tokio::test]
async fn test_update_replaces_exercises() {
    let app = TestApp::new().await;
    let mut client = app.user("ana@gym.io").await;
    let id = create_workout(&mut client, "Push day").await;
    let uri = format!("/api/workouts/{id}");

    // Without exercises the list is left alone
    let res = client.patch(&uri, json!({ "name": "Chest day" })).await;
    assert_eq!(res.status, StatusCode::OK);
    assert_eq!(res.body["name"], "Chest day");
    assert_eq!(res.body["description"], "Upper body");
    assert_eq!(res.body["exercises"].as_array().unwrap().len(), 2);

    let res = client
        .patch(
            &uri,
            json!({ "exercises": [{ "name": "Dips", "sets": 3, "reps": 10, "order": 5 }] }),
        )
        .await;
    assert_eq!(res.status, StatusCode::OK);
    let exercises = res.body["exercises"].as_array().unwrap();
    assert_eq!(exercises.len(), 1);
    assert_eq!(exercises[0]["name"], "Dips");
    assert_eq!(exercises[0]["order"], 5);

    let res = client.patch(&uri, json!({ "exercises": [] })).await;
    assert!(res.body["exercises"].as_array().unwrap().is_empty());
    assert_eq!(res.body["description"], "Upper body");

    let res = client.patch(&uri, json!({ "description": null })).await;
    assert_eq!(res.status, StatusCode::OK);
    assert_eq!(res.body["description"], Value::Null);
    assert_eq!(client.get(&uri).await.body["description"], Value::Null);
}

#[tokio::test]
async fn test_malformed_workout_input() {
    let app = TestApp::new().await;
    let mut client = app.user("ana@gym.io").await;

    let res = client.get("/api/workouts/not-a-uuid").await;
    assert_eq!(res.status, StatusCode::BAD_REQUEST);
    assert_eq!(res.body["statusCode"], 400);

    let res = client
        .post("/api/workouts", json!({ "name": "Push day", "exercises": [{ "name": "Dips" }] }))
        .await;
    assert_eq!(res.status, StatusCode::BAD_REQUEST);
    assert_eq!(res.body["statusCode"], 400);
    assert!(res.body["message"].as_str().unwrap().contains("exercises"), "{}", res.body);
}

#[tokio::test]
async fn test_oversized_body_is_rejected() {
    let app = TestApp::with_args(&["--max-body-bytes", "256"]).await;
    let mut client = app.user("ana@gym.io").await;

    let res = client
        .post(
            "/api/workouts",
            json!({ "name": "Push day", "description": "x".repeat(300) }),
        )
        .await;
    assert_eq!(res.status, StatusCode::PAYLOAD_TOO_LARGE);
    assert_eq!(res.body["statusCode"], 413);

    assert!(client.get("/api/workouts").await.body.as_array().unwrap().is_empty());
}

#[tokio::test]
async fn test_toggle_and_active_filter() {
    let app = TestApp::new().await;
    let mut client = app.user("ana@gym.io").await;
    create_workout(&mut client, "Push day").await;
    let pull = create_workout(&mut client, "Pull day").await;

    let res = client
        .patch(&format!("/api/workouts/{pull}/toggle"), json!({}))
        .await;
    assert_eq!(res.status, StatusCode::OK);
    assert_eq!(res.body["isActive"], false);

    let names = |body: &serde_json::Value| {
        body.as_array()
            .unwrap()
            .iter()
            .map(|w| w["name"].as_str().unwrap().to_string())
            .collect::<Vec<_>>()
    };

    // Newest first
    assert_eq!(names(&client.get("/api/workouts").await.body), ["Pull day", "Push day"]);
    assert_eq!(names(&client.get("/api/workouts?active=true").await.body), ["Push day"]);
    assert_eq!(names(&client.get("/api/workouts?active=false").await.body), ["Pull day"]);
    assert_eq!(names(&client.get("/api/workouts?active=maybe").await.body).len(), 2);

    let res = client
        .patch(&format!("/api/workouts/{pull}/toggle"), json!({}))
        .await;
    assert_eq!(res.body["isActive"], true);
}

#[tokio::test]
async fn test_soft_deleted_workout_is_hidden() {
    let app = TestApp::new().await;
    let mut client = app.user("ana@gym.io").await;
    let id = create_workout(&mut client, "Push day").await;
    let uri = format!("/api/workouts/{id}");

    let res = client.delete(&uri).await;
    assert_eq!(res.status, StatusCode::OK);

    assert_eq!(client.get(&uri).await.status, StatusCode::NOT_FOUND);
    assert_eq!(client.delete(&uri).await.status, StatusCode::NOT_FOUND);
    assert!(client.get("/api/workouts").await.body.as_array().unwrap().is_empty());
}

#[tokio::test]
async fn test_ai_generated_flag_is_kept() {
    let app = TestApp::new().await;
    let mut client = app.user("ana@gym.io").await;

    let res = client
        .post(
            "/api/workouts",
            json!({ "name": "Generated Workout", "aiGenerated": true }),
        )
        .await;
    assert_eq!(res.status, StatusCode::CREATED);
    assert_eq!(res.body["aiGenerated"], true);
    assert!(res.body["exercises"].as_array().unwrap().is_empty());
}
