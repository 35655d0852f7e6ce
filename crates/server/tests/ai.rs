mod common;

use axum::{
    extract::State,
    http::{header::AUTHORIZATION, HeaderMap, StatusCode},
    routing::post,
    Json, Router,
};
use common::TestApp;
use serde_json::{json, Value};
use tokio::net::TcpListener;

const PROMPT: &str = "Three day split for building strength";

#[derive(Clone)]
struct MockModel {
    status: StatusCode,
    content: String,
}

async fn chat_completions(
    State(model): State<MockModel>,
    headers: HeaderMap,
    Json(request): Json<Value>,
) -> (StatusCode, Json<Value>) {
    assert_eq!(headers[AUTHORIZATION], "Bearer sk-test");
    assert_eq!(request["messages"][0]["role"], "system");
    assert_eq!(request["messages"][1]["content"], PROMPT);

    (
        model.status,
        Json(json!({
            "choices": [{ "message": { "role": "assistant", "content": model.content } }]
        })),
    )
}

/// Serves a fake chat completions api and returns its base url
async fn mock_model(status: StatusCode, content: &str) -> String {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    let router = Router::new()
        .route("/v1/chat/completions", post(chat_completions))
        .with_state(MockModel {
            status,
            content: content.to_string(),
        });
    tokio::spawn(async move { axum::serve(listener, router).await.unwrap() });

    format!("http://{addr}/v1")
}

async fn app_with_model(base_url: &str) -> TestApp {
    TestApp::with_args(&["--openai-api-key", "sk-test", "--openai-base-url", base_url]).await
}

#[tokio::test]
async fn test_not_configured() {
    let app = TestApp::with_args(&["--openai-api-key", "your-openai-api-key-here"]).await;
    let mut client = app.user("ana@gym.io").await;

    let res = client
        .post("/api/ai/generate-workout", json!({ "prompt": PROMPT }))
        .await;
    assert_eq!(res.status, StatusCode::BAD_REQUEST);
    assert_eq!(res.body["error"], "NotConfigured");
}

#[tokio::test]
async fn test_generates_sanitized_workouts() {
    let content = format!(
        "Here you go!\n```json\n{}\n```",
        json!({
            "workouts": [
                {
                    "name": "Workout A",
                    "description": "Lower body",
                    "exercises": [
                        { "name": "Squat", "sets": 5, "reps": 5, "weight": 80, "order": 3 },
                        { "sets": "x", "reps": 0, "weight": -1 }
                    ]
                },
                { "exercises": [] }
            ]
        })
    );
    let base_url = mock_model(StatusCode::OK, &content).await;
    let app = app_with_model(&base_url).await;
    let mut client = app.user("ana@gym.io").await;

    let res = client
        .post("/api/ai/generate-workout", json!({ "prompt": PROMPT }))
        .await;
    assert_eq!(res.status, StatusCode::OK, "{}", res.body);

    let workouts = res.body.as_array().unwrap();
    assert_eq!(workouts.len(), 2);
    assert_eq!(workouts[0]["name"], "Workout A");
    assert_eq!(
        workouts[0]["exercises"],
        json!([
            { "name": "Squat", "sets": 5, "reps": 5, "weight": 80.0, "order": 0 },
            { "name": "Exercise 2", "sets": 3, "reps": 12, "weight": null, "order": 1 }
        ])
    );
    assert_eq!(workouts[1]["name"], "Generated Workout");
    assert_eq!(workouts[1]["description"], "");

    // Nothing is saved until the client creates the workout
    assert!(client.get("/api/workouts").await.body.as_array().unwrap().is_empty());
}

#[tokio::test]
async fn test_prompt_length_is_checked() {
    let base_url = mock_model(StatusCode::OK, "{}").await;
    let app = app_with_model(&base_url).await;
    let mut client = app.user("ana@gym.io").await;

    let res = client
        .post("/api/ai/generate-workout", json!({ "prompt": "legs" }))
        .await;
    assert_eq!(res.status, StatusCode::BAD_REQUEST);
    assert!(res.body["errors"].is_array());
}

#[tokio::test]
async fn test_unusable_model_output() {
    for (content, error) in [
        ("", "EmptyResponse"),
        ("Sorry, I can't do that", "InvalidResponse"),
        (r#"{"plans": []}"#, "InvalidFormat"),
    ] {
        let base_url = mock_model(StatusCode::OK, content).await;
        let app = app_with_model(&base_url).await;
        let mut client = app.user("ana@gym.io").await;

        let res = client
            .post("/api/ai/generate-workout", json!({ "prompt": PROMPT }))
            .await;
        assert_eq!(res.status, StatusCode::BAD_REQUEST, "{content}");
        assert_eq!(res.body["error"], error, "{content}");
    }
}

#[tokio::test]
async fn test_upstream_failure() {
    let base_url = mock_model(StatusCode::INTERNAL_SERVER_ERROR, "").await;
    let app = app_with_model(&base_url).await;
    let mut client = app.user("ana@gym.io").await;

    let res = client
        .post("/api/ai/generate-workout", json!({ "prompt": PROMPT }))
        .await;
    assert_eq!(res.status, StatusCode::BAD_REQUEST);
    assert!(res.body["error"].get("Upstream").is_some());
}
