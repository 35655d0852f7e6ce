#![allow(dead_code)]

use axum::{
    body::Body,
    http::{header, Method, Request, StatusCode},
    Router,
};
use clap::Parser;
use http_body_util::BodyExt;
use serde_json::{json, Value};
use server::{build_app, cli::Cli};
use tempfile::TempDir;
use tower::ServiceExt;

/// App backed by a throwaway database
pub struct TestApp {
    router: Router,
    _dir: TempDir,
}

impl TestApp {
    pub async fn new() -> Self {
        Self::with_args(&[]).await
    }

    pub async fn with_args(extra: &[&str]) -> Self {
        let dir = tempfile::tempdir().unwrap();
        let db_path = dir.path().join("gymtracker.sqlite");

        let mut args = vec![
            "gymtracker-server".to_string(),
            "--sqlite-connection-string".to_string(),
            db_path.to_str().unwrap().to_string(),
            "--password-hash-cost".to_string(),
            "4".to_string(),
        ];
        args.extend(extra.iter().map(|a| a.to_string()));

        let (router, _session_store) = build_app(Cli::parse_from(args)).await.unwrap();

        Self { router, _dir: dir }
    }

    pub fn client(&self) -> TestClient {
        TestClient {
            router: self.router.clone(),
            cookie: None,
        }
    }

    /// A client logged in as a freshly registered user
    pub async fn user(&self, email: &str) -> TestClient {
        let mut client = self.client();
        let res = client
            .post(
                "/api/auth/register",
                json!({ "email": email, "password": "hunter22", "name": "Test User" }),
            )
            .await;
        assert_eq!(res.status, StatusCode::CREATED, "{}", res.body);
        client
    }
}

/// Sends requests with the session cookie of previous responses
pub struct TestClient {
    router: Router,
    cookie: Option<String>,
}

pub struct TestResponse {
    pub status: StatusCode,
    pub body: Value,
}

impl TestClient {
    pub async fn get(&mut self, uri: &str) -> TestResponse {
        self.send(Method::GET, uri, None).await
    }

    pub async fn post(&mut self, uri: &str, body: Value) -> TestResponse {
        self.send(Method::POST, uri, Some(body)).await
    }

    pub async fn patch(&mut self, uri: &str, body: Value) -> TestResponse {
        self.send(Method::PATCH, uri, Some(body)).await
    }

    pub async fn delete(&mut self, uri: &str) -> TestResponse {
        self.send(Method::DELETE, uri, None).await
    }

    pub async fn send(&mut self, method: Method, uri: &str, body: Option<Value>) -> TestResponse {
        let mut builder = Request::builder().method(method).uri(uri);
        if let Some(cookie) = &self.cookie {
            builder = builder.header(header::COOKIE, cookie);
        }
        let body = match body {
            Some(body) => {
                builder = builder.header(header::CONTENT_TYPE, "application/json");
                Body::from(body.to_string())
            }
            None => Body::empty(),
        };

        let response = self
            .router
            .clone()
            .oneshot(builder.body(body).unwrap())
            .await
            .unwrap();

        if let Some(set_cookie) = response.headers().get(header::SET_COOKIE) {
            let pair = set_cookie
                .to_str()
                .unwrap()
                .split(';')
                .next()
                .unwrap()
                .to_string();
            // Removal cookies come back with an empty value
            self.cookie = pair.split_once('=').filter(|(_, v)| !v.is_empty()).map(|_| pair.clone());
        }

        let status = response.status();
        let bytes = response.into_body().collect().await.unwrap().to_bytes();
        let body = if bytes.is_empty() {
            Value::Null
        } else {
            serde_json::from_slice(&bytes).unwrap_or_else(|_| Value::String(String::from_utf8_lossy(&bytes).to_string()))
        };

        TestResponse { status, body }
    }
}

/// Creates a workout with two exercises and returns its id
pub async fn create_workout(client: &mut TestClient, name: &str) -> String {
    let res = client
        .post(
            "/api/workouts",
            json!({
                "name": name,
                "description": "Upper body",
                "exercises": [
                    { "name": "Bench Press", "sets": 4, "reps": 8, "weight": 60.0 },
                    { "name": "Push Up", "sets": 3, "reps": 15 }
                ]
            }),
        )
        .await;
    assert_eq!(res.status, StatusCode::CREATED, "{}", res.body);
    res.body["id"].as_str().unwrap().to_string()
}
