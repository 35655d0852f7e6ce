use std::sync::Arc;

use axum::{
    http::{header::CONTENT_TYPE, HeaderValue, Method},
    routing::{get, patch, post},
    Router,
};
use shared::api::{Auth, Object};
use tower::ServiceBuilder;
use tower_http::{
    cors::CorsLayer,
    limit::RequestBodyLimitLayer,
    trace::{DefaultMakeSpan, DefaultOnResponse, TraceLayer},
};
use tower_sessions::{cookie::time::Duration, cookie::SameSite, Expiry, SessionManagerLayer};
use tracing::{info, instrument, Level};

use crate::{
    ai::AiClient,
    cli::Cli,
    db,
    routes::{
        ai::generate_workout,
        auth::{login, logout, me, register},
        ping,
        tracker::{calendar_logs, create_log, delete_log, stats},
        users::{fetch_profile, update_profile},
        workouts::{
            create_workout, delete_workout, fetch_workout, list_workouts, toggle_workout,
            update_workout,
        },
    },
    session_store::SqliteSessionStore,
    AppState,
};

/// Prepares the database and builds the api router. The session store is
/// returned so the caller can schedule the expired session cleanup
#[instrument(skip_all)]
pub async fn build_app(args: Cli) -> Result<(Router, SqliteSessionStore), anyhow::Error> {
    if args.debug_delete_database {
        db::delete_database(&args.sqlite_connection_string)?;
    }

    // Run the migrations synchronously before creating the pool or launching the server
    let ran = db::run_migrations(&args.sqlite_connection_string)?;
    info!("Ran {ran} db migrations");

    let pool = db::create_pool(&args.sqlite_connection_string)?;

    let session_store = SqliteSessionStore::new(pool.clone());
    session_store
        .migrate()
        .await
        .map_err(tower_sessions::session_store::Error::from)?;

    let session_layer = SessionManagerLayer::new(session_store.clone())
        .with_secure(args.secure_sessions)
        .with_same_site(SameSite::Lax)
        .with_expiry(Expiry::OnInactivity(Duration::days(args.session_expiry_days)));

    let cors_layer = CorsLayer::new()
        .allow_origin(args.cors_origin.parse::<HeaderValue>()?)
        .allow_credentials(true)
        .allow_methods([Method::GET, Method::POST, Method::PATCH, Method::DELETE])
        .allow_headers([CONTENT_TYPE]);

    let ai_client = AiClient::from_args(&args)?;
    if !ai_client.is_configured() {
        info!("No language model api key set, workout generation is disabled");
    }

    let max_body_bytes = args.max_body_bytes;
    let state = AppState {
        pool,
        args: Arc::new(args),
        ai_client: Arc::new(ai_client),
    };

    let router = Router::new()
        .route(Object::Ping.path(), get(ping))
        .route(Auth::Register.path(), post(register))
        .route(Auth::Login.path(), post(login))
        .route(Auth::Logout.path(), post(logout))
        .route(Auth::Me.path(), get(me))
        .route(Object::Profile.path(), get(fetch_profile).patch(update_profile))
        .route(Object::Workouts.path(), get(list_workouts).post(create_workout))
        .route(
            Object::WorkoutId.path(),
            get(fetch_workout).patch(update_workout).delete(delete_workout),
        )
        .route(Object::WorkoutToggle.path(), patch(toggle_workout))
        .route(Object::TrackerLog.path(), post(create_log))
        .route(Object::TrackerLogId.path(), axum::routing::delete(delete_log))
        .route(Object::TrackerCalendar.path(), get(calendar_logs))
        .route(Object::TrackerStats.path(), get(stats))
        .route(Object::AiGenerateWorkout.path(), post(generate_workout))
        .layer(
            ServiceBuilder::new()
                .layer(
                    TraceLayer::new_for_http()
                        .make_span_with(DefaultMakeSpan::new().level(Level::INFO))
                        .on_response(DefaultOnResponse::new().level(Level::INFO)),
                )
                .layer(RequestBodyLimitLayer::new(max_body_bytes))
                .layer(cors_layer)
                .layer(session_layer),
        )
        .with_state(state);

    Ok((router, session_store))
}
