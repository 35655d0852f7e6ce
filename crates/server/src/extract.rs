use axum::{
    extract::{Path, Query},
    Json,
};
use axum_extra::extract::WithRejection;
use shared::api::error::{Nothing, ServerError};

/// Json body whose rejections render as a json `ServerError`
pub type JsonBody<T> = WithRejection<Json<T>, ServerError<Nothing>>;

pub type PathParams<T> = WithRejection<Path<T>, ServerError<Nothing>>;

pub type QueryParams<T> = WithRejection<Query<T>, ServerError<Nothing>>;
