//! Handlers: extract arguments, call the database, shape the response

use crate::error::ApiError;
use axum::body::Bytes;
use axum::extract::{Path, Query, State};
use axum::http::{HeaderName, HeaderValue, StatusCode};
use axum::response::{Html, IntoResponse, Json};
use chrono::Utc;
use docstore_core::{Document, Error, SERVICE_OWNER};
use docstore_engine::Database;
use serde::{Deserialize, Serialize};

type ApiResult<T> = Result<T, ApiError>;

const NOT_FOUND_HTML: &str = r#"<!DOCTYPE html>
<html>
<head>
    <title>404 Not Found</title>
</head>
<body>
    <h1>404 Not Found</h1>
    <p>The requested resource does not exist on this server.</p>
</body>
</html>"#;

/// A query parameter the operation cannot run without
fn required(field: &str, value: Option<String>) -> Result<String, Error> {
    value
        .filter(|v| !v.is_empty())
        .ok_or_else(|| Error::validation(field, "query parameter is required"))
}

#[derive(Debug, Deserialize)]
pub struct GetParams {
    key: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct SetParams {
    file: Option<String>,
    key: Option<String>,
    value: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct RemoveParams {
    file: Option<String>,
    key: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PairParams {
    file_a: Option<String>,
    file_b: Option<String>,
}

impl PairParams {
    fn into_pair(self) -> Result<(String, String), Error> {
        Ok((
            required("fileA", self.file_a)?,
            required("fileB", self.file_b)?,
        ))
    }
}

#[derive(Debug, Serialize)]
pub struct StatusReport {
    up: bool,
    owner: &'static str,
    timestamp: i64,
}

pub async fn home() -> impl IntoResponse {
    (
        [(
            HeaderName::from_static("my-custom-header"),
            HeaderValue::from_static("This is a great API"),
        )],
        "Welcome to my server",
    )
}

pub async fn status() -> Json<StatusReport> {
    Json(StatusReport {
        up: true,
        owner: SERVICE_OWNER,
        timestamp: Utc::now().timestamp_millis(),
    })
}

pub async fn not_found() -> impl IntoResponse {
    (StatusCode::NOT_FOUND, Html(NOT_FOUND_HTML))
}

pub async fn get_value(
    State(db): State<Database>,
    Path(file): Path<String>,
    Query(params): Query<GetParams>,
) -> ApiResult<Html<String>> {
    let value = db.get(&file, params.key.as_deref()).await?;
    Ok(Html(value))
}

pub async fn set_value(
    State(db): State<Database>,
    Query(params): Query<SetParams>,
) -> ApiResult<Html<&'static str>> {
    let file = required("file", params.file)?;
    let key = required("key", params.key)?;
    let value = required("value", params.value)?;

    db.set(&file, &key, &value).await?;
    Ok(Html("Value set"))
}

pub async fn remove_value(
    State(db): State<Database>,
    Query(params): Query<RemoveParams>,
) -> ApiResult<Html<&'static str>> {
    let file = required("file", params.file)?;
    let key = required("key", params.key)?;

    db.remove(&file, &key).await?;
    Ok(Html("Value removed"))
}

pub async fn write_file(
    State(db): State<Database>,
    Path(file): Path<String>,
    body: Bytes,
) -> ApiResult<(StatusCode, Html<&'static str>)> {
    let content = if body.iter().all(u8::is_ascii_whitespace) {
        None
    } else {
        let document = serde_json::from_slice::<Document>(&body)
            .map_err(|e| Error::validation("body", format!("expected a JSON object: {e}")))?;
        Some(document)
    };

    db.create_file(&file, content).await?;
    Ok((StatusCode::CREATED, Html("File written")))
}

pub async fn delete_file(
    State(db): State<Database>,
    Path(file): Path<String>,
) -> ApiResult<Html<&'static str>> {
    db.delete_file(&file).await?;
    Ok(Html("File deleted"))
}

pub async fn merge(State(db): State<Database>) -> ApiResult<Html<&'static str>> {
    db.merge_data().await?;
    Ok(Html("Files merged"))
}

pub async fn union(
    State(db): State<Database>,
    Query(params): Query<PairParams>,
) -> ApiResult<Json<Vec<String>>> {
    let (a, b) = params.into_pair()?;
    Ok(Json(db.union(&a, &b).await?))
}

pub async fn intersect(
    State(db): State<Database>,
    Query(params): Query<PairParams>,
) -> ApiResult<Json<Vec<String>>> {
    let (a, b) = params.into_pair()?;
    Ok(Json(db.intersect(&a, &b).await?))
}

pub async fn difference(
    State(db): State<Database>,
    Query(params): Query<PairParams>,
) -> ApiResult<Json<Vec<String>>> {
    let (a, b) = params.into_pair()?;
    Ok(Json(db.difference(&a, &b).await?))
}
