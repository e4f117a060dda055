//! HTTP handlers for the records API.
//!
//! Handlers parse the request, call the [`RecordService`] and turn its result
//! into a response. Every failure is answered with `{"error": "<message>"}` and
//! the status from [`ServiceError::status_code`].

use crate::service::{RecordService, ServiceError};
use axum::{
	Json,
	body::Bytes,
	extract::{Path, State},
	http::StatusCode,
	response::{IntoResponse, Response},
};
use serde_json::{Value, json};

pub async fn create_record(State(service): State<RecordService>, body: Bytes) -> Response {
	let payload: Value = match serde_json::from_slice(&body) {
		Ok(payload) => payload,
		Err(err) => {
			log::debug!("rejecting request body: {err}");
			return error_with(
				StatusCode::BAD_REQUEST,
				&format!("invalid payload: request body is not valid JSON: {err}"),
			);
		}
	};
	match service.create(&payload).await {
		Ok(view) => (StatusCode::CREATED, Json(view)).into_response(),
		Err(err) => error_from(&err),
	}
}

pub async fn list_records(State(service): State<RecordService>) -> Response {
	match service.get_all().await {
		Ok(views) => Json(views).into_response(),
		Err(err) => error_from(&err),
	}
}

pub async fn get_record(State(service): State<RecordService>, Path(id): Path<String>) -> Response {
	match service.get_one(&id).await {
		Ok(view) => Json(view).into_response(),
		Err(err) => error_from(&err),
	}
}

pub async fn delete_record(State(service): State<RecordService>, Path(id): Path<String>) -> Response {
	match service.delete(&id).await {
		Ok(()) => StatusCode::NO_CONTENT.into_response(),
		Err(err) => error_from(&err),
	}
}

fn format_error_chain(err: &dyn std::error::Error) -> String {
	let mut result = err.to_string();
	let mut source = err.source();
	let mut first = true;
	while let Some(cause) = source {
		if first {
			result.push_str("\n  Caused by:");
			first = false;
		}
		result.push_str(&format!("\n    {cause}"));
		source = cause.source();
	}
	result
}

fn error_from(err: &ServiceError) -> Response {
	let status = err.status_code();
	if status.is_server_error() {
		log::warn!("request failed with {status}: {}", format_error_chain(err));
	} else {
		log::debug!("request rejected with {status}: {err}");
	}
	error_with(status, &err.to_string())
}

fn error_with(status: StatusCode, message: &str) -> Response {
	(status, Json(json!({ "error": message }))).into_response()
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::store::StoreError;
	use axum::http::header;

	#[derive(thiserror::Error, Debug)]
	#[error("outer")]
	struct Outer(#[source] Inner);

	#[derive(thiserror::Error, Debug)]
	#[error("inner")]
	struct Inner;

	#[test]
	fn format_error_chain_single_error() {
		let err = ServiceError::NotFound { id: "x".into() };
		assert_eq!(format_error_chain(&err), "GeoLocation with Id x not found");
	}

	#[test]
	fn format_error_chain_with_source() {
		assert_eq!(format_error_chain(&Outer(Inner)), "outer\n  Caused by:\n    inner");
	}

	#[tokio::test]
	async fn error_bodies_are_json() {
		let response = error_from(&ServiceError::Store(StoreError::unavailable("down")));
		assert_eq!(response.status(), StatusCode::SERVICE_UNAVAILABLE);
		assert_eq!(
			response.headers().get(header::CONTENT_TYPE).unwrap(),
			"application/json"
		);
		let body = axum::body::to_bytes(response.into_body(), usize::MAX).await.unwrap();
		let value: Value = serde_json::from_slice(&body).unwrap();
		assert_eq!(value, json!({"error": "store unavailable: down"}));
	}
}
