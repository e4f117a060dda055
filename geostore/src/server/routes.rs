//! Router composition for the records API.

use super::handlers::{create_record, delete_record, get_record, list_records};
use crate::service::RecordService;
use axum::{
	Router,
	routing::{get, post},
};

/// Liveness probe answering `ready!`.
pub fn add_status_to_app(app: Router) -> Router {
	app.route("/status", get(|| async { "ready!" }))
}

/// Attach `/records` and `/records/{id}`.
pub fn add_records_to_app(app: Router, service: RecordService) -> Router {
	let records = Router::new()
		.route("/records", post(create_record).get(list_records))
		.route("/records/{id}", get(get_record).delete(delete_record))
		.with_state(service);
	app.merge(records)
}
