//! CORS layer built from the configured origin patterns.
//!
//! Pattern forms:
//! - `"*"` allows every origin
//! - `"*.example.com"` matches by suffix
//! - `"https://dev-*"` matches by prefix
//! - `"/^https://(foo|bar)\.example\.com$/"` is a regular expression
//! - anything else must match exactly

use crate::config::CorsConfig;
use anyhow::{Context, Result, ensure};
use axum::http::{HeaderValue, Method, header, request::Parts};
use regex::Regex;
use std::time::Duration;
use tower_http::cors::{AllowOrigin, CorsLayer};

#[derive(Debug)]
enum OriginPattern {
	Any,
	Suffix(String),
	Prefix(String),
	Regex(Regex),
	Exact(String),
}

impl OriginPattern {
	fn parse(pattern: &str) -> Result<Self> {
		if pattern == "*" {
			return Ok(OriginPattern::Any);
		}
		if pattern.len() > 2 && pattern.starts_with('/') && pattern.ends_with('/') {
			let re = Regex::new(&pattern[1..pattern.len() - 1])
				.with_context(|| format!("invalid origin regex '{pattern}'"))?;
			return Ok(OriginPattern::Regex(re));
		}
		if let Some(suffix) = pattern.strip_prefix('*') {
			ensure!(
				!suffix.is_empty() && !suffix.contains('*'),
				"unsupported origin pattern '{pattern}'"
			);
			return Ok(OriginPattern::Suffix(suffix.to_string()));
		}
		if let Some(prefix) = pattern.strip_suffix('*') {
			ensure!(!prefix.contains('*'), "unsupported origin pattern '{pattern}'");
			return Ok(OriginPattern::Prefix(prefix.to_string()));
		}
		ensure!(!pattern.contains('*'), "unsupported origin pattern '{pattern}'");
		Ok(OriginPattern::Exact(pattern.to_string()))
	}

	fn matches(&self, origin: &str) -> bool {
		match self {
			OriginPattern::Any => true,
			OriginPattern::Suffix(suffix) => origin.ends_with(suffix.as_str()),
			OriginPattern::Prefix(prefix) => origin.starts_with(prefix.as_str()),
			OriginPattern::Regex(re) => re.is_match(origin),
			OriginPattern::Exact(exact) => origin == exact,
		}
	}
}

pub fn build_cors_layer(config: &CorsConfig) -> Result<CorsLayer> {
	let patterns = config
		.allowed_origins
		.iter()
		.map(|pattern| OriginPattern::parse(pattern))
		.collect::<Result<Vec<_>>>()?;

	let layer = CorsLayer::new()
		.allow_origin(AllowOrigin::predicate(move |origin: &HeaderValue, _req: &Parts| {
			let origin = origin.to_str().unwrap_or("");
			patterns.iter().any(|p| p.matches(origin))
		}))
		.allow_methods([Method::GET, Method::POST, Method::DELETE])
		.allow_headers([header::CONTENT_TYPE])
		.max_age(Duration::from_secs(config.max_age_seconds.unwrap_or(86400)));

	Ok(layer)
}

#[cfg(test)]
mod tests {
	use super::*;
	use axum::{
		Router,
		body::Body,
		http::{
			Request,
			header::{ACCESS_CONTROL_ALLOW_ORIGIN, ACCESS_CONTROL_MAX_AGE, ORIGIN},
		},
		routing::get,
	};
	use rstest::rstest;
	use tower::ServiceExt;

	fn layer(origins: &[&str]) -> CorsLayer {
		build_cors_layer(&CorsConfig {
			allowed_origins: origins.iter().map(ToString::to_string).collect(),
			max_age_seconds: None,
		})
		.unwrap()
	}

	async fn has_acao(layer: CorsLayer, origin: &str) -> bool {
		let app = Router::new().route("/", get(|| async { "ok" })).layer(layer);
		let req = Request::builder()
			.uri("/")
			.header(ORIGIN, origin)
			.body(Body::empty())
			.unwrap();
		let resp = app.oneshot(req).await.unwrap();
		resp.headers().get(ACCESS_CONTROL_ALLOW_ORIGIN).is_some()
	}

	#[rstest]
	#[case("*", "http://anything.local", true)]
	#[case("https://maps.example.org", "https://maps.example.org", true)]
	#[case("https://maps.example.org", "https://maps.example.com", false)]
	#[case("*.example.com", "https://foo.example.com", true)]
	#[case("*.example.com", "https://example.org", false)]
	#[case("https://dev-*", "https://dev-01.example.com", true)]
	#[case("https://dev-*", "https://prod-01.example.com", false)]
	#[case("/^https://(foo|bar)\\.example\\.com$/", "https://bar.example.com", true)]
	#[case("/^https://(foo|bar)\\.example\\.com$/", "https://baz.example.com", false)]
	#[tokio::test]
	async fn origin_patterns(#[case] pattern: &str, #[case] origin: &str, #[case] allowed: bool) {
		assert_eq!(has_acao(layer(&[pattern]), origin).await, allowed);
	}

	#[tokio::test]
	async fn no_origins_allows_nothing() {
		assert!(!has_acao(layer(&[]), "http://localhost:5173").await);
	}

	#[tokio::test]
	async fn preflight_carries_max_age() {
		let app = Router::new()
			.route("/records", get(|| async { "ok" }))
			.layer(layer(&["*"]));
		let req = Request::builder()
			.method(Method::OPTIONS)
			.uri("/records")
			.header(ORIGIN, "http://localhost:5173")
			.header(header::ACCESS_CONTROL_REQUEST_METHOD, "POST")
			.body(Body::empty())
			.unwrap();
		let resp = app.oneshot(req).await.unwrap();
		assert_eq!(resp.headers().get(ACCESS_CONTROL_MAX_AGE).unwrap(), "86400");
	}

	#[rstest]
	#[case("/[unclosed/")]
	#[case("a*b")]
	#[case("**")]
	fn invalid_patterns(#[case] pattern: &str) {
		assert!(OriginPattern::parse(pattern).is_err());
	}
}
