//! Cross-origin policy for browser clients of the records API.
//!
//! ```yaml
//! cors:
//!   allowed_origins:
//!     - "https://example.org"
//!     - "*.example.net"
//!   max_age_seconds: 86400
//! ```
use serde::Deserialize;

#[derive(Debug, Clone, Deserialize, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct CorsConfig {
	/// Allowed origins. Defaults to `["*"]`.
	///
	/// Supports `*`, exact origins, a leading glob (`*.example.com`), a trailing
	/// glob (`https://dev.*`) and regular expressions in slashes (`/^https?://local/`).
	#[serde(default = "default_allowed_origins")]
	pub allowed_origins: Vec<String>,

	/// How long browsers may cache preflight responses, in seconds. Defaults to 86400.
	#[serde(default)]
	pub max_age_seconds: Option<u64>,
}

fn default_allowed_origins() -> Vec<String> {
	vec!["*".to_string()]
}

impl Default for CorsConfig {
	fn default() -> Self {
		Self {
			allowed_origins: default_allowed_origins(),
			max_age_seconds: None,
		}
	}
}
