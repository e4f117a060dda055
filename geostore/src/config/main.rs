use super::{CorsConfig, ServerConfig, StoreConfig};
use anyhow::{Context, Result};
use serde::Deserialize;
use std::{
	fs::File,
	io::{BufReader, Read},
	path::Path,
};

#[derive(Default, Debug, Clone, Deserialize, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct Config {
	/// HTTP server configuration
	#[serde(default)]
	pub server: ServerConfig,

	/// Cross-Origin Resource Sharing (CORS) settings
	#[serde(default)]
	pub cors: CorsConfig,

	/// Record storage
	#[serde(default)]
	pub store: StoreConfig,
}

impl Config {
	pub fn from_reader<R: Read>(reader: R) -> Result<Self> {
		Ok(serde_yaml_ng::from_reader(reader)?)
	}

	pub fn from_string(text: &str) -> Result<Self> {
		Ok(serde_yaml_ng::from_str(text)?)
	}

	/// Parses a YAML file and resolves relative paths against its directory.
	pub fn from_path(path: &Path) -> Result<Self> {
		let file = File::open(path).with_context(|| format!("opening config file {path:?}"))?;
		let mut config =
			Config::from_reader(BufReader::new(file)).with_context(|| format!("parsing config file {path:?}"))?;

		if let Some(base) = path.parent() {
			config.store.resolve_paths(base);
		}
		Ok(config)
	}
}
