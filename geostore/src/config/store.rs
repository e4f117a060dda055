use serde::Deserialize;
use std::path::{Path, PathBuf};

#[derive(Debug, Default, Clone, Copy, Deserialize, PartialEq, Eq, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum StoreBackend {
	#[default]
	Sqlite,
	Memory,
}

#[derive(Debug, Clone, Deserialize, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct StoreConfig {
	/// Storage backend. Defaults to `sqlite`.
	#[serde(default)]
	pub backend: StoreBackend,

	/// Database file. Relative paths are resolved against the config file.
	#[serde(default = "default_path")]
	pub path: PathBuf,

	/// Table (collection) holding the records.
	#[serde(default = "default_table")]
	pub table: String,
}

fn default_path() -> PathBuf {
	PathBuf::from("geostore.sqlite")
}

fn default_table() -> String {
	String::from("geo_records")
}

impl Default for StoreConfig {
	fn default() -> Self {
		Self {
			backend: StoreBackend::default(),
			path: default_path(),
			table: default_table(),
		}
	}
}

impl StoreConfig {
	pub fn resolve_paths(&mut self, base: &Path) {
		if self.path.is_relative() {
			self.path = base.join(&self.path);
		}
	}

	pub fn override_optional_backend(&mut self, backend: Option<StoreBackend>) {
		if let Some(backend) = backend {
			self.backend = backend;
		}
	}

	pub fn override_optional_path(&mut self, path: Option<&PathBuf>) {
		if let Some(path) = path {
			self.path.clone_from(path);
		}
	}

	pub fn override_optional_table(&mut self, table: Option<&String>) {
		if let Some(table) = table {
			self.table.clone_from(table);
		}
	}
}
