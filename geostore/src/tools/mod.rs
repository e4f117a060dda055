pub mod list;
pub mod serve;

use anyhow::Result;
use geostore::config::{Config, StoreBackend};
use std::path::PathBuf;

/// Options shared by every command that opens the record store.
#[derive(clap::Args, Debug)]
pub struct StoreArgs {
	/// Path to a YAML configuration file (server, CORS and store settings).
	/// Command line arguments override configuration file settings.
	#[arg(short = 'c', long, value_name = "FILE", env = "GEOSTORE_CONFIG", display_order = 0)]
	pub config: Option<PathBuf>,

	/// Storage backend. Default: sqlite
	#[arg(long, value_enum, env = "GEOSTORE_BACKEND", display_order = 1)]
	pub backend: Option<StoreBackend>,

	/// SQLite database file. Default: geostore.sqlite
	#[arg(long, value_name = "FILE", env = "GEOSTORE_DB_PATH", display_order = 1)]
	pub db_path: Option<PathBuf>,

	/// Table holding the records. Default: geo_records
	#[arg(long, env = "GEOSTORE_TABLE", display_order = 1)]
	pub table: Option<String>,
}

impl StoreArgs {
	pub fn load_config(&self) -> Result<Config> {
		let mut config = if let Some(config_path) = &self.config {
			Config::from_path(config_path)?
		} else {
			Config::default()
		};
		config.store.override_optional_backend(self.backend);
		config.store.override_optional_path(self.db_path.as_ref());
		config.store.override_optional_table(self.table.as_ref());
		Ok(config)
	}
}
