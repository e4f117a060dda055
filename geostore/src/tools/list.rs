use super::StoreArgs;
use anyhow::Result;
use geostore::{config::StoreConfig, service::RecordService, store::open_store};

#[derive(clap::Args, Debug)]
#[command(disable_version_flag = true)]
pub struct Subcommand {
	#[command(flatten)]
	pub store: StoreArgs,
}

#[tokio::main]
pub async fn run(arguments: &Subcommand) -> Result<()> {
	let config = arguments.store.load_config()?;
	println!("{}", list_json(&config.store).await?);
	Ok(())
}

/// All records of the store as a pretty-printed JSON array, in caller representation.
async fn list_json(config: &StoreConfig) -> Result<String> {
	let service = RecordService::new(open_store(config)?);
	let views = service.get_all().await?;
	Ok(serde_json::to_string_pretty(&views)?)
}
