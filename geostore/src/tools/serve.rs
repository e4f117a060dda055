use super::StoreArgs;
use anyhow::{Context, Result};
use geostore::{server::GeoServer, service::RecordService, store::open_store};
use tokio::time::{Duration, sleep};

#[derive(clap::Args, Debug)]
#[command(disable_version_flag = true, verbatim_doc_comment)]
pub struct Subcommand {
	#[command(flatten)]
	pub store: StoreArgs,

	/// Serve via socket ip. Default: 0.0.0.0
	#[arg(short = 'i', long, env = "GEOSTORE_IP", display_order = 0)]
	pub ip: Option<String>,

	/// Serve via port. Default: 8080
	#[arg(short, long, env = "GEOSTORE_PORT", display_order = 0)]
	pub port: Option<u16>,

	/// Shutdown server automatically after x milliseconds.
	#[arg(long, display_order = 4)]
	pub auto_shutdown: Option<u64>,
}

#[tokio::main]
pub async fn run(arguments: &Subcommand) -> Result<()> {
	let mut config = arguments.store.load_config()?;
	config.server.override_optional_ip(arguments.ip.as_ref());
	config.server.override_optional_port(arguments.port);

	let store = open_store(&config.store)?;
	store
		.ensure_spatial_index()
		.await
		.with_context(|| format!("provisioning the spatial index of {}", store.describe()))?;
	if let Some(len) = store.spatial_index_len().await? {
		log::info!("spatial index holds {len} records");
	}

	let mut server = GeoServer::from_config(&config, RecordService::new(store));
	server.start().await?;
	if let Some(addr) = server.local_addr() {
		eprintln!("serving records at http://{addr}/records");
	}

	if let Some(milliseconds) = arguments.auto_shutdown {
		sleep(Duration::from_millis(milliseconds)).await;
	} else {
		tokio::signal::ctrl_c().await.context("waiting for ctrl-c")?;
	}

	server.stop().await;
	Ok(())
}
