//! GeoStore HTTP server lifecycle.
//!
//! Request handling lives in `handlers`, route wiring in `routes` and the CORS
//! policy in `cors`. This file owns building the router, the global protection
//! layers (timeouts, backpressure, panic catching), binding a socket and
//! graceful shutdown.

use super::{cors, routes};
use crate::{
	config::{Config, CorsConfig},
	service::RecordService,
};
use anyhow::{Context, Result};
use axum::{
	BoxError, Router,
	error_handling::HandleErrorLayer,
	http::{HeaderValue, StatusCode, header::RETRY_AFTER},
	response::IntoResponse,
};
use std::{net::SocketAddr, time::Duration};
use tokio::{net::TcpListener, sync::oneshot, task::JoinHandle};
use tower::{
	ServiceBuilder, buffer::BufferLayer, limit::ConcurrencyLimitLayer, load_shed::LoadShedLayer, timeout::TimeoutLayer,
};
use tower_http::catch_panic::CatchPanicLayer;

const GLOBAL_CONCURRENCY: usize = 256;
const GLOBAL_BUFFER: usize = 512;
const REQUEST_TIMEOUT: Duration = Duration::from_secs(15);
const SHUTDOWN_TIMEOUT: Duration = Duration::from_secs(10);

/// Serves the records API for one [`RecordService`].
///
/// `start` on a running server restarts it; `stop` on a stopped server does nothing.
pub struct GeoServer {
	ip: String,
	port: u16,
	cors: CorsConfig,
	service: RecordService,
	exit_signal: Option<oneshot::Sender<()>>,
	join: Option<JoinHandle<()>>,
	local_addr: Option<SocketAddr>,
}

impl GeoServer {
	pub fn new(ip: &str, port: u16, cors: CorsConfig, service: RecordService) -> GeoServer {
		GeoServer {
			ip: ip.to_owned(),
			port,
			cors,
			service,
			exit_signal: None,
			join: None,
			local_addr: None,
		}
	}

	pub fn from_config(config: &Config, service: RecordService) -> GeoServer {
		GeoServer::new(
			&config.server.ip_or_default(),
			config.server.port_or_default(),
			config.cors.clone(),
			service,
		)
	}

	/// The full application: status probe, records API, CORS and protection layers.
	pub fn build_router(&self) -> Result<Router> {
		let mut router = routes::add_status_to_app(Router::new());
		router = routes::add_records_to_app(router, self.service.clone());

		router = router.layer(cors::build_cors_layer(&self.cors)?);

		// Outermost to innermost. HandleErrorLayer turns tower errors into 503 so
		// the router sees an infallible service.
		let overload_handler = HandleErrorLayer::new(|err: BoxError| async move {
			log::warn!("request aborted: {err}");
			let mut resp = (StatusCode::SERVICE_UNAVAILABLE, "Service overloaded, try later").into_response();
			resp.headers_mut().insert(RETRY_AFTER, HeaderValue::from_static("2"));
			Ok::<_, std::convert::Infallible>(resp)
		});

		let protection = ServiceBuilder::new()
			.layer(overload_handler)
			.layer(CatchPanicLayer::new())
			.layer(TimeoutLayer::new(REQUEST_TIMEOUT))
			.layer(BufferLayer::new(GLOBAL_BUFFER))
			.layer(ConcurrencyLimitLayer::new(GLOBAL_CONCURRENCY))
			.layer(LoadShedLayer::new());

		Ok(router.layer(protection))
	}

	pub async fn start(&mut self) -> Result<()> {
		if self.exit_signal.is_some() || self.join.is_some() {
			self.stop().await;
		}

		log::info!("starting server");
		let router = self.build_router()?;

		let addr = format!("{}:{}", self.ip, self.port);
		let listener = TcpListener::bind(&addr)
			.await
			.with_context(|| format!("binding server to {addr}"))?;
		let local_addr = listener.local_addr()?;
		log::info!("server listening on {local_addr}");

		let (tx, rx) = oneshot::channel::<()>();
		let handle = tokio::spawn(async move {
			if let Err(err) = axum::serve(listener, router.into_make_service())
				.with_graceful_shutdown(async {
					rx.await.ok();
				})
				.await
			{
				log::error!("server task exited with error: {err}");
			}
		});

		self.exit_signal = Some(tx);
		self.join = Some(handle);
		self.local_addr = Some(local_addr);

		Ok(())
	}

	/// Address the server is bound to while running. Reports the real port when configured with `0`.
	pub fn local_addr(&self) -> Option<SocketAddr> {
		self.local_addr
	}

	/// Signals graceful shutdown and waits (bounded) for in-flight requests.
	pub async fn stop(&mut self) {
		if self.exit_signal.is_none() && self.join.is_none() {
			return;
		}

		log::info!("stopping server");

		if let Some(tx) = self.exit_signal.take() {
			let _ = tx.send(());
		}

		if let Some(handle) = self.join.take() {
			match tokio::time::timeout(SHUTDOWN_TIMEOUT, handle).await {
				Ok(Err(join_err)) => log::warn!("server task join error: {join_err}"),
				Ok(Ok(())) => {}
				Err(_) => log::warn!("server task did not shutdown within timeout; continuing"),
			}
		}
		self.local_addr = None;
	}
}
