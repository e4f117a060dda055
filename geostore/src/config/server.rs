use serde::Deserialize;

#[derive(Debug, Default, Clone, Deserialize, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct ServerConfig {
	/// IP to bind to. Defaults to `0.0.0.0`.
	pub ip: Option<String>,

	/// TCP port to bind to. Defaults to `8080`; `0` picks a free port.
	pub port: Option<u16>,
}

impl ServerConfig {
	pub fn override_optional_ip(&mut self, ip: Option<&String>) {
		if let Some(ip) = ip {
			self.ip = Some(ip.clone());
		}
	}

	pub fn override_optional_port(&mut self, port: Option<u16>) {
		if port.is_some() {
			self.port = port;
		}
	}

	#[must_use]
	pub fn ip_or_default(&self) -> String {
		self.ip.clone().unwrap_or_else(|| String::from("0.0.0.0"))
	}

	#[must_use]
	pub fn port_or_default(&self) -> u16 {
		self.port.unwrap_or(8080)
	}
}
