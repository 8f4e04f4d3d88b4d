// Configuration module entry point
// Layered loading: config file, prefixed environment, coded defaults,
// then the platform-injected PORT/REGION variables on top

mod types;

use std::net::SocketAddr;

// Re-export public types
pub use types::{Config, GreetingConfig, LoggingConfig, PerformanceConfig, ServerConfig};

impl Config {
    /// Load configuration from the specified file path (without extension).
    ///
    /// The file is optional. `HELLO_`-prefixed environment variables cover
    /// the whole configuration tree; the bare `PORT` and `REGION` variables
    /// injected by the deployment platform win over every other source.
    pub fn load_from(config_path: &str) -> Result<Self, config::ConfigError> {
        let mut builder = config::Config::builder()
            .add_source(config::File::with_name(config_path).required(false))
            .add_source(config::Environment::with_prefix("HELLO").separator("__"))
            .set_default("server.host", "0.0.0.0")?
            .set_default("server.port", 3000)?
            .set_default("greeting.region", "unknown")?
            .set_default("logging.level", "info")?
            .set_default("logging.access_log", true)?
            .set_default("logging.access_log_format", "combined")?
            .set_default("performance.keep_alive_timeout", 75)?
            .set_default("performance.read_timeout", 30)?
            .set_default("performance.write_timeout", 30)?;

        if let Ok(raw) = std::env::var("PORT") {
            let port: u16 = raw.parse().map_err(|e| {
                config::ConfigError::Message(format!("invalid PORT value '{raw}': {e}"))
            })?;
            builder = builder.set_override("server.port", i64::from(port))?;
        }

        if let Ok(region) = std::env::var("REGION") {
            builder = builder.set_override("greeting.region", region)?;
        }

        builder.build()?.try_deserialize()
    }

    pub fn socket_addr(&self) -> Result<SocketAddr, String> {
        format!("{}:{}", self.server.host, self.server.port)
            .parse()
            .map_err(|e| format!("Invalid address: {e}"))
    }
}

#[cfg(test)]
mod tests {
    use super::Config;
    use std::sync::Mutex;

    // PORT/REGION are process-global; serialize the tests that touch them
    static ENV_LOCK: Mutex<()> = Mutex::new(());

    fn clear_env() {
        std::env::remove_var("PORT");
        std::env::remove_var("REGION");
    }

    #[test]
    fn defaults_apply_without_file_or_env() {
        let _guard = ENV_LOCK.lock().unwrap();
        clear_env();

        let config = Config::load_from("missing-config-file").unwrap();
        assert_eq!(config.server.host, "0.0.0.0");
        assert_eq!(config.server.port, 3000);
        assert!(config.server.workers.is_none());
        assert_eq!(config.greeting.region, "unknown");
        assert!(config.logging.access_log);
        assert_eq!(config.logging.access_log_format, "combined");
        assert_eq!(config.performance.keep_alive_timeout, 75);
        assert!(config.performance.max_connections.is_none());
    }

    #[test]
    fn port_and_region_env_override_defaults() {
        let _guard = ENV_LOCK.lock().unwrap();
        std::env::set_var("PORT", "8181");
        std::env::set_var("REGION", "eu-west");

        let config = Config::load_from("missing-config-file").unwrap();
        clear_env();

        assert_eq!(config.server.port, 8181);
        assert_eq!(config.greeting.region, "eu-west");
    }

    #[test]
    fn invalid_port_is_rejected() {
        let _guard = ENV_LOCK.lock().unwrap();
        std::env::set_var("PORT", "not-a-port");
        std::env::remove_var("REGION");

        let result = Config::load_from("missing-config-file");
        clear_env();

        assert!(result.is_err());
    }

    #[test]
    fn default_config_matches_loaded_defaults() {
        let config = Config::default();
        assert_eq!(config.server.port, 3000);
        assert_eq!(config.greeting.region, "unknown");
        assert_eq!(config.logging.access_log_format, "combined");
    }

    #[test]
    fn socket_addr_combines_host_and_port() {
        let mut config = Config::default();
        config.server.host = "127.0.0.1".to_string();
        config.server.port = 4321;
        let addr = config.socket_addr().unwrap();
        assert_eq!(addr.to_string(), "127.0.0.1:4321");
    }
}
