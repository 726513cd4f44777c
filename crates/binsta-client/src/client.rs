//! Main client implementation

use crate::{error::ConfigError, transport::Transport, Config, Files, Folders};

/// Binsta storage client
///
/// Cheap to share behind an `Arc`; all operations take `&self` and every call
/// is an independent request.
#[derive(Clone)]
pub struct BinstaClient {
    transport: Transport,
}

impl BinstaClient {
    /// Create a new client with the given configuration
    pub fn new(config: Config) -> Result<Self, ConfigError> {
        Ok(Self {
            transport: Transport::new(config)?,
        })
    }

    /// Client for the production service with no bearer token
    pub fn anonymous() -> Result<Self, ConfigError> {
        Self::new(Config::default())
    }

    /// Client for the production service authenticated with `token`
    pub fn with_token(token: impl Into<String>) -> Result<Self, ConfigError> {
        Self::new(Config::new().with_token(token))
    }

    /// Get the configuration
    pub fn config(&self) -> &Config {
        self.transport.config()
    }

    /// File operations
    pub fn files(&self) -> Files<'_> {
        Files::new(&self.transport)
    }

    /// Folder operations
    pub fn folders(&self) -> Folders<'_> {
        Folders::new(&self.transport)
    }
}

impl std::fmt::Debug for BinstaClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("BinstaClient")
            .field("config", self.config())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{ImageFormat, ImageTransform};

    #[test]
    fn test_variant_url_ignores_api_override() {
        let client = BinstaClient::new(
            Config::new()
                .with_token("t")
                .with_api_url("http://localhost:3000/api/v1"),
        )
        .unwrap();

        let url = client
            .files()
            .variant_url("dLedqBPG7b", &ImageTransform::new().with_format(ImageFormat::Jpg));
        assert_eq!(url, "https://binsta.dev/api/v1/files/dLedqBPG7b/transform?format=jpg");
    }

    #[test]
    fn test_client_is_send_and_sync() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<BinstaClient>();
    }
}
