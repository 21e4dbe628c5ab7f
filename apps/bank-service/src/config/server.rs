use super::var_or;
use crate::error::AppError;

/// HTTP listener settings (`BANK_HOST`, `BANK_PORT`).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 8080,
        }
    }
}

impl ServerConfig {
    pub fn from_env() -> Result<Self, AppError> {
        let defaults = Self::default();
        Ok(Self {
            host: var_or("BANK_HOST", defaults.host)?,
            port: var_or("BANK_PORT", defaults.port)?,
        })
    }
}
