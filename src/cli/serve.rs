use anyhow::Result;

use crate::api;
use crate::core::AppConfig;

pub async fn run(host: String, port: Option<u16>) -> Result<()> {
    let config = AppConfig::from_env()?;
    let port = port.unwrap_or(config.port);
    api::serve(host, port, config).await
}
