use anyhow::Result;
use calendar_relay::cli;

#[tokio::main]
async fn main() -> Result<()> {
    cli::run().await
}
