use anyhow::Result;

use crate::core::AppConfig;
use crate::google::oauth::{OAuthClient, OAuthConfig};

/// Print the consent URL so the OAuth flow can be started by hand.
pub fn run() -> Result<()> {
    let config = AppConfig::from_env()?;
    let oauth = OAuthClient::new(OAuthConfig {
        client_id: config.google_client_id,
        client_secret: config.google_client_secret,
        redirect_uri: config.google_redirect_uri,
        auth_url: config.google_auth_url,
        token_url: config.google_token_url,
    });

    println!(
        "\nPlease open the following URL in your browser and authorize access:\n\n{}\n",
        oauth.generate_auth_url()
    );
    println!("Then pass the code to GET /api/auth/exchange-code?code=<code>");

    Ok(())
}
