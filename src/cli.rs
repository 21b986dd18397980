use std::path::PathBuf;

use clap::Parser;

use crate::config::Credentials;
use crate::error::Error;
use crate::io::azure_client::Endpoints;

impl Cli {
    /// Convenience constructor to avoid redundant `Parser` imports in main.
    pub fn new() -> Self {
        Cli::parse()
    }

    /// Resolve the four credentials once, up front.
    ///
    /// Presence is the only thing checked here. Whether they are actually valid is
    /// for the identity provider to say.
    pub fn try_credentials(&self) -> miette::Result<Credentials> {
        let credentials = Credentials {
            tenant_id: required(&self.tenant_id, "TENANT_ID")?,
            client_id: required(&self.client_id, "CLIENT_ID")?,
            client_secret: required(&self.client_secret, "CLIENT_SECRET")?,
            subscription_id: required(&self.subscription_id, "SUBSCRIPTION_ID")?,
        };

        Ok(credentials)
    }

    pub fn endpoints(&self) -> Endpoints {
        Endpoints::new(&self.authority_host, &self.management_endpoint)
    }
}

// Structs

/// Pull yesterday's cloud cost records and save them as a JSON file.
#[derive(Parser, Debug)]
#[command(name = "cost-extract", version)]
pub struct Cli {
    #[arg(long, env = "TENANT_ID", hide_env_values = true)]
    pub tenant_id: Option<String>,

    #[arg(long, env = "CLIENT_ID", hide_env_values = true)]
    pub client_id: Option<String>,

    #[arg(long, env = "CLIENT_SECRET", hide_env_values = true)]
    pub client_secret: Option<String>,

    #[arg(long, env = "SUBSCRIPTION_ID", hide_env_values = true)]
    pub subscription_id: Option<String>,

    /// Where to save the report. An existing file is overwritten.
    #[arg(long, short, default_value = "reporte-de-costos.json")]
    pub output: PathBuf,

    /// No format. Writes compact JSON instead of the indented one.
    #[arg(long, default_value_t = false)]
    pub unformatted: bool,

    /// Identity provider host, for sovereign clouds.
    #[arg(
        long,
        env = "AZURE_AUTHORITY_HOST",
        default_value = "https://login.microsoftonline.com"
    )]
    pub authority_host: String,

    /// Resource manager host. The token scope is derived from it.
    #[arg(
        long,
        env = "AZURE_RESOURCE_MANAGER_ENDPOINT",
        default_value = "https://management.azure.com"
    )]
    pub management_endpoint: String,

    /// Skip animations
    #[arg(long, default_value_t = false)]
    pub no_animate: bool,

    /// Log request details.
    #[arg(long, short, default_value_t = false, conflicts_with = "quiet")]
    pub verbose: bool,

    /// Log errors only.
    #[arg(long, short, default_value_t = false)]
    pub quiet: bool,
}

// private

fn required(value: &Option<String>, variable: &'static str) -> Result<String, Error> {
    value
        .as_deref()
        .filter(|v| !v.trim().is_empty())
        .map(str::to_owned)
        .ok_or(Error::MissingCredential { variable })
}
