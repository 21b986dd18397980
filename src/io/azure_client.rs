pub mod client;
pub mod dtos;

use std::fmt;

use crate::config::Credentials;
use crate::prelude::*;

pub use client::AzureClient;
pub use dtos::{CostQuery, CostQueryResponse};

pub const API_VERSION: &str = "2023-03-01";

/// The two places this program talks to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Endpoint {
    Token,
    CostQuery,
}

impl fmt::Display for Endpoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Endpoint::Token => f.write_str("token"),
            Endpoint::CostQuery => f.write_str("cost query"),
        }
    }
}

/// Hosts for one cloud. Public cloud unless told otherwise.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Endpoints {
    authority_host: String,
    management_endpoint: String,
}

impl Endpoints {
    pub fn new(authority_host: &str, management_endpoint: &str) -> Self {
        Endpoints {
            authority_host: authority_host.trim_end_matches('/').to_owned(),
            management_endpoint: management_endpoint.trim_end_matches('/').to_owned(),
        }
    }

    pub fn token_url(&self, tenant_id: &str) -> String {
        format!("{}/{}/oauth2/v2.0/token", self.authority_host, tenant_id)
    }

    /// The scope covering the whole resource manager API.
    pub fn scope(&self) -> String {
        format!("{}/.default", self.management_endpoint)
    }

    pub fn query_url(&self, subscription_id: &str) -> String {
        format!(
            "{}/subscriptions/{}/providers/Microsoft.CostManagement/query?api-version={}",
            self.management_endpoint, subscription_id, API_VERSION
        )
    }
}

/// A bearer token. Never printed.
#[derive(Clone, PartialEq, Eq)]
pub struct AccessToken(String);

impl AccessToken {
    pub fn new(token: impl Into<String>) -> Self {
        AccessToken(token.into())
    }

    pub fn secret(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for AccessToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("AccessToken(<redacted>)")
    }
}

/// What the pipeline needs from the billing provider.
pub trait BillingApi {
    /// Client credentials exchange. A fresh token every time.
    fn acquire_token(&self, credentials: &Credentials) -> AppResult<AccessToken>;

    /// One query, one response. No pagination.
    fn query_costs(
        &self,
        token: &AccessToken,
        subscription_id: &str,
        query: &CostQuery,
    ) -> AppResult<CostQueryResponse>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn public_cloud_urls() {
        let endpoints = Endpoints::new(
            "https://login.microsoftonline.com",
            "https://management.azure.com",
        );

        assert_eq!(
            endpoints.token_url("contoso-tenant"),
            "https://login.microsoftonline.com/contoso-tenant/oauth2/v2.0/token"
        );
        assert_eq!(endpoints.scope(), "https://management.azure.com/.default");
        assert_eq!(
            endpoints.query_url("0000-1111"),
            "https://management.azure.com/subscriptions/0000-1111/providers/Microsoft.CostManagement/query?api-version=2023-03-01"
        );
    }

    #[test]
    fn trailing_slashes_are_ignored() {
        let endpoints = Endpoints::new(
            "https://login.microsoftonline.us/",
            "https://management.usgovcloudapi.net/",
        );

        assert_eq!(
            endpoints.scope(),
            "https://management.usgovcloudapi.net/.default"
        );
        assert_eq!(
            endpoints.token_url("t"),
            "https://login.microsoftonline.us/t/oauth2/v2.0/token"
        );
    }

    #[test]
    fn token_is_redacted_in_debug_output() {
        let token = AccessToken::new("eyJ0eXAiOiJKV1Qi");

        assert_eq!(format!("{:?}", token), "AccessToken(<redacted>)");
        assert_eq!(token.secret(), "eyJ0eXAiOiJKV1Qi");
    }
}
