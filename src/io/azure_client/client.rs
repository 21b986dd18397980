use ureq::Agent;
use ureq::http::Response;

use super::dtos::{CostQuery, CostQueryResponse, QueryResult, TokenResponse};
use super::{AccessToken, BillingApi, Endpoint, Endpoints};
use crate::config::Credentials;
use crate::error::Error;
use crate::prelude::*;

const GRANT_TYPE: &str = "client_credentials";

/// Blocking client for the identity provider and the Cost Management API.
///
/// No timeouts and no retries. If the network hangs, so do we.
pub struct AzureClient {
    agent: Agent,
    endpoints: Endpoints,
}

impl AzureClient {
    pub fn new(endpoints: Endpoints) -> Self {
        // Non-success answers come back as plain responses so their body can be
        // shown to the user instead of a bare status code.
        let config = Agent::config_builder()
            .http_status_as_error(false)
            .build();

        AzureClient {
            agent: Agent::new_with_config(config),
            endpoints,
        }
    }
}

impl BillingApi for AzureClient {
    fn acquire_token(&self, credentials: &Credentials) -> AppResult<AccessToken> {
        let url = self.endpoints.token_url(&credentials.tenant_id);
        let scope = self.endpoints.scope();

        debug!(%url, %scope, "requesting token");

        let response = self
            .agent
            .post(url.as_str())
            .send_form([
                ("client_id", credentials.client_id.as_str()),
                ("client_secret", credentials.client_secret.as_str()),
                ("grant_type", GRANT_TYPE),
                ("scope", scope.as_str()),
            ])
            .map_err(|source| Error::Transport {
                endpoint: Endpoint::Token,
                source,
            })?;

        let body: TokenResponse = read_success(response, Endpoint::Token)?;

        let token = body.access_token.ok_or(Error::MissingAccessToken)?;

        debug!(
            token_type = body.token_type.as_deref().unwrap_or("unknown"),
            expires_in = body.expires_in,
            "token acquired"
        );

        Ok(AccessToken::new(token))
    }

    fn query_costs(
        &self,
        token: &AccessToken,
        subscription_id: &str,
        query: &CostQuery,
    ) -> AppResult<CostQueryResponse> {
        let url = self.endpoints.query_url(subscription_id);

        debug!(%url, from = %query.time_period.from, to = %query.time_period.to, "querying costs");

        let response = self
            .agent
            .post(url.as_str())
            .header("Authorization", format!("Bearer {}", token.secret()))
            .send_json(query)
            .map_err(|source| Error::Transport {
                endpoint: Endpoint::CostQuery,
                source,
            })?;

        let result: QueryResult = read_success(response, Endpoint::CostQuery)?;

        Ok(result.properties)
    }
}

// private

/// Parses a success body, or turns anything else into an error carrying what the
/// API said about it.
fn read_success<T>(mut response: Response<ureq::Body>, endpoint: Endpoint) -> Result<T, Error>
where
    T: serde::de::DeserializeOwned,
{
    let status = response.status();

    if !status.is_success() {
        // The body is the whole point here, but an unreadable one shouldn't hide the status.
        let body = response.body_mut().read_to_string().unwrap_or_default();

        return Err(Error::ApiStatus {
            endpoint,
            status: status.as_u16(),
            body,
        });
    }

    response
        .body_mut()
        .read_json::<T>()
        .map_err(|source| Error::MalformedResponse { endpoint, source })
}
