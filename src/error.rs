use miette::Diagnostic;
use thiserror::Error;

use crate::io::azure_client::Endpoint;

// Codes follow the same layout everywhere:
// cost_extract::config -> environment, credentials, settings.
// cost_extract::api -> token endpoint and cost query endpoint.
// cost_extract::data -> response shape problems.
// cost_extract::date -> calendar edge cases.
// cost_extract::report -> writing the output file.

#[derive(Debug, Error, Diagnostic)]
pub enum Error {
    #[error("Credential {variable} is not set.")]
    #[diagnostic(
        code(cost_extract::config::credential),
        help(
"Set {variable} in the environment or in a .env file in the working directory.\n\
The values come from the app registration the cloud administrator handed out."
        )
    )]
    MissingCredential { variable: &'static str },

    #[error("Could not reach the {endpoint} endpoint.")]
    #[diagnostic(
        code(cost_extract::api::transport),
        help("Check the network connection and the configured endpoints.")
    )]
    Transport {
        endpoint: Endpoint,
        #[source]
        source: ureq::Error,
    },

    /// The API answered, but not with a success status.
    #[error("The {endpoint} request was rejected with HTTP {status}.")]
    #[diagnostic(
        code(cost_extract::api::status),
        help("401/403 usually means wrong credentials or a missing Cost Management Reader role.")
    )]
    ApiStatus {
        endpoint: Endpoint,
        status: u16,
        body: String,
    },

    #[error("The {endpoint} response could not be read as JSON.")]
    #[diagnostic(code(cost_extract::api::malformed))]
    MalformedResponse {
        endpoint: Endpoint,
        #[source]
        source: ureq::Error,
    },

    #[error("The token response has no access_token field.")]
    #[diagnostic(
        code(cost_extract::api::access_token),
        help("The identity provider answered without a token, check the tenant id.")
    )]
    MissingAccessToken,

    #[error("Column '{name}' appears more than once in the response.")]
    #[diagnostic(code(cost_extract::data::duplicate_column))]
    DuplicateColumn { name: String },

    #[error("Row {row} has {found} values but the response declares {expected} columns.")]
    #[diagnostic(
        code(cost_extract::data::row_shape),
        help("The response is inconsistent, nothing was written. Try running again later.")
    )]
    RowShapeMismatch {
        row: usize,
        expected: usize,
        found: usize,
    },

    #[error("There is no day before {0}.")]
    #[diagnostic(code(cost_extract::date::range))]
    InvalidDate(jiff::civil::Date),

    #[error("Could not serialize the report.")]
    #[diagnostic(code(cost_extract::report::serialize))]
    Serialize(#[source] serde_json::Error),

    #[error("Could not write the report to {path}.")]
    #[diagnostic(
        code(cost_extract::report::write),
        help("Check that the directory exists and is writable.")
    )]
    WriteReport {
        path: String,
        #[source]
        source: std::io::Error,
    },
}

impl Error {
    /// The payload the API sent back with a failure, if there was one.
    pub fn api_body(&self) -> Option<&str> {
        match self {
            Error::ApiStatus { body, .. } if !body.trim().is_empty() => Some(body),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn api_body_is_exposed_for_rejected_requests() {
        let error = Error::ApiStatus {
            endpoint: Endpoint::Token,
            status: 401,
            body: r#"{"error":"invalid_client"}"#.to_owned(),
        };

        assert_eq!(error.api_body(), Some(r#"{"error":"invalid_client"}"#));
    }

    #[test]
    fn blank_api_body_counts_as_absent() {
        let error = Error::ApiStatus {
            endpoint: Endpoint::CostQuery,
            status: 500,
            body: "  \n".to_owned(),
        };

        assert_eq!(error.api_body(), None);
        assert_eq!(Error::MissingAccessToken.api_body(), None);
    }
}
