pub mod azure_client;
pub mod report;
