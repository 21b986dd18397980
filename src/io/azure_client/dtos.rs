#![allow(dead_code)] // Not every field the API sends back is used.

use serde_json::Value;

use crate::calculation::date_range::DateRange;
use crate::prelude::*;

// Shapes follow the Cost Management query API, version 2023-03-01:
// https://learn.microsoft.com/en-us/rest/api/cost-management/query/usage
//
// Only what this program sends or reads is modeled here.

/// Dimensions the costs are grouped by. Order matters, it decides the column order
/// of the response and so the field order of every record.
pub const GROUPING_DIMENSIONS: &[&str] = &[
    "ResourceGroupName",
    "ResourceId",
    "SubscriptionName",
    "MeterCategory",
    "MeterSubcategory",
    "Product",
    "ServiceFamily",
    "UnitOfMeasure",
    "BillingAccountName",
    "InvoiceSectionName",
    "PricingModel",
    "ResourceLocation",
    "ChargeType",
    "ServiceName",
    "BillingMonth",
];

/// Extra measures requested per grouped row.
pub const METRICS: &[&str] = &["Quantity", "CostInUSD", "EffectivePrice"];

/// Request body for the query endpoint.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CostQuery {
    #[serde(rename = "type")]
    pub kind: QueryType,
    pub timeframe: Timeframe,
    pub time_period: DateRange,
    pub dataset: Dataset,
}

impl CostQuery {
    /// Daily pre-tax cost for the given range, with the fixed grouping and metrics.
    pub fn daily_usage(range: DateRange) -> Self {
        CostQuery {
            kind: QueryType::Usage,
            timeframe: Timeframe::Custom,
            time_period: range,
            dataset: Dataset {
                granularity: Granularity::Daily,
                aggregation: Aggregation {
                    total_cost: AggregationFunction {
                        name: "PreTaxCost",
                        function: Function::Sum,
                    },
                },
                grouping: GROUPING_DIMENSIONS
                    .iter()
                    .map(|&name| Grouping {
                        kind: GroupingType::Dimension,
                        name,
                    })
                    .collect(),
                metrics: METRICS.iter().map(|&name| Metric { name }).collect(),
            },
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum QueryType {
    Usage,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Timeframe {
    Custom,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Granularity {
    Daily,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Function {
    Sum,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum GroupingType {
    Dimension,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Dataset {
    pub granularity: Granularity,
    pub aggregation: Aggregation,
    pub grouping: Vec<Grouping>,
    pub metrics: Vec<Metric>,
}

/// Aggregations keyed by their alias. There is only one.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Aggregation {
    pub total_cost: AggregationFunction,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AggregationFunction {
    pub name: &'static str,
    pub function: Function,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Grouping {
    #[serde(rename = "type")]
    pub kind: GroupingType,
    pub name: &'static str,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Metric {
    pub name: &'static str,
}

/// Top level of the query response. Everything useful lives in `properties`.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct QueryResult {
    pub properties: CostQueryResponse,
}

/// Columnar result: rows are positionally aligned to the columns.
#[derive(Debug, Clone, PartialEq, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct CostQueryResponse {
    pub columns: Vec<Column>,

    #[serde(default)]
    pub rows: Vec<Vec<Value>>,

    /// Set when the service has more rows than it returned.
    #[serde(default)]
    pub next_link: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Column {
    pub name: String,

    /// "Number", "String" and so on. Informational only.
    #[serde(rename = "type", default)]
    pub kind: Option<String>,
}

/// Token endpoint answer. Only `access_token` is used, it is optional here so its
/// absence can be reported as such instead of as a parse error.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct TokenResponse {
    pub access_token: Option<String>,

    #[serde(default)]
    pub token_type: Option<String>,

    #[serde(default)]
    pub expires_in: Option<u64>,
}
