use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::routes::RouteTable;

/// Response type for the health check endpoint
#[derive(Debug, Serialize, Deserialize, utoipa::ToSchema)]
pub struct HealthResponse {
    pub healthy: bool,
}

impl HealthResponse {
    pub const HEALTHY: HealthResponse = HealthResponse { healthy: true };
}

/// Listing of the endpoints reachable under a mount point
#[derive(Debug, Serialize, Deserialize, utoipa::ToSchema)]
pub struct DescriptorResponse {
    pub message: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub version: Option<String>,
    pub endpoints: BTreeMap<String, String>,
}

impl From<&RouteTable> for DescriptorResponse {
    fn from(table: &RouteTable) -> Self {
        DescriptorResponse {
            message: table.message.to_string(),
            version: table.version.map(str::to_string),
            endpoints: table.endpoints(),
        }
    }
}
