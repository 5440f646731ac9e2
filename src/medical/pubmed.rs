//! Literature-search tool server registration.

use serde::{Deserialize, Serialize};
use serde_json::json;

use crate::config::PubMedConfig;

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ToolServerInfo {
    pub id: String,
    pub name: String,
    pub description: String,
    pub version: String,
}

/// Tool server connection as stored in the host's tool-server list.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ToolServerConnection {
    pub url: String,
    pub path: String,
    #[serde(rename = "type")]
    pub kind: String,
    pub auth_type: String,
    pub key: Option<String>,
    #[serde(default)]
    pub config: serde_json::Value,
    #[serde(default)]
    pub info: ToolServerInfo,
}

/// Connection descriptor for the configured PubMed server.
pub fn pubmed_connection(config: &PubMedConfig) -> ToolServerConnection {
    ToolServerConnection {
        url: config.url.clone(),
        path: config.path.clone(),
        kind: "mcp".to_string(),
        auth_type: "none".to_string(),
        key: None,
        config: json!({
            "max_results": config.max_results,
            "years_back": config.years_back,
            "quality_threshold": config.quality_threshold,
            "preferred_types": config.preferred_types,
        }),
        info: ToolServerInfo {
            id: config.server_id.clone(),
            name: config.name.clone(),
            description: config.description.clone(),
            version: config.version.clone(),
        },
    }
}

/// Append the PubMed connection unless one with the same id is present.
/// Returns whether it was added.
pub fn register_pubmed(connections: &mut Vec<ToolServerConnection>, config: &PubMedConfig) -> bool {
    if connections.iter().any(|c| c.info.id == config.server_id) {
        tracing::info!(id = %config.server_id, "PubMed tool server already configured");
        return false;
    }
    connections.push(pubmed_connection(config));
    tracing::info!(id = %config.server_id, url = %config.url, "PubMed tool server registered");
    true
}
