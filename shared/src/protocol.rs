use serde::{Deserialize, Serialize};

use crate::analysis::AnalysisPayload;

/// Response envelope shared by the upload, camera, and self-test endpoints.
#[derive(Serialize, Deserialize, Clone, Debug)]
pub struct AnalysisEnvelope {
    pub success: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub analysis: Option<AnalysisPayload>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub struct UserInfo {
    pub id: String,
    pub email: String,
    pub name: String,
}

#[derive(Serialize, Deserialize, Clone, Debug)]
pub struct AuthStatus {
    pub authenticated: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user: Option<UserInfo>,
}

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub struct AnalysisTypeInfo {
    pub id: String,
    pub name: String,
    pub description: String,
}

/// Client -> server frames on the live analysis socket.
#[derive(Serialize, Clone, Debug)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum ClientMessage {
    Image { image: String },
}

/// Server -> client frames. Only `analysis` frames are acted on; anything
/// with an unrecognized tag lands in `Other` and is ignored.
#[derive(Deserialize, Clone, Debug)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum ServerMessage {
    Analysis { data: AnalysisEnvelope },
    #[serde(other)]
    Other,
}
