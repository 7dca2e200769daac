use serde::{Deserialize, Serialize};

use super::id::ContentId;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Content {
    pub id: ContentId,
    pub name: String,
    pub url: String,
    pub description: Option<String>,
    pub interactive: bool,
    pub thumbnail_url: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct CreateContentRequest {
    pub name: String,
    pub url: String,
    pub description: Option<String>,
    #[serde(default)]
    pub interactive: bool,
    pub thumbnail_url: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct UpdateContentRequest {
    pub name: Option<String>,
    pub url: Option<String>,
    pub description: Option<String>,
    pub interactive: Option<bool>,
    pub thumbnail_url: Option<String>,
}
