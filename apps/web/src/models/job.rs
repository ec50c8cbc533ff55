use serde::{Deserialize, Serialize};

/// A job posting as served by the upstream API.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Job {
    pub id: i64,
    pub title: String,
    pub description: String,
}

/// Payload forwarded to the upstream submit endpoint.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Application {
    pub job: String,
    pub email: String,
}

/// Subset of the SAML assertion attributes we read.
#[derive(Debug, Default, Deserialize)]
pub struct SamlAttributes {
    #[serde(rename = "tas.personal.email", default)]
    pub email: String,
}
