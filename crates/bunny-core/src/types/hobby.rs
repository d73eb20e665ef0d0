//! Hobby summaries and the recommendation hint.

use serde::{Deserialize, Serialize};

/// A hobby the user can relax with.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HobbySummary {
    /// Hobby identifier.
    #[serde(deserialize_with = "super::shopping::string_or_number")]
    pub id: String,
    /// Display name.
    pub name: String,
    /// Optional description.
    #[serde(default)]
    pub description: Option<String>,
}

/// Body of `GET reward-recommendations/`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RecommendationHint {
    /// Server-suggested base message.
    #[serde(default)]
    pub message: Option<String>,
    /// Hobbies suggested for relaxing.
    #[serde(default)]
    pub relax_with: Vec<HobbySummary>,
}
