use serde::{Deserialize, Deserializer, Serialize};
use validator::Validate;
use crate::models::domain::{PreferenceVector, ScoringMode};

/// Request to rank breeds against a full preference vector
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct RecommendRequest {
    #[validate(nested)]
    #[serde(default)]
    pub preferences: PreferenceVector,
    #[serde(default)]
    pub mode: ScoringMode,
    #[validate(range(min = 1))]
    #[serde(default)]
    pub limit: Option<u16>,
}

/// Request to rank breeds from a free-text description
///
/// Defaults mirror the description flow: size/group filter the catalog and
/// only the single best breed is returned.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct TextRecommendRequest {
    pub text: String,
    #[serde(default = "default_text_mode")]
    pub mode: ScoringMode,
    #[validate(range(min = 1))]
    #[serde(default = "default_text_limit", deserialize_with = "text_limit_or_default")]
    pub limit: u16,
}

fn default_text_mode() -> ScoringMode {
    ScoringMode::Filtered
}

fn default_text_limit() -> u16 {
    1
}

/// An explicit `null` limit means the same as leaving it out
fn text_limit_or_default<'de, D: Deserializer<'de>>(deserializer: D) -> Result<u16, D::Error> {
    Ok(Option::<u16>::deserialize(deserializer)?.unwrap_or_else(default_text_limit))
}

/// Request to turn free text into a preset
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExtractRequest {
    #[serde(default)]
    pub text: String,
}

/// Request to run a semantic search
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct SearchRequest {
    #[validate(length(min = 1))]
    pub query: String,
    #[validate(range(min = 1))]
    #[serde(default)]
    pub limit: Option<u16>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_text_request_defaults() {
        let req: TextRecommendRequest = serde_json::from_str(r#"{"text": "a big dog"}"#).unwrap();
        assert_eq!(req.mode, ScoringMode::Filtered);
        assert_eq!(req.limit, 1);
    }

    #[test]
    fn test_text_request_null_limit_keeps_default() {
        let req: TextRecommendRequest =
            serde_json::from_str(r#"{"text": "a big dog", "limit": null}"#).unwrap();
        assert_eq!(req.limit, 1);

        let req: TextRecommendRequest =
            serde_json::from_str(r#"{"text": "a big dog", "limit": 3}"#).unwrap();
        assert_eq!(req.limit, 3);
    }

    #[test]
    fn test_text_request_zero_limit_invalid() {
        let req: TextRecommendRequest =
            serde_json::from_str(r#"{"text": "a big dog", "limit": 0}"#).unwrap();
        assert!(req.validate().is_err());
    }
}
