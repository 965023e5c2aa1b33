use serde::{Deserialize, Serialize};
use validator::Validate;
use crate::models::domain::NewNeighborhood;

/// Request to rank neighborhoods
///
/// Keys stay raw strings here so the unknown-key policy decides what to do
/// with them, rather than the JSON extractor.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RankRequest {
    pub preferences: Vec<String>,
}

/// Query string accepted by the read-all endpoint
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ListQuery {
    #[serde(default)]
    pub name: Option<String>,
}

/// Request to create a neighborhood record
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct CreateNeighborhoodRequest {
    #[validate(length(min = 1))]
    pub name: String,
    #[validate(range(min = 0.0))]
    pub safety: f64,
    #[validate(range(min = 0.0))]
    pub cafes: f64,
    #[validate(range(min = 0.0))]
    pub parks: f64,
    #[validate(range(min = 0.0))]
    pub schools: f64,
    #[validate(range(min = 0.0))]
    #[serde(rename = "publicTransport")]
    pub public_transport: f64,
}

impl From<CreateNeighborhoodRequest> for NewNeighborhood {
    fn from(req: CreateNeighborhoodRequest) -> Self {
        NewNeighborhood {
            name: req.name.trim().to_string(),
            safety: req.safety,
            cafes: req.cafes,
            parks: req.parks,
            schools: req.schools,
            public_transport: req.public_transport,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn request(name: &str, safety: f64) -> CreateNeighborhoodRequest {
        CreateNeighborhoodRequest {
            name: name.to_string(),
            safety,
            cafes: 1.0,
            parks: 1.0,
            schools: 1.0,
            public_transport: 1.0,
        }
    }

    #[test]
    fn test_create_request_validation() {
        assert!(request("Oakwood", 4.0).validate().is_ok());
        assert!(request("", 4.0).validate().is_err());
        assert!(request("Oakwood", -1.0).validate().is_err());
    }

    #[test]
    fn test_rank_request_accepts_unknown_strings() {
        let req: RankRequest =
            serde_json::from_str(r#"{"preferences":["safety","nightlife"]}"#).unwrap();
        assert_eq!(req.preferences, vec!["safety", "nightlife"]);
    }
}
