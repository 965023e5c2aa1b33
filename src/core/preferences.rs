use crate::models::{AttributeKey, PreferenceSelection};
use serde::Deserialize;
use thiserror::Error;

/// How raw preference strings that name no known attribute are treated
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum UnknownKeyPolicy {
    /// Fail the whole request
    #[default]
    Reject,
    /// Drop unknown keys and score with the rest
    Ignore,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PreferenceError {
    #[error("unrecognized preference keys: {}", .0.join(", "))]
    UnknownKeys(Vec<String>),
}

/// Parse raw request keys into a selection
///
/// Duplicates collapse and order is discarded. Under [`UnknownKeyPolicy::Reject`]
/// every unknown key is reported at once.
pub fn parse_selection<S: AsRef<str>>(
    raw: &[S],
    policy: UnknownKeyPolicy,
) -> Result<PreferenceSelection, PreferenceError> {
    let mut unknown = Vec::new();
    let mut selection = PreferenceSelection::new();

    for key in raw {
        let key = key.as_ref();
        match key.parse::<AttributeKey>() {
            Ok(attr) => {
                if !selection.contains(attr) {
                    selection.toggle(attr);
                }
            }
            Err(_) => {
                if !unknown.iter().any(|k: &String| k == key) {
                    unknown.push(key.to_string());
                }
            }
        }
    }

    if !unknown.is_empty() {
        match policy {
            UnknownKeyPolicy::Reject => return Err(PreferenceError::UnknownKeys(unknown)),
            UnknownKeyPolicy::Ignore => {
                tracing::debug!("Ignoring unknown preference keys: {:?}", unknown);
            }
        }
    }

    Ok(selection)
}
