//! Recommendation payload.

use serde::{Deserialize, Serialize};

/// The user the presentation client asks recommendations for.
pub const DEMO_USER_ID: u32 = 42;

/// Recommendation list returned by the recommendation service.
///
/// Only `recommendations` is read by the presentation client; a payload
/// without the field decodes as an empty list.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Recommendations {
    /// User the list was computed for, when the service reports it.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user_id: Option<u32>,
    /// Recommended product names, in display order.
    #[serde(default)]
    pub recommendations: Vec<String>,
}

impl Recommendations {
    /// Creates a recommendation list for a user.
    #[must_use]
    pub fn for_user(user_id: u32, recommendations: Vec<String>) -> Self {
        Self {
            user_id: Some(user_id),
            recommendations,
        }
    }
}
