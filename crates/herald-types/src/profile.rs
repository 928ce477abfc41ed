//! Structured company record returned by the profile-data provider.

use serde::{Deserialize, Serialize};

/// Company profile as fetched from the profile-data provider.
///
/// Every field except `specialities` may be absent in a real response;
/// the prompt builder degrades gracefully around missing data.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CompanyProfile {
    /// Company display name. Mandatory for pitch generation.
    pub name: Option<String>,
    /// Industry label, e.g. "Information Technology".
    pub industry: Option<String>,
    /// Self-declared specialities.
    #[serde(default)]
    pub specialities: Vec<String>,
    /// Free-text company description.
    pub description: Option<String>,
    /// Headcount range as reported by the provider, `[min, max]`.
    pub company_size: Option<Vec<Option<u64>>>,
}

impl CompanyProfile {
    /// Lower bound of the headcount range, if the provider reported one.
    pub fn headcount_floor(&self) -> Option<u64> {
        self.company_size.as_ref()?.first().copied().flatten()
    }
}
