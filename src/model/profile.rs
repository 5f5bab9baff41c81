//! Account profile

use super::types::UserInfo;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::collections::BTreeMap;

/// A group the account belongs to
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Group {
    /// Display name
    #[serde(default)]
    pub name: String,
    /// Group id used in searches
    #[serde(default)]
    pub id: String,
    /// Readable by anyone
    #[serde(default)]
    pub public: bool,
    /// Group activity page
    #[serde(default)]
    pub url: Option<String>,
}

/// Profile of the account behind the configured token
///
/// Without a token the service still answers, with no `userid` and only the
/// public group.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Profile {
    /// Account id (`acct:name@authority`), absent when anonymous
    #[serde(default)]
    pub userid: Option<String>,
    /// Authority that issued the account
    #[serde(default)]
    pub authority: String,
    /// Groups the account can read
    #[serde(default)]
    pub groups: Vec<Group>,
    /// Feature flags
    #[serde(default)]
    pub features: BTreeMap<String, bool>,
    /// Client preferences
    #[serde(default)]
    pub preferences: Map<String, Value>,
    /// Display metadata
    #[serde(default)]
    pub user_info: UserInfo,
}

impl Profile {
    /// Check if the profile belongs to a logged-in account
    pub fn is_authenticated(&self) -> bool {
        self.userid.as_deref().is_some_and(|u| !u.is_empty())
    }

    /// Display name, if the account set one
    pub fn display_name(&self) -> Option<&str> {
        self.user_info.display_name.as_deref()
    }

    /// Groups that are not publicly readable
    pub fn private_groups(&self) -> impl Iterator<Item = &Group> {
        self.groups.iter().filter(|g| !g.public)
    }

    /// Check a feature flag; unknown flags are off
    pub fn feature(&self, name: &str) -> bool {
        self.features.get(name).copied().unwrap_or(false)
    }
}
