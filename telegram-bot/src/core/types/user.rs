//! User identity type for core messages.

use serde::{Deserialize, Serialize};

/// User identity (id, username, names).
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    pub id: i64,
    pub username: Option<String>,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub is_bot: bool,
}

impl User {
    /// First and last name joined by a space; empty when neither is known.
    pub fn full_name(&self) -> String {
        [self.first_name.as_deref(), self.last_name.as_deref()]
            .into_iter()
            .flatten()
            .filter(|s| !s.is_empty())
            .collect::<Vec<_>>()
            .join(" ")
    }

    /// Name used to address the user: full name, then username, then `"there"`.
    pub fn display_name(&self) -> String {
        let full = self.full_name();
        if !full.is_empty() {
            return full;
        }
        self.username
            .clone()
            .filter(|u| !u.is_empty())
            .unwrap_or_else(|| "there".to_string())
    }
}
