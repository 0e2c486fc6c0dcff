use std::fmt::Display;

use serde::{Deserialize, Serialize};

#[derive(Default, Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum CollaboratorRole {
    Editor,
    #[default]
    Viewer,
}

impl Display for CollaboratorRole {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let role = match self {
            CollaboratorRole::Editor => "editor",
            CollaboratorRole::Viewer => "viewer",
        };
        write!(f, "{}", role)
    }
}
