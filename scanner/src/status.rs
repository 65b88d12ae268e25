use std::fmt::Display;

use serde::{Deserialize, Serialize};

#[derive(Clone, Copy, Debug, Serialize, Deserialize, Eq, PartialEq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum Status {
    Deployed,
    Deploying,
    Failed,
    Down,
}

impl Status {
    pub fn label(&self) -> &'static str {
        match self {
            Status::Deployed => "[DEPLOYED]",
            Status::Deploying => "[DEPLOYING]",
            Status::Failed => "[FAILED]",
            Status::Down => "[DOWN]",
        }
    }

    /// CSS color name the status canvas is painted with.
    pub fn color(&self) -> &'static str {
        match self {
            Status::Deployed => "lightgreen",
            Status::Deploying => "yellow",
            Status::Failed => "red",
            Status::Down => "pink",
        }
    }

    pub fn text_color(&self) -> &'static str {
        match self {
            Status::Failed => "white",
            _ => "black",
        }
    }
}

impl Display for Status {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.label())
    }
}
