use serde::{Deserialize, Serialize};

/// Colour of a user-visible alert
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Indicator {
    Green,
    Red,
    Blue,
    Orange,
}

impl Indicator {
    /// CSS modifier used by the toast stack
    pub fn css_class(&self) -> &'static str {
        match self {
            Indicator::Green => "notice--green",
            Indicator::Red => "notice--red",
            Indicator::Blue => "notice--blue",
            Indicator::Orange => "notice--orange",
        }
    }
}

/// Short message shown to the user after an action (success, failure, info)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Notice {
    pub message: String,
    pub indicator: Indicator,
}

impl Notice {
    pub fn success(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            indicator: Indicator::Green,
        }
    }

    pub fn failure(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            indicator: Indicator::Red,
        }
    }

    pub fn info(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            indicator: Indicator::Blue,
        }
    }

    pub fn warning(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            indicator: Indicator::Orange,
        }
    }
}
