use super::views::View;
use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum FlashLevel {
    Success,
    Info,
    Error,
}

/// One-shot notice shown with the next page.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Flash {
    pub level: FlashLevel,
    pub message: String,
}

impl Flash {
    pub fn success(message: impl Into<String>) -> Self {
        Self {
            level: FlashLevel::Success,
            message: message.into(),
        }
    }

    pub fn info(message: impl Into<String>) -> Self {
        Self {
            level: FlashLevel::Info,
            message: message.into(),
        }
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self {
            level: FlashLevel::Error,
            message: message.into(),
        }
    }
}

#[derive(Debug, Clone, Serialize)]
#[serde(tag = "outcome", rename_all = "snake_case")]
pub enum Outcome {
    Page {
        view: View,
        #[serde(skip_serializing_if = "Option::is_none")]
        flash: Option<Flash>,
    },
    Redirect {
        to: String,
        flash: Flash,
    },
    NotFound {
        message: String,
    },
    Rejected {
        message: String,
    },
}

impl Outcome {
    pub fn page(view: View) -> Self {
        Outcome::Page { view, flash: None }
    }

    pub fn page_with(view: View, flash: Option<Flash>) -> Self {
        Outcome::Page { view, flash }
    }

    pub fn redirect(to: &str, flash: Flash) -> Self {
        Outcome::Redirect {
            to: to.to_string(),
            flash,
        }
    }

    pub fn view(&self) -> Option<&View> {
        match self {
            Outcome::Page { view, .. } => Some(view),
            _ => None,
        }
    }

    pub fn flash(&self) -> Option<&Flash> {
        match self {
            Outcome::Page { flash, .. } => flash.as_ref(),
            Outcome::Redirect { flash, .. } => Some(flash),
            _ => None,
        }
    }
}
