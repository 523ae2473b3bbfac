use crate::{AssistantError, Result};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AlertDirection {
    Increase,
    Decrease,
}

impl AlertDirection {
    pub fn arrow(&self) -> &'static str {
        match self {
            AlertDirection::Increase => "↑",
            AlertDirection::Decrease => "↓",
        }
    }
}

/// A synthetic price-change notice
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PriceAlert {
    pub id: String,
    pub direction: AlertDirection,
    pub subject: String,
    pub detail: String,
    pub percentage: f32,
}

impl PriceAlert {
    pub fn new(
        id: impl Into<String>,
        direction: AlertDirection,
        subject: impl Into<String>,
        detail: impl Into<String>,
        percentage: f32,
    ) -> Result<Self> {
        let id = id.into();
        if id.trim().is_empty() {
            return Err(AssistantError::InvalidAlert("Alert id is required".into()));
        }

        if !percentage.is_finite() || percentage < 0.0 {
            return Err(AssistantError::InvalidAlert(format!(
                "Percentage must be a non-negative number, got {}",
                percentage
            )));
        }

        Ok(Self {
            id,
            direction,
            subject: subject.into(),
            detail: detail.into(),
            percentage,
        })
    }

    /// One-line summary, e.g. `↓ iPhone 13 Pro: Average price dropped by 15%`
    pub fn summary(&self) -> String {
        format!("{} {}: {}", self.direction.arrow(), self.subject, self.detail)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rejects_negative_and_nan_percentage() {
        assert!(PriceAlert::new("a", AlertDirection::Increase, "x", "y", -1.0).is_err());
        assert!(PriceAlert::new("a", AlertDirection::Increase, "x", "y", f32::NAN).is_err());
        assert!(PriceAlert::new("a", AlertDirection::Increase, "x", "y", 0.0).is_ok());
    }

    #[test]
    fn test_rejects_blank_id() {
        let err = PriceAlert::new(" ", AlertDirection::Decrease, "x", "y", 3.0).unwrap_err();
        assert!(matches!(err, AssistantError::InvalidAlert(_)));
    }

    #[test]
    fn test_summary() {
        let alert = PriceAlert::new(
            "7",
            AlertDirection::Increase,
            "Sony PlayStation 5",
            "Average price increased by 8%",
            8.0,
        )
        .unwrap();
        assert_eq!(
            alert.summary(),
            "↑ Sony PlayStation 5: Average price increased by 8%"
        );
    }
}
