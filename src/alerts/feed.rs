use super::types::{AlertDirection, PriceAlert};
use tracing::debug;

/// The list of price alerts for one session.
///
/// Alerts are only ever removed, so the feed can run dry but never grows.
#[derive(Debug, Clone, Default)]
pub struct AlertFeed {
    alerts: Vec<PriceAlert>,
}

impl AlertFeed {
    pub fn new(alerts: Vec<PriceAlert>) -> Self {
        Self { alerts }
    }

    /// The demo alerts every session starts with
    pub fn seeded() -> Self {
        Self::new(vec![
            PriceAlert {
                id: "1".to_string(),
                direction: AlertDirection::Decrease,
                subject: "iPhone 13 Pro".to_string(),
                detail: "Average price dropped by 15%".to_string(),
                percentage: 15.0,
            },
            PriceAlert {
                id: "2".to_string(),
                direction: AlertDirection::Increase,
                subject: "Sony PlayStation 5".to_string(),
                detail: "Average price increased by 8%".to_string(),
                percentage: 8.0,
            },
        ])
    }

    /// Remove the alert with `id`. Unknown ids are ignored.
    pub fn dismiss(&mut self, id: &str) -> Option<PriceAlert> {
        let index = self.alerts.iter().position(|a| a.id == id)?;
        let removed = self.alerts.remove(index);
        debug!("Dismissed alert {} ({} left)", id, self.alerts.len());
        Some(removed)
    }

    pub fn get(&self, id: &str) -> Option<&PriceAlert> {
        self.alerts.iter().find(|a| a.id == id)
    }

    pub fn iter(&self) -> impl Iterator<Item = &PriceAlert> {
        self.alerts.iter()
    }

    pub fn to_vec(&self) -> Vec<PriceAlert> {
        self.alerts.clone()
    }

    pub fn len(&self) -> usize {
        self.alerts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.alerts.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_seeded_feed() {
        let feed = AlertFeed::seeded();
        assert_eq!(feed.len(), 2);
        assert_eq!(feed.get("1").unwrap().subject, "iPhone 13 Pro");
        assert_eq!(feed.get("2").unwrap().direction, AlertDirection::Increase);
    }

    #[test]
    fn test_dismiss_known_id_shrinks_by_one() {
        let mut feed = AlertFeed::seeded();
        let removed = feed.dismiss("1").unwrap();
        assert_eq!(removed.id, "1");
        assert_eq!(feed.len(), 1);
        assert!(feed.get("1").is_none());
    }

    #[test]
    fn test_dismiss_unknown_id_is_noop() {
        let mut feed = AlertFeed::seeded();
        assert!(feed.dismiss("99").is_none());
        assert_eq!(feed.len(), 2);
    }

    #[test]
    fn test_feed_can_be_exhausted() {
        let mut feed = AlertFeed::seeded();
        feed.dismiss("2");
        feed.dismiss("1");
        assert!(feed.is_empty());
        assert!(feed.dismiss("1").is_none());
    }

    #[test]
    fn test_remaining_order_is_kept() {
        let mut feed = AlertFeed::new(
            ["a", "b", "c"]
                .into_iter()
                .map(|id| PriceAlert::new(id, AlertDirection::Decrease, id, "", 1.0).unwrap())
                .collect(),
        );
        feed.dismiss("b");
        let ids: Vec<_> = feed.iter().map(|a| a.id.as_str()).collect();
        assert_eq!(ids, vec!["a", "c"]);
    }
}
