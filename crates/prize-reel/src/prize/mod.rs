//! Prize data: rarity tiers, weighted prize tables, bulk projections.

pub mod bulk;
pub mod catalog;
pub mod selector;
pub mod summary;

use serde::{Deserialize, Serialize};

use crate::components::shape::Color;
use crate::error::PrizeTableError;

/// Allowed drift of a table's probability sum away from 100.
const SUM_TOLERANCE: f64 = 0.01;

/// Prize tier. Ordered from most to least common.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Rarity {
    Common,
    Rare,
    Epic,
    Legendary,
}

impl Rarity {
    pub fn as_str(&self) -> &'static str {
        match self {
            Rarity::Common => "common",
            Rarity::Rare => "rare",
            Rarity::Epic => "epic",
            Rarity::Legendary => "legendary",
        }
    }

    /// Fill color used when a prize has no usable image.
    pub fn color(&self) -> Color {
        match self {
            Rarity::Common => Color::from_hex(0x9ca3af),
            Rarity::Rare => Color::from_hex(0x3b82f6),
            Rarity::Epic => Color::from_hex(0xa855f7),
            Rarity::Legendary => Color::from_hex(0xf59e0b),
        }
    }
}

/// One entry of a competition's prize table.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Prize {
    pub name: String,
    pub rarity: Rarity,
    /// Percentage weight, 0..=100.
    pub probability: f64,
    /// Sprite name looked up in the asset registry.
    #[serde(default, alias = "imageReference", skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,
}

impl Prize {
    pub fn new(name: impl Into<String>, rarity: Rarity, probability: f64) -> Self {
        Self {
            name: name.into(),
            rarity,
            probability,
            image: None,
        }
    }

    pub fn with_image(mut self, image: impl Into<String>) -> Self {
        self.image = Some(image.into());
        self
    }

    /// Reduced projection for the grouped bulk view.
    pub fn to_bulk(&self) -> BulkPrize {
        BulkPrize {
            name: self.name.clone(),
            rarity: self.rarity,
            image: self.image.clone(),
        }
    }
}

/// What the bulk results view needs to know about a won prize.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BulkPrize {
    pub name: String,
    pub rarity: Rarity,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,
}

/// An ordered prize list for one competition. Immutable once built.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PrizeTable {
    prizes: Vec<Prize>,
}

impl PrizeTable {
    /// Build a table, rejecting lists that cannot be drawn from fairly.
    pub fn new(prizes: Vec<Prize>) -> Result<Self, PrizeTableError> {
        if prizes.is_empty() {
            return Err(PrizeTableError::Empty);
        }
        if let Some(bad) = prizes.iter().find(|p| p.probability < 0.0) {
            return Err(PrizeTableError::NegativeProbability { name: bad.name.clone() });
        }
        let sum: f64 = prizes.iter().map(|p| p.probability).sum();
        if (sum - 100.0).abs() > SUM_TOLERANCE {
            return Err(PrizeTableError::ProbabilitySum { sum });
        }
        Ok(Self { prizes })
    }

    /// Wrap a list without validation. Draws from a malformed table fall back
    /// to the first prize.
    pub fn unchecked(prizes: Vec<Prize>) -> Self {
        Self { prizes }
    }

    pub fn prizes(&self) -> &[Prize] {
        &self.prizes
    }

    pub fn len(&self) -> usize {
        self.prizes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.prizes.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&Prize> {
        self.prizes.get(index)
    }

    /// Position of the first prize with the given name.
    pub fn index_of(&self, name: &str) -> Option<usize> {
        self.prizes.iter().position(|p| p.name == name)
    }

    pub fn iter(&self) -> impl Iterator<Item = &Prize> {
        self.prizes.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> Vec<Prize> {
        vec![
            Prize::new("A", Rarity::Common, 40.0),
            Prize::new("B", Rarity::Rare, 30.0),
            Prize::new("C", Rarity::Epic, 20.0),
            Prize::new("D", Rarity::Legendary, 10.0),
        ]
    }

    #[test]
    fn valid_table_is_accepted() {
        let table = PrizeTable::new(sample()).unwrap();
        assert_eq!(table.len(), 4);
        assert_eq!(table.index_of("C"), Some(2));
        assert_eq!(table.index_of("Z"), None);
    }

    #[test]
    fn empty_table_is_rejected() {
        assert_eq!(PrizeTable::new(Vec::new()), Err(PrizeTableError::Empty));
    }

    #[test]
    fn bad_sum_is_rejected() {
        let mut prizes = sample();
        prizes[3].probability = 5.0;
        match PrizeTable::new(prizes) {
            Err(PrizeTableError::ProbabilitySum { sum }) => assert!((sum - 95.0).abs() < 1e-9),
            other => panic!("expected sum error, got {:?}", other),
        }
    }

    #[test]
    fn negative_weight_is_rejected() {
        let mut prizes = sample();
        prizes[0].probability = -40.0;
        prizes[1].probability = 110.0;
        assert!(matches!(
            PrizeTable::new(prizes),
            Err(PrizeTableError::NegativeProbability { .. })
        ));
    }

    #[test]
    fn rarity_orders_by_scarcity() {
        assert!(Rarity::Common < Rarity::Rare);
        assert!(Rarity::Epic < Rarity::Legendary);
        assert_eq!(Rarity::Epic.as_str(), "epic");
    }

    #[test]
    fn prize_json_accepts_image_reference() {
        let json = r#"{ "name": "Watch", "rarity": "epic", "probability": 5, "imageReference": "watch" }"#;
        let prize: Prize = serde_json::from_str(json).unwrap();
        assert_eq!(prize.image.as_deref(), Some("watch"));
        assert_eq!(prize.to_bulk().rarity, Rarity::Epic);
    }
}
