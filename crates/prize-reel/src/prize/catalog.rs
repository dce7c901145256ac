use std::collections::HashSet;

use serde::{Deserialize, Serialize};

use super::{Prize, PrizeTable};
use crate::error::CatalogError;

const DEMO_CATALOG: &str = include_str!("demo_catalog.json");

/// Sponsored competitions and their prize tables.
/// Loaded from a JSON file at runtime.
#[derive(Debug, Clone)]
pub struct Catalog {
    competitions: Vec<Competition>,
}

/// A single competition with a validated prize table.
#[derive(Debug, Clone, PartialEq)]
pub struct Competition {
    pub id: String,
    pub title: String,
    pub sponsor: String,
    /// Price of one ticket, in minor currency units.
    pub ticket_price: u32,
    /// Most tickets a player can buy in one play.
    pub max_tickets: u32,
    pub prizes: PrizeTable,
}

#[derive(Debug, Deserialize, Serialize)]
struct CatalogFile {
    competitions: Vec<CompetitionDescriptor>,
}

#[derive(Debug, Deserialize, Serialize)]
struct CompetitionDescriptor {
    id: String,
    title: String,
    #[serde(default)]
    sponsor: String,
    ticket_price: u32,
    #[serde(default = "default_max_tickets")]
    max_tickets: u32,
    prizes: Vec<Prize>,
}

fn default_max_tickets() -> u32 {
    100
}

impl Catalog {
    /// Parse a catalog, validating every prize table eagerly.
    pub fn from_json(json: &str) -> Result<Self, CatalogError> {
        let file: CatalogFile = serde_json::from_str(json)?;
        let mut seen = HashSet::with_capacity(file.competitions.len());
        let mut competitions = Vec::with_capacity(file.competitions.len());

        for desc in file.competitions {
            if !seen.insert(desc.id.clone()) {
                return Err(CatalogError::DuplicateId(desc.id));
            }
            let prizes = PrizeTable::new(desc.prizes).map_err(|source| CatalogError::Prizes {
                competition: desc.id.clone(),
                source,
            })?;
            competitions.push(Competition {
                id: desc.id,
                title: desc.title,
                sponsor: desc.sponsor,
                ticket_price: desc.ticket_price,
                max_tickets: desc.max_tickets,
                prizes,
            });
        }

        Ok(Self { competitions })
    }

    /// The bundled mock catalog.
    pub fn demo() -> Result<Self, CatalogError> {
        Self::from_json(DEMO_CATALOG)
    }

    pub fn get(&self, id: &str) -> Option<&Competition> {
        self.competitions.iter().find(|c| c.id == id)
    }

    pub fn competitions(&self) -> &[Competition] {
        &self.competitions
    }

    pub fn len(&self) -> usize {
        self.competitions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.competitions.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn demo_catalog_is_valid() {
        let catalog = Catalog::demo().unwrap();
        assert!(!catalog.is_empty());
        for competition in catalog.competitions() {
            assert!(!competition.prizes.is_empty(), "{} has no prizes", competition.id);
        }
    }

    #[test]
    fn lookup_by_id() {
        let json = r#"{
            "competitions": [
                {
                    "id": "tech",
                    "title": "Tech Drop",
                    "ticket_price": 199,
                    "prizes": [
                        { "name": "Sticker", "rarity": "common", "probability": 90 },
                        { "name": "Laptop", "rarity": "legendary", "probability": 10, "image": "laptop" }
                    ]
                }
            ]
        }"#;
        let catalog = Catalog::from_json(json).unwrap();
        let tech = catalog.get("tech").expect("tech should exist");
        assert_eq!(tech.max_tickets, 100);
        assert_eq!(tech.prizes.get(1).unwrap().image.as_deref(), Some("laptop"));
        assert!(catalog.get("missing").is_none());
    }

    #[test]
    fn invalid_prize_table_names_competition() {
        let json = r#"{
            "competitions": [
                { "id": "broken", "title": "Broken", "ticket_price": 1,
                  "prizes": [ { "name": "A", "rarity": "common", "probability": 50 } ] }
            ]
        }"#;
        match Catalog::from_json(json) {
            Err(CatalogError::Prizes { competition, .. }) => assert_eq!(competition, "broken"),
            other => panic!("expected prize error, got {:?}", other),
        }
    }

    #[test]
    fn duplicate_ids_are_rejected() {
        let json = r#"{
            "competitions": [
                { "id": "x", "title": "X", "ticket_price": 1,
                  "prizes": [ { "name": "A", "rarity": "common", "probability": 100 } ] },
                { "id": "x", "title": "X again", "ticket_price": 1,
                  "prizes": [ { "name": "A", "rarity": "common", "probability": 100 } ] }
            ]
        }"#;
        assert!(matches!(Catalog::from_json(json), Err(CatalogError::DuplicateId(id)) if id == "x"));
    }
}
