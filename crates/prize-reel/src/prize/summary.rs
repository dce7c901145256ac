use serde::Serialize;

use super::{BulkPrize, Rarity};

/// One row of the grouped bulk results view.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PrizeGroup {
    pub name: String,
    pub rarity: Rarity,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,
    pub count: usize,
}

/// Group bulk results by prize name, rarest tier first, then by name.
pub fn summarize(results: &[BulkPrize]) -> Vec<PrizeGroup> {
    let mut groups: Vec<PrizeGroup> = Vec::new();
    for prize in results {
        match groups.iter_mut().find(|g| g.name == prize.name) {
            Some(group) => group.count += 1,
            None => groups.push(PrizeGroup {
                name: prize.name.clone(),
                rarity: prize.rarity,
                image: prize.image.clone(),
                count: 1,
            }),
        }
    }
    groups.sort_by(|a, b| b.rarity.cmp(&a.rarity).then_with(|| a.name.cmp(&b.name)));
    groups
}

#[cfg(test)]
mod tests {
    use super::*;

    fn bulk(name: &str, rarity: Rarity) -> BulkPrize {
        BulkPrize { name: name.into(), rarity, image: None }
    }

    #[test]
    fn groups_count_and_sort_rarest_first() {
        let results = vec![
            bulk("Mug", Rarity::Common),
            bulk("Watch", Rarity::Epic),
            bulk("Mug", Rarity::Common),
            bulk("Car", Rarity::Legendary),
            bulk("Hat", Rarity::Common),
        ];
        let groups = summarize(&results);
        let names: Vec<_> = groups.iter().map(|g| g.name.as_str()).collect();
        assert_eq!(names, ["Car", "Watch", "Hat", "Mug"]);
        assert_eq!(groups[3].count, 2);
        assert_eq!(groups.iter().map(|g| g.count).sum::<usize>(), 5);
    }

    #[test]
    fn empty_results_give_no_groups() {
        assert!(summarize(&[]).is_empty());
    }
}
