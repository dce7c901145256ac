//! Bulk reveal: when a play has more tickets than animated reels, every
//! ticket is drawn at once and the results are handed over after a short
//! delay instead of spinning.

use crate::core::time::Deadline;

use super::selector::{select_index, RandomSource};
use super::{BulkPrize, PrizeTable};

/// Draw `count` independent prizes.
pub fn draw_bulk<R: RandomSource + ?Sized>(prizes: &PrizeTable, count: usize, rng: &mut R) -> Vec<BulkPrize> {
    (0..count)
        .filter_map(|_| select_index(prizes.prizes(), rng))
        .filter_map(|i| prizes.get(i))
        .map(|p| p.to_bulk())
        .collect()
}

/// A drawn bulk result waiting for its delivery time.
#[derive(Debug, Default)]
pub struct BulkDraw {
    pending: Option<(Deadline, Vec<BulkPrize>)>,
}

impl BulkDraw {
    pub fn new() -> Self {
        Self::default()
    }

    /// Draw now and hold the results for `delay_ms`. Ignored (returns false)
    /// while an earlier draw is still pending.
    pub fn start<R: RandomSource + ?Sized>(
        &mut self,
        prizes: &PrizeTable,
        count: usize,
        rng: &mut R,
        delay_ms: f64,
        now_ms: f64,
    ) -> bool {
        if self.pending.is_some() {
            return false;
        }
        let results = draw_bulk(prizes, count, rng);
        log::debug!("bulk draw of {} tickets, delivering in {}ms", results.len(), delay_ms);
        self.pending = Some((Deadline::after(delay_ms, now_ms), results));
        true
    }

    /// Take the results once their delivery time has come.
    pub fn poll(&mut self, now_ms: f64) -> Option<Vec<BulkPrize>> {
        match &self.pending {
            Some((deadline, _)) if deadline.is_due(now_ms) => self.pending.take().map(|(_, r)| r),
            _ => None,
        }
    }

    /// Drop a pending draw without delivering it.
    pub fn cancel(&mut self) -> bool {
        self.pending.take().is_some()
    }

    pub fn is_pending(&self) -> bool {
        self.pending.is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::prize::selector::{FixedSource, SeededSource};
    use crate::prize::{Prize, Rarity};

    fn table() -> PrizeTable {
        PrizeTable::new(vec![
            Prize::new("A", Rarity::Common, 40.0).with_image("a"),
            Prize::new("B", Rarity::Rare, 30.0),
            Prize::new("C", Rarity::Epic, 20.0),
            Prize::new("D", Rarity::Legendary, 10.0),
        ])
        .unwrap()
    }

    #[test]
    fn draws_one_prize_per_ticket() {
        let results = draw_bulk(&table(), 25, &mut SeededSource::new(7));
        assert_eq!(results.len(), 25);
        let names = ["A", "B", "C", "D"];
        assert!(results.iter().all(|p| names.contains(&p.name.as_str())));
    }

    #[test]
    fn bulk_entries_carry_name_rarity_image() {
        let results = draw_bulk(&table(), 2, &mut FixedSource(0.1));
        assert_eq!(results[0], BulkPrize { name: "A".into(), rarity: Rarity::Common, image: Some("a".into()) });
    }

    #[test]
    fn delivery_waits_for_the_delay() {
        let mut bulk = BulkDraw::new();
        assert!(bulk.start(&table(), 10, &mut FixedSource(0.5), 300.0, 1000.0));
        assert!(!bulk.start(&table(), 10, &mut FixedSource(0.5), 300.0, 1010.0));
        assert!(bulk.poll(1299.0).is_none());
        let results = bulk.poll(1300.0).unwrap();
        assert_eq!(results.len(), 10);
        assert!(!bulk.is_pending());
        assert!(bulk.poll(2000.0).is_none());
    }

    #[test]
    fn zero_delay_is_due_immediately() {
        let mut bulk = BulkDraw::new();
        bulk.start(&table(), 6, &mut FixedSource(0.95), 0.0, 50.0);
        let results = bulk.poll(50.0).unwrap();
        assert!(results.iter().all(|p| p.name == "D"));
    }

    #[test]
    fn cancel_drops_pending_results() {
        let mut bulk = BulkDraw::new();
        bulk.start(&table(), 6, &mut FixedSource(0.2), 300.0, 0.0);
        assert!(bulk.cancel());
        assert!(bulk.poll(1000.0).is_none());
        assert!(!bulk.cancel());
    }
}
