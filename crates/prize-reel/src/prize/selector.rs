//! Weighted prize selection over an explicit random source.

use rand::rngs::SmallRng;
use rand::{Rng, RngCore, SeedableRng};

use super::Prize;

/// Uniform random numbers in `[0, 1)`.
pub trait RandomSource {
    fn next_unit(&mut self) -> f64;
}

impl<R: RngCore> RandomSource for R {
    fn next_unit(&mut self) -> f64 {
        self.random::<f64>()
    }
}

/// Deterministic source for production use where no OS entropy exists
/// (the browser bridge seeds it from `Math.random`).
#[derive(Debug, Clone)]
pub struct SeededSource(SmallRng);

impl SeededSource {
    pub fn new(seed: u64) -> Self {
        Self(SmallRng::seed_from_u64(seed))
    }
}

impl RandomSource for SeededSource {
    fn next_unit(&mut self) -> f64 {
        self.0.random::<f64>()
    }
}

/// Always returns the same value.
#[derive(Debug, Clone, Copy)]
pub struct FixedSource(pub f64);

impl RandomSource for FixedSource {
    fn next_unit(&mut self) -> f64 {
        self.0
    }
}

/// Cycles through a fixed list of values.
#[derive(Debug, Clone)]
pub struct SequenceSource {
    values: Vec<f64>,
    cursor: usize,
}

impl SequenceSource {
    pub fn new(values: Vec<f64>) -> Self {
        Self { values, cursor: 0 }
    }
}

impl RandomSource for SequenceSource {
    fn next_unit(&mut self) -> f64 {
        if self.values.is_empty() {
            return 0.0;
        }
        let value = self.values[self.cursor % self.values.len()];
        self.cursor += 1;
        value
    }
}

/// Draw a prize position by cumulative probability.
///
/// `r` is uniform over `[0, 100)`; the first prize whose running sum reaches
/// `r` wins. If the weights run out first (sum below 100) the first prize is
/// returned. `None` only for an empty list.
pub fn select_index<R: RandomSource + ?Sized>(prizes: &[Prize], rng: &mut R) -> Option<usize> {
    if prizes.is_empty() {
        return None;
    }
    let r = rng.next_unit() * 100.0;
    let mut cumulative = 0.0;
    for (i, prize) in prizes.iter().enumerate() {
        cumulative += prize.probability;
        if cumulative >= r {
            return Some(i);
        }
    }
    Some(0)
}

pub fn select_prize<'a, R: RandomSource + ?Sized>(prizes: &'a [Prize], rng: &mut R) -> Option<&'a Prize> {
    select_index(prizes, rng).map(|i| &prizes[i])
}

/// Random extra spin cycles, uniform over `0..=max`.
pub fn extra_cycles<R: RandomSource + ?Sized>(rng: &mut R, max: u32) -> u32 {
    let drawn = (rng.next_unit() * (max as f64 + 1.0)).floor() as u32;
    drawn.min(max)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::prize::Rarity;

    fn table() -> Vec<Prize> {
        vec![
            Prize::new("A", Rarity::Common, 40.0),
            Prize::new("B", Rarity::Rare, 30.0),
            Prize::new("C", Rarity::Epic, 20.0),
            Prize::new("D", Rarity::Legendary, 10.0),
        ]
    }

    #[test]
    fn low_draw_picks_first() {
        let prizes = table();
        let prize = select_prize(&prizes, &mut FixedSource(0.05)).unwrap();
        assert_eq!(prize.name, "A");
    }

    #[test]
    fn high_draw_picks_last() {
        let prizes = table();
        let prize = select_prize(&prizes, &mut FixedSource(0.95)).unwrap();
        assert_eq!(prize.name, "D");
    }

    #[test]
    fn draws_walk_the_cumulative_sum() {
        let prizes = table();
        assert_eq!(select_index(&prizes, &mut FixedSource(0.39)), Some(0));
        assert_eq!(select_index(&prizes, &mut FixedSource(0.41)), Some(1));
        assert_eq!(select_index(&prizes, &mut FixedSource(0.89)), Some(2));
        assert_eq!(select_index(&prizes, &mut FixedSource(0.0)), Some(0));
    }

    #[test]
    fn underweight_table_falls_back_to_first() {
        let prizes = vec![
            Prize::new("A", Rarity::Common, 10.0),
            Prize::new("B", Rarity::Rare, 10.0),
        ];
        let prize = select_prize(&prizes, &mut FixedSource(0.99)).unwrap();
        assert_eq!(prize.name, "A");
    }

    #[test]
    fn overweight_table_still_returns_member() {
        let prizes = vec![
            Prize::new("A", Rarity::Common, 90.0),
            Prize::new("B", Rarity::Rare, 90.0),
        ];
        let mut rng = SeededSource::new(7);
        for _ in 0..1000 {
            let prize = select_prize(&prizes, &mut rng).unwrap();
            assert!(prize.name == "A" || prize.name == "B");
        }
    }

    #[test]
    fn empty_table_selects_nothing() {
        assert!(select_prize(&[], &mut FixedSource(0.5)).is_none());
    }

    #[test]
    fn frequencies_converge_to_weights() {
        let prizes = table();
        let mut rng = SeededSource::new(0x5eed);
        let mut counts = [0usize; 4];
        let draws = 20_000;
        for _ in 0..draws {
            counts[select_index(&prizes, &mut rng).unwrap()] += 1;
        }
        for (prize, count) in prizes.iter().zip(counts) {
            let pct = count as f64 * 100.0 / draws as f64;
            assert!(
                (pct - prize.probability).abs() < 2.0,
                "{} drawn {:.2}% vs weight {}",
                prize.name,
                pct,
                prize.probability
            );
        }
    }

    #[test]
    fn extra_cycles_cover_inclusive_range() {
        assert_eq!(extra_cycles(&mut FixedSource(0.0), 2), 0);
        assert_eq!(extra_cycles(&mut FixedSource(0.5), 2), 1);
        assert_eq!(extra_cycles(&mut FixedSource(0.999), 2), 2);
        assert_eq!(extra_cycles(&mut FixedSource(0.7), 0), 0);
    }

    #[test]
    fn sequence_source_cycles() {
        let mut seq = SequenceSource::new(vec![0.1, 0.9]);
        assert_eq!(seq.next_unit(), 0.1);
        assert_eq!(seq.next_unit(), 0.9);
        assert_eq!(seq.next_unit(), 0.1);
    }
}
