//! Best-split search with bounded tie collection

use rand::Rng;
use tracing::debug;

use super::metrics::evaluate;
use super::partition::{Partitions, Split};
use crate::common::errors::{FormationError, Result};
use crate::model::{ImbalanceMetrics, Player};

/// Default number of tied candidates kept before the walk stops
pub const DEFAULT_CANDIDATE_CAP: usize = 5000;

/// All splits tied for the best metrics seen during one walk
#[derive(Debug, Clone)]
pub struct CandidatePool<'a> {
    pub metrics: ImbalanceMetrics,
    pub candidates: Vec<Split<'a, Player>>,
    /// Splits scored before the walk ended
    pub evaluated: u64,
    /// Walk stopped at the cap with splits left unscored
    pub truncated: bool,
}

/// The split picked from the pool
#[derive(Debug, Clone)]
pub struct Selection<'a> {
    pub split: Split<'a, Player>,
    pub metrics: ImbalanceMetrics,
    pub candidate_count: usize,
    pub evaluated: u64,
    pub truncated: bool,
}

/// Walks the partitions of a roster and keeps every split tied for the
/// lowest metrics, up to `cap` of them
///
/// The roster is walked in the order given. Shuffle it first, otherwise a
/// capped walk always keeps the same prefix. Under truncation the pool is a
/// prefix of the optimal set, not a uniform sample of it.
#[derive(Debug, Clone, Copy)]
pub struct BestSplitSelector {
    cap: usize,
    distinct: bool,
}

impl Default for BestSplitSelector {
    fn default() -> Self {
        Self::new(DEFAULT_CANDIDATE_CAP)
    }
}

impl BestSplitSelector {
    /// A cap of zero is treated as one
    pub fn new(cap: usize) -> Self {
        Self {
            cap: cap.max(1),
            distinct: false,
        }
    }

    /// Visit each unordered split once on even rosters
    pub fn with_distinct_splits(mut self, distinct: bool) -> Self {
        self.distinct = distinct;
        self
    }

    pub fn cap(&self) -> usize {
        self.cap
    }

    /// Collect the best-scoring splits without choosing one
    pub fn collect<'a>(&self, roster: &'a [Player]) -> Result<CandidatePool<'a>> {
        if roster.is_empty() {
            return Err(FormationError::NoPlayers);
        }

        let mut partitions = Partitions::with_mode(roster, self.distinct);
        let mut best: Option<ImbalanceMetrics> = None;
        let mut candidates: Vec<Split<'a, Player>> = Vec::new();
        let mut evaluated: u64 = 0;
        let mut capped = false;

        for split in partitions.by_ref() {
            let metrics = evaluate(&split.team_a, &split.team_b);
            evaluated += 1;

            match best {
                None => {
                    best = Some(metrics);
                    candidates.push(split);
                }
                Some(current) if metrics < current => {
                    best = Some(metrics);
                    candidates.clear();
                    candidates.push(split);
                }
                Some(current) if metrics == current => candidates.push(split),
                Some(_) => {}
            }

            if candidates.len() >= self.cap {
                capped = true;
                break;
            }
        }
        let truncated = capped && partitions.next().is_some();

        let metrics = best.ok_or(FormationError::NoPlayers)?;
        debug!(
            players = roster.len(),
            evaluated,
            candidates = candidates.len(),
            truncated,
            %metrics,
            "collected best splits"
        );

        Ok(CandidatePool {
            metrics,
            candidates,
            evaluated,
            truncated,
        })
    }

    /// Collect the best splits and pick one uniformly at random
    pub fn select<'a, R: Rng + ?Sized>(
        &self,
        roster: &'a [Player],
        rng: &mut R,
    ) -> Result<Selection<'a>> {
        let CandidatePool {
            metrics,
            mut candidates,
            evaluated,
            truncated,
        } = self.collect(roster)?;

        let candidate_count = candidates.len();
        let split = candidates.swap_remove(rng.gen_range(0..candidate_count));

        Ok(Selection {
            split,
            metrics,
            candidate_count,
            evaluated,
            truncated,
        })
    }
}
