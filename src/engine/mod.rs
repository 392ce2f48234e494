//! Team split search
//!
//! The engine is a pure, synchronous computation over an explicit roster:
//!
//! ```text
//! roster ──shuffle──▶ Partitions ──▶ evaluate ──▶ BestSplitSelector ──▶ orient ──▶ TeamSplit
//! ```
//!
//! - [`Partitions`]: every `n / 2`-subset of the roster with its complement
//! - [`evaluate`]: imbalance vector of one split
//! - [`BestSplitSelector`]: keeps all splits tied for the best vector, up to a
//!   cap, then picks one at random
//! - [`orient`]: puts the anchor player's half first and sorts by name
//!
//! No I/O happens here. Callers run [`compute_team_split`] on a blocking
//! worker and persist the result themselves.

mod metrics;
mod orientation;
mod partition;
mod selector;

pub use metrics::evaluate;
pub use orientation::orient;
pub use partition::{binomial, Partitions, Split};
pub use selector::{BestSplitSelector, CandidatePool, Selection, DEFAULT_CANDIDATE_CAP};

use chrono::NaiveDate;
use rand::seq::SliceRandom;
use rand::Rng;
use tracing::debug;

use crate::common::errors::Result;
use crate::config::types::EngineConfig;
use crate::model::{Player, TeamSplit};

/// Finished split plus search statistics
#[derive(Debug, Clone)]
pub struct Computation {
    pub split: TeamSplit,
    /// Splits tied for the best metrics when the pick was made
    pub candidate_count: usize,
    /// Splits scored
    pub evaluated: u64,
    /// Search stopped at the candidate cap
    pub truncated: bool,
}

/// Shuffle the roster, search for the best split, and label it
///
/// Returns `FormationError::NoPlayers` for an empty roster; nothing should be
/// persisted in that case.
pub fn compute_team_split<R: Rng + ?Sized>(
    roster: &[Player],
    date: NaiveDate,
    config: &EngineConfig,
    rng: &mut R,
) -> Result<Computation> {
    let mut shuffled = roster.to_vec();
    shuffled.shuffle(rng);

    let selector =
        BestSplitSelector::new(config.candidate_cap).with_distinct_splits(config.distinct_splits);
    let selection = selector.select(&shuffled, rng)?;

    let split = orient(
        date,
        &selection.split.team_a,
        &selection.split.team_b,
        selection.metrics,
        config.anchor_player.as_deref(),
    );

    debug!(
        %date,
        players = roster.len(),
        candidates = selection.candidate_count,
        evaluated = selection.evaluated,
        truncated = selection.truncated,
        "computed team split"
    );

    Ok(Computation {
        split,
        candidate_count: selection.candidate_count,
        evaluated: selection.evaluated,
        truncated: selection.truncated,
    })
}
