//! Rank-derived match percentages and badge tiers
//!
//! Scores are a pure function of rank position so the display is stable for
//! a given upstream ordering. Ranks are 1-based.

use serde::{Deserialize, Serialize};

use crate::models::Movie;

/// Badge classification for a ranked result
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MatchTier {
    High,
    Medium,
    Low,
}

/// Match percentage for a 1-based rank: 99% at rank 1, decaying by 3 points
/// per rank, floored at 72%
pub fn match_percent(rank: usize) -> u8 {
    debug_assert!(rank >= 1, "ranks are 1-based");
    let pct = 99i64 - (rank as i64 - 1) * 3;
    pct.max(72) as u8
}

/// Badge tier for a 1-based rank
pub fn match_tier(rank: usize) -> MatchTier {
    debug_assert!(rank >= 1, "ranks are 1-based");
    if rank <= 3 {
        MatchTier::High
    } else if rank <= 6 {
        MatchTier::Medium
    } else {
        MatchTier::Low
    }
}

/// A primary result annotated for presentation
#[derive(Debug, Clone, Copy)]
pub struct RankedMovie<'a> {
    pub rank: usize,
    pub percent: u8,
    pub tier: MatchTier,
    pub movie: &'a Movie,
}

/// Annotate a bounded prefix of a rank-significant list
///
/// Input order is upstream rank order and is never changed here.
pub fn rank_movies(movies: &[Movie], cap: usize) -> Vec<RankedMovie<'_>> {
    movies
        .iter()
        .take(cap)
        .enumerate()
        .map(|(i, movie)| {
            let rank = i + 1;
            RankedMovie {
                rank,
                percent: match_percent(rank),
                tier: match_tier(rank),
                movie,
            }
        })
        .collect()
}
