/*!
 * Placement Strategies
 * First-fit, best-fit and worst-fit candidate selection
 */

use super::types::Partition;
use crate::core::types::Size;
use miette::Diagnostic;
use serde::{Deserialize, Serialize};
use std::str::FromStr;
use thiserror::Error;

/// Placement strategy used to pick a free partition
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FitStrategy {
    /// First free partition large enough, in address order
    #[default]
    FirstFit,
    /// Smallest free partition large enough
    BestFit,
    /// Largest free partition large enough
    WorstFit,
}

impl FitStrategy {
    pub const ALL: [FitStrategy; 3] = [
        FitStrategy::FirstFit,
        FitStrategy::BestFit,
        FitStrategy::WorstFit,
    ];

    /// Index of the free partition this strategy places `size` units in.
    ///
    /// The scan runs in ascending address order. Best-fit and worst-fit only
    /// replace their candidate on a strictly better size, so the earliest
    /// partition wins ties.
    pub fn select(self, partitions: &[Partition], size: Size) -> Option<usize> {
        let mut candidates = partitions
            .iter()
            .enumerate()
            .filter(|(_, p)| p.is_free() && p.size >= size);

        match self {
            FitStrategy::FirstFit => candidates.next().map(|(idx, _)| idx),
            FitStrategy::BestFit => candidates
                .fold(None, |best: Option<(usize, Size)>, (idx, p)| match best {
                    Some((_, best_size)) if best_size <= p.size => best,
                    _ => Some((idx, p.size)),
                })
                .map(|(idx, _)| idx),
            FitStrategy::WorstFit => candidates
                .fold(None, |worst: Option<(usize, Size)>, (idx, p)| match worst {
                    Some((_, worst_size)) if worst_size >= p.size => worst,
                    _ => Some((idx, p.size)),
                })
                .map(|(idx, _)| idx),
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            FitStrategy::FirstFit => "first_fit",
            FitStrategy::BestFit => "best_fit",
            FitStrategy::WorstFit => "worst_fit",
        }
    }
}

impl std::fmt::Display for FitStrategy {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        match self {
            FitStrategy::FirstFit => write!(f, "First Fit"),
            FitStrategy::BestFit => write!(f, "Best Fit"),
            FitStrategy::WorstFit => write!(f, "Worst Fit"),
        }
    }
}

#[derive(Error, Debug, Clone, PartialEq, Eq, Diagnostic)]
#[error("Unknown placement strategy: {0}")]
#[diagnostic(
    code(memory::unknown_strategy),
    help("Use first_fit, best_fit or worst_fit (or 1, 2, 3).")
)]
pub struct ParseStrategyError(pub String);

impl FromStr for FitStrategy {
    type Err = ParseStrategyError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().replace('-', "_").as_str() {
            "1" | "first" | "first_fit" | "firstfit" => Ok(FitStrategy::FirstFit),
            "2" | "best" | "best_fit" | "bestfit" => Ok(FitStrategy::BestFit),
            "3" | "worst" | "worst_fit" | "worstfit" => Ok(FitStrategy::WorstFit),
            _ => Err(ParseStrategyError(s.to_string())),
        }
    }
}
