//! Search configuration: connectivity, corner policy and heuristic choice.

use crate::distance::Heuristic;

/// How the heuristic is chosen. Only automatic selection is offered: the
/// heuristic must match the connectivity to stay admissible.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum HeuristicMode {
    /// Octile with diagonals, Manhattan without.
    #[default]
    Auto,
}

/// Movement rules for one search.
///
/// There is deliberately no `Default`: the corner policy has no sensible
/// fallback and must be stated by the caller.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SearchConfig {
    /// 8-connectivity when `true`, 4-connectivity otherwise.
    pub allow_diagonal: bool,
    /// With diagonals enabled: `true` lets a diagonal step pass a single
    /// blocked corner, `false` requires both orthogonal corners free.
    pub allow_corner_cutting: bool,
    #[cfg_attr(feature = "serde", serde(default))]
    pub heuristic: HeuristicMode,
}

impl SearchConfig {
    /// 4-connectivity. The corner policy is irrelevant and set strict.
    pub const fn four_way() -> Self {
        Self {
            allow_diagonal: false,
            allow_corner_cutting: false,
            heuristic: HeuristicMode::Auto,
        }
    }

    /// 8-connectivity with an explicit corner policy.
    pub const fn eight_way(allow_corner_cutting: bool) -> Self {
        Self {
            allow_diagonal: true,
            allow_corner_cutting,
            heuristic: HeuristicMode::Auto,
        }
    }

    /// The concrete heuristic this configuration resolves to.
    pub fn resolve_heuristic(&self) -> Heuristic {
        match self.heuristic {
            HeuristicMode::Auto if self.allow_diagonal => Heuristic::Octile,
            HeuristicMode::Auto => Heuristic::Manhattan,
        }
    }
}
