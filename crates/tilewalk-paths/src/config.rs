//! Tunables for search and auto-walk.

use crate::tables::LegacyTables;

/// Default capacity of each node pool.
pub const DEFAULT_MAX_NODES: usize = 10_000;

/// Pathfinder settings.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct PathfinderConfig {
    /// Capacity of the open and closed pools; also the closed-node budget
    /// of a single search.
    pub max_nodes: usize,
    /// Goals farther than this (Chebyshev) from the start are run to.
    pub run_distance: i32,
    /// Unconfirmed steps allowed in flight before auto-walk waits.
    pub max_step_count: u8,
    pub tables: LegacyTables,
}

impl Default for PathfinderConfig {
    fn default() -> Self {
        Self {
            max_nodes: DEFAULT_MAX_NODES,
            run_distance: 14,
            max_step_count: 5,
            tables: LegacyTables::default(),
        }
    }
}

impl PathfinderConfig {
    /// Default settings with a different node budget.
    pub fn with_max_nodes(max_nodes: usize) -> Self {
        Self {
            max_nodes,
            ..Self::default()
        }
    }
}

#[cfg(all(test, feature = "serde"))]
mod serde_tests {
    use super::*;

    #[test]
    fn partial_document_uses_defaults() {
        let cfg: PathfinderConfig = serde_json::from_str(r#"{"max_nodes": 500}"#).unwrap();
        assert_eq!(cfg.max_nodes, 500);
        assert_eq!(cfg.run_distance, 14);
        assert_eq!(cfg.max_step_count, 5);
        assert_eq!(cfg.tables, LegacyTables::default());
    }

    #[test]
    fn round_trip() {
        let cfg = PathfinderConfig::with_max_nodes(64);
        let json = serde_json::to_string(&cfg).unwrap();
        let back: PathfinderConfig = serde_json::from_str(&json).unwrap();
        assert_eq!(cfg, back);
    }
}
