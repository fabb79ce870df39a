//! Move-selection oracle: an ordered roster of strategies.
//!
//! The roster is consulted strategy by strategy; the first strategy that
//! reports a move decides. Strategies are read-only and the roster is never
//! mutated after startup, so one roster can serve concurrent updates.

mod strategies;

pub use strategies::{BlockingMove, CenterMove, FirstFree, StrategyKind, WinningMove};

use gridbot_board::Board;
use tracing::{debug, instrument};

/// A single move-selection rule.
pub trait Strategy: Send + Sync + std::fmt::Debug {
    /// Short name used in logs.
    fn name(&self) -> &'static str;

    /// Cell this strategy would play for the side to move, if any.
    fn preferred_move(&self, board: &Board) -> Option<usize>;

    /// Checks if this strategy has an opinion about `board`.
    fn has_move(&self, board: &Board) -> bool {
        self.preferred_move(board).is_some()
    }
}

/// Move chosen by the roster.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AgentMove {
    /// Name of the strategy that answered.
    pub strategy: &'static str,
    /// Chosen cell.
    pub index: usize,
}

/// Ordered list of strategies.
#[derive(Debug, Default)]
pub struct AgentRoster {
    strategies: Vec<Box<dyn Strategy>>,
}

impl AgentRoster {
    /// Creates a roster consulted in the given order.
    pub fn new(strategies: Vec<Box<dyn Strategy>>) -> Self {
        Self { strategies }
    }

    /// Builds a roster from configured strategy kinds.
    #[instrument]
    pub fn from_kinds(kinds: &[StrategyKind]) -> Self {
        Self::new(kinds.iter().map(|kind| kind.build()).collect())
    }

    /// Number of strategies.
    pub fn len(&self) -> usize {
        self.strategies.len()
    }

    /// Checks if the roster has no strategies.
    pub fn is_empty(&self) -> bool {
        self.strategies.is_empty()
    }

    /// Strategy names in consultation order.
    pub fn names(&self) -> Vec<&'static str> {
        self.strategies.iter().map(|s| s.name()).collect()
    }

    /// Asks each strategy in turn and returns the first answer.
    #[instrument(skip(self, board), fields(occupied = board.occupied()))]
    pub fn choose(&self, board: &Board) -> Option<AgentMove> {
        let chosen = self
            .strategies
            .iter()
            .filter(|strategy| strategy.has_move(board))
            .find_map(|strategy| {
                strategy.preferred_move(board).map(|index| AgentMove {
                    strategy: strategy.name(),
                    index,
                })
            });
        debug!(?chosen, "Roster consulted");
        chosen
    }
}
