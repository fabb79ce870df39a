//! Built-in strategies.

use super::Strategy;
use gridbot_board::{Board, rules};
use serde::Deserialize;
use strum::{Display, EnumIter};

/// Strategy names accepted in configuration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Deserialize, Display, EnumIter)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum StrategyKind {
    /// [`WinningMove`].
    Winning,
    /// [`BlockingMove`].
    Blocking,
    /// [`CenterMove`].
    Center,
    /// [`FirstFree`].
    FirstFree,
}

impl StrategyKind {
    /// Instantiates the strategy.
    pub fn build(self) -> Box<dyn Strategy> {
        match self {
            StrategyKind::Winning => Box::new(WinningMove),
            StrategyKind::Blocking => Box::new(BlockingMove),
            StrategyKind::Center => Box::new(CenterMove),
            StrategyKind::FirstFree => Box::new(FirstFree),
        }
    }

    /// Default roster order.
    pub fn defaults() -> Vec<StrategyKind> {
        vec![
            StrategyKind::Winning,
            StrategyKind::Blocking,
            StrategyKind::Center,
            StrategyKind::FirstFree,
        ]
    }
}

/// Takes any empty cell that wins immediately for the side to move.
#[derive(Debug, Clone, Copy, Default)]
pub struct WinningMove;

impl Strategy for WinningMove {
    fn name(&self) -> &'static str {
        "winning"
    }

    fn preferred_move(&self, board: &Board) -> Option<usize> {
        let mark = board.to_move();
        board
            .empty_indices()
            .find(|&index| rules::completes_line(board, index, mark))
    }
}

/// Occupies a cell where the opponent would win next turn.
#[derive(Debug, Clone, Copy, Default)]
pub struct BlockingMove;

impl Strategy for BlockingMove {
    fn name(&self) -> &'static str {
        "blocking"
    }

    fn preferred_move(&self, board: &Board) -> Option<usize> {
        let threat = board.to_move().opponent();
        board
            .empty_indices()
            .find(|&index| rules::completes_line(board, index, threat))
    }
}

/// Takes the centre of an odd-width board while it is free.
#[derive(Debug, Clone, Copy, Default)]
pub struct CenterMove;

impl Strategy for CenterMove {
    fn name(&self) -> &'static str {
        "center"
    }

    fn preferred_move(&self, board: &Board) -> Option<usize> {
        let width = board.width();
        if width % 2 == 0 {
            return None;
        }
        let center = (width / 2) * width + width / 2;
        board.is_empty_at(center).then_some(center)
    }
}

/// Picks the first empty cell in row-major order.
#[derive(Debug, Clone, Copy, Default)]
pub struct FirstFree;

impl Strategy for FirstFree {
    fn name(&self) -> &'static str {
        "first_free"
    }

    fn preferred_move(&self, board: &Board) -> Option<usize> {
        board.empty_indices().next()
    }
}
