//! Text command grammar.

use tracing::instrument;

/// Prefix of the new-game command.
pub const NEW_GAME_PREFIX: &str = "/new_game_";

/// Who makes the first move.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Starter {
    /// `player1`: the human opens.
    Human,
    /// `player2`: the roster opens.
    Agent,
}

/// Parsed `/new_game_<N>x<N>_player<1|2>` command.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct NewGame {
    /// Board width; the win length equals it.
    pub width: usize,
    /// Side that moves first.
    pub starter: Starter,
}

impl NewGame {
    /// Parses a new-game command, ignoring a trailing `@botname`.
    ///
    /// Returns `None` for anything outside the grammar, including non-square
    /// sizes. Width zero is accepted here and rejected later with a reply.
    #[instrument]
    pub fn parse(text: &str) -> Option<Self> {
        let rest = command_name(text).strip_prefix(NEW_GAME_PREFIX)?;
        let (size, player) = rest.split_once('_')?;
        let (rows, cols) = size.split_once('x')?;
        if rows != cols || !is_decimal(rows) {
            return None;
        }
        let width = rows.parse().ok()?;
        let starter = match player {
            "player1" => Starter::Human,
            "player2" => Starter::Agent,
            _ => return None,
        };
        Some(Self { width, starter })
    }
}

/// First word of `text` without a Telegram `@botname` suffix.
///
/// Arguments such as `/start <deeplink>` are dropped.
pub fn command_name(text: &str) -> &str {
    let word = text.split_whitespace().next().unwrap_or_default();
    word.split_once('@').map_or(word, |(name, _)| name)
}

fn is_decimal(s: &str) -> bool {
    !s.is_empty() && s.bytes().all(|b| b.is_ascii_digit())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_player_one() {
        assert_eq!(
            NewGame::parse("/new_game_3x3_player1"),
            Some(NewGame {
                width: 3,
                starter: Starter::Human
            })
        );
    }

    #[test]
    fn test_parse_player_two_with_mention() {
        assert_eq!(
            NewGame::parse(" /new_game_5x5_player2@grid_bot "),
            Some(NewGame {
                width: 5,
                starter: Starter::Agent
            })
        );
    }

    #[test]
    fn test_parse_zero_width_is_grammatical() {
        assert_eq!(NewGame::parse("/new_game_0x0_player1").map(|g| g.width), Some(0));
    }

    #[test]
    fn test_rejects_off_grammar() {
        for text in [
            "/new_game",
            "/new_game_3x4_player1",
            "/new_game_3x3_player3",
            "/new_game_3x3",
            "/new_game_x_player1",
            "/new_game_+3x+3_player1",
            "/new_game_3x3_player1_extra",
            "new_game_3x3_player1",
            "/new_game_99999999999999999999999x99999999999999999999999_player1",
            "hello",
        ] {
            assert_eq!(NewGame::parse(text), None, "{text:?}");
        }
    }

    #[test]
    fn test_command_name() {
        assert_eq!(command_name("/help@grid_bot"), "/help");
        assert_eq!(command_name("  /start "), "/start");
        assert_eq!(command_name("/start ref_42"), "/start");
        assert_eq!(command_name("/start@grid_bot ref_42"), "/start");
        assert_eq!(command_name("   "), "");
    }
}
