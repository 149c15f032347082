//! Chat rendering of bot replies

use std::fmt::Write;

use crate::quotes::{QuoteEntry, QuoteError};
use crate::report::{Attempt, ReportError};
use crate::stats::{PlayerStats, SeasonArgumentError, Standing};

/// Guild emoji of the protractor, awarded for first-guess solves
pub const PROTRACTOR_EMOJI: &str = "<:emoji_22:1383877615613509715>";

pub const NO_GAMES_MESSAGE: &str = "No games played yet!";

pub const QUOTES_USAGE: &str = "!failquotes handles the list of quotes shown when failing to guess the angle
-------------
!failquotes list - Show the current list of quotes
!failquotes add \"quote\" - Add a new quote to the list
!failquotes remove \"position\" - Remove quote at the given position";

pub fn reaction(attempt: Attempt) -> &'static str {
    match attempt {
        Attempt::Exhausted => "😭",
        Attempt::Completed { tries: 1 } => PROTRACTOR_EMOJI,
        Attempt::Completed { tries: 2 } => "🥳",
        Attempt::Completed { tries: 3 } => "👍",
        Attempt::Completed { .. } => "😢",
    }
}

pub fn malformed_report(error: &ReportError) -> String {
    format!("I could not read that score card. {}", error)
}

pub fn invalid_season(error: &SeasonArgumentError) -> String {
    format!("{}!!", error)
}

pub fn player_stats(stats: &PlayerStats) -> String {
    format!(
        "{:.1} Win%\n{} Played\n{} Current Streak\n{} Max Streak\n",
        stats.win_pct(),
        stats.played,
        stats.current_streak,
        stats.max_streak
    )
}

pub fn standings(standings: &[Standing]) -> String {
    let name_width = standings
        .iter()
        .map(|s| s.display_name.chars().count())
        .max()
        .unwrap_or_default();
    let score_width = standings
        .iter()
        .map(|s| s.score.to_string().len())
        .max()
        .unwrap_or_default();

    let mut message = String::new();
    for (position, standing) in standings.iter().enumerate() {
        let _ = writeln!(
            message,
            "{:2}. {:>name_width$} {:>score_width$} ({:.0}% win)",
            position + 1,
            standing.display_name,
            standing.score,
            100.0 * standing.win_fraction(),
        );
    }
    message
}

pub fn one_guess(display_name: &str, count: u32) -> String {
    format!(
        "{} has used the protractor {} {} times",
        display_name, PROTRACTOR_EMOJI, count
    )
}

pub fn quote_list(quotes: &[QuoteEntry]) -> String {
    if quotes.is_empty() {
        return "The quote list is empty".to_string();
    }

    let mut message = String::new();
    for (position, entry) in quotes.iter().enumerate() {
        let _ = writeln!(message, "{}. {}", position + 1, entry.quote);
    }
    message
}

pub fn quote_added(quote: &str, quotes: &[QuoteEntry]) -> String {
    format!("Added quote '{}'\n{}", quote, quote_list(quotes))
}

pub fn quote_removed(quote: &str, quotes: &[QuoteEntry]) -> String {
    format!("Removed quote '{}' from the list\n{}", quote, quote_list(quotes))
}

pub fn invalid_quote_position(error: &QuoteError) -> String {
    match error {
        QuoteError::InvalidPosition { position, .. } if *position < 1 => {
            "The position of the quote to remove should be greater than 0".to_string()
        }
        QuoteError::InvalidPosition { len, .. } => {
            format!("The position is greater than the {} quotes in the list", len)
        }
        QuoteError::Repository(msg) => msg.clone(),
    }
}

pub fn quote_position_not_a_number(input: &str) -> String {
    format!("Can't convert {} to an integer", input)
}

pub fn quote_missing_input(action: &str) -> String {
    format!("Action {} requires an input parameter", action)
}

pub fn unknown_quote_action(action: &str) -> String {
    format!("Unknown action {}\n{}", action, QUOTES_USAGE)
}
