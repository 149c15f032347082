use strum_macros::{Display, EnumString};

use crate::report::REPORT_TAG;

/// `!failquotes` sub-commands
#[derive(Debug, Clone, Copy, PartialEq, Eq, EnumString, Display)]
#[strum(serialize_all = "lowercase")]
pub enum QuoteAction {
    List,
    Add,
    Remove,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum QuoteCommand {
    Usage,
    List,
    Add(String),
    Remove(String),
    MissingInput(QuoteAction),
    Unknown(String),
}

/// A chat message the bot reacts to
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Report,
    Standings { season: Option<String> },
    Stats { season: Option<String> },
    OneGuess,
    FailQuotes(QuoteCommand),
}

impl Command {
    /// Recognises a command; `None` for ordinary chatter
    pub fn parse(content: &str) -> Option<Self> {
        let content = content.trim_start();
        if content.starts_with(REPORT_TAG) {
            return Some(Command::Report);
        }

        let (name, rest) = split_word(content);
        match name {
            "!standings" => Some(Command::Standings {
                season: season_argument(rest),
            }),
            "!stats" => Some(Command::Stats {
                season: season_argument(rest),
            }),
            "!protractor" | "!transportador" => Some(Command::OneGuess),
            "!failquotes" => Some(Command::FailQuotes(parse_quote_command(rest))),
            _ => None,
        }
    }
}

fn parse_quote_command(rest: &str) -> QuoteCommand {
    let (action, input) = split_word(rest);
    if action.is_empty() {
        return QuoteCommand::Usage;
    }

    let Ok(action) = action.parse::<QuoteAction>() else {
        return QuoteCommand::Unknown(action.to_string());
    };

    let input = input.trim_end();
    match action {
        QuoteAction::List => QuoteCommand::List,
        _ if input.is_empty() => QuoteCommand::MissingInput(action),
        QuoteAction::Add => QuoteCommand::Add(input.to_string()),
        QuoteAction::Remove => QuoteCommand::Remove(split_word(input).0.to_string()),
    }
}

/// First argument that is not a user mention
fn season_argument(rest: &str) -> Option<String> {
    rest.split_whitespace()
        .find(|token| !token.starts_with("<@"))
        .map(str::to_string)
}

fn split_word(text: &str) -> (&str, &str) {
    let text = text.trim_start();
    match text.split_once(char::is_whitespace) {
        Some((word, rest)) => (word, rest.trim_start()),
        None => (text, ""),
    }
}
