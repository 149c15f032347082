use chrono::{DateTime, Utc};
use std::sync::Arc;
use tracing::{debug, info, instrument, warn};

use super::{format, BotReply, Command, InboundMessage, QuoteCommand};
use crate::calendar::current_season;
use crate::quotes::{QuoteError, QuoteService};
use crate::report::{parse_report, Attempt};
use crate::shared::AppError;
use crate::stats::{StatsError, StatsService};

/// Executes chat commands against the statistics and quote services
pub struct BotService {
    stats_service: Arc<StatsService>,
    quote_service: Arc<QuoteService>,
}

impl BotService {
    pub fn new(stats_service: Arc<StatsService>, quote_service: Arc<QuoteService>) -> Self {
        Self {
            stats_service,
            quote_service,
        }
    }

    /// Handles one inbound message; user mistakes become replies, storage failures errors
    #[instrument(skip(self, message), fields(author = %message.author.id, guild_id = %message.guild_id))]
    pub async fn handle_message(
        &self,
        message: &InboundMessage,
        now: DateTime<Utc>,
    ) -> Result<BotReply, AppError> {
        if message.author.bot {
            return Ok(BotReply::default());
        }

        let Some(command) = Command::parse(&message.content) else {
            return Ok(BotReply::default());
        };
        debug!(?command, "Handling command");

        match command {
            Command::Report => self.handle_report(message, now).await,
            Command::Standings { season } => self.handle_standings(season.as_deref(), now).await,
            Command::Stats { season } => self.handle_stats(message, season.as_deref(), now).await,
            Command::OneGuess => self.handle_one_guess(message).await,
            Command::FailQuotes(action) => self.handle_quotes(&message.guild_id, action).await,
        }
    }

    async fn handle_report(
        &self,
        message: &InboundMessage,
        now: DateTime<Utc>,
    ) -> Result<BotReply, AppError> {
        let result = match parse_report(
            &message.content,
            &message.author.id,
            &message.author.display_name,
            current_season(now),
        ) {
            Ok(result) => result,
            Err(e) => {
                warn!(error = %e, "Rejected score card");
                return Ok(BotReply::text(format::malformed_report(&e)));
            }
        };

        self.stats_service.record_result(&result).await?;

        // Already stored, so a quote failure only drops the reply
        let reply = match result.attempt {
            Attempt::Exhausted => match self.quote_service.random_quote(&message.guild_id).await {
                Ok(entry) => entry.map(|entry| entry.quote),
                Err(e) => {
                    warn!(error = %e, "Could not pick a fail quote");
                    None
                }
            },
            Attempt::Completed { .. } => None,
        };

        Ok(BotReply {
            reply,
            reaction: Some(format::reaction(result.attempt).to_string()),
        })
    }

    async fn handle_standings(
        &self,
        season: Option<&str>,
        now: DateTime<Utc>,
    ) -> Result<BotReply, AppError> {
        let scope = match self.stats_service.scope_for(season, now) {
            Ok(scope) => scope,
            Err(e) => return stats_failure(e),
        };

        match self.stats_service.standings(scope).await {
            Ok(standings) => Ok(BotReply::text(format::standings(&standings))),
            Err(e) => stats_failure(e),
        }
    }

    async fn handle_stats(
        &self,
        message: &InboundMessage,
        season: Option<&str>,
        now: DateTime<Utc>,
    ) -> Result<BotReply, AppError> {
        let scope = match self.stats_service.scope_for(season, now) {
            Ok(scope) => scope,
            Err(e) => return stats_failure(e),
        };

        let target = message.target_user();
        match self.stats_service.player_stats(&target.id, scope).await {
            Ok(stats) => Ok(BotReply::text(format::player_stats(&stats))),
            Err(e) => stats_failure(e),
        }
    }

    async fn handle_one_guess(&self, message: &InboundMessage) -> Result<BotReply, AppError> {
        let target = message.target_user();
        let count = self.stats_service.one_guess_count(&target.id).await?;
        Ok(BotReply::text(format::one_guess(&target.display_name, count)))
    }

    async fn handle_quotes(
        &self,
        guild_id: &str,
        command: QuoteCommand,
    ) -> Result<BotReply, AppError> {
        let reply = match command {
            QuoteCommand::Usage => format::QUOTES_USAGE.to_string(),
            QuoteCommand::List => format::quote_list(&self.quote_service.list(guild_id).await?),
            QuoteCommand::MissingInput(action) => format::quote_missing_input(&action.to_string()),
            QuoteCommand::Unknown(action) => format::unknown_quote_action(&action),
            QuoteCommand::Add(quote) => {
                self.quote_service.add(guild_id, &quote).await?;
                let quotes = self.quote_service.list(guild_id).await?;
                format::quote_added(&quote, &quotes)
            }
            QuoteCommand::Remove(input) => {
                let Ok(position) = input.parse::<i64>() else {
                    return Ok(BotReply::text(format::quote_position_not_a_number(&input)));
                };

                match self.quote_service.remove_at(guild_id, position).await {
                    Ok(removed) => {
                        info!(position, "Quote removed by command");
                        let quotes = self.quote_service.list(guild_id).await?;
                        format::quote_removed(&removed.quote, &quotes)
                    }
                    Err(e @ QuoteError::InvalidPosition { .. }) => format::invalid_quote_position(&e),
                    Err(e) => return Err(e.into()),
                }
            }
        };

        Ok(BotReply::text(reply))
    }
}

fn stats_failure(error: StatsError) -> Result<BotReply, AppError> {
    match error {
        StatsError::NoDataAvailable => Ok(BotReply::text(format::NO_GAMES_MESSAGE)),
        StatsError::InvalidSeasonArgument(e) => Ok(BotReply::text(format::invalid_season(&e))),
        StatsError::Repository(_) => Err(error.into()),
    }
}
