use serde::{Deserialize, Serialize};

use super::SeasonArgumentError;

/// Which slice of history a query covers
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Scope {
    Season(u32),
    All,
}

impl Scope {
    /// Resolves an optional `<season>|all` argument; no argument means the current season
    pub fn from_argument(
        argument: Option<&str>,
        current_season: u32,
    ) -> Result<Self, SeasonArgumentError> {
        let requested = match argument {
            None => current_season,
            Some("all") => return Ok(Scope::All),
            Some(raw) => raw
                .parse::<i64>()
                .map_err(|_| SeasonArgumentError::NotANumber(raw.to_string()))?
                .clamp(0, i64::from(u32::MAX)) as u32,
        };

        if requested < 1 {
            return Err(SeasonArgumentError::BeforeFirstSeason);
        }
        if requested > current_season {
            return Err(SeasonArgumentError::AfterCurrentSeason {
                requested,
                current: current_season,
            });
        }
        Ok(Scope::Season(requested))
    }

    pub fn includes(&self, season: u32) -> bool {
        match self {
            Scope::Season(selected) => *selected == season,
            Scope::All => true,
        }
    }
}

/// Aggregated record of one player
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlayerStats {
    pub played: u32,
    pub wins: u32,
    pub current_streak: u32,
    pub max_streak: u32,
}

impl PlayerStats {
    pub fn win_pct(&self) -> f64 {
        100.0 * f64::from(self.wins) / f64::from(self.played)
    }
}

/// One row of the leaderboard
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Standing {
    pub user_id: String,
    pub display_name: String,
    pub score: u32,
    pub played: u32,
    pub wins: u32,
}

impl Standing {
    pub fn win_fraction(&self) -> f64 {
        f64::from(self.wins) / f64::from(self.played)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case(None, Scope::Season(4))]
    #[case(Some("all"), Scope::All)]
    #[case(Some("1"), Scope::Season(1))]
    #[case(Some("4"), Scope::Season(4))]
    fn resolves_valid_arguments(#[case] argument: Option<&str>, #[case] expected: Scope) {
        assert_eq!(Scope::from_argument(argument, 4).unwrap(), expected);
    }

    #[rstest]
    #[case(Some("latest"), SeasonArgumentError::NotANumber("latest".to_string()))]
    #[case(Some("0"), SeasonArgumentError::BeforeFirstSeason)]
    #[case(Some("-3"), SeasonArgumentError::BeforeFirstSeason)]
    #[case(Some("5"), SeasonArgumentError::AfterCurrentSeason { requested: 5, current: 4 })]
    fn rejects_invalid_arguments(
        #[case] argument: Option<&str>,
        #[case] expected: SeasonArgumentError,
    ) {
        assert_eq!(Scope::from_argument(argument, 4).unwrap_err(), expected);
    }

    #[test]
    fn current_season_before_epoch_is_rejected() {
        assert_eq!(
            Scope::from_argument(None, 0).unwrap_err(),
            SeasonArgumentError::BeforeFirstSeason
        );
    }

    #[test]
    fn win_values_are_exact() {
        let stats = PlayerStats {
            played: 8,
            wins: 6,
            current_streak: 0,
            max_streak: 0,
        };
        assert_eq!(stats.win_pct(), 75.0);

        let standing = Standing {
            user_id: "u".into(),
            display_name: "n".into(),
            score: 0,
            played: 4,
            wins: 1,
        };
        assert_eq!(standing.win_fraction(), 0.25);
    }
}
