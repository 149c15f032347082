use std::collections::BTreeMap;

use crate::report::AngleResult;

use super::{ScoreCalculator, Scope, Standing};

/// Ranks players by total score, highest first.
///
/// Only results inside `scope` count. Ties keep ascending user id order.
pub fn compute_standings(
    results: &[AngleResult],
    scope: Scope,
    calculator: &dyn ScoreCalculator,
) -> Vec<Standing> {
    let mut by_user: BTreeMap<&str, (Standing, u32)> = BTreeMap::new();

    for result in results.iter().filter(|r| scope.includes(r.season)) {
        let (standing, latest_issue) = by_user
            .entry(result.user_id.as_str())
            .or_insert_with(|| {
                (
                    Standing {
                        user_id: result.user_id.clone(),
                        display_name: result.display_name.clone(),
                        score: 0,
                        played: 0,
                        wins: 0,
                    },
                    result.issue_number,
                )
            });

        standing.score += calculator.score(result);
        standing.played += 1;
        if result.is_completed() {
            standing.wins += 1;
        }
        if result.issue_number > *latest_issue {
            *latest_issue = result.issue_number;
            standing.display_name = result.display_name.clone();
        }
    }

    let mut standings: Vec<Standing> = by_user.into_values().map(|(s, _)| s).collect();
    standings.sort_by(|a, b| b.score.cmp(&a.score));
    standings
}
