//! Score card grammar
//!
//! ```text
//! #Angle #1100 X/4
//! ⬆️⬆️⬆️⬇️: 1° off
//! https://www.angle.wtf/
//! ```
//!
//! Only the first two lines are significant. The second line is optional and
//! carries the angular error of the final guess as its second token.

use std::fmt;
use std::str::FromStr;

use super::{AngleResult, Attempt, ReportError, ScoreCard, MAX_TRIES};

/// Leading tag that marks a chat message as a score card
pub const REPORT_TAG: &str = "#Angle";

const EXHAUSTED_TOKEN: &str = "X";
const DEGREE_MARK: char = '°';

/// Parses a score card and attributes it to a player for the given season
pub fn parse_report(
    text: &str,
    user_id: &str,
    display_name: &str,
    season: u32,
) -> Result<AngleResult, ReportError> {
    let card: ScoreCard = text.parse()?;
    Ok(card.into_result(user_id, display_name, season))
}

impl FromStr for ScoreCard {
    type Err = ReportError;

    fn from_str(text: &str) -> Result<Self, Self::Err> {
        let mut lines = text.lines().skip_while(|line| line.trim().is_empty());
        let header = lines
            .next()
            .ok_or_else(|| ReportError::malformed("empty report"))?;
        let (issue_number, attempt) = parse_header(header)?;

        let miss_degrees = match lines.next() {
            Some(line) => parse_offset_line(line)?,
            None => 0,
        };

        Ok(ScoreCard {
            issue_number,
            attempt,
            miss_degrees,
        })
    }
}

impl fmt::Display for ScoreCard {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let tries = match self.attempt {
            Attempt::Completed { tries } => tries.to_string(),
            Attempt::Exhausted => EXHAUSTED_TOKEN.to_string(),
        };
        writeln!(
            f,
            "{} #{} {}/{}",
            REPORT_TAG, self.issue_number, tries, MAX_TRIES
        )?;
        write!(f, "⬆️: {}{} off", self.miss_degrees, DEGREE_MARK)
    }
}

/// `<tag> #<issue> <tries>/4`
fn parse_header(line: &str) -> Result<(u32, Attempt), ReportError> {
    let tokens: Vec<&str> = line.split_whitespace().collect();
    let [tag, issue, tries] = tokens.as_slice() else {
        return Err(ReportError::malformed(format!(
            "expected 3 tokens on the first line, found {}",
            tokens.len()
        )));
    };

    if *tag != REPORT_TAG {
        return Err(ReportError::malformed(format!("unknown tag '{}'", tag)));
    }

    let issue_digits = issue
        .strip_prefix('#')
        .ok_or_else(|| ReportError::malformed(format!("issue '{}' lacks '#'", issue)))?;
    let issue_number = parse_number(issue_digits, "issue number")?;

    let (tries_token, budget) = tries
        .split_once('/')
        .ok_or_else(|| ReportError::malformed(format!("tries '{}' lacks '/'", tries)))?;
    if budget != MAX_TRIES.to_string() {
        return Err(ReportError::malformed(format!(
            "unexpected guess budget '{}'",
            budget
        )));
    }

    let attempt = if tries_token == EXHAUSTED_TOKEN {
        Attempt::Exhausted
    } else {
        let tries = parse_number(tries_token, "try count")?;
        let tries = u8::try_from(tries)
            .map_err(|_| ReportError::malformed(format!("try count {} too large", tries)))?;
        Attempt::completed(tries)?
    };

    Ok((issue_number, attempt))
}

/// `<arrows>: <degrees>°<suffix>`; a single token means no reported offset
fn parse_offset_line(line: &str) -> Result<u32, ReportError> {
    let Some(offset) = line.split_whitespace().nth(1) else {
        return Ok(0);
    };

    let (degrees, _) = offset.split_once(DEGREE_MARK).ok_or_else(|| {
        ReportError::malformed(format!("offset '{}' lacks a degree mark", offset))
    })?;

    parse_number(degrees, "miss degrees")
}

fn parse_number(digits: &str, what: &str) -> Result<u32, ReportError> {
    if digits.is_empty() || !digits.chars().all(|c| c.is_ascii_digit()) {
        return Err(ReportError::malformed(format!(
            "{} '{}' is not a number",
            what, digits
        )));
    }
    digits
        .parse()
        .map_err(|_| ReportError::malformed(format!("{} '{}' is out of range", what, digits)))
}
