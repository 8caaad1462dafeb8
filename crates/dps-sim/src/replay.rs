//! Replay resource text format.
//!
//! One sample per non-blank line; the sample is the first whitespace-separated
//! token, anything after it on the line is ignored. No header, no escaping.

use crate::error::{SimError, SimResult};

/// Parse replay text into samples.
///
/// # Errors
///
/// Fails on the first token that is not a finite number (reporting its
/// 1-based line), or if the text holds no samples at all.
pub fn parse_replay_text(text: &str) -> SimResult<Vec<f64>> {
    let mut samples = Vec::new();
    for (idx, line) in text.lines().enumerate() {
        let Some(token) = line.split_whitespace().next() else {
            continue;
        };
        let value = token
            .parse::<f64>()
            .ok()
            .filter(|v| v.is_finite())
            .ok_or_else(|| SimError::ReplayParse {
                line: idx + 1,
                token: token.to_string(),
            })?;
        samples.push(value);
    }

    if samples.is_empty() {
        return Err(SimError::ReplayEmpty);
    }
    Ok(samples)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn first_token_per_line() {
        let text = "1.0\n  2.5 comment\n\n\t-3e-1\t7\n";
        assert_eq!(parse_replay_text(text).unwrap(), vec![1.0, 2.5, -0.3]);
    }

    #[test]
    fn windows_line_endings() {
        assert_eq!(parse_replay_text("4\r\n5\r\n").unwrap(), vec![4.0, 5.0]);
    }

    #[test]
    fn bad_token_reports_line() {
        let err = parse_replay_text("1\n\nabc\n2\n").unwrap_err();
        assert_eq!(
            err,
            SimError::ReplayParse {
                line: 3,
                token: "abc".to_string()
            }
        );
        assert!(parse_replay_text("nan\n").is_err());
    }

    #[test]
    fn blank_text_has_no_samples() {
        assert_eq!(parse_replay_text("\n  \n"), Err(SimError::ReplayEmpty));
    }
}
