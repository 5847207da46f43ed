//! `HH:MM:SS` duration tokens used by discipline and content tables.

use chrono::Duration;

use crate::error::FormatError;

/// Parse an `HH:MM:SS` token: three two-digit components, each taken as is.
pub fn parse_duration(token: &str) -> Result<Duration, FormatError> {
    let invalid = || FormatError::InvalidDurationFormat(token.to_string());

    let pieces: Vec<&str> = token.split(':').collect();
    if pieces.len() != 3 {
        return Err(invalid());
    }

    let mut values = [0i64; 3];
    for (slot, piece) in values.iter_mut().zip(&pieces) {
        if piece.len() != 2 || !piece.bytes().all(|b| b.is_ascii_digit()) {
            return Err(invalid());
        }
        *slot = piece.parse().map_err(|_| invalid())?;
    }

    let [hours, minutes, seconds] = values;
    Ok(Duration::seconds(hours * 3600 + minutes * 60 + seconds))
}

/// Format a duration as `HH:MM:SS`. Hours grow past two digits when needed.
pub fn format_duration(duration: Duration) -> String {
    let total = duration.num_seconds().max(0);
    format!(
        "{:02}:{:02}:{:02}",
        total / 3600,
        (total % 3600) / 60,
        total % 60
    )
}
