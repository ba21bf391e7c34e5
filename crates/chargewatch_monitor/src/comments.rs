//! Most recent qualitative feedback.

use chargewatch_core::PredictionEvent;

/// How many comments the feedback views show.
pub const DEFAULT_COMMENT_LIMIT: usize = 10;

/// Events with a non-blank comment, newest first, at most `limit`.
pub fn recent_comments(events: &[PredictionEvent], limit: usize) -> Vec<&PredictionEvent> {
    let mut commented: Vec<&PredictionEvent> =
        events.iter().filter(|event| event.has_comment()).collect();
    commented.sort_by(|a, b| b.timestamp.cmp(&a.timestamp));
    commented.truncate(limit);
    commented
}
