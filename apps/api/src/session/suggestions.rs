//! Canned writing suggestions for free-text fields.

const PROFILE_SUMMARY: &str = "Experienced professional with a proven track record of delivering \
exceptional results. Skilled in leadership, problem-solving, and innovative thinking. Passionate \
about driving growth and achieving organizational goals through strategic planning and execution.";

/// Suggestion for a personal field, keyed by its form id. Only the profile
/// summary has one so far.
pub fn suggestion_for(field: &str) -> Option<&'static str> {
    match field {
        "profileSummary" => Some(PROFILE_SUMMARY),
        _ => None,
    }
}
