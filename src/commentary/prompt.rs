use super::types::ChatMessage;
use super::CommentaryRequest;
use crate::engine::CommentaryTone;

pub const SYSTEM_PROMPT: &str = "You are an expert IPL cricket commentator.";

/// Run rates print with at least one decimal place ("12.0", "8.57"). A rate
/// that fell back to zero prints as a bare "0".
pub fn fmt_rate(rate: f64, defaulted: bool) -> String {
    if defaulted {
        "0".to_string()
    } else if rate.fract() == 0.0 {
        format!("{:.1}", rate)
    } else {
        rate.to_string()
    }
}

pub fn render(request: &CommentaryRequest, tone: CommentaryTone) -> String {
    format!(
        "The match is at {venue}. {batting} are chasing {target} runs and are currently at {score} runs, \
         with {wickets} wickets in hand and {overs} overs left. The required run rate is {rrr}, and the current run rate is {crr}. \
         As a cricket commentator, {instruction} \
         You predict {winner} may win but keep it open. Only talk about IPL cricket. \
         Write a short IPL-style commentary paragraph and end with a hook line.",
        venue = request.venue,
        batting = request.batting_team,
        target = request.target_runs,
        score = request.current_score,
        wickets = request.wickets_left,
        overs = request.overs_left,
        rrr = fmt_rate(request.required_run_rate, request.required_run_rate_defaulted),
        crr = fmt_rate(request.current_run_rate, request.current_run_rate_defaulted),
        instruction = tone.instruction(),
        winner = request.predicted_winner,
    )
}

/// System persona followed by the rendered prompt.
pub fn messages(request: &CommentaryRequest, tone: CommentaryTone) -> Vec<ChatMessage> {
    vec![
        ChatMessage::system(SYSTEM_PROMPT),
        ChatMessage::user(render(request, tone)),
    ]
}
