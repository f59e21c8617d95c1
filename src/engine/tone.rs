//! Rule-based commentary tone.
//!
//! The rules overlap (a short, comfortable chase in the last over also
//! satisfies the "thrilling" rule), so they are evaluated as an ordered
//! decision list: first match wins, `Balanced` if none match.

use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CommentaryTone {
    Comfortable,
    Nervous,
    Thrilling,
    Balanced,
}

impl CommentaryTone {
    pub fn as_str(self) -> &'static str {
        match self {
            CommentaryTone::Comfortable => "comfortable",
            CommentaryTone::Nervous => "nervous",
            CommentaryTone::Thrilling => "thrilling",
            CommentaryTone::Balanced => "balanced",
        }
    }

    /// Sentence handed to the commentator describing the mood to strike.
    pub fn instruction(self) -> &'static str {
        match self {
            CommentaryTone::Comfortable => {
                "Give a calm, confident, maybe slightly celebratory commentary."
            }
            CommentaryTone::Nervous => {
                "Make it tense and dramatic. Emphasize pressure, wickets, or tough chase."
            }
            CommentaryTone::Thrilling => "Make it highly suspenseful and exciting.",
            CommentaryTone::Balanced => "Neutral but lively, acknowledging chances for both sides.",
        }
    }
}

impl fmt::Display for CommentaryTone {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Copy)]
pub struct ToneInputs {
    pub wickets_left: u8,
    pub overs_left: f64,
    pub runs_left: i64,
    pub required_run_rate: f64,
    pub current_run_rate: f64,
}

type Rule = (fn(&ToneInputs) -> bool, CommentaryTone);

// Order matters.
const RULES: &[Rule] = &[
    (is_comfortable, CommentaryTone::Comfortable),
    (is_nervous, CommentaryTone::Nervous),
    (is_thrilling, CommentaryTone::Thrilling),
];

fn is_comfortable(t: &ToneInputs) -> bool {
    t.runs_left <= 12 && t.wickets_left > 5 && t.required_run_rate <= t.current_run_rate
}

fn is_nervous(t: &ToneInputs) -> bool {
    t.wickets_left <= 2 || (t.runs_left > 18 && t.required_run_rate > t.current_run_rate)
}

fn is_thrilling(t: &ToneInputs) -> bool {
    t.overs_left < 1.0 || (t.required_run_rate - t.current_run_rate).abs() < 0.5
}

pub fn classify(inputs: &ToneInputs) -> CommentaryTone {
    RULES
        .iter()
        .find(|(matches, _)| matches(inputs))
        .map_or(CommentaryTone::Balanced, |(_, tone)| *tone)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn inputs(wickets_left: u8, overs_left: f64, runs_left: i64, rrr: f64, crr: f64) -> ToneInputs {
        ToneInputs {
            wickets_left,
            overs_left,
            runs_left,
            required_run_rate: rrr,
            current_run_rate: crr,
        }
    }

    #[test]
    fn test_comfortable_beats_thrilling() {
        // Last over, run rates within 0.5: the thrilling rule matches too.
        let t = inputs(7, 0.5, 10, 6.0, 6.2);
        assert!(is_thrilling(&t));
        assert_eq!(classify(&t), CommentaryTone::Comfortable);
    }

    #[test]
    fn test_two_wickets_is_nervous_even_when_ahead() {
        let t = inputs(2, 5.0, 5, 6.0, 7.0);
        assert!(t.required_run_rate <= t.current_run_rate);
        assert_eq!(classify(&t), CommentaryTone::Nervous);
    }

    #[test]
    fn test_nervous_beats_thrilling() {
        let t = inputs(1, 0.5, 8, 6.0, 6.1);
        assert!(is_thrilling(&t));
        assert_eq!(classify(&t), CommentaryTone::Nervous);
    }

    #[test]
    fn test_three_wickets_short_chase_is_balanced() {
        // Comfortable needs more than five wickets in hand.
        let t = inputs(3, 5.0, 10, 6.0, 7.0);
        assert_eq!(classify(&t), CommentaryTone::Balanced);
    }

    #[test]
    fn test_steep_chase_is_nervous() {
        let t = inputs(3, 2.5, 30, 12.0, 8.57);
        assert_eq!(classify(&t), CommentaryTone::Nervous);
    }

    #[test]
    fn test_close_rates_are_thrilling() {
        let t = inputs(5, 4.0, 30, 7.2, 7.5);
        assert_eq!(classify(&t), CommentaryTone::Thrilling);
    }

    #[test]
    fn test_final_over_is_thrilling() {
        let t = inputs(4, 0.5, 6, 12.0, 9.0);
        assert_eq!(classify(&t), CommentaryTone::Thrilling);
    }

    #[test]
    fn test_balanced_fallthrough() {
        let t = inputs(6, 6.0, 40, 6.67, 8.0);
        assert_eq!(classify(&t), CommentaryTone::Balanced);
    }

    #[test]
    fn test_boundaries() {
        // runs_left == 12 and wickets == 6 still comfortable
        assert_eq!(classify(&inputs(6, 3.0, 12, 4.0, 4.0)), CommentaryTone::Comfortable);
        // runs_left == 18 is not "more than 18"
        assert_eq!(classify(&inputs(4, 3.0, 18, 6.0, 5.0)), CommentaryTone::Balanced);
        // exactly one over left is not "< 1"
        assert_eq!(classify(&inputs(4, 1.0, 15, 15.0, 8.0)), CommentaryTone::Balanced);
    }

    #[test]
    fn test_instruction_strings() {
        assert_eq!(
            CommentaryTone::Nervous.instruction(),
            "Make it tense and dramatic. Emphasize pressure, wickets, or tough chase."
        );
        assert_eq!(CommentaryTone::Thrilling.to_string(), "thrilling");
    }
}
