use crate::catalog::{self, TEAMS, TOSS_DECISIONS, VENUES};
use crate::engine::{DerivedMetrics, MatchState};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldId {
    BattingTeam,
    BowlingTeam,
    Venue,
    TossWinner,
    TossDecision,
    OversLeft,
    WicketsLeft,
    CurrentScore,
    TargetRuns,
}

#[derive(Debug, Clone, PartialEq)]
pub enum FieldType {
    Choice(Vec<String>),
    Text,
    Integer { min: u32, max: u32 },
}

#[derive(Debug, Clone)]
pub struct FormField {
    pub id: FieldId,
    pub label: &'static str,
    pub value: String,
    pub field_type: FieldType,
}

#[derive(Debug, Clone)]
pub struct MatchForm {
    pub fields: Vec<FormField>,
    pub selected: usize,
}

fn choices(list: &[&str]) -> FieldType {
    FieldType::Choice(list.iter().map(|s| s.to_string()).collect())
}

fn field(id: FieldId, label: &'static str, value: impl Into<String>, field_type: FieldType) -> FormField {
    FormField { id, label, value: value.into(), field_type }
}

impl MatchForm {
    pub fn new() -> Self {
        let batting = TEAMS[0];
        let bowling = catalog::bowling_options(batting);
        let fields = vec![
            field(FieldId::BattingTeam, "Batting Team", batting, choices(TEAMS)),
            field(FieldId::BowlingTeam, "Bowling Team", bowling[0], choices(&bowling)),
            field(FieldId::Venue, "Venue", VENUES[0], choices(VENUES)),
            field(FieldId::TossWinner, "Toss Winner", TEAMS[0], choices(TEAMS)),
            field(FieldId::TossDecision, "Toss Decision", TOSS_DECISIONS[0], choices(TOSS_DECISIONS)),
            field(FieldId::OversLeft, "Overs Left (e.g. 2.3)", "2.3", FieldType::Text),
            field(FieldId::WicketsLeft, "Wickets Left", "3", FieldType::Integer { min: 1, max: 10 }),
            field(FieldId::CurrentScore, "Current Score", "150", FieldType::Integer { min: 0, max: u32::MAX }),
            field(FieldId::TargetRuns, "Target Score", "180", FieldType::Integer { min: 1, max: u32::MAX }),
        ];
        Self { fields, selected: 0 }
    }

    fn get(&self, id: FieldId) -> Option<&FormField> {
        self.fields.iter().find(|f| f.id == id)
    }

    fn get_mut(&mut self, id: FieldId) -> Option<&mut FormField> {
        self.fields.iter_mut().find(|f| f.id == id)
    }

    pub fn value(&self, id: FieldId) -> &str {
        self.get(id).map_or("", |f| f.value.as_str())
    }

    fn integer(&self, id: FieldId) -> u32 {
        let Some(f) = self.get(id) else { return 0 };
        let min = match f.field_type {
            FieldType::Integer { min, .. } => min,
            _ => 0,
        };
        f.value.parse::<u32>().unwrap_or(min).max(min)
    }

    pub fn selected_field(&self) -> &FormField {
        &self.fields[self.selected]
    }

    pub fn select_next(&mut self) {
        self.selected = (self.selected + 1) % self.fields.len();
    }

    pub fn select_prev(&mut self) {
        self.selected = (self.selected + self.fields.len() - 1) % self.fields.len();
    }

    /// Left/Right on the selected field: step through choices or nudge an
    /// integer. No-op on free text.
    pub fn cycle(&mut self, forward: bool) {
        let f = &mut self.fields[self.selected];
        match &f.field_type {
            FieldType::Choice(options) if !options.is_empty() => {
                let pos = options.iter().position(|o| *o == f.value).unwrap_or(0);
                let next = if forward {
                    (pos + 1) % options.len()
                } else {
                    (pos + options.len() - 1) % options.len()
                };
                f.value = options[next].clone();
            }
            FieldType::Integer { min, max } => {
                let current = f.value.parse::<u32>().unwrap_or(*min).clamp(*min, *max);
                let next = if forward {
                    current.saturating_add(1).min(*max)
                } else {
                    current.saturating_sub(1).max(*min)
                };
                f.value = next.to_string();
            }
            _ => {}
        }
        if f.id == FieldId::BattingTeam {
            self.sync_bowling();
        }
    }

    pub fn type_char(&mut self, c: char) {
        let f = &mut self.fields[self.selected];
        match f.field_type {
            FieldType::Text => {
                if c.is_ascii_digit() || matches!(c, '.' | ',' | '-' | ' ') {
                    f.value.push(c);
                }
            }
            FieldType::Integer { max, .. } => {
                if !c.is_ascii_digit() {
                    return;
                }
                let candidate = format!("{}{}", f.value, c);
                if candidate.parse::<u32>().is_ok_and(|v| v <= max) {
                    f.value = candidate;
                }
            }
            FieldType::Choice(_) => {}
        }
    }

    pub fn backspace(&mut self) {
        let f = &mut self.fields[self.selected];
        if !matches!(f.field_type, FieldType::Choice(_)) {
            f.value.pop();
        }
    }

    /// Bowling choices never include the batting team.
    fn sync_bowling(&mut self) {
        let batting = self.value(FieldId::BattingTeam).to_string();
        let options = catalog::bowling_options(&batting);
        if let Some(bowling) = self.get_mut(FieldId::BowlingTeam) {
            if bowling.value == batting {
                bowling.value = options.first().map(|s| s.to_string()).unwrap_or_default();
            }
            bowling.field_type = choices(&options);
        }
    }

    pub fn to_match_state(&self) -> MatchState {
        MatchState {
            batting_team: self.value(FieldId::BattingTeam).to_string(),
            bowling_team: self.value(FieldId::BowlingTeam).to_string(),
            venue: self.value(FieldId::Venue).to_string(),
            toss_winner: self.value(FieldId::TossWinner).to_string(),
            toss_decision: self.value(FieldId::TossDecision).to_string(),
            overs_left: self.value(FieldId::OversLeft).to_string(),
            wickets_left: self.integer(FieldId::WicketsLeft).min(u8::MAX as u32) as u8,
            current_score: self.integer(FieldId::CurrentScore),
            target_runs: self.integer(FieldId::TargetRuns),
        }
    }

    pub fn metrics(&self) -> DerivedMetrics {
        DerivedMetrics::from_match(&self.to_match_state())
    }
}

impl Default for MatchForm {
    fn default() -> Self {
        Self::new()
    }
}
