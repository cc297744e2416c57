use serde::{Serialize, Deserialize};

/// Event-level configuration the schedule is built for
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EventConfig {
    pub event_name: String,
    #[serde(default)]
    pub event_code: String,
    pub team_count: u32,
    pub matches_per_team: u32,
    pub total_matches: u32,
    pub teams_per_match: u32, // even, split between the two alliances
    pub blue_alliance_name: String,
    pub red_alliance_name: String,
    #[serde(default)]
    pub practice_mode: bool,
}

impl EventConfig {
    /// Number of matches needed for every team to play `matches_per_team` times
    pub fn suggested_total_matches(&self) -> u32 {
        if self.teams_per_match == 0 {
            return 0;
        }
        (self.team_count * self.matches_per_team).div_ceil(self.teams_per_match)
    }

    /// True when the event can be turned into positions and matches at all
    pub fn is_valid(&self) -> bool {
        self.total_matches > 0 && self.teams_per_match >= 2 && self.teams_per_match % 2 == 0
    }
}

/// The three rosters. Names are not required to be unique.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Personnel {
    pub lead_scouters: Vec<String>,
    pub scouters: Vec<String>,
    pub cameras: Vec<String>,
}

/// A contiguous, inclusive range of matches sharing one crew
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Turn {
    pub turn: u32,
    pub start_match: u32,
    pub end_match: u32,
}

impl Turn {
    pub fn contains(&self, match_number: u32) -> bool {
        self.start_match <= match_number && match_number <= self.end_match
    }

    pub fn match_count(&self) -> u32 {
        if self.end_match < self.start_match {
            0
        } else {
            self.end_match - self.start_match + 1
        }
    }
}

/// Break points plus the turns derived from them
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ShiftConfig {
    pub break_points: Vec<u32>,
    pub turns: Vec<Turn>,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScheduleConstraints {
    pub max_matches_per_scouter: Option<u32>, // None = unconstrained
}

/// One position in one match. An empty `scouter` marks a slot nobody could fill.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MatchAssignment {
    pub position: String,
    pub scouter: String,
    pub team_number: Option<u32>,
}

impl MatchAssignment {
    pub fn is_filled(&self) -> bool {
        !self.scouter.is_empty()
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MatchSchedule {
    pub match_number: u32,
    pub lead_scouter: String,
    pub camera: String,
    pub assignments: Vec<MatchAssignment>,
}

/// The full output of one generation run. Never mutated after creation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GeneratedSchedule {
    pub event: EventConfig,
    pub personnel: Personnel,
    pub shifts: ShiftConfig,
    pub schedule: Vec<MatchSchedule>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Error,
    Warning,
}

/// A blocking error or an advisory warning
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ValidationError {
    pub severity: Severity,
    pub message: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub details: Option<String>,
}

impl ValidationError {
    pub fn error(message: impl Into<String>) -> Self {
        Self {
            severity: Severity::Error,
            message: message.into(),
            details: None,
        }
    }

    pub fn warning(message: impl Into<String>) -> Self {
        Self {
            severity: Severity::Warning,
            message: message.into(),
            details: None,
        }
    }

    pub fn with_details(mut self, details: impl Into<String>) -> Self {
        self.details = Some(details.into());
        self
    }

    pub fn is_error(&self) -> bool {
        self.severity == Severity::Error
    }
}

/// Tunables for the post-generation audit
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerationOptions {
    pub imbalance_slack: u32,
}

impl Default for GenerationOptions {
    fn default() -> Self {
        Self { imbalance_slack: 2 }
    }
}

/// A successful generation: the schedule plus advisory warnings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GenerationReport {
    pub schedule: GeneratedSchedule,
    pub warnings: Vec<ValidationError>,
}

/// One match a scouter works, as seen from their own view
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScouterMatch {
    pub match_number: u32,
    pub position: String,
    pub team_number: Option<u32>,
    pub lead_scouter: String,
}

/// Per-turn projection of a scouter's work. Computed on demand, never stored.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScouterTurnAssignment {
    pub turn: u32,
    pub start_match: u32,
    pub end_match: u32,
    pub matches: Vec<ScouterMatch>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TurnBoundary {
    pub is_last: bool,
    pub turn: Option<u32>,
}
