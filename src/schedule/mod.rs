pub mod types;
pub mod slot_utils;
pub mod validation;
pub mod generator;
pub mod audit;
pub mod query;

pub use types::{
    EventConfig, GeneratedSchedule, GenerationOptions, GenerationReport, MatchAssignment,
    MatchSchedule, Personnel, ScheduleConstraints, ScouterMatch, ScouterTurnAssignment, Severity,
    ShiftConfig, Turn, TurnBoundary, ValidationError,
};
pub use slot_utils::{build_shift_config, calculate_turns, derive_positions};
pub use validation::validate_schedule_config;
pub use generator::generate_schedule;
pub use query::{
    get_all_scouters, get_next_scouter_for_position, get_scouter_turn_assignments,
    is_last_match_of_turn, scouter_statistics, ScouterStats,
};
