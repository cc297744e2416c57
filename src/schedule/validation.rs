use log::debug;

use super::slot_utils::derive_positions;
use super::types::{EventConfig, Personnel, ScheduleConstraints, ShiftConfig, ValidationError};

/// Checks whether a schedule can be generated for this configuration.
///
/// Every check runs; nothing short-circuits, so the caller gets the whole list
/// of blocking problems in one pass. An empty list means generation may proceed.
pub fn validate_schedule_config(
    event: &EventConfig,
    personnel: &Personnel,
    shifts: &ShiftConfig,
    constraints: &ScheduleConstraints,
) -> Vec<ValidationError> {
    let mut errors = Vec::new();

    if !event.is_valid() {
        errors.push(
            ValidationError::error("Invalid event configuration")
                .with_details(format!(
                    "Total matches must be positive and teams per match an even number of at least 2 (got {} matches, {} teams per match)",
                    event.total_matches, event.teams_per_match
                )),
        );
    }

    let positions_per_match = derive_positions(event).len();

    if personnel.scouters.len() < positions_per_match {
        errors.push(ValidationError::error(format!(
            "Not enough scouters: {} available, but {} positions must be covered every match",
            personnel.scouters.len(),
            positions_per_match
        )));
    }

    let blank_scouters = personnel.scouters.iter().filter(|s| s.trim().is_empty()).count();
    if blank_scouters > 0 {
        errors.push(ValidationError::error(format!(
            "{} scouter name(s) are empty",
            blank_scouters
        )));
    }

    if personnel.lead_scouters.is_empty() {
        errors.push(ValidationError::error("At least one lead scouter is required"));
    } else if personnel.lead_scouters.iter().any(|s| s.trim().is_empty()) {
        errors.push(ValidationError::error("Lead scouter names must not be empty"));
    }

    if personnel.cameras.is_empty() {
        errors.push(ValidationError::error("At least one camera operator is required"));
    } else if personnel.cameras.iter().any(|s| s.trim().is_empty()) {
        errors.push(ValidationError::error("Camera operator names must not be empty"));
    }

    if let Some(cap) = constraints.max_matches_per_scouter {
        let required = u64::from(event.total_matches) * positions_per_match as u64;
        let capacity = personnel.scouters.len() as u64 * u64::from(cap);
        if capacity < required {
            errors.push(
                ValidationError::error(format!(
                    "Max matches per scouter is too low: {} assignments are required but only {} are available ({} scouters x {} matches)",
                    required,
                    capacity,
                    personnel.scouters.len(),
                    cap
                ))
                .with_details("Add more scouters or raise the max matches per scouter"),
            );
        }
    }

    if let Some(gap) = first_uncovered_match(event.total_matches, shifts) {
        errors.push(ValidationError::error(format!(
            "Match {} is not covered by any turn",
            gap
        )));
    }

    if let Some(overlap) = first_overlapping_match(event.total_matches, shifts) {
        errors.push(ValidationError::error(format!(
            "Match {} is covered by more than one turn",
            overlap
        )));
    }

    for turn in &shifts.turns {
        if turn.start_match > turn.end_match {
            errors.push(ValidationError::error(format!(
                "Turn {} starts after it ends (matches {}-{})",
                turn.turn, turn.start_match, turn.end_match
            )));
        } else if turn.start_match < 1 || turn.end_match > event.total_matches {
            errors.push(ValidationError::error(format!(
                "Turn {} (matches {}-{}) lies outside matches 1-{}",
                turn.turn, turn.start_match, turn.end_match, event.total_matches
            )));
        }
    }

    if !errors.is_empty() {
        debug!("Validation found {} blocking error(s)", errors.len());
    }

    errors
}

fn covering_turns(match_number: u32, shifts: &ShiftConfig) -> usize {
    shifts.turns.iter().filter(|t| t.contains(match_number)).count()
}

/// Only the first gap is reported even when there are several
fn first_uncovered_match(total_matches: u32, shifts: &ShiftConfig) -> Option<u32> {
    (1..=total_matches).find(|&m| covering_turns(m, shifts) == 0)
}

fn first_overlapping_match(total_matches: u32, shifts: &ShiftConfig) -> Option<u32> {
    (1..=total_matches).find(|&m| covering_turns(m, shifts) > 1)
}
