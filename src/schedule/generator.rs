use log::{debug, info, warn};

use super::audit::audit_schedule;
use super::slot_utils::derive_positions;
use super::types::{
    EventConfig, GeneratedSchedule, GenerationOptions, GenerationReport, MatchAssignment,
    MatchSchedule, Personnel, ScheduleConstraints, ShiftConfig, Turn, ValidationError,
};
use super::validation::validate_schedule_config;

/// Running workload for one roster entry, keyed by roster index
#[derive(Debug, Clone, Copy, Default)]
pub(crate) struct ScouterLoad {
    pub turns: u32,
    pub matches: u32,
}

/// Validates the configuration and, if it is feasible, builds a schedule.
///
/// Validation errors are the only way this fails. Slots that cannot be
/// filled come back empty, with a warning attached to the report.
pub fn generate_schedule(
    event: &EventConfig,
    personnel: &Personnel,
    shifts: &ShiftConfig,
    constraints: &ScheduleConstraints,
    options: &GenerationOptions,
) -> Result<GenerationReport, Vec<ValidationError>> {
    let errors = validate_schedule_config(event, personnel, shifts, constraints);
    if !errors.is_empty() {
        warn!("Schedule generation rejected with {} error(s)", errors.len());
        return Err(errors);
    }

    let positions = derive_positions(event);
    info!(
        "Generating schedule for {} matches, {} turns, {} positions, {} scouters",
        event.total_matches,
        shifts.turns.len(),
        positions.len(),
        personnel.scouters.len()
    );

    let mut turns: Vec<Turn> = shifts.turns.clone();
    turns.sort_by_key(|t| t.start_match);

    let mut loads = vec![ScouterLoad::default(); personnel.scouters.len()];
    let mut warnings = Vec::new();
    let mut matches = Vec::with_capacity(event.total_matches as usize);

    for (turn_index, turn) in turns.iter().enumerate() {
        // Lead and camera rotate once per turn, not once per match
        let lead_scouter = personnel.lead_scouters[turn_index % personnel.lead_scouters.len()].clone();
        let camera = personnel.cameras[turn_index % personnel.cameras.len()].clone();

        let mapping = assign_turn(turn, &positions, personnel, constraints, &mut loads, &mut warnings);
        debug!(
            "Turn {} (matches {}-{}): lead {}, camera {}",
            turn.turn, turn.start_match, turn.end_match, lead_scouter, camera
        );

        for match_number in turn.start_match..=turn.end_match {
            matches.push(MatchSchedule {
                match_number,
                lead_scouter: lead_scouter.clone(),
                camera: camera.clone(),
                assignments: mapping.clone(),
            });
        }
    }

    let schedule = GeneratedSchedule {
        event: event.clone(),
        personnel: personnel.clone(),
        shifts: shifts.clone(),
        schedule: matches,
    };

    let match_totals: Vec<u32> = loads.iter().map(|l| l.matches).collect();
    warnings.extend(audit_schedule(&schedule, &match_totals, options));
    for warning in &warnings {
        warn!("{}", warning.message);
    }

    Ok(GenerationReport { schedule, warnings })
}

/// Picks the scouter for every position of one turn.
///
/// Scouters are ordered by how many turns they have already worked (stable,
/// so ties keep roster order). Each position takes the first scouter in that
/// order who is not already used this turn and still fits under the cap.
fn assign_turn(
    turn: &Turn,
    positions: &[String],
    personnel: &Personnel,
    constraints: &ScheduleConstraints,
    loads: &mut [ScouterLoad],
    warnings: &mut Vec<ValidationError>,
) -> Vec<MatchAssignment> {
    let turn_matches = turn.match_count();

    let mut order: Vec<usize> = (0..personnel.scouters.len()).collect();
    order.sort_by_key(|&idx| loads[idx].turns);

    let mut used = vec![false; personnel.scouters.len()];
    let mut mapping = Vec::with_capacity(positions.len());

    for position in positions {
        let candidate = order.iter().copied().find(|&idx| {
            !used[idx]
                && constraints
                    .max_matches_per_scouter
                    .map_or(true, |cap| loads[idx].matches + turn_matches <= cap)
        });

        let scouter = match candidate {
            Some(idx) => {
                used[idx] = true;
                loads[idx].turns += 1;
                loads[idx].matches += turn_matches;
                personnel.scouters[idx].clone()
            }
            None => {
                warnings.push(
                    ValidationError::warning(format!(
                        "Turn {}: no scouter available for {}",
                        turn.turn, position
                    ))
                    .with_details(format!("Matches {}-{}", turn.start_match, turn.end_match)),
                );
                String::new()
            }
        };

        mapping.push(MatchAssignment {
            position: position.clone(),
            scouter,
            team_number: None,
        });
    }

    mapping
}
