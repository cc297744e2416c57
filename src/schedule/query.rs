//! Read-only projections over a finished schedule, used to drive the
//! per-person views. Everything here works the same on a freshly generated
//! schedule and on one re-imported from JSON.

use std::collections::{BTreeMap, BTreeSet};

use serde::{Serialize, Deserialize};

use super::types::{
    GeneratedSchedule, MatchSchedule, ScouterMatch, ScouterTurnAssignment, Turn, TurnBoundary,
};

/// Aggregate workload for one scouter name
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScouterStats {
    pub total_matches: u32,
    pub by_position: BTreeMap<String, u32>,
}

fn same_person(a: &str, b: &str) -> bool {
    a.to_lowercase() == b.to_lowercase()
}

pub fn find_match(schedule: &GeneratedSchedule, match_number: u32) -> Option<&MatchSchedule> {
    schedule.schedule.iter().find(|m| m.match_number == match_number)
}

pub fn turn_for_match(schedule: &GeneratedSchedule, match_number: u32) -> Option<&Turn> {
    schedule.shifts.turns.iter().find(|t| t.contains(match_number))
}

/// Groups a scouter's matches by turn. Names compare case-insensitively;
/// turns where the scouter has nothing are left out.
pub fn get_scouter_turn_assignments(
    schedule: &GeneratedSchedule,
    scouter: &str,
) -> Vec<ScouterTurnAssignment> {
    let mut result = Vec::new();

    for turn in &schedule.shifts.turns {
        let matches: Vec<ScouterMatch> = schedule
            .schedule
            .iter()
            .filter(|m| turn.contains(m.match_number))
            .filter_map(|m| {
                m.assignments
                    .iter()
                    .find(|a| a.is_filled() && same_person(&a.scouter, scouter))
                    .map(|a| ScouterMatch {
                        match_number: m.match_number,
                        position: a.position.clone(),
                        team_number: a.team_number,
                        lead_scouter: m.lead_scouter.clone(),
                    })
            })
            .collect();

        if !matches.is_empty() {
            result.push(ScouterTurnAssignment {
                turn: turn.turn,
                start_match: turn.start_match,
                end_match: turn.end_match,
                matches,
            });
        }
    }

    result
}

/// Sorted, de-duplicated names of everyone holding at least one position
pub fn get_all_scouters(schedule: &GeneratedSchedule) -> Vec<String> {
    let names: BTreeSet<&str> = schedule
        .schedule
        .iter()
        .flat_map(|m| m.assignments.iter())
        .filter(|a| a.is_filled())
        .map(|a| a.scouter.as_str())
        .collect();
    names.into_iter().map(str::to_string).collect()
}

/// Whether `match_number` is the scouter's final match in the turn containing it
pub fn is_last_match_of_turn(
    schedule: &GeneratedSchedule,
    match_number: u32,
    scouter: &str,
) -> TurnBoundary {
    for turn in get_scouter_turn_assignments(schedule, scouter) {
        if turn.matches.last().map(|m| m.match_number) == Some(match_number) {
            return TurnBoundary {
                is_last: true,
                turn: Some(turn.turn),
            };
        }
    }

    TurnBoundary {
        is_last: false,
        turn: None,
    }
}

/// Who holds `position` in the match right after `current_match`
pub fn get_next_scouter_for_position<'a>(
    schedule: &'a GeneratedSchedule,
    current_match: u32,
    position: &str,
) -> Option<&'a str> {
    let next = find_match(schedule, current_match.checked_add(1)?)?;
    next.assignments
        .iter()
        .find(|a| a.position == position)
        .filter(|a| a.is_filled())
        .map(|a| a.scouter.as_str())
}

/// Turns in which `person` is the lead scouter
pub fn lead_turns(schedule: &GeneratedSchedule, person: &str) -> Vec<u32> {
    crew_turns(schedule, person, |m| &m.lead_scouter)
}

/// Turns in which `person` runs the camera
pub fn camera_turns(schedule: &GeneratedSchedule, person: &str) -> Vec<u32> {
    crew_turns(schedule, person, |m| &m.camera)
}

fn crew_turns<F>(schedule: &GeneratedSchedule, person: &str, role: F) -> Vec<u32>
where
    F: Fn(&MatchSchedule) -> &String,
{
    schedule
        .shifts
        .turns
        .iter()
        .filter(|turn| {
            schedule
                .schedule
                .iter()
                .any(|m| turn.contains(m.match_number) && same_person(role(m), person))
        })
        .map(|turn| turn.turn)
        .collect()
}

/// Match totals and per-position counts, keyed by scouter name as written
pub fn scouter_statistics(schedule: &GeneratedSchedule) -> BTreeMap<String, ScouterStats> {
    let mut stats: BTreeMap<String, ScouterStats> = BTreeMap::new();

    for m in &schedule.schedule {
        for a in m.assignments.iter().filter(|a| a.is_filled()) {
            let entry = stats.entry(a.scouter.clone()).or_default();
            entry.total_matches += 1;
            *entry.by_position.entry(a.position.clone()).or_insert(0) += 1;
        }
    }

    stats
}
