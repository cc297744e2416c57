use super::types::{EventConfig, ShiftConfig, Turn};

/// Builds the per-match position labels: blue alliance slots first, then red.
/// Callers must make sure `teams_per_match >= 2`.
pub fn derive_positions(event: &EventConfig) -> Vec<String> {
    let teams_per_alliance = event.teams_per_match / 2;
    let blue = (1..=teams_per_alliance).map(|slot| format!("{} {}", event.blue_alliance_name, slot));
    let red = (1..=teams_per_alliance).map(|slot| format!("{} {}", event.red_alliance_name, slot));
    blue.chain(red).collect()
}

/// Sorts the raw break points and silently drops anything that cannot be a
/// boundary (`<= 0` or `>= total_matches`). Repeated values collapse into one.
pub fn sanitize_break_points(total_matches: u32, break_points: &[i64]) -> Vec<u32> {
    let mut valid: Vec<u32> = break_points
        .iter()
        .filter(|&&b| b > 0 && b < i64::from(total_matches))
        .map(|&b| b as u32)
        .collect();
    valid.sort_unstable();
    valid.dedup();
    valid
}

/// Partitions `1..=total_matches` into turns.
/// Break point `b` ends a turn at match `b`; the next turn starts at `b + 1`.
/// Always returns at least one turn.
pub fn calculate_turns(total_matches: u32, break_points: &[i64]) -> Vec<Turn> {
    let valid = sanitize_break_points(total_matches, break_points);

    let mut turns = Vec::with_capacity(valid.len() + 1);
    let mut start_match = 1;
    for (idx, &end_match) in valid.iter().enumerate() {
        turns.push(Turn {
            turn: idx as u32 + 1,
            start_match,
            end_match,
        });
        start_match = end_match + 1;
    }

    turns.push(Turn {
        turn: valid.len() as u32 + 1,
        start_match,
        end_match: total_matches,
    });

    turns
}

/// Convenience wrapper producing the persisted shift shape
pub fn build_shift_config(total_matches: u32, break_points: &[i64]) -> ShiftConfig {
    ShiftConfig {
        break_points: sanitize_break_points(total_matches, break_points),
        turns: calculate_turns(total_matches, break_points),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn event(teams_per_match: u32) -> EventConfig {
        EventConfig {
            event_name: "Regional".to_string(),
            event_code: String::new(),
            team_count: 36,
            matches_per_team: 12,
            total_matches: 72,
            teams_per_match,
            blue_alliance_name: "Blue".to_string(),
            red_alliance_name: "Red".to_string(),
            practice_mode: false,
        }
    }

    fn ranges(turns: &[Turn]) -> Vec<(u32, u32, u32)> {
        turns.iter().map(|t| (t.turn, t.start_match, t.end_match)).collect()
    }

    #[test]
    fn test_positions_blue_first() {
        assert_eq!(
            derive_positions(&event(6)),
            vec!["Blue 1", "Blue 2", "Blue 3", "Red 1", "Red 2", "Red 3"]
        );
    }

    #[test]
    fn test_positions_custom_names() {
        let mut ev = event(4);
        ev.blue_alliance_name = "Azul".to_string();
        ev.red_alliance_name = "Rojo".to_string();
        assert_eq!(derive_positions(&ev), vec!["Azul 1", "Azul 2", "Rojo 1", "Rojo 2"]);
    }

    #[test]
    fn test_turns_from_two_breaks() {
        let turns = calculate_turns(72, &[20, 40]);
        assert_eq!(ranges(&turns), vec![(1, 1, 20), (2, 21, 40), (3, 41, 72)]);
    }

    #[test]
    fn test_turns_without_breaks() {
        assert_eq!(ranges(&calculate_turns(10, &[])), vec![(1, 1, 10)]);
    }

    #[test]
    fn test_unsorted_and_out_of_range_breaks_are_dropped() {
        let turns = calculate_turns(30, &[25, -3, 0, 10, 30, 45]);
        assert_eq!(ranges(&turns), vec![(1, 1, 10), (2, 11, 25), (3, 26, 30)]);
    }

    #[test]
    fn test_duplicate_breaks_collapse() {
        let turns = calculate_turns(30, &[10, 10, 20]);
        assert_eq!(ranges(&turns), vec![(1, 1, 10), (2, 11, 20), (3, 21, 30)]);
    }

    #[test]
    fn test_turns_partition_every_match() {
        for total in 1..40u32 {
            let breaks: Vec<i64> = (-2..=(total as i64 + 2)).step_by(3).collect();
            let turns = calculate_turns(total, &breaks);
            assert_eq!(turns.first().map(|t| t.start_match), Some(1));
            assert_eq!(turns.last().map(|t| t.end_match), Some(total));
            for pair in turns.windows(2) {
                assert_eq!(pair[0].end_match + 1, pair[1].start_match);
                assert!(pair[0].start_match <= pair[0].end_match);
            }
        }
    }

    #[test]
    fn test_shift_config_keeps_sanitized_breaks() {
        let shifts = build_shift_config(72, &[40, 20, 72]);
        assert_eq!(shifts.break_points, vec![20, 40]);
        assert_eq!(shifts.turns.len(), 3);
    }
}
