use super::types::{GeneratedSchedule, GenerationOptions, ValidationError};

const MAX_EMPTY_EXAMPLES: usize = 5;

/// Post-generation checks. Only ever produces warnings.
///
/// `match_totals` holds each roster entry's total match count, in roster order.
pub fn audit_schedule(
    schedule: &GeneratedSchedule,
    match_totals: &[u32],
    options: &GenerationOptions,
) -> Vec<ValidationError> {
    let mut warnings = Vec::new();

    if let Some(warning) = check_empty_slots(schedule) {
        warnings.push(warning);
    }

    if let Some(warning) = check_balance(schedule.event.total_matches, match_totals, options) {
        warnings.push(warning);
    }

    warnings
}

fn check_empty_slots(schedule: &GeneratedSchedule) -> Option<ValidationError> {
    let empty: Vec<String> = schedule
        .schedule
        .iter()
        .flat_map(|m| {
            m.assignments
                .iter()
                .filter(|a| !a.is_filled())
                .map(move |a| format!("Match {} {}", m.match_number, a.position))
        })
        .collect();

    if empty.is_empty() {
        return None;
    }

    let mut examples = empty
        .iter()
        .take(MAX_EMPTY_EXAMPLES)
        .cloned()
        .collect::<Vec<_>>()
        .join(", ");
    if empty.len() > MAX_EMPTY_EXAMPLES {
        examples.push_str(", ...");
    }

    Some(
        ValidationError::warning(format!("{} assignment(s) could not be filled", empty.len()))
            .with_details(examples),
    )
}

/// The cap on matches per scouter does not change this threshold
fn check_balance(
    total_matches: u32,
    match_totals: &[u32],
    options: &GenerationOptions,
) -> Option<ValidationError> {
    let min = *match_totals.iter().min()?;
    let max = *match_totals.iter().max()?;

    let fair_share = total_matches.div_ceil(match_totals.len() as u32);
    let threshold = fair_share * options.imbalance_slack;

    if max - min > threshold {
        Some(
            ValidationError::warning(format!(
                "Workload is unbalanced: scouters have between {} and {} matches",
                min, max
            ))
            .with_details(format!("Allowed spread is {} matches", threshold)),
        )
    } else {
        None
    }
}
