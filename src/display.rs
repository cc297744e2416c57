use chrono::{DateTime, Local};
use std::fmt;
use std::fs;

use crate::error::Result;
use crate::schedule::query::{
    camera_turns, find_match, get_next_scouter_for_position, get_scouter_turn_assignments,
    is_last_match_of_turn, lead_turns,
};
use crate::schedule::{GeneratedSchedule, ValidationError};

/// Placeholder for a slot nobody could fill
pub fn format_scouter_name(name: &str) -> &str {
    if name.is_empty() {
        "[EMPTY]"
    } else {
        name
    }
}

/// The whole schedule, one block per turn.
/// Matches inside a turn share their crew, so each block lists it once.
pub struct ScheduleText<'a> {
    pub schedule: &'a GeneratedSchedule,
    pub generated_at: &'a DateTime<Local>,
}

impl fmt::Display for ScheduleText<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let schedule = self.schedule;
        let event = &schedule.event;

        writeln!(f, "** {} **", event.event_name)?;
        if event.practice_mode {
            writeln!(f, "(practice matches)")?;
        }
        writeln!(f, "Generated {}", self.generated_at.format("%Y-%m-%d %H:%M"))?;
        writeln!(f, "{} matches in {} turns", event.total_matches, schedule.shifts.turns.len())?;

        for turn in &schedule.shifts.turns {
            writeln!(f)?;
            writeln!(f, "Turn {} (matches {}-{})", turn.turn, turn.start_match, turn.end_match)?;
            if let Some(m) = find_match(schedule, turn.start_match) {
                writeln!(f, "  Lead Scouter: {}", m.lead_scouter)?;
                writeln!(f, "  Camera: {}", m.camera)?;
                for a in &m.assignments {
                    writeln!(f, "  {} -> {}", a.position, format_scouter_name(&a.scouter))?;
                }
            }
        }

        Ok(())
    }
}

/// One person's view: crew duties, then their matches per turn with the
/// hand-off at the end of each turn
pub struct ScouterText<'a> {
    pub schedule: &'a GeneratedSchedule,
    pub scouter: &'a str,
}

impl fmt::Display for ScouterText<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let schedule = self.schedule;
        let scouter = self.scouter;
        let turns = get_scouter_turn_assignments(schedule, scouter);
        let leading = lead_turns(schedule, scouter);
        let filming = camera_turns(schedule, scouter);

        writeln!(f, "** {} - {} **", schedule.event.event_name, scouter)?;
        if !leading.is_empty() {
            writeln!(f, "Lead scouter for turns {}", join_turns(&leading))?;
        }
        if !filming.is_empty() {
            writeln!(f, "Camera for turns {}", join_turns(&filming))?;
        }
        if turns.is_empty() {
            if leading.is_empty() && filming.is_empty() {
                writeln!(f, "No assignments")?;
            }
            return Ok(());
        }

        for turn in &turns {
            writeln!(f)?;
            writeln!(f, "Turn {} (matches {}-{})", turn.turn, turn.start_match, turn.end_match)?;
            for m in &turn.matches {
                write!(f, "  Match {}: {} (lead {})", m.match_number, m.position, m.lead_scouter)?;
                if is_last_match_of_turn(schedule, m.match_number, scouter).is_last {
                    match get_next_scouter_for_position(schedule, m.match_number, &m.position) {
                        Some(next) => write!(f, " - last match, hand off to {}", next)?,
                        None => write!(f, " - last match")?,
                    }
                }
                writeln!(f)?;
            }
        }

        Ok(())
    }
}

fn join_turns(turns: &[u32]) -> String {
    turns.iter().map(u32::to_string).collect::<Vec<_>>().join(", ")
}

pub fn render_schedule_text(schedule: &GeneratedSchedule, generated_at: &DateTime<Local>) -> String {
    ScheduleText { schedule, generated_at }.to_string()
}

pub fn render_scouter_text(schedule: &GeneratedSchedule, scouter: &str) -> String {
    ScouterText { schedule, scouter }.to_string()
}

/// Writes the rendered schedule to a file
pub fn write_schedule_to_file(schedule: &GeneratedSchedule, filename: &str) -> Result<()> {
    fs::write(filename, render_schedule_text(schedule, &Local::now()))?;
    Ok(())
}

/// Prints the schedule and any warnings in a readable format
pub fn print_schedule(schedule: &GeneratedSchedule, warnings: &[ValidationError]) {
    print!("{}", render_schedule_text(schedule, &Local::now()));
    print_issues("Warnings", warnings);
}

/// Prints a list of errors or warnings with their details
pub fn print_issues(title: &str, issues: &[ValidationError]) {
    if issues.is_empty() {
        return;
    }
    println!("\n{} ({}):", title, issues.len());
    for issue in issues {
        match &issue.details {
            Some(details) => println!("  - {} ({})", issue.message, details),
            None => println!("  - {}", issue.message),
        }
    }
}
