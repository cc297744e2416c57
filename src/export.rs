use csv::{QuoteStyle, WriterBuilder};
use std::fs;
use std::io::Write;
use std::path::Path;

use crate::error::Result;
use crate::schedule::query::get_scouter_turn_assignments;
use crate::schedule::{derive_positions, GeneratedSchedule};

/// Serializes the schedule in its persisted JSON shape
pub fn schedule_to_json(schedule: &GeneratedSchedule) -> Result<String> {
    Ok(serde_json::to_string_pretty(schedule)?)
}

/// Re-imports a schedule previously written by `schedule_to_json`
pub fn schedule_from_json(json: &str) -> Result<GeneratedSchedule> {
    Ok(serde_json::from_str(json)?)
}

pub fn write_schedule_json<P: AsRef<Path>>(schedule: &GeneratedSchedule, path: P) -> Result<()> {
    fs::write(path, schedule_to_json(schedule)?)?;
    Ok(())
}

pub fn load_schedule_json<P: AsRef<Path>>(path: P) -> Result<GeneratedSchedule> {
    let content = fs::read_to_string(path)?;
    schedule_from_json(&content)
}

/// Writes the whole-event grid: one row per match, one column per position.
/// Names are assumed comma-free, so nothing is quoted.
pub fn write_schedule_csv<W: Write>(schedule: &GeneratedSchedule, writer: W) -> Result<()> {
    let mut wtr = WriterBuilder::new()
        .quote_style(QuoteStyle::Never)
        .from_writer(writer);

    let positions = derive_positions(&schedule.event);
    let mut header = vec!["Match #".to_string(), "Lead Scouter".to_string(), "Camera".to_string()];
    header.extend(positions.iter().cloned());
    wtr.write_record(&header)?;

    for m in &schedule.schedule {
        let mut row = vec![m.match_number.to_string(), m.lead_scouter.clone(), m.camera.clone()];
        for position in &positions {
            let scouter = m
                .assignments
                .iter()
                .find(|a| &a.position == position)
                .map(|a| a.scouter.clone())
                .unwrap_or_default();
            row.push(scouter);
        }
        wtr.write_record(&row)?;
    }

    wtr.flush()?;
    Ok(())
}

pub fn schedule_to_csv(schedule: &GeneratedSchedule) -> Result<String> {
    let mut buffer = Vec::new();
    write_schedule_csv(schedule, &mut buffer)?;
    Ok(String::from_utf8_lossy(&buffer).into_owned())
}

/// Writes one scouter's matches, turn by turn
pub fn write_scouter_csv<W: Write>(schedule: &GeneratedSchedule, scouter: &str, writer: W) -> Result<()> {
    let mut wtr = WriterBuilder::new()
        .quote_style(QuoteStyle::Never)
        .from_writer(writer);

    wtr.write_record(["Turn", "Match #", "Position", "Team", "Lead Scouter"])?;
    for turn in get_scouter_turn_assignments(schedule, scouter) {
        for m in &turn.matches {
            wtr.write_record([
                turn.turn.to_string(),
                m.match_number.to_string(),
                m.position.clone(),
                m.team_number.map(|t| t.to_string()).unwrap_or_default(),
                m.lead_scouter.clone(),
            ])?;
        }
    }

    wtr.flush()?;
    Ok(())
}

pub fn scouter_to_csv(schedule: &GeneratedSchedule, scouter: &str) -> Result<String> {
    let mut buffer = Vec::new();
    write_scouter_csv(schedule, scouter, &mut buffer)?;
    Ok(String::from_utf8_lossy(&buffer).into_owned())
}

pub fn write_schedule_csv_file<P: AsRef<Path>>(schedule: &GeneratedSchedule, path: P) -> Result<()> {
    let file = fs::File::create(path)?;
    write_schedule_csv(schedule, file)
}
