use csv::ReaderBuilder;
use std::fs;
use std::path::Path;

use serde::{Serialize, Deserialize};

use crate::error::{Result, SchedulerError};
use crate::schedule::{
    build_shift_config, generate_schedule, validate_schedule_config, EventConfig, GenerationOptions,
    GenerationReport, Personnel, ScheduleConstraints, ShiftConfig, ValidationError,
};

/// Everything needed to produce a schedule, as supplied by the configuration surface.
/// Break points are raw: they may be unsorted or out of range.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerationRequest {
    pub event: EventConfig,
    pub personnel: Personnel,
    #[serde(default)]
    pub break_points: Vec<i64>,
    #[serde(default)]
    pub constraints: ScheduleConstraints,
}

impl GenerationRequest {
    pub fn shifts(&self) -> ShiftConfig {
        build_shift_config(self.event.total_matches, &self.break_points)
    }

    pub fn validate(&self) -> Vec<ValidationError> {
        validate_schedule_config(&self.event, &self.personnel, &self.shifts(), &self.constraints)
    }

    pub fn generate(
        &self,
        options: &GenerationOptions,
    ) -> std::result::Result<GenerationReport, Vec<ValidationError>> {
        generate_schedule(&self.event, &self.personnel, &self.shifts(), &self.constraints, options)
    }
}

/// Parses a generation request from JSON text
pub fn parse_request(json: &str) -> Result<GenerationRequest> {
    Ok(serde_json::from_str(json)?)
}

/// Loads a generation request from a JSON file
pub fn load_request<P: AsRef<Path>>(path: P) -> Result<GenerationRequest> {
    let content = fs::read_to_string(path.as_ref())?;
    parse_request(&content)
}

/// Reads a roster: one name per line, or the first column of a CSV.
/// Blank lines and lines starting with `#` are skipped.
pub fn parse_roster(content: &str) -> Result<Vec<String>> {
    let mut reader = ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .comment(Some(b'#'))
        .from_reader(content.as_bytes());

    let mut names = Vec::new();
    for result in reader.records() {
        let record = result?;
        let name = record.get(0).unwrap_or("").trim();
        if !name.is_empty() {
            names.push(name.to_string());
        }
    }
    Ok(names)
}

pub fn load_roster<P: AsRef<Path>>(path: P) -> Result<Vec<String>> {
    let content = fs::read_to_string(path.as_ref())?;
    let names = parse_roster(&content)?;
    if names.is_empty() {
        return Err(SchedulerError::InvalidInput(format!(
            "Roster file {} contains no names",
            path.as_ref().display()
        )));
    }
    Ok(names)
}
