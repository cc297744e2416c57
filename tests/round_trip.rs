use scout_scheduler::export::{
    load_schedule_json, schedule_from_json, schedule_to_csv, schedule_to_json, scouter_to_csv,
    write_schedule_json,
};
use scout_scheduler::parser::{parse_request, GenerationRequest};
use scout_scheduler::schedule::query::{
    get_all_scouters, get_next_scouter_for_position, get_scouter_turn_assignments,
    is_last_match_of_turn, scouter_statistics,
};
use scout_scheduler::schedule::{derive_positions, GeneratedSchedule, GenerationOptions};

fn request() -> GenerationRequest {
    parse_request(
        r#"{
            "event": {
                "eventName": "State Championship",
                "eventCode": "2024stc",
                "teamCount": 40,
                "matchesPerTeam": 10,
                "totalMatches": 72,
                "teamsPerMatch": 6,
                "blueAllianceName": "Blue",
                "redAllianceName": "Red"
            },
            "personnel": {
                "leadScouters": ["Morgan", "Riley"],
                "scouters": ["Ari", "Bex", "Cole", "Dana", "Eli", "Fin", "Gus", "Hana"],
                "cameras": ["Quinn", "Sage"]
            },
            "breakPoints": [20, 40],
            "constraints": { "maxMatchesPerScouter": null }
        }"#,
    )
    .unwrap()
}

fn generated() -> GeneratedSchedule {
    request().generate(&GenerationOptions::default()).unwrap().schedule
}

#[test]
fn shifts_match_break_points() {
    let schedule = generated();
    let turns: Vec<(u32, u32, u32)> = schedule
        .shifts
        .turns
        .iter()
        .map(|t| (t.turn, t.start_match, t.end_match))
        .collect();
    assert_eq!(turns, vec![(1, 1, 20), (2, 21, 40), (3, 41, 72)]);
}

#[test]
fn json_round_trip_preserves_queries() {
    let original = generated();
    let json = schedule_to_json(&original).unwrap();
    let reparsed = schedule_from_json(&json).unwrap();
    assert_eq!(reparsed, original);

    for name in get_all_scouters(&original) {
        assert_eq!(
            get_scouter_turn_assignments(&reparsed, &name),
            get_scouter_turn_assignments(&original, &name)
        );
        for match_number in 1..=72 {
            assert_eq!(
                is_last_match_of_turn(&reparsed, match_number, &name),
                is_last_match_of_turn(&original, match_number, &name)
            );
        }
    }
    for position in derive_positions(&original.event) {
        for match_number in 1..=72 {
            assert_eq!(
                get_next_scouter_for_position(&reparsed, match_number, &position),
                get_next_scouter_for_position(&original, match_number, &position)
            );
        }
    }
    assert_eq!(scouter_statistics(&reparsed), scouter_statistics(&original));
}

#[test]
fn json_shape_uses_persisted_field_names() {
    let value: serde_json::Value = serde_json::from_str(&schedule_to_json(&generated()).unwrap()).unwrap();
    assert_eq!(value["shifts"]["breakPoints"], serde_json::json!([20, 40]));
    assert_eq!(value["shifts"]["turns"][2]["startMatch"], 41);
    assert_eq!(value["schedule"][0]["matchNumber"], 1);
    assert_eq!(value["schedule"][0]["leadScouter"], "Morgan");
    assert_eq!(value["schedule"][0]["camera"], "Quinn");
    assert_eq!(value["schedule"][0]["assignments"][0]["position"], "Blue 1");
    assert!(value["schedule"][0]["assignments"][0]["teamNumber"].is_null());
    assert_eq!(value["personnel"]["leadScouters"][1], "Riley");
}

#[test]
fn json_file_round_trip() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("schedule.json");
    let original = generated();
    write_schedule_json(&original, &path).unwrap();
    assert_eq!(load_schedule_json(&path).unwrap(), original);
}

#[test]
fn last_match_of_turn_at_turn_end() {
    let schedule = generated();
    let holder = schedule.schedule[19].assignments[0].scouter.clone();
    let boundary = is_last_match_of_turn(&schedule, 20, &holder);
    assert!(boundary.is_last);
    assert_eq!(boundary.turn, Some(1));
    let earlier = is_last_match_of_turn(&schedule, 19, &holder);
    assert!(!earlier.is_last);
    assert_eq!(earlier.turn, None);
}

#[test]
fn next_scouter_at_final_match_is_none() {
    let schedule = generated();
    assert_eq!(get_next_scouter_for_position(&schedule, 72, "Red 3"), None);
}

#[test]
fn tabular_csv_layout() {
    let schedule = generated();
    let csv = schedule_to_csv(&schedule).unwrap();
    let lines: Vec<&str> = csv.lines().collect();
    assert_eq!(lines.len(), 73);
    assert_eq!(lines[0], "Match #,Lead Scouter,Camera,Blue 1,Blue 2,Blue 3,Red 1,Red 2,Red 3");
    assert_eq!(lines[1], "1,Morgan,Quinn,Ari,Bex,Cole,Dana,Eli,Fin");
    assert!(lines[21].starts_with("21,Riley,Sage,Gus,Hana,"));
}

#[test]
fn scouter_csv_layout() {
    let schedule = generated();
    let csv = scouter_to_csv(&schedule, "gus").unwrap();
    let lines: Vec<&str> = csv.lines().collect();
    assert_eq!(lines[0], "Turn,Match #,Position,Team,Lead Scouter");
    assert_eq!(lines[1], "2,21,Blue 1,,Riley");
}
