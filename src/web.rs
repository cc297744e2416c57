use actix_web::{middleware, web, App, HttpResponse, HttpServer, Result};
use serde::{Deserialize, Serialize};
use std::sync::{Mutex, MutexGuard};

use crate::export::{schedule_to_csv, scouter_to_csv};
use crate::parser::GenerationRequest;
use crate::schedule::query::{
    get_all_scouters, get_next_scouter_for_position, get_scouter_turn_assignments,
    is_last_match_of_turn, scouter_statistics, turn_for_match,
};
use crate::schedule::{GeneratedSchedule, GenerationOptions};

/// Holds the most recent schedule. Generating or importing replaces it wholesale.
pub struct AppState {
    pub schedule: Mutex<Option<GeneratedSchedule>>,
    pub options: GenerationOptions,
}

impl AppState {
    pub fn new(options: GenerationOptions) -> Self {
        Self {
            schedule: Mutex::new(None),
            options,
        }
    }

    fn current(&self) -> Result<MutexGuard<'_, Option<GeneratedSchedule>>> {
        self.schedule
            .lock()
            .map_err(|_| actix_web::error::ErrorInternalServerError("Schedule state is unavailable"))
    }
}

#[derive(Deserialize)]
pub struct LastMatchQuery {
    #[serde(rename = "match")]
    match_number: u32,
}

#[derive(Deserialize)]
pub struct NextScouterQuery {
    #[serde(rename = "match")]
    match_number: u32,
    position: String,
}

#[derive(Serialize)]
pub struct NextScouterResponse {
    scouter: Option<String>,
    turn: Option<u32>, // turn the next match belongs to
}

fn no_schedule() -> HttpResponse {
    HttpResponse::NotFound().json(serde_json::json!({"success": false, "error": "No schedule available"}))
}

// Feasibility check without generating
async fn validate(req: web::Json<GenerationRequest>) -> Result<HttpResponse> {
    let errors = req.validate();
    Ok(HttpResponse::Ok().json(serde_json::json!({
        "success": errors.is_empty(),
        "errors": errors,
        "suggestedTotalMatches": req.event.suggested_total_matches(),
    })))
}

async fn generate(
    req: web::Json<GenerationRequest>,
    state: web::Data<AppState>,
) -> Result<HttpResponse> {
    match req.generate(&state.options) {
        Ok(report) => {
            let response = serde_json::json!({
                "success": true,
                "schedule": &report.schedule,
                "warnings": &report.warnings,
            });
            *state.current()? = Some(report.schedule);
            Ok(HttpResponse::Ok().json(response))
        }
        Err(errors) => Ok(HttpResponse::BadRequest().json(serde_json::json!({
            "success": false,
            "errors": errors,
        }))),
    }
}

async fn import_schedule(
    schedule: web::Json<GeneratedSchedule>,
    state: web::Data<AppState>,
) -> Result<HttpResponse> {
    let schedule = schedule.into_inner();
    let matches = schedule.schedule.len();
    *state.current()? = Some(schedule);
    log::info!("Imported schedule with {} matches", matches);
    Ok(HttpResponse::Ok().json(serde_json::json!({"success": true, "matches": matches})))
}

async fn get_schedule(state: web::Data<AppState>) -> Result<HttpResponse> {
    let current = state.current()?;
    match current.as_ref() {
        Some(schedule) => Ok(HttpResponse::Ok().json(schedule)),
        None => Ok(no_schedule()),
    }
}

async fn get_schedule_csv(state: web::Data<AppState>) -> Result<HttpResponse> {
    let current = state.current()?;
    let Some(schedule) = current.as_ref() else {
        return Ok(no_schedule());
    };
    let csv = schedule_to_csv(schedule).map_err(actix_web::error::ErrorInternalServerError)?;
    Ok(HttpResponse::Ok().content_type("text/csv").body(csv))
}

async fn get_scouters(state: web::Data<AppState>) -> Result<HttpResponse> {
    let current = state.current()?;
    match current.as_ref() {
        Some(schedule) => Ok(HttpResponse::Ok().json(get_all_scouters(schedule))),
        None => Ok(no_schedule()),
    }
}

async fn get_scouter(name: web::Path<String>, state: web::Data<AppState>) -> Result<HttpResponse> {
    let current = state.current()?;
    match current.as_ref() {
        Some(schedule) => Ok(HttpResponse::Ok().json(get_scouter_turn_assignments(schedule, &name))),
        None => Ok(no_schedule()),
    }
}

async fn get_scouter_csv(name: web::Path<String>, state: web::Data<AppState>) -> Result<HttpResponse> {
    let current = state.current()?;
    let Some(schedule) = current.as_ref() else {
        return Ok(no_schedule());
    };
    let csv = scouter_to_csv(schedule, &name).map_err(actix_web::error::ErrorInternalServerError)?;
    Ok(HttpResponse::Ok().content_type("text/csv").body(csv))
}

async fn get_last_match(
    name: web::Path<String>,
    query: web::Query<LastMatchQuery>,
    state: web::Data<AppState>,
) -> Result<HttpResponse> {
    let current = state.current()?;
    match current.as_ref() {
        Some(schedule) => Ok(HttpResponse::Ok().json(is_last_match_of_turn(schedule, query.match_number, &name))),
        None => Ok(no_schedule()),
    }
}

async fn get_next_scouter(
    query: web::Query<NextScouterQuery>,
    state: web::Data<AppState>,
) -> Result<HttpResponse> {
    let current = state.current()?;
    match current.as_ref() {
        Some(schedule) => {
            let scouter = get_next_scouter_for_position(schedule, query.match_number, &query.position)
                .map(str::to_string);
            let turn = query
                .match_number
                .checked_add(1)
                .and_then(|next| turn_for_match(schedule, next))
                .map(|t| t.turn);
            Ok(HttpResponse::Ok().json(NextScouterResponse { scouter, turn }))
        }
        None => Ok(no_schedule()),
    }
}

async fn get_stats(state: web::Data<AppState>) -> Result<HttpResponse> {
    let current = state.current()?;
    match current.as_ref() {
        Some(schedule) => Ok(HttpResponse::Ok().json(scouter_statistics(schedule))),
        None => Ok(no_schedule()),
    }
}

/// Registers every API route; shared by the server and the tests
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.route("/api/validate", web::post().to(validate))
        .route("/api/generate", web::post().to(generate))
        .route("/api/import", web::post().to(import_schedule))
        .route("/api/schedule", web::get().to(get_schedule))
        .route("/api/schedule.csv", web::get().to(get_schedule_csv))
        .route("/api/scouters", web::get().to(get_scouters))
        .route("/api/scouters/{name}", web::get().to(get_scouter))
        .route("/api/scouters/{name}/csv", web::get().to(get_scouter_csv))
        .route("/api/scouters/{name}/last", web::get().to(get_last_match))
        .route("/api/next", web::get().to(get_next_scouter))
        .route("/api/stats", web::get().to(get_stats));
}

pub async fn start_server(host: &str, port: u16, options: GenerationOptions) -> std::io::Result<()> {
    let app_state = web::Data::new(AppState::new(options));

    HttpServer::new(move || {
        App::new()
            .app_data(app_state.clone())
            .wrap(middleware::Logger::default())
            .configure(configure)
    })
    .bind((host, port))?
    .run()
    .await
}

#[cfg(test)]
mod tests {
    use super::*;
    use actix_web::{http::StatusCode, test};

    fn request_body(scouters: &[&str]) -> serde_json::Value {
        serde_json::json!({
            "event": {
                "eventName": "Scrimmage",
                "teamCount": 8,
                "matchesPerTeam": 2,
                "totalMatches": 4,
                "teamsPerMatch": 4,
                "blueAllianceName": "Blue",
                "redAllianceName": "Red"
            },
            "personnel": {
                "leadScouters": ["Lee"],
                "scouters": scouters,
                "cameras": ["Cam"]
            },
            "breakPoints": [2]
        })
    }

    macro_rules! app {
        ($state:expr) => {
            test::init_service(App::new().app_data($state.clone()).configure(configure)).await
        };
    }

    #[actix_web::test]
    async fn test_generate_then_query() {
        let state = web::Data::new(AppState::new(GenerationOptions::default()));
        let app = app!(state);

        let req = test::TestRequest::post()
            .uri("/api/generate")
            .set_json(request_body(&["A", "B", "C", "D", "E"]))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::OK);

        let req = test::TestRequest::get().uri("/api/scouters").to_request();
        let scouters: Vec<String> = test::call_and_read_body_json(&app, req).await;
        assert_eq!(scouters, vec!["A", "B", "C", "D", "E"]);

        let req = test::TestRequest::get().uri("/api/next?match=2&position=Blue%201").to_request();
        let next: serde_json::Value = test::call_and_read_body_json(&app, req).await;
        assert_eq!(next["scouter"], "E");
        assert_eq!(next["turn"], 2);

        let req = test::TestRequest::get().uri("/api/next?match=4&position=Blue%201").to_request();
        let next: serde_json::Value = test::call_and_read_body_json(&app, req).await;
        assert!(next["scouter"].is_null());
        assert!(next["turn"].is_null());

        let req = test::TestRequest::get().uri("/api/scouters/a/last?match=2").to_request();
        let boundary: serde_json::Value = test::call_and_read_body_json(&app, req).await;
        assert_eq!(boundary["isLast"], true);
        assert_eq!(boundary["turn"], 1);
    }

    #[actix_web::test]
    async fn test_generate_rejects_small_roster() {
        let state = web::Data::new(AppState::new(GenerationOptions::default()));
        let app = app!(state);

        let req = test::TestRequest::post()
            .uri("/api/generate")
            .set_json(request_body(&["A", "B"]))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
        assert!(state.schedule.lock().unwrap().is_none());
    }

    #[actix_web::test]
    async fn test_queries_without_schedule() {
        let state = web::Data::new(AppState::new(GenerationOptions::default()));
        let app = app!(state);

        let req = test::TestRequest::get().uri("/api/stats").to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::NOT_FOUND);
    }

    #[actix_web::test]
    async fn test_validate_reports_errors() {
        let state = web::Data::new(AppState::new(GenerationOptions::default()));
        let app = app!(state);

        let req = test::TestRequest::post()
            .uri("/api/validate")
            .set_json(request_body(&["A", "B", "C"]))
            .to_request();
        let body: serde_json::Value = test::call_and_read_body_json(&app, req).await;
        assert_eq!(body["success"], false);
        assert_eq!(body["errors"].as_array().map(|e| e.len()), Some(1));
        // 8 teams x 2 matches / 4 per match
        assert_eq!(body["suggestedTotalMatches"], 4);
    }
}
