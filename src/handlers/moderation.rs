//! REST surface of the moderation service.
//!
//! Caller identity arrives in the `X-Username` header; the platform's
//! session layer resolves and sets it upstream, so authentication itself
//! is not handled here.

use actix_web::{get, post, web, HttpRequest, HttpResponse};
use serde::Deserialize;

use crate::error::{AppError, Result};
use crate::models::{BanOption, DecisionAction, ReportStatus};
use crate::services::ModerationService;

const USERNAME_HEADER: &str = "X-Username";

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReportCreatePayload {
    pub reason_type: String,
    #[serde(default)]
    pub reason: Option<String>,
}

/// Decision body. The serde enums double as the validation boundary:
/// an action outside {confirm, reject} or a banOption outside
/// {3d, 7d, 30d} is rejected with a 400 before the orchestrator runs.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DecisionPayload {
    pub action: DecisionAction,
    #[serde(default)]
    pub ban_option: Option<BanOption>,
}

#[derive(Debug, Deserialize)]
pub struct ReportListQuery {
    pub status: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BanListQuery {
    pub user_name: Option<String>,
}

fn require_username(req: &HttpRequest) -> Result<String> {
    req.headers()
        .get(USERNAME_HEADER)
        .and_then(|value| value.to_str().ok())
        .map(str::to_string)
        .filter(|name| !name.is_empty())
        .ok_or_else(|| AppError::Validation(format!("Missing {USERNAME_HEADER} header")))
}

#[post("/moderation/reports/{report_id}/decision")]
pub async fn decide_report(
    service: web::Data<ModerationService>,
    req: HttpRequest,
    path: web::Path<i64>,
    payload: web::Json<DecisionPayload>,
) -> Result<HttpResponse> {
    let admin = require_username(&req)?;
    let (report, ban) =
        service.decide_report(path.into_inner(), payload.action, payload.ban_option, &admin)?;

    let mut body = serde_json::json!({
        "message": "Report decided successfully",
        "report": report,
    });
    if let Some(ban) = ban {
        body["ban"] = serde_json::to_value(ban)?;
    }
    Ok(HttpResponse::Ok().json(body))
}

#[post("/moderation/reports/{movie_title}/{review_user}")]
pub async fn report_review(
    service: web::Data<ModerationService>,
    req: HttpRequest,
    path: web::Path<(String, String)>,
    payload: web::Json<ReportCreatePayload>,
) -> Result<HttpResponse> {
    let reporter = require_username(&req)?;
    let (movie_title, review_user) = path.into_inner();
    let payload = payload.into_inner();

    let report = service.report_review(
        &movie_title,
        &review_user,
        &reporter,
        payload.reason_type,
        payload.reason,
    )?;

    Ok(HttpResponse::Created().json(serde_json::json!({
        "message": "Report created successfully",
        "report": report,
    })))
}

#[get("/moderation/reports/pending")]
pub async fn get_pending_reports(
    service: web::Data<ModerationService>,
) -> Result<HttpResponse> {
    Ok(HttpResponse::Ok().json(service.list_pending_reports()?))
}

#[get("/moderation/reports/reported-reviews")]
pub async fn get_reported_reviews(
    service: web::Data<ModerationService>,
) -> Result<HttpResponse> {
    Ok(HttpResponse::Ok().json(service.list_reported_reviews()?))
}

#[get("/moderation/reports/review/{movie_title}/{review_user}")]
pub async fn get_reports_for_review(
    service: web::Data<ModerationService>,
    path: web::Path<(String, String)>,
) -> Result<HttpResponse> {
    let (movie_title, review_user) = path.into_inner();
    Ok(HttpResponse::Ok().json(service.list_reports_for_review(&movie_title, &review_user)?))
}

#[get("/moderation/reports")]
pub async fn get_reports(
    service: web::Data<ModerationService>,
    query: web::Query<ReportListQuery>,
) -> Result<HttpResponse> {
    let status = match query.status.as_deref() {
        None => None,
        Some(raw) => Some(
            raw.parse::<ReportStatus>()
                .map_err(|_| AppError::Validation("Invalid status value".to_string()))?,
        ),
    };
    Ok(HttpResponse::Ok().json(service.list_reports(status)?))
}

#[get("/moderation/bans")]
pub async fn get_bans(
    service: web::Data<ModerationService>,
    query: web::Query<BanListQuery>,
) -> Result<HttpResponse> {
    Ok(HttpResponse::Ok().json(service.list_bans(query.user_name.as_deref())?))
}
