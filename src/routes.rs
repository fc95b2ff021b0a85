//! Route registration.

use actix_web::web;

use crate::handlers;

pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(handlers::health::health_check)
        // The decision route must come before the generic
        // {movie_title}/{review_user} report route: both match
        // /moderation/reports/<a>/<b> and actix takes the first.
        .service(handlers::moderation::decide_report)
        .service(handlers::moderation::get_pending_reports)
        .service(handlers::moderation::get_reported_reviews)
        .service(handlers::moderation::get_reports_for_review)
        .service(handlers::moderation::get_reports)
        .service(handlers::moderation::report_review)
        .service(handlers::moderation::get_bans);
}
