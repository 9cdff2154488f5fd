use actix_web::{get, HttpResponse, Responder};
use chrono::{DateTime, Utc};
use once_cell::sync::Lazy;

static START_TIME: Lazy<DateTime<Utc>> = Lazy::new(Utc::now);

#[get("/")]
pub async fn home() -> impl Responder {
    HttpResponse::Ok().json(serde_json::json!({
        "message": "Recruiter API: candidates, skills and the links between them",
        "status": "Ok",
        "version": env!("CARGO_PKG_VERSION"),
        "uptime_seconds": (Utc::now() - *START_TIME).num_seconds(),
    }))
}
