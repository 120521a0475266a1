//! Error conversions
//!
//! Database errors into [`AppError`], and [`AppError`] into problem-details
//! HTTP responses.

#[cfg(any(feature = "sqlx", feature = "axum"))]
use super::app_error::AppError;

#[cfg(feature = "sqlx")]
use super::kind::ErrorKind;

// ============================================================================
// SQLx conversions (feature-gated)
// ============================================================================

/// Classify a PostgreSQL SQLSTATE
/// (https://www.postgresql.org/docs/current/errcodes-appendix.html)
#[cfg(feature = "sqlx")]
fn classify_sqlstate(code: &str) -> (ErrorKind, &'static str) {
    match code {
        "23505" => (ErrorKind::Conflict, "Duplicate value"),
        "23503" => (ErrorKind::Conflict, "Referenced row is missing"),
        "23502" => (ErrorKind::BadRequest, "Required value is missing"),
        // Class 53: insufficient resources; 57P0x: server shutting down
        c if c.starts_with("53") => (ErrorKind::ServiceUnavailable, "Database out of resources"),
        "57P01" | "57P02" | "57P03" => (ErrorKind::ServiceUnavailable, "Database unavailable"),
        _ => (ErrorKind::InternalServerError, "Database error"),
    }
}

#[cfg(feature = "sqlx")]
impl From<sqlx::Error> for AppError {
    fn from(err: sqlx::Error) -> Self {
        let (kind, message) = match &err {
            sqlx::Error::Database(db) => match db.code() {
                Some(code) => classify_sqlstate(&code),
                None => (ErrorKind::InternalServerError, "Database error"),
            },
            sqlx::Error::PoolTimedOut | sqlx::Error::PoolClosed | sqlx::Error::Io(_) => {
                (ErrorKind::ServiceUnavailable, "Database connection unavailable")
            }
            _ => (ErrorKind::InternalServerError, "Database error"),
        };

        AppError::new(kind, message).with_source(err)
    }
}

// ============================================================================
// Axum conversions (feature-gated)
// ============================================================================

/// RFC 7807 problem details body
#[cfg(feature = "axum")]
#[derive(serde::Serialize)]
struct Problem<'a> {
    #[serde(rename = "type")]
    problem_type: String,
    title: &'a str,
    status: u16,
    detail: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    action: Option<&'a str>,
}

#[cfg(feature = "axum")]
impl axum::response::IntoResponse for AppError {
    fn into_response(self) -> axum::response::Response {
        use axum::http::{StatusCode, header};

        let status =
            StatusCode::from_u16(self.status_code()).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);

        // Server faults keep their detail out of the body
        let detail = if self.is_server_error() {
            self.kind().title()
        } else {
            self.message()
        };

        let problem = Problem {
            problem_type: format!("/problems/{}", self.kind().slug()),
            title: self.kind().title(),
            status: status.as_u16(),
            detail,
            action: self.action(),
        };

        let body = serde_json::to_vec(&problem).unwrap_or_default();

        (
            status,
            [(header::CONTENT_TYPE, "application/problem+json")],
            body,
        )
            .into_response()
    }
}
