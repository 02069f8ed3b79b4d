use axum::http::HeaderMap;
use serde_json::Value;
use sha2::{Digest, Sha256};

use crate::error::AppError;

pub const MAX_NAME_CHARS: usize = 40;
pub const MAX_POINTS: f64 = 9999.0;

/// Origin always accepted alongside the configured one, so local frontend
/// development keeps working against a configured server.
pub const LOCAL_DEV_ORIGIN: &str = "http://localhost:3000";

/// Address used for identity hashing when no forwarded header is present.
pub const UNKNOWN_ADDR: &str = "unknown";

pub struct Submission {
    pub name: String,
    pub points: f64,
}

/// Validates an untrusted `{name, points}` payload. Pure; no side effects.
///
/// `name` must be a string and non-empty after trimming; it is truncated to
/// [`MAX_NAME_CHARS`]. `points` may be a number or a numeric string; it must
/// be finite and non-negative, and is clamped to [`MAX_POINTS`] rather than
/// rejected when over the cap.
pub fn parse_submission(payload: &Value) -> Result<Submission, AppError> {
    let name: String = payload
        .get("name")
        .and_then(Value::as_str)
        .unwrap_or_default()
        .trim()
        .chars()
        .take(MAX_NAME_CHARS)
        .collect();

    if name.is_empty() {
        return Err(AppError::BadInput);
    }

    let points = match payload.get("points") {
        Some(Value::Number(n)) => n.as_f64().unwrap_or(f64::NAN),
        Some(Value::String(s)) => s.trim().parse::<f64>().unwrap_or(f64::NAN),
        _ => f64::NAN,
    };

    if !points.is_finite() || points < 0.0 {
        return Err(AppError::BadInput);
    }

    Ok(Submission {
        name,
        points: points.min(MAX_POINTS),
    })
}

/// First entry of `x-forwarded-for`, or [`UNKNOWN_ADDR`] when absent. The
/// raw address only ever flows into [`identity_hash`].
pub fn client_addr(headers: &HeaderMap) -> String {
    headers
        .get("x-forwarded-for")
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.split(',').next())
        .map(str::trim)
        .filter(|v| !v.is_empty())
        .unwrap_or(UNKNOWN_ADDR)
        .to_string()
}

/// Salted one-way hash of a client address, used only for abuse counting.
pub fn identity_hash(addr: &str, salt: &str) -> String {
    hex::encode(Sha256::digest(format!("{salt}:{addr}")))
}

/// Origin allow-list pre-check. Disabled when no origin is configured.
pub fn origin_allowed(origin: Option<&str>, allowed: Option<&str>) -> bool {
    let Some(allowed) = allowed else {
        return true;
    };

    origin.map(|o| o.trim_end_matches('/')).is_some_and(|o| {
        o == allowed.trim_end_matches('/') || o == LOCAL_DEV_ORIGIN
    })
}
