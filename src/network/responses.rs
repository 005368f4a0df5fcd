use serde::Deserialize;
use serde_json::Value;

use crate::network::errors::ApiError;
use crate::objects::registrant::Registrant;


#[derive(Deserialize, Debug, Clone)]
pub struct AdminLoginResponse {
    #[serde(default)]
    pub(crate) token: Option<String>,
}

/// Normalizes a list body into registrants.
///
/// The service answers with a bare array or with `{"users": [...]}`,
/// depending on the endpoint and backend version. `null` bodies are empty.
/// Rows that cannot be read are skipped so one bad record does not hide the
/// rest.
pub fn unwrap_registrants(body: Value) -> Result<Vec<Registrant>, ApiError> {
    let list = match body {
        Value::Null => return Ok(Vec::new()),
        Value::Array(_) => body,
        Value::Object(mut map) => match map.remove("users") {
            Some(Value::Null) => return Ok(Vec::new()),
            Some(users) => users,
            None => return Err(ApiError::NetworkError(String::from("unexpected response shape: no users list"))),
        },
        _ => return Err(ApiError::NetworkError(String::from("unexpected response shape"))),
    };
    let rows = match list {
        Value::Array(rows) => rows,
        _ => return Err(ApiError::NetworkError(String::from("error trying to parse response from api: users is not a list"))),
    };
    let mut output = Vec::with_capacity(rows.len());
    for row in rows {
        match serde_json::from_value::<Registrant>(row) {
            Ok(r) => output.push(r),
            Err(e) => log::warn!("skipping unreadable registrant: {e}"),
        }
    }
    Ok(output)
}

/// Pulls a single record out of a create or update response.
///
/// Records come back bare or wrapped under `user`, `data` or `registrant`.
/// Anything else yields `None`; callers treat the call as successful anyway.
pub fn unwrap_registrant(body: Value) -> Option<Registrant> {
    if let Ok(r) = serde_json::from_value::<Registrant>(body.clone()) {
        return Some(r)
    }
    for key in ["user", "data", "registrant"] {
        if let Some(inner) = body.get(key) {
            if let Ok(r) = serde_json::from_value::<Registrant>(inner.clone()) {
                return Some(r)
            }
        }
    }
    None
}

/// The human readable part of an error body, if the service sent one.
pub fn error_message(body: &str) -> Option<String> {
    let value: Value = serde_json::from_str(body).ok()?;
    for key in ["message", "error"] {
        if let Some(Value::String(m)) = value.get(key) {
            if !m.is_empty() {
                return Some(m.clone())
            }
        }
    }
    None
}
