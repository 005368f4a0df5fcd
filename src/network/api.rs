use std::sync::{Arc, Mutex};
use std::time::Duration;

use reqwest::blocking::{Client, ClientBuilder, RequestBuilder};
use reqwest::header::{HeaderMap, HeaderValue, AUTHORIZATION, CONTENT_TYPE};
use reqwest::{StatusCode, Url};
use serde_json::Value;

use crate::network::errors::ApiError;
use crate::network::{requests, responses};
use crate::objects::registrant::{Registrant, ServingUnit};
use crate::objects::registration::RegistrationRequest;
use crate::session::Session;


/// Operations offered by the remote registration service.
///
/// Every call is a single attempt. Errors are handed back unchanged.
pub trait RegistryApi {
    /// `POST /register`. Returns the created record when the body carries one.
    fn submit_registration(&self, request: &RegistrationRequest) -> Result<Option<Registrant>, ApiError>;
    /// `POST /admin/login`. Returns the issued token, if any.
    fn admin_login(&self, admin_id: &str, password: &str) -> Result<Option<String>, ApiError>;
    /// `GET /admin`.
    fn list_all_registrants(&self) -> Result<Vec<Registrant>, ApiError>;
    /// `GET /admin/users/sort/:unit`.
    fn list_registrants_by_unit(&self, unit: ServingUnit) -> Result<Vec<Registrant>, ApiError>;
    /// `PATCH /admin/users/:id/membership`. Setting the same value twice is harmless.
    fn set_membership_status(&self, registrant_id: &str, status: bool) -> Result<Option<Registrant>, ApiError>;
}

pub struct ApiClient {
    http_client: Client,
    base_url: Url,
    session: Arc<Mutex<Session>>,
}

impl ApiClient {
    pub fn new(base_url: &str, session: Arc<Mutex<Session>>) -> Result<ApiClient, ApiError> {
        let base_url = match Url::parse(base_url) {
            Ok(u) if !u.cannot_be_a_base() => u,
            Ok(_) => return Err(ApiError::NetworkError(format!("'{base_url}' cannot be used as a base url"))),
            Err(e) => return Err(ApiError::NetworkError(format!("invalid api url '{base_url}': {e}"))),
        };
        // no timeout, a slow service is waited on
        let http_client = match ClientBuilder::new().timeout(None::<Duration>).build() {
            Ok(client) => client,
            Err(e) => return Err(ApiError::NetworkError(format!("unable to build http client: {e}"))),
        };
        Ok(ApiClient {
            http_client,
            base_url,
            session,
        })
    }

    pub fn base_url(&self) -> &str {
        self.base_url.as_str()
    }

    // Segments are percent-encoded, so units like "Free spirit media" are safe.
    fn endpoint(&self, segments: &[&str]) -> Result<Url, ApiError> {
        let mut url = self.base_url.clone();
        {
            let mut path = match url.path_segments_mut() {
                Ok(p) => p,
                Err(_) => return Err(ApiError::NetworkError(String::from("api url cannot take a path"))),
            };
            path.pop_if_empty();
            path.extend(segments);
        }
        Ok(url)
    }

    fn construct_headers(&self) -> HeaderMap {
        let mut headers = HeaderMap::new();
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
        let token = match self.session.lock() {
            Ok(session) => session.token(),
            Err(_) => {
                log::error!("session mutex poisoned, sending request without a token");
                None
            }
        };
        if let Some(token) = token {
            match HeaderValue::from_str(&format!("Bearer {token}")) {
                Ok(v) => {
                    headers.insert(AUTHORIZATION, v);
                },
                Err(_) => log::warn!("stored token is not a valid header value, not attaching it"),
            }
        }
        headers
    }

    fn execute(&self, request: RequestBuilder) -> Result<Value, ApiError> {
        let response = match request.headers(self.construct_headers()).send() {
            Ok(resp) => resp,
            Err(e) => {
                log::warn!("error trying to talk to api: {e}");
                return Err(ApiError::NetworkError(format!("error trying to talk to api: {e}")))
            }
        };
        let status = response.status();
        let body = match response.text() {
            Ok(b) => b,
            Err(e) => {
                log::warn!("error reading response from api: {e}");
                return Err(ApiError::NetworkError(format!("error reading response from api: {e}")))
            }
        };
        if status.is_success() {
            log::debug!("api responded {status}");
            if body.trim().is_empty() {
                return Ok(Value::Null)
            }
            return match serde_json::from_str(&body) {
                Ok(v) => Ok(v),
                Err(e) => Err(ApiError::NetworkError(format!("error trying to parse response from api: {e}"))),
            }
        }
        let message = responses::error_message(&body)
            .unwrap_or_else(|| format!("Request failed with status code {}", status.as_u16()));
        log::warn!("api responded {status}: {message}");
        Err(match status {
            StatusCode::BAD_REQUEST | StatusCode::UNPROCESSABLE_ENTITY => ApiError::ValidationError(message),
            StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN => ApiError::AuthError(message),
            StatusCode::NOT_FOUND => ApiError::NotFoundError(message),
            _ => ApiError::NetworkError(message),
        })
    }
}

impl RegistryApi for ApiClient {
    fn submit_registration(&self, request: &RegistrationRequest) -> Result<Option<Registrant>, ApiError> {
        let url = self.endpoint(&["register"])?;
        let body = self.execute(self.http_client.post(url).json(request))?;
        Ok(responses::unwrap_registrant(body))
    }

    fn admin_login(&self, admin_id: &str, password: &str) -> Result<Option<String>, ApiError> {
        let url = self.endpoint(&["admin", "login"])?;
        let body = self.execute(self.http_client.post(url).json(&requests::AdminLoginRequest {
            admin_id,
            password,
        }))?;
        if body.is_null() {
            return Ok(None)
        }
        match serde_json::from_value::<responses::AdminLoginResponse>(body) {
            Ok(resp) => Ok(resp.token),
            Err(e) => Err(ApiError::NetworkError(format!("error trying to parse response from api: {e}"))),
        }
    }

    fn list_all_registrants(&self) -> Result<Vec<Registrant>, ApiError> {
        let url = self.endpoint(&["admin"])?;
        let body = self.execute(self.http_client.get(url))?;
        responses::unwrap_registrants(body)
    }

    fn list_registrants_by_unit(&self, unit: ServingUnit) -> Result<Vec<Registrant>, ApiError> {
        let url = self.endpoint(&["admin", "users", "sort", unit.as_str()])?;
        let body = self.execute(self.http_client.get(url))?;
        responses::unwrap_registrants(body)
    }

    fn set_membership_status(&self, registrant_id: &str, status: bool) -> Result<Option<Registrant>, ApiError> {
        let url = self.endpoint(&["admin", "users", registrant_id, "membership"])?;
        let body = self.execute(self.http_client.patch(url).json(&requests::MembershipRequest {
            membership_status: status,
        }))?;
        Ok(responses::unwrap_registrant(body))
    }
}
