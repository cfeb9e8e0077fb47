pub mod auth;
pub mod history;
pub mod prediction;
pub mod users;

use common::ErrorResponse;
use gloo_net::http::{Request, RequestBuilder, Response};
use gloo_timers::callback::Timeout;
use serde::{Deserialize, Serialize};
use web_sys::{AbortController, AbortSignal};

use crate::{session, settings};

/// Aborts the request when the configured timeout elapses.
///
/// Dropping the guard cancels the timer.
struct RequestDeadline {
    controller: AbortController,
    timeout_ms: u32,
    _timer: Timeout,
}

impl RequestDeadline {
    fn start() -> Result<Self, String> {
        let timeout_ms = settings::get_settings().request_timeout_ms;
        let controller = AbortController::new()
            .map_err(|e| format!("Failed to create abort controller: {:?}", e))?;

        let abort = controller.clone();
        let timer = Timeout::new(timeout_ms, move || {
            log::warn!("Request timed out after {} ms, aborting", timeout_ms);
            abort.abort();
        });

        Ok(Self { controller, timeout_ms, _timer: timer })
    }

    fn signal(&self) -> AbortSignal {
        self.controller.signal()
    }

    fn expired(&self) -> bool {
        self.controller.signal().aborted()
    }

    /// Transport error message, distinguishing an expired deadline.
    fn describe(&self, error: gloo_net::Error) -> String {
        if self.expired() {
            format!(
                "Tempo limite excedido ({} s) aguardando o servidor",
                self.timeout_ms / 1000
            )
        } else {
            format!("Request failed: {}", error)
        }
    }
}

/// Adds the session bearer token, when logged in.
fn authorized(builder: RequestBuilder) -> RequestBuilder {
    match session::access_token() {
        Some(token) => builder.header("Authorization", &format!("Bearer {}", token)),
        None => builder,
    }
}

async fn parse_response<T>(method: &str, endpoint: &str, response: Response) -> Result<T, String>
where
    T: for<'de> Deserialize<'de>,
{
    if !response.ok() {
        log::warn!("{} {} - Non-OK response: {}", method, endpoint, response.status());
        let error_response: Result<ErrorResponse, _> = response.json().await;
        return Err(match error_response.ok().and_then(|err| err.message()) {
            Some(detail) => {
                log::error!("{} {} - API error: {}", method, endpoint, detail);
                detail
            }
            None => {
                let error_msg = format!("HTTP error: {}", response.status());
                log::error!("{} {} - {}", method, endpoint, error_msg);
                error_msg
            }
        });
    }

    log::trace!("{} {} - Response received, parsing JSON", method, endpoint);
    let data: T = response.json().await.map_err(|e| {
        let error_msg = format!("Failed to parse response: {}", e);
        log::error!("{} {} - {}", method, endpoint, error_msg);
        error_msg
    })?;

    log::info!("{} {} - Success", method, endpoint);
    Ok(data)
}

/// Common GET request handler
pub async fn get<T>(endpoint: &str) -> Result<T, String>
where
    T: for<'de> Deserialize<'de>,
{
    let url = settings::get_settings().api_url(endpoint);
    log::debug!("GET request to: {}", url);

    let deadline = RequestDeadline::start()?;
    let signal = deadline.signal();
    let response = authorized(Request::get(&url))
        .abort_signal(Some(&signal))
        .send()
        .await
        .map_err(|e| {
            let error_msg = deadline.describe(e);
            log::error!("GET {} - {}", endpoint, error_msg);
            error_msg
        })?;

    parse_response("GET", endpoint, response).await
}

/// Sends a JSON body with `method` and parses the JSON reply.
async fn send_json<T, B>(
    method: &str,
    builder: fn(&str) -> RequestBuilder,
    endpoint: &str,
    body: &B,
) -> Result<T, String>
where
    T: for<'de> Deserialize<'de>,
    B: Serialize,
{
    let url = settings::get_settings().api_url(endpoint);
    log::debug!("{} request to: {}", method, url);

    let deadline = RequestDeadline::start()?;
    let signal = deadline.signal();
    let response = authorized(builder(&url))
        .abort_signal(Some(&signal))
        .json(body)
        .map_err(|e| {
            let error_msg = format!("Failed to serialize request: {}", e);
            log::error!("{} {} - {}", method, endpoint, error_msg);
            error_msg
        })?
        .send()
        .await
        .map_err(|e| {
            let error_msg = deadline.describe(e);
            log::error!("{} {} - {}", method, endpoint, error_msg);
            error_msg
        })?;

    parse_response(method, endpoint, response).await
}

/// Common POST request handler
pub async fn post<T, B>(endpoint: &str, body: &B) -> Result<T, String>
where
    T: for<'de> Deserialize<'de>,
    B: Serialize,
{
    send_json("POST", Request::post, endpoint, body).await
}

/// Common PUT request handler
pub async fn put<T, B>(endpoint: &str, body: &B) -> Result<T, String>
where
    T: for<'de> Deserialize<'de>,
    B: Serialize,
{
    send_json("PUT", Request::put, endpoint, body).await
}

/// Common DELETE request handler
pub async fn delete<T>(endpoint: &str) -> Result<T, String>
where
    T: for<'de> Deserialize<'de>,
{
    let url = settings::get_settings().api_url(endpoint);
    log::debug!("DELETE request to: {}", url);

    let deadline = RequestDeadline::start()?;
    let signal = deadline.signal();
    let response = authorized(Request::delete(&url))
        .abort_signal(Some(&signal))
        .send()
        .await
        .map_err(|e| {
            let error_msg = deadline.describe(e);
            log::error!("DELETE {} - {}", endpoint, error_msg);
            error_msg
        })?;

    parse_response("DELETE", endpoint, response).await
}
