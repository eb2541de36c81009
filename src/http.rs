/// Outbound HTTP through window.fetch

use thiserror::Error;
use wasm_bindgen::{JsCast, JsValue};
use wasm_bindgen_futures::JsFuture;
use web_sys::{Headers, RequestInit, Response};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HttpMethod {
    Get,
    Post,
}

impl HttpMethod {
    pub fn as_str(&self) -> &'static str {
        match self {
            HttpMethod::Get => "GET",
            HttpMethod::Post => "POST",
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct OutboundRequest {
    pub method: HttpMethod,
    pub url: String,
    pub headers: Vec<(String, String)>,
    pub body: Option<String>,
}

/// Status plus, for failed requests only, the body text if it could be read
#[derive(Debug, Clone, PartialEq)]
pub struct HttpResponse {
    pub status: u16,
    pub body: Option<String>,
}

impl HttpResponse {
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

/// The request never produced a response
#[derive(Debug, Clone, Error)]
#[error("{0}")]
pub struct TransportError(String);

impl TransportError {
    pub fn new(message: impl Into<String>) -> Self {
        TransportError(message.into())
    }

    fn from_js(value: JsValue) -> Self {
        match value.dyn_ref::<js_sys::Error>() {
            Some(error) => TransportError(error.message().into()),
            None => TransportError(value.as_string().unwrap_or_else(|| format!("{:?}", value))),
        }
    }
}

/// Perform a single request; no retry and no timeout beyond the browser's own
pub async fn send(request: &OutboundRequest) -> Result<HttpResponse, TransportError> {
    let window = web_sys::window().ok_or_else(|| TransportError::new("no window available"))?;

    let headers = Headers::new().map_err(TransportError::from_js)?;
    for (name, value) in &request.headers {
        headers.set(name, value).map_err(TransportError::from_js)?;
    }

    let init = RequestInit::new();
    init.set_method(request.method.as_str());
    init.set_headers(&headers);
    if let Some(body) = &request.body {
        init.set_body(&JsValue::from_str(body));
    }

    log::debug!("{} {}", request.method.as_str(), request.url);

    let response = JsFuture::from(window.fetch_with_str_and_init(&request.url, &init))
        .await
        .map_err(TransportError::from_js)?;
    let response: Response = response.dyn_into().map_err(TransportError::from_js)?;

    let status = response.status();
    let body = if response.ok() {
        None
    } else {
        read_text(&response).await
    };

    Ok(HttpResponse { status, body })
}

async fn read_text(response: &Response) -> Option<String> {
    let promise = response.text().ok()?;
    JsFuture::from(promise).await.ok()?.as_string()
}
