use crate::config::HttpMethod;
use crate::error::ApiError;
use ureq::{Agent, AgentBuilder};

pub const FORM_CONTENT_TYPE: &str = "application/x-www-form-urlencoded";
const USER_AGENT: &str = concat!("wgapi/", env!("CARGO_PKG_VERSION"));
const MAX_REDIRECTS: u32 = 5;

/// A fully resolved request, ready to go on the wire.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PreparedRequest {
    pub method: HttpMethod,
    pub url: String,
    /// Form encoded body, only set for POST.
    pub body: Option<String>,
}

impl PreparedRequest {
    /// The URL with any query string cut off.
    pub fn base_url(&self) -> &str {
        self.url.split_once('?').map_or(self.url.as_str(), |(base, _)| base)
    }

    /// The encoded parameters, from the query string or the body.
    pub fn encoded_params(&self) -> &str {
        match &self.body {
            Some(body) => body,
            None => self.url.split_once('?').map_or("", |(_, query)| query),
        }
    }

    /// Decoded `(key, value)` pairs, mostly useful for inspecting what was sent.
    pub fn params(&self) -> Vec<(String, String)> {
        serde_urlencoded::from_str(self.encoded_params()).unwrap_or_default()
    }

    pub fn param(&self, key: &str) -> Option<String> {
        self.params()
            .into_iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v)
    }
}

/// Performs one HTTP round trip and hands back the raw response body.
pub trait Transport {
    fn send(&self, request: &PreparedRequest) -> Result<String, ApiError>;
}

pub struct UreqTransport {
    agent: Agent,
}

impl UreqTransport {
    pub fn new() -> Self {
        let agent = AgentBuilder::new()
            .redirects(MAX_REDIRECTS)
            .user_agent(USER_AGENT)
            .build();
        UreqTransport { agent }
    }

    pub fn with_agent(agent: Agent) -> Self {
        UreqTransport { agent }
    }
}

impl Default for UreqTransport {
    fn default() -> Self {
        Self::new()
    }
}

impl Transport for UreqTransport {
    fn send(&self, request: &PreparedRequest) -> Result<String, ApiError> {
        let response = match request.method {
            HttpMethod::Get => self.agent.get(&request.url).call(),
            HttpMethod::Post => self
                .agent
                .post(&request.url)
                .set("Content-Type", FORM_CONTENT_TYPE)
                .send_string(request.body.as_deref().unwrap_or_default()),
        };

        let response = match response {
            Ok(resp) => resp,
            // The service reports its own errors inside the body, so an error
            // status with a payload is still a response for the caller.
            Err(ureq::Error::Status(code, resp)) => {
                log::debug!("{} answered with HTTP {}", request.base_url(), code);
                resp
            }
            Err(ureq::Error::Transport(t)) => {
                log::warn!("request to {} failed: {}", request.base_url(), t);
                return Err(ApiError::transport(t.kind().to_string(), t.to_string()));
            }
        };

        let body = response
            .into_string()
            .map_err(|e| ApiError::transport("read", e.to_string()))?;

        if body.is_empty() {
            log::warn!("empty response from {}", request.base_url());
            return Err(ApiError::transport("empty", "empty response body"));
        }

        Ok(body)
    }
}
