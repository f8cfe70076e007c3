use serde::de::DeserializeOwned;
use serde::Deserialize;

// Response envelope shared by every endpoint. The client itself never parses
// bodies; these types are for callers that want to.
#[derive(Debug, Deserialize)]
pub struct ApiResponse<T> {
    pub status: String,
    #[serde(default)]
    pub meta: Option<Meta>,
    pub data: Option<T>,
    #[serde(default)]
    pub error: Option<ErrorBody>,
}

impl<T: DeserializeOwned> ApiResponse<T> {
    pub fn parse(body: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(body)
    }
}

impl<T> ApiResponse<T> {
    pub fn is_ok(&self) -> bool {
        self.status == "ok"
    }
}

#[derive(Debug, Deserialize)]
pub struct Meta {
    #[serde(default)]
    pub count: Option<u64>,
}

// Error payload, e.g. {"field":"search","message":"SEARCH_NOT_SPECIFIED","code":402,"value":null}
#[derive(Debug, Deserialize)]
pub struct ErrorBody {
    #[serde(default)]
    pub field: Option<String>,
    pub message: String,
    pub code: u32,
    #[serde(default)]
    pub value: Option<serde_json::Value>,
}

// account/list entry
#[derive(Debug, Deserialize, Clone)]
pub struct AccountListEntry {
    pub nickname: String,
    pub account_id: u64,
}
