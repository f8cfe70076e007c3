use crate::error::ApiError;
use std::env;
use std::fmt;
use std::str::FromStr;

/// Server cluster the requests are sent to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Region {
    Na,
    Ru,
    Eu,
    Sea,
}

impl Region {
    /// Top level domain of the regional API hosts.
    pub fn tld(self) -> &'static str {
        match self {
            Region::Na => "com",
            Region::Ru => "ru",
            Region::Eu => "eu",
            Region::Sea => "sea",
        }
    }
}

impl FromStr for Region {
    type Err = ApiError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "na" => Ok(Region::Na),
            "ru" => Ok(Region::Ru),
            "eu" => Ok(Region::Eu),
            "sea" | "asia" => Ok(Region::Sea),
            other => Err(ApiError::InvalidConfiguration(format!(
                "invalid server specified: '{}'",
                other
            ))),
        }
    }
}

impl fmt::Display for Region {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Region::Na => "na",
            Region::Ru => "ru",
            Region::Eu => "eu",
            Region::Sea => "sea",
        };
        write!(f, "{}", s)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum HttpMethod {
    #[default]
    Get,
    Post,
}

impl FromStr for HttpMethod {
    type Err = ApiError;

    // Case sensitive, the service only documents the upper case verbs.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "GET" => Ok(HttpMethod::Get),
            "POST" => Ok(HttpMethod::Post),
            _ => Err(ApiError::InvalidConfiguration(
                "invalid method specified - must be POST or GET".to_string(),
            )),
        }
    }
}

impl fmt::Display for HttpMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            HttpMethod::Get => write!(f, "GET"),
            HttpMethod::Post => write!(f, "POST"),
        }
    }
}

/// Everything a client needs to know to talk to one regional API.
///
/// Setters take `&mut self`; share a client across threads by reference only
/// once it is fully configured.
#[derive(Debug, Clone)]
pub struct ClientConfig {
    api_key: String,
    region: Region,
    language: String,
    method: HttpMethod,
    use_tls: bool,
    access_token: Option<String>,
}

impl ClientConfig {
    pub fn new(api_key: &str, region: &str) -> Result<Self, ApiError> {
        if api_key.trim().is_empty() {
            return Err(ApiError::InvalidConfiguration(
                "apikey parameter may not be empty".to_string(),
            ));
        }

        let region = region.parse::<Region>()?;

        Ok(ClientConfig {
            api_key: api_key.to_string(),
            region,
            language: "en".to_string(),
            method: HttpMethod::Get,
            use_tls: false,
            access_token: None,
        })
    }

    /// Build a config from `WGAPI_*` variables, loading `.env` first.
    pub fn from_env() -> Result<Self, ApiError> {
        dotenvy::dotenv().ok();

        let api_key = env::var("WGAPI_APPLICATION_ID").map_err(|_| {
            ApiError::InvalidConfiguration(
                "WGAPI_APPLICATION_ID not found in environment or .env file".to_string(),
            )
        })?;
        let region = env::var("WGAPI_REGION").unwrap_or_else(|_| "na".to_string());

        let mut config = ClientConfig::new(&api_key, &region)?;

        if let Ok(language) = env::var("WGAPI_LANGUAGE") {
            config.set_language(&language)?;
        }
        if let Ok(method) = env::var("WGAPI_METHOD") {
            config.set_method(&method)?;
        }
        if let Ok(use_tls) = env::var("WGAPI_USE_TLS") {
            config.set_use_tls(parse_flag(&use_tls)?);
        }
        if let Ok(token) = env::var("WGAPI_ACCESS_TOKEN") {
            config.set_access_token(&token);
        }

        Ok(config)
    }

    /// Same settings, different server cluster.
    pub fn with_region(mut self, region: &str) -> Result<Self, ApiError> {
        self.region = region.parse()?;
        Ok(self)
    }

    pub fn set_language(&mut self, language: &str) -> Result<(), ApiError> {
        if language.trim().is_empty() {
            return Err(ApiError::InvalidConfiguration(
                "language parameter may not be empty".to_string(),
            ));
        }
        self.language = language.to_string();
        Ok(())
    }

    pub fn set_method(&mut self, method: &str) -> Result<(), ApiError> {
        self.method = method.parse()?;
        Ok(())
    }

    pub fn set_use_tls(&mut self, use_tls: bool) {
        self.use_tls = use_tls;
    }

    /// A blank token clears it.
    pub fn set_access_token(&mut self, access_token: &str) {
        self.access_token = Some(access_token.trim())
            .filter(|token| !token.is_empty())
            .map(str::to_string);
    }

    pub fn api_key(&self) -> &str {
        &self.api_key
    }

    pub fn region(&self) -> Region {
        self.region
    }

    pub fn tld(&self) -> &'static str {
        self.region.tld()
    }

    pub fn language(&self) -> &str {
        &self.language
    }

    pub fn method(&self) -> HttpMethod {
        self.method
    }

    pub fn use_tls(&self) -> bool {
        self.use_tls
    }

    pub fn access_token(&self) -> Option<&str> {
        self.access_token.as_deref()
    }
}

fn parse_flag(value: &str) -> Result<bool, ApiError> {
    match value.trim().to_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Ok(true),
        "0" | "false" | "no" | "off" | "" => Ok(false),
        other => Err(ApiError::InvalidConfiguration(format!(
            "WGAPI_USE_TLS must be a boolean, got '{}'",
            other
        ))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn region_table_maps_to_tld() {
        let cases = [
            ("na", "com"),
            ("NA", "com"),
            ("ru", "ru"),
            ("Eu", "eu"),
            ("sea", "sea"),
            ("asia", "sea"),
            ("ASIA", "sea"),
        ];
        for (region, tld) in cases {
            let config = ClientConfig::new("K1", region).unwrap();
            assert_eq!(config.tld(), tld, "region {}", region);
        }
    }

    #[test]
    fn unknown_region_is_rejected() {
        for region in ["", "us", "kr", "europe", "na1"] {
            let err = ClientConfig::new("K1", region).unwrap_err();
            assert!(matches!(err, ApiError::InvalidConfiguration(_)), "region {}", region);
        }
    }

    #[test]
    fn blank_api_key_is_rejected() {
        assert!(matches!(
            ClientConfig::new("  ", "na"),
            Err(ApiError::InvalidConfiguration(_))
        ));
    }

    #[test]
    fn defaults() {
        let config = ClientConfig::new("K1", "na").unwrap();
        assert_eq!(config.language(), "en");
        assert_eq!(config.method(), HttpMethod::Get);
        assert!(!config.use_tls());
        assert_eq!(config.access_token(), None);
        assert_eq!(config.region(), Region::Na);
    }

    #[test]
    fn method_must_be_get_or_post() {
        let mut config = ClientConfig::new("K1", "eu").unwrap();
        config.set_method("POST").unwrap();
        assert_eq!(config.method(), HttpMethod::Post);

        for bad in ["PUT", "get", ""] {
            assert!(matches!(
                config.set_method(bad),
                Err(ApiError::InvalidConfiguration(_))
            ));
        }
        // a rejected value leaves the previous one in place
        assert_eq!(config.method(), HttpMethod::Post);
    }

    #[test]
    fn empty_language_is_rejected() {
        let mut config = ClientConfig::new("K1", "ru").unwrap();
        assert!(config.set_language("").is_err());
        config.set_language("ru").unwrap();
        assert_eq!(config.language(), "ru");
    }

    #[test]
    fn blank_access_token_clears_it() {
        let mut config = ClientConfig::new("K1", "na").unwrap();
        config.set_access_token("secret");
        assert_eq!(config.access_token(), Some("secret"));

        config.set_access_token("");
        assert_eq!(config.access_token(), None);
        config.set_access_token("   ");
        assert_eq!(config.access_token(), None);
    }

    #[test]
    fn flag_parsing() {
        assert!(parse_flag("TRUE").unwrap());
        assert!(!parse_flag("0").unwrap());
        assert!(parse_flag("maybe").is_err());
    }
}
