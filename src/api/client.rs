use crate::config::{ClientConfig, HttpMethod};
use crate::error::ApiError;

use super::endpoints::{Endpoint, EndpointTarget, Game};
use super::params::{capped_limit, history_limit, optional_limit, Ids, RequestParams};
use super::transport::{PreparedRequest, Transport, UreqTransport};

/// Blocking client for the Wargaming public API.
///
/// Every query method returns the raw response body. Errors reported by the
/// service itself (bad application id, invalid field names, ...) come back
/// inside that body and are left to the caller.
pub struct WgApiClient<T: Transport = UreqTransport> {
    config: ClientConfig,
    transport: T,
}

impl WgApiClient<UreqTransport> {
    pub fn new(config: ClientConfig) -> Self {
        WgApiClient {
            config,
            transport: UreqTransport::new(),
        }
    }

    /// Shorthand for `ClientConfig::new` followed by `new`.
    pub fn connect(api_key: &str, region: &str) -> Result<Self, ApiError> {
        Ok(Self::new(ClientConfig::new(api_key, region)?))
    }
}

impl<T: Transport> WgApiClient<T> {
    pub fn with_transport(config: ClientConfig, transport: T) -> Self {
        WgApiClient { config, transport }
    }

    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    pub fn transport(&self) -> &T {
        &self.transport
    }

    pub fn set_language(&mut self, language: &str) -> Result<(), ApiError> {
        self.config.set_language(language)
    }

    pub fn set_method(&mut self, method: &str) -> Result<(), ApiError> {
        self.config.set_method(method)
    }

    pub fn set_use_tls(&mut self, use_tls: bool) {
        self.config.set_use_tls(use_tls)
    }

    pub fn set_access_token(&mut self, access_token: &str) {
        self.config.set_access_token(access_token)
    }

    /// Build the wire form of a request without sending it.
    pub fn prepare(
        &self,
        target: EndpointTarget,
        mut params: RequestParams,
        force_tls: bool,
    ) -> Result<PreparedRequest, ApiError> {
        let scheme = if self.config.use_tls() || force_tls {
            "https"
        } else {
            "http"
        };
        let url = format!("{}://{}", scheme, target.host_path(self.config.tld()));

        params.insert("application_id", self.config.api_key());
        params.insert("language", self.config.language());
        let encoded = params.encode()?;

        Ok(match self.config.method() {
            HttpMethod::Get => PreparedRequest {
                method: HttpMethod::Get,
                url: format!("{}?{}", url, encoded),
                body: None,
            },
            HttpMethod::Post => PreparedRequest {
                method: HttpMethod::Post,
                url,
                body: Some(encoded),
            },
        })
    }

    fn execute_request(
        &self,
        target: EndpointTarget,
        params: RequestParams,
        force_tls: bool,
    ) -> Result<String, ApiError> {
        let request = self.prepare(target, params, force_tls)?;
        log::debug!("{} {}", request.method, request.base_url());
        self.transport.send(&request)
    }

    /// Attach the access token if one is configured. Returns whether it was.
    fn attach_token(&self, params: &mut RequestParams) -> bool {
        match self.config.access_token() {
            Some(token) => {
                params.insert("access_token", token);
                true
            }
            None => false,
        }
    }

    // account

    /// Partial list of players filtered by the initial characters of the nickname.
    pub fn account_list(
        &self,
        game: Game,
        search: &str,
        limit: u32,
        fields: &[&str],
    ) -> Result<String, ApiError> {
        let mut params = RequestParams::new();
        params.require_text("search", search)?;
        if let Some(limit) = capped_limit(limit) {
            params.insert("limit", limit);
        }
        params.insert_fields(fields);

        self.execute_request(Endpoint::AccountList.on(game), params, false)
    }

    /// Player details for one account id or a list of them.
    pub fn account_info(
        &self,
        game: Game,
        account_id: impl Into<Ids>,
        fields: &[&str],
    ) -> Result<String, ApiError> {
        self.standard_account_request(Endpoint::AccountInfo.on(game), account_id.into(), fields)
    }

    /// Vehicle statistics of one or more players.
    pub fn account_vehicles(
        &self,
        account_id: impl Into<Ids>,
        fields: &[&str],
    ) -> Result<String, ApiError> {
        self.standard_account_request(Endpoint::AccountTanks.on(Game::Wot), account_id.into(), fields)
    }

    fn standard_account_request(
        &self,
        target: EndpointTarget,
        account_id: Ids,
        fields: &[&str],
    ) -> Result<String, ApiError> {
        let mut params = RequestParams::new();
        params.require_ids("account_id", account_id)?;
        let private = self.attach_token(&mut params);
        params.insert_fields(fields);

        self.execute_request(target, params, private)
    }

    // clan

    /// Partial list of clans filtered by name or tag.
    pub fn clan_list(
        &self,
        search: &str,
        limit: u32,
        order_by: &str,
        fields: &[&str],
    ) -> Result<String, ApiError> {
        let mut params = RequestParams::new();
        params.require_text("search", search)?;
        if let Some(limit) = capped_limit(limit) {
            params.insert("limit", limit);
        }
        if !order_by.is_empty() {
            params.insert("order_by", order_by);
        }
        params.insert_fields(fields);

        self.execute_request(Endpoint::ClanList.on(Game::Wot), params, false)
    }

    pub fn clan_info(&self, clan_id: impl Into<Ids>, fields: &[&str]) -> Result<String, ApiError> {
        self.standard_clan_request(Endpoint::ClanInfo, clan_id.into(), fields)
    }

    pub fn clan_battles(&self, clan_id: impl Into<Ids>, fields: &[&str]) -> Result<String, ApiError> {
        self.standard_clan_request(Endpoint::ClanBattles, clan_id.into(), fields)
    }

    /// Top clans by rating. `time` defaults to `"current_season"`, which is not sent.
    pub fn clan_top(&self, time: &str, fields: &[&str]) -> Result<String, ApiError> {
        let mut params = RequestParams::new();
        if !time.is_empty() && time != "current_season" {
            params.insert("time", time);
        }
        params.insert_fields(fields);

        self.execute_request(Endpoint::ClanTop.on(Game::Wot), params, false)
    }

    pub fn clan_provinces(&self, clan_id: impl Into<Ids>, fields: &[&str]) -> Result<String, ApiError> {
        self.standard_clan_request(Endpoint::ClanProvinces, clan_id.into(), fields)
    }

    pub fn clan_victory_points(
        &self,
        clan_id: impl Into<Ids>,
        fields: &[&str],
    ) -> Result<String, ApiError> {
        self.standard_clan_request(Endpoint::ClanVictoryPoints, clan_id.into(), fields)
    }

    /// Victory points log of a clan.
    ///
    /// `limit` of 0 leaves the page size to the service, other values are
    /// clamped to 20..=100. `since`/`until` of 0 are not sent.
    pub fn clan_victory_points_history(
        &self,
        clan_id: impl Into<Ids>,
        limit: u32,
        since: i64,
        until: i64,
        offset: Option<u32>,
        fields: &[&str],
    ) -> Result<String, ApiError> {
        let mut params = RequestParams::new();
        params.require_ids("clan_id", clan_id.into())?;
        if let Some(limit) = history_limit(limit) {
            params.insert("limit", limit);
        }
        if since != 0 {
            params.insert("since", since);
        }
        if until != 0 {
            params.insert("until", until);
        }
        if let Some(offset) = offset {
            params.insert("offset", offset);
        }
        params.insert_fields(fields);

        self.execute_request(Endpoint::ClanVictoryPointsHistory.on(Game::Wot), params, false)
    }

    /// Clan membership details of one or more players.
    pub fn clan_member_info(
        &self,
        member_id: impl Into<Ids>,
        fields: &[&str],
    ) -> Result<String, ApiError> {
        let mut params = RequestParams::new();
        params.require_ids("member_id", member_id.into())?;
        params.insert_fields(fields);

        self.execute_request(Endpoint::ClanMembersInfo.on(Game::Wot), params, false)
    }

    fn standard_clan_request(
        &self,
        endpoint: Endpoint,
        clan_id: Ids,
        fields: &[&str],
    ) -> Result<String, ApiError> {
        let mut params = RequestParams::new();
        params.require_ids("clan_id", clan_id)?;
        let private = self.attach_token(&mut params);
        params.insert_fields(fields);

        self.execute_request(endpoint.on(Game::Wot), params, private)
    }

    // ratings

    /// Available rating periods.
    pub fn rating_types(&self, game: Game, fields: &[&str]) -> Result<String, ApiError> {
        let mut params = RequestParams::new();
        params.insert_fields(fields);

        self.execute_request(Endpoint::RatingsTypes.on(game), params, false)
    }

    pub fn rating_accounts(
        &self,
        game: Game,
        rating_type: &str,
        account_id: impl Into<Ids>,
        date: Option<i64>,
        fields: &[&str],
    ) -> Result<String, ApiError> {
        let mut params = RequestParams::new();
        params.require_text("type", rating_type)?;
        params.require_ids("account_id", account_id.into())?;
        if let Some(date) = date {
            params.insert("date", date);
        }
        params.insert_fields(fields);

        self.execute_request(Endpoint::RatingsAccounts.on(game), params, false)
    }

    /// Players adjacent to `account_id` in the `rank_field` rating.
    #[allow(clippy::too_many_arguments)]
    pub fn rating_neighbors(
        &self,
        game: Game,
        rating_type: &str,
        account_id: impl Into<Ids>,
        rank_field: &str,
        limit: Option<u32>,
        date: Option<i64>,
        fields: &[&str],
    ) -> Result<String, ApiError> {
        let mut params = RequestParams::new();
        params.require_text("type", rating_type)?;
        params.require_ids("account_id", account_id.into())?;
        params.require_text("rank_field", rank_field)?;
        if let Some(limit) = optional_limit(limit) {
            params.insert("limit", limit);
        }
        if let Some(date) = date {
            params.insert("date", date);
        }
        params.insert_fields(fields);

        self.execute_request(Endpoint::RatingsNeighbors.on(game), params, false)
    }

    #[allow(clippy::too_many_arguments)]
    pub fn rating_top(
        &self,
        game: Game,
        rating_type: &str,
        rank_field: &str,
        limit: Option<u32>,
        page_no: Option<u32>,
        date: Option<i64>,
        fields: &[&str],
    ) -> Result<String, ApiError> {
        let mut params = RequestParams::new();
        params.require_text("type", rating_type)?;
        params.require_text("rank_field", rank_field)?;
        if let Some(limit) = optional_limit(limit) {
            params.insert("limit", limit);
        }
        if let Some(page_no) = page_no {
            params.insert("page_no", page_no);
        }
        if let Some(date) = date {
            params.insert("date", date);
        }
        params.insert_fields(fields);

        self.execute_request(Endpoint::RatingsTop.on(game), params, false)
    }

    /// Dates with rating data available, optionally for specific accounts.
    pub fn rating_dates(
        &self,
        game: Game,
        rating_type: &str,
        account_id: Option<Ids>,
        fields: &[&str],
    ) -> Result<String, ApiError> {
        let mut params = RequestParams::new();
        params.require_text("type", rating_type)?;
        if let Some(ids) = account_id.filter(|ids| !ids.is_blank()) {
            params.require_ids("account_id", ids)?;
        }
        params.insert_fields(fields);

        self.execute_request(Endpoint::RatingsDates.on(game), params, false)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn client() -> WgApiClient {
        WgApiClient::connect("K1", "na").unwrap()
    }

    #[test]
    fn get_puts_params_in_query() {
        let client = client();
        let mut params = RequestParams::new();
        params.insert("search", "timroden");

        let req = client
            .prepare(Endpoint::AccountList.on(Game::Wot), params, false)
            .unwrap();

        assert_eq!(req.method, HttpMethod::Get);
        assert_eq!(
            req.url,
            "http://api.worldoftanks.com/wot/account/list/?search=timroden&application_id=K1&language=en"
        );
        assert_eq!(req.body, None);
    }

    #[test]
    fn post_puts_params_in_body() {
        let mut client = client();
        client.set_method("POST").unwrap();
        let mut params = RequestParams::new();
        params.insert("search", "timroden");

        let req = client
            .prepare(Endpoint::AccountList.on(Game::Wot), params, false)
            .unwrap();

        assert_eq!(req.method, HttpMethod::Post);
        assert_eq!(req.url, "http://api.worldoftanks.com/wot/account/list/");
        assert_eq!(
            req.body.as_deref(),
            Some("search=timroden&application_id=K1&language=en")
        );
    }

    #[test]
    fn scheme_follows_tls_settings() {
        let mut client = client();
        let target = Endpoint::ClanTop.on(Game::Wot);

        let forced = client.prepare(target, RequestParams::new(), true).unwrap();
        assert!(forced.url.starts_with("https://"));

        client.set_use_tls(true);
        let req = client.prepare(target, RequestParams::new(), false).unwrap();
        assert!(req.url.starts_with("https://api.worldoftanks.com/wot/clan/top/"));
    }

    #[test]
    fn injected_params_override_caller_values() {
        let mut client = client();
        client.set_language("de").unwrap();
        let mut params = RequestParams::new();
        params.insert("language", "fr");

        let req = client
            .prepare(Endpoint::RatingsTypes.on(Game::Wowp), params, false)
            .unwrap();
        assert_eq!(req.param("language").as_deref(), Some("de"));
        assert_eq!(req.params().len(), 2);
    }
}
