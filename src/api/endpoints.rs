// API endpoint definitions and URL builders
use std::fmt;
use std::str::FromStr;

use crate::error::ApiError;

/// Which API family a request goes to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Game {
    /// World of Tanks gameplay API
    #[default]
    Wot,
    /// Wargaming.net general API, served from the World of Tanks hosts
    Wgn,
    /// World of Warplanes API
    Wowp,
}

impl Game {
    fn product(self) -> &'static str {
        match self {
            Game::Wot | Game::Wgn => "worldoftanks",
            Game::Wowp => "worldofwarplanes",
        }
    }

    fn family(self) -> &'static str {
        match self {
            Game::Wot => "wot",
            Game::Wgn => "wgn",
            Game::Wowp => "wowp",
        }
    }
}

impl FromStr for Game {
    type Err = ApiError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "wot" => Ok(Game::Wot),
            "wgn" => Ok(Game::Wgn),
            "wowp" => Ok(Game::Wowp),
            other => Err(ApiError::InvalidConfiguration(format!(
                "unknown API family '{}' (expected wot, wgn or wowp)",
                other
            ))),
        }
    }
}

impl fmt::Display for Game {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.family())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Endpoint {
    AccountList,
    AccountInfo,
    AccountTanks,
    ClanList,
    ClanInfo,
    ClanBattles,
    ClanTop,
    ClanProvinces,
    ClanVictoryPoints,
    ClanVictoryPointsHistory,
    ClanMembersInfo,
    RatingsTypes,
    RatingsAccounts,
    RatingsNeighbors,
    RatingsTop,
    RatingsDates,
}

impl Endpoint {
    /// `(resource, action)` path segments.
    pub fn path(self) -> (&'static str, &'static str) {
        match self {
            Endpoint::AccountList => ("account", "list"),
            Endpoint::AccountInfo => ("account", "info"),
            Endpoint::AccountTanks => ("account", "tanks"),
            Endpoint::ClanList => ("clan", "list"),
            Endpoint::ClanInfo => ("clan", "info"),
            Endpoint::ClanBattles => ("clan", "battles"),
            Endpoint::ClanTop => ("clan", "top"),
            Endpoint::ClanProvinces => ("clan", "provinces"),
            Endpoint::ClanVictoryPoints => ("clan", "victorypoints"),
            Endpoint::ClanVictoryPointsHistory => ("clan", "victorypointshistory"),
            Endpoint::ClanMembersInfo => ("clan", "membersinfo"),
            Endpoint::RatingsTypes => ("ratings", "types"),
            Endpoint::RatingsAccounts => ("ratings", "accounts"),
            Endpoint::RatingsNeighbors => ("ratings", "neighbors"),
            Endpoint::RatingsTop => ("ratings", "top"),
            Endpoint::RatingsDates => ("ratings", "dates"),
        }
    }

    pub fn on(self, game: Game) -> EndpointTarget {
        let (resource, action) = self.path();
        EndpointTarget {
            game,
            resource,
            action,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EndpointTarget {
    pub game: Game,
    pub resource: &'static str,
    pub action: &'static str,
}

impl EndpointTarget {
    /// Host and path without scheme, e.g. `api.worldoftanks.com/wot/account/list/`.
    pub fn host_path(&self, tld: &str) -> String {
        format!(
            "api.{}.{}/{}/{}/{}/",
            self.game.product(),
            tld,
            self.game.family(),
            self.resource,
            self.action
        )
    }
}
