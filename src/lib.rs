//! Blocking client for the Wargaming public API (World of Tanks, Wargaming.net
//! and World of Warplanes): accounts, clans and ratings.
//!
//! ```no_run
//! use wgapi::{Game, WgApiClient};
//!
//! let mut client = WgApiClient::connect("your-application-id", "na")?;
//! client.set_method("POST")?;
//! let body = client.account_list(Game::Wot, "timroden", 100, &[])?;
//! println!("{}", body);
//! # Ok::<(), wgapi::ApiError>(())
//! ```

pub mod api;
pub mod config;
pub mod error;

pub use api::client::WgApiClient;
pub use api::endpoints::{Endpoint, EndpointTarget, Game};
pub use api::params::{Ids, ParamValue, RequestParams};
pub use api::transport::{PreparedRequest, Transport, UreqTransport};
pub use config::{ClientConfig, HttpMethod, Region};
pub use error::ApiError;
