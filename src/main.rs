mod display;

use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand};
use display::output::{display_api_error, display_body, display_error, display_info, display_success};
use wgapi::api::models::{AccountListEntry, ApiResponse};
use wgapi::{ClientConfig, Game, WgApiClient};

#[derive(Parser, Debug)]
#[command(name = "wgapi")]
#[command(about = "Query the Wargaming public API for accounts, clans and ratings", long_about = None)]
struct Args {
    /// Server cluster: na, ru, eu, sea (asia)
    #[arg(short, long)]
    region: Option<String>,

    /// Response language (default: en)
    #[arg(short, long)]
    language: Option<String>,

    /// Send parameters in a POST body instead of the query string
    #[arg(long)]
    post: bool,

    /// Use HTTPS
    #[arg(long)]
    tls: bool,

    /// API family for account and rating queries: wot, wgn, wowp
    #[arg(short, long, default_value = "wot")]
    game: String,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Search players by nickname prefix
    AccountList {
        search: String,
        #[arg(short = 'n', long, default_value_t = 100)]
        limit: u32,
        /// Comma separated response fields
        #[arg(short, long, value_delimiter = ',')]
        fields: Vec<String>,
    },
    /// Player details for one or more account ids
    AccountInfo {
        #[arg(required = true)]
        account_id: Vec<String>,
        #[arg(short, long, value_delimiter = ',')]
        fields: Vec<String>,
    },
    /// Search clans by name or tag
    ClanList {
        search: String,
        #[arg(short = 'n', long, default_value_t = 100)]
        limit: u32,
        #[arg(long, default_value = "")]
        order_by: String,
        #[arg(short, long, value_delimiter = ',')]
        fields: Vec<String>,
    },
    /// Clan details for one or more clan ids
    ClanInfo {
        #[arg(required = true)]
        clan_id: Vec<String>,
        #[arg(short, long, value_delimiter = ',')]
        fields: Vec<String>,
    },
    /// Top clans by rating
    ClanTop {
        #[arg(long, default_value = "current_season")]
        time: String,
        #[arg(short, long, value_delimiter = ',')]
        fields: Vec<String>,
    },
    /// Available rating periods
    RatingTypes {
        #[arg(short, long, value_delimiter = ',')]
        fields: Vec<String>,
    },
    /// Search a player and print the details of the first match
    Lookup { search: String },
}

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn"))
        .format_timestamp_secs()
        .init();

    let args = Args::parse();

    if let Err(e) = run(args) {
        display_error(&format!("{:#}", e));
        std::process::exit(1);
    }
}

fn run(args: Args) -> Result<()> {
    let mut config = ClientConfig::from_env()?;
    if let Some(region) = &args.region {
        config = config.with_region(region)?;
    }
    if let Some(language) = &args.language {
        config.set_language(language)?;
    }
    if args.post {
        config.set_method("POST")?;
    }
    if args.tls {
        config.set_use_tls(true);
    }

    let game: Game = args.game.parse()?;
    let client = WgApiClient::new(config);

    let body = match args.command {
        Command::AccountList { search, limit, fields } => {
            client.account_list(game, &search, limit, &as_strs(&fields))?
        }
        Command::AccountInfo { account_id, fields } => {
            client.account_info(game, account_id, &as_strs(&fields))?
        }
        Command::ClanList {
            search,
            limit,
            order_by,
            fields,
        } => client.clan_list(&search, limit, &order_by, &as_strs(&fields))?,
        Command::ClanInfo { clan_id, fields } => client.clan_info(clan_id, &as_strs(&fields))?,
        Command::ClanTop { time, fields } => client.clan_top(&time, &as_strs(&fields))?,
        Command::RatingTypes { fields } => client.rating_types(game, &as_strs(&fields))?,
        Command::Lookup { search } => lookup(&client, game, &search)?,
    };

    display_body(&body);
    Ok(())
}

/// Search accounts, then fetch the details of the first hit.
fn lookup(client: &WgApiClient, game: Game, search: &str) -> Result<String> {
    display_info(&format!(
        "Searching accounts matching '{}' on {}",
        search,
        client.config().region()
    ));

    let body = client.account_list(game, search, 100, &[])?;
    let accounts: ApiResponse<Vec<AccountListEntry>> =
        ApiResponse::parse(&body).context("unexpected account list response")?;

    if let Some(error) = &accounts.error {
        display_api_error(error);
        bail!("account search was rejected by the API");
    }

    let first = match accounts.data.as_deref().and_then(|data| data.first()) {
        Some(account) => account.clone(),
        None => bail!("No accounts found!"),
    };
    display_success(&format!("Found {} ({})", first.nickname, first.account_id));

    Ok(client.account_info(game, first.account_id, &[])?)
}

fn as_strs(values: &[String]) -> Vec<&str> {
    values.iter().map(String::as_str).collect()
}
