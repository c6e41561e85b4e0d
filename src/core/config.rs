use std::{env, time::Duration};

use eyre::Result;
use once_cell::sync::OnceCell;
use twilight_model::id::{marker::ChannelMarker, Id};

static CONFIG: OnceCell<BotConfig> = OnceCell::new();

const DEFAULT_TOTAL_CELLS: usize = 20;
const DEFAULT_ROWS: usize = 4;
const DEFAULT_UPDATE_INTERVAL_MS: u64 = 500;
const DEFAULT_UPDATE_INCREMENT_MS: u64 = 0;

#[derive(Debug)]
pub struct BotConfig {
    pub discord_token: Box<str>,
    /// The channel the game board is posted in, no matter where the
    /// trigger message came from.
    pub game_channel: Id<ChannelMarker>,
    pub total_cells: usize,
    pub rows: usize,
    pub update_interval: Duration,
    pub update_increment: Duration,
}

impl BotConfig {
    pub fn get() -> &'static Self {
        CONFIG
            .get()
            .expect("`BotConfig::init` must be called first")
    }

    pub fn init() -> Result<()> {
        let config = BotConfig {
            discord_token: env_var("DISCORD_TOKEN")?,
            game_channel: env_var("WHACK_CHANNEL_ID")?,
            total_cells: env_var_or("WHACK_TOTAL_CELLS", DEFAULT_TOTAL_CELLS)?,
            rows: env_var_or("WHACK_ROWS", DEFAULT_ROWS)?,
            update_interval: env_var_or("WHACK_UPDATE_INTERVAL_MS", DEFAULT_UPDATE_INTERVAL_MS)
                .map(Duration::from_millis)?,
            update_increment: env_var_or("WHACK_UPDATE_INCREMENT_MS", DEFAULT_UPDATE_INCREMENT_MS)
                .map(Duration::from_millis)?,
        };

        if CONFIG.set(config).is_err() {
            warn!("CONFIG was already set");
        }

        Ok(())
    }
}

fn env_var<T: EnvKind>(name: &str) -> Result<T> {
    let value = env::var(name).map_err(|_| eyre!("missing env variable `{name}`"))?;

    T::from_str(value).map_err(|value| {
        eyre!(
            "failed to parse env variable `{name}={value}`; expected {expected}",
            expected = T::EXPECTED
        )
    })
}

fn env_var_or<T: EnvKind>(name: &str, default: T) -> Result<T> {
    match env::var(name) {
        Ok(value) => T::from_str(value).map_err(|value| {
            eyre!(
                "failed to parse env variable `{name}={value}`; expected {expected}",
                expected = T::EXPECTED
            )
        }),
        Err(_) => Ok(default),
    }
}

trait EnvKind: Sized {
    const EXPECTED: &'static str;

    fn from_str(s: String) -> Result<Self, String>;
}

macro_rules! env_kind {
    ($($ty:ty: |$arg:ident| $impl:block,)*) => {
        $(
            impl EnvKind for $ty {
                const EXPECTED: &'static str = stringify!($ty);

                fn from_str($arg: String) -> Result<Self, String> {
                    $impl
                }
            }
        )*
    };
}

env_kind! {
    Box<str>: |s| { Ok(s.into_boxed_str()) },
    u64: |s| { s.parse().map_err(|_| s) },
    usize: |s| { s.parse().map_err(|_| s) },
    Id<ChannelMarker>: |s| { s.parse().map(Id::new).map_err(|_| s) },
}
