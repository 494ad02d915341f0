//! System-wide constants for the faucet distribution engine.

/// Length of a calendar day in seconds. Day index = `timestamp / SECONDS_PER_DAY`.
pub const SECONDS_PER_DAY: u64 = 24 * 60 * 60;

/// One whole unit of the native asset, in its smallest denomination (18 decimals).
pub const ONE_TOKEN: u128 = 1_000_000_000_000_000_000;

/// Human-readable name hashed into the owner role identifier.
pub const OWNER_ROLE_NAME: &str = "OWNER_ROLE";

/// Human-readable name hashed into the sender role identifier.
pub const SENDER_ROLE_NAME: &str = "SENDER_ROLE";

/// Domain separator prepended to role names before hashing.
pub const ROLE_ID_DOMAIN: &[u8] = b"faucet:role_id:v1:";

/// Default amount sent for a normal request.
pub const DEFAULT_NORMAL_AMOUNT: u128 = ONE_TOKEN;

/// Default amount sent for a Twitter request.
pub const DEFAULT_TWITTER_AMOUNT: u128 = 3 * ONE_TOKEN;

/// Default per-tier cooldown in seconds.
pub const DEFAULT_COOLDOWN_SECONDS: u64 = 240;

/// Default aggregate cap per calendar day.
pub const DEFAULT_DAILY_LIMIT: u128 = 8 * ONE_TOKEN;

/// Version string.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Engine name.
pub const ENGINE_NAME: &str = "FaucetEngine";
