pub mod adapters;
pub mod config;
pub mod core;
pub mod domain;
pub mod utils;

#[cfg(feature = "cli")]
pub use config::CliArgs;
pub use config::WhitelistConfig;

pub use adapters::{log_file::RunLog, voipms::VoipMsClient};
pub use core::{
    report::RunReporter,
    whitelist::{preview_phone_book, WhitelistRunner},
};
pub use domain::model::{
    FilterRequest, FilterResponse, FilterResult, PhoneBookEntry, RoutingSettings, RunSummary,
};
pub use domain::ports::FilterClient;
pub use utils::error::{Result, WhitelistError};
