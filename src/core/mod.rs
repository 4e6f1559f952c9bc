pub mod phone_book;
pub mod report;
pub mod whitelist;

pub use crate::domain::model::{FilterRequest, FilterResult, PhoneBookEntry, RunSummary};
pub use crate::domain::ports::FilterClient;
pub use crate::utils::error::Result;
