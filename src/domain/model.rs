use serde::{Deserialize, Serialize};

/// 電話簿中的一筆資料（欄位 0 不使用）
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PhoneBookEntry {
    pub name: String,
    pub number: String,
}

/// Run-wide routing parameters applied to every filter.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RoutingSettings {
    pub target: String,
    #[serde(default = "default_did")]
    pub did: String,
    #[serde(default)]
    pub failover_unreachable: String,
    #[serde(default)]
    pub failover_busy: String,
    #[serde(default)]
    pub failover_noanswer: String,
}

fn default_did() -> String {
    "all".to_string()
}

impl RoutingSettings {
    pub fn new(target: impl Into<String>) -> Self {
        Self {
            target: target.into(),
            did: default_did(),
            failover_unreachable: String::new(),
            failover_busy: String::new(),
            failover_noanswer: String::new(),
        }
    }
}

/// Parameters of one `setCallerIDFiltering` call.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FilterRequest {
    /// Existing filter id to update; `None` creates a new filter.
    pub filter: Option<String>,
    pub callerid: String,
    pub did: String,
    pub routing: String,
    pub failover_unreachable: String,
    pub failover_busy: String,
    pub failover_noanswer: String,
    pub note: String,
}

impl FilterRequest {
    pub fn for_entry(settings: &RoutingSettings, entry: &PhoneBookEntry) -> Self {
        Self {
            filter: None,
            callerid: entry.number.clone(),
            did: settings.did.clone(),
            routing: settings.target.clone(),
            failover_unreachable: settings.failover_unreachable.clone(),
            failover_busy: settings.failover_busy.clone(),
            failover_noanswer: settings.failover_noanswer.clone(),
            note: entry.name.clone(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FilterResponse {
    pub status: String,
    pub filter_id: Option<String>,
}

pub const SUCCESS_STATUS: &str = "success";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FilterResult {
    pub succeeded: bool,
    pub filter_id: Option<String>,
    pub status_message: String,
}

impl FilterResult {
    pub fn failed(status_message: impl Into<String>) -> Self {
        Self {
            succeeded: false,
            filter_id: None,
            status_message: status_message.into(),
        }
    }
}

impl From<FilterResponse> for FilterResult {
    fn from(response: FilterResponse) -> Self {
        Self {
            succeeded: response.status == SUCCESS_STATUS,
            filter_id: response.filter_id,
            status_message: response.status,
        }
    }
}

/// Running tally of one whitelist run. `succeeded + failed == rows_processed` always holds.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RunSummary {
    pub rows_processed: usize,
    pub succeeded: usize,
    pub failed: usize,
}

impl RunSummary {
    pub fn record(&mut self, result: &FilterResult) {
        self.rows_processed += 1;
        if result.succeeded {
            self.succeeded += 1;
        } else {
            self.failed += 1;
        }
    }

    pub fn summary_line(&self, phone_book: &str) -> String {
        format!(
            "{} lines processed from {}. Successfully created {} Filters; {} Filters failed to create.",
            self.rows_processed, phone_book, self.succeeded, self.failed
        )
    }
}
