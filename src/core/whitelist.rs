use crate::core::phone_book::PhoneBook;
use crate::core::report::RunReporter;
use crate::domain::model::{
    FilterRequest, FilterResult, PhoneBookEntry, RoutingSettings, RunSummary,
};
use crate::domain::ports::FilterClient;
use crate::utils::error::Result;
use std::io::Write;
use std::path::Path;

pub fn row_message(line: usize, entry: &PhoneBookEntry, result: &FilterResult) -> String {
    if result.succeeded {
        let filter = match result.filter_id.as_deref() {
            Some(id) => format!("Filter {}", id),
            None => "Filter".to_string(),
        };
        format!(
            "Line {}: {} created for {} at number {}.",
            line, filter, entry.name, entry.number
        )
    } else {
        format!(
            "Line {}: Error: \"{}\" failed for {} at number {} (usually means disallowed duplicated phone number).",
            line, result.status_message, entry.name, entry.number
        )
    }
}

pub fn malformed_row_message(line: usize, result: &FilterResult) -> String {
    format!(
        "Line {}: Error: \"{}\" skipped malformed row.",
        line, result.status_message
    )
}

/// Submits one whitelist filter per phone book row, strictly in file order.
pub struct WhitelistRunner<C: FilterClient> {
    client: C,
    routing: RoutingSettings,
}

impl<C: FilterClient> WhitelistRunner<C> {
    pub fn new(client: C, routing: RoutingSettings) -> Self {
        Self { client, routing }
    }

    /// Fails only if the phone book cannot be opened or a sink cannot be
    /// written; rejected rows are counted and the run continues.
    pub async fn run<P, W>(&self, phone_book: P, reporter: &mut RunReporter<W>) -> Result<RunSummary>
    where
        P: AsRef<Path>,
        W: Write,
    {
        let phone_book = PhoneBook::open(phone_book)?;
        let source = phone_book.path().display().to_string();
        tracing::info!("🚀 Creating Caller-ID filters from {}", source);

        let mut summary = RunSummary::default();

        for (index, entry) in phone_book.entries().enumerate() {
            let line = index + 1;

            let message = match entry {
                Ok(entry) => {
                    let result = self.submit(&entry).await;
                    summary.record(&result);
                    row_message(line, &entry, &result)
                }
                Err(e) if e.is_read_failure() => return Err(e),
                Err(e) => {
                    tracing::warn!("Line {}: {}", line, e);
                    let result = FilterResult::failed(e.to_string());
                    summary.record(&result);
                    malformed_row_message(line, &result)
                }
            };

            reporter.emit(&message)?;
        }

        reporter.emit_summary(&summary.summary_line(&source))?;

        tracing::info!(
            "✅ Run finished: {} processed, {} created, {} failed",
            summary.rows_processed,
            summary.succeeded,
            summary.failed
        );
        Ok(summary)
    }

    async fn submit(&self, entry: &PhoneBookEntry) -> FilterResult {
        let request = FilterRequest::for_entry(&self.routing, entry);
        tracing::debug!("Submitting filter for {} ({})", entry.name, entry.number);

        match self.client.set_caller_id_filtering(&request).await {
            Ok(response) => {
                let result = FilterResult::from(response);
                if !result.succeeded {
                    tracing::debug!("Provider refused {}: {}", entry.number, result.status_message);
                }
                result
            }
            Err(e) => {
                // 傳輸層錯誤只算該行失敗
                tracing::warn!("Filter request for {} failed: {}", entry.number, e);
                FilterResult::failed(e.to_string())
            }
        }
    }
}

/// Prints the request each row would send without contacting the provider.
pub fn preview_phone_book<P, W>(phone_book: P, routing: &RoutingSettings, console: &mut W) -> Result<usize>
where
    P: AsRef<Path>,
    W: Write,
{
    let phone_book = PhoneBook::open(phone_book)?;
    let source = phone_book.path().display().to_string();
    let mut rows = 0;

    for (index, entry) in phone_book.entries().enumerate() {
        let line = index + 1;
        rows += 1;

        match entry {
            Err(e) if e.is_read_failure() => return Err(e),
            Ok(entry) => {
                let request = FilterRequest::for_entry(routing, &entry);
                writeln!(
                    console,
                    "Line {}: would create filter {}",
                    line,
                    serde_json::to_string(&request)?
                )?;
            }
            Err(e) => {
                let result = FilterResult::failed(e.to_string());
                writeln!(console, "{}", malformed_row_message(line, &result))?;
            }
        }
    }

    writeln!(console)?;
    writeln!(
        console,
        "{} lines read from {}. Dry run: no Filters created.",
        rows, source
    )?;
    Ok(rows)
}
