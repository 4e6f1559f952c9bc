use crate::domain::model::{FilterRequest, FilterResponse};
use crate::utils::error::Result;
use async_trait::async_trait;

/// Remote Caller-ID filter API.
///
/// `Err` means the call itself failed (transport, HTTP, decoding). A call that
/// reached the provider and was refused comes back as `Ok` with a non-success
/// status.
#[async_trait]
pub trait FilterClient: Send + Sync {
    async fn set_caller_id_filtering(&self, request: &FilterRequest) -> Result<FilterResponse>;
}
