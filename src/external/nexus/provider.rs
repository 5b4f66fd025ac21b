use super::types::ModInfo;
use crate::error::AppResult;
use async_trait::async_trait;

/// A place the relay can read the watched mod record from
#[async_trait]
pub trait ModSource: Send + Sync {
    /// Short name used in logs and errors
    fn name(&self) -> &'static str;

    /// Fetch the current record; `since` asks the upstream to filter on it.
    async fn fetch(&self, since: Option<i64>) -> AppResult<ModInfo>;

    /// Checked before every tick. An error means the tick is skipped.
    async fn validate_config(&self) -> AppResult<()> {
        Ok(())
    }
}
