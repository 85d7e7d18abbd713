use chrono::DateTime;
use common::{
    expirations::{is_expired, ExpirationTable, KeyId},
    proxy_api::DataLimitSetter,
};

use crate::enforcement_state::{EnforcementReport, EnforcementState};

/// The data limit given to expired keys. One byte rather than zero so that a blocked key
/// is never confused with a key that has no limit.
pub const BLOCKED_DATA_LIMIT_BYTES: u64 = 1;

fn format_expiry(expires_at: i64) -> String {
    DateTime::from_timestamp_millis(expires_at)
        .map(|time| time.format("%Y-%m-%d %H:%M:%S UTC").to_string())
        .unwrap_or_else(|| format!("{expires_at}ms"))
}

async fn block_key<P>(proxy: &P, key_id: &KeyId) -> EnforcementState
where
    P: DataLimitSetter + ?Sized,
{
    match proxy
        .set_data_limit(key_id, BLOCKED_DATA_LIMIT_BYTES)
        .await
    {
        Ok(()) => {
            tracing::info!(
                "✅ Successfully set data limit for key {} to {} bytes",
                key_id,
                BLOCKED_DATA_LIMIT_BYTES
            );
            EnforcementState::Blocked
        }
        Err(e) => {
            match &e {
                common::Error::Api(status, body) => tracing::error!(
                    "Failed to set data limit for key {}. Status: {}, Body: {}",
                    key_id,
                    status,
                    body
                ),
                e => tracing::error!("Error calling proxy API for key {}: {}", key_id, e),
            }
            EnforcementState::Failed(e)
        }
    }
}

/// Blocks every key in `table` whose expiry is at or before `now_millis`.
///
/// Keys are handled one after the other and a failure for one key does not stop the
/// others from being enforced. The table itself is never modified, so a key stays
/// expired and is blocked again on every run until its record is deleted.
pub async fn enforce_expirations<P>(
    table: &ExpirationTable,
    proxy: &P,
    now_millis: i64,
    dry_run: bool,
) -> EnforcementReport
where
    P: DataLimitSetter + ?Sized,
{
    let mut report = EnforcementReport::default();

    for (key_id, expires_at) in table.iter() {
        let state = if !is_expired(expires_at, now_millis) {
            tracing::debug!(
                "The key {} expires at {}",
                key_id,
                format_expiry(expires_at)
            );
            EnforcementState::Active
        } else if dry_run {
            tracing::info!(
                "⏰ Key {} expired at {}, would set data limit to {} bytes",
                key_id,
                format_expiry(expires_at),
                BLOCKED_DATA_LIMIT_BYTES
            );
            EnforcementState::WouldBlock
        } else {
            tracing::info!(
                "⏰ Key {} expired at {}. Setting data limit to {} bytes to block.",
                key_id,
                format_expiry(expires_at),
                BLOCKED_DATA_LIMIT_BYTES
            );
            block_key(proxy, key_id).await
        };

        report.states.insert(key_id.clone(), state);
    }

    report
}
