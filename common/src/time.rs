use chrono::{DateTime, Utc};
use std::{
    env, fs,
    path::Path,
    time::{Duration, SystemTime},
};

fn read_fake_time(path: impl AsRef<Path>) -> anyhow::Result<DateTime<Utc>> {
    let file_modified = fs::metadata(&path)?.modified()?;

    let elapsed = SystemTime::now()
        .duration_since(file_modified)
        .unwrap_or(Duration::from_secs(0));
    let elapsed = chrono::Duration::from_std(elapsed)?;

    let time = fs::read_to_string(&path)?;
    let time = DateTime::parse_from_rfc3339(time.trim())?;

    Ok((time + elapsed).with_timezone(&Utc))
}

/// The current time.
///
/// Debug builds can be pointed at a file containing an RFC3339 timestamp using the
/// `FAKETIME_TIMESTAMP_FILE` environment variable. The returned time is then the timestamp
/// in the file plus however long ago the file was last written, which lets an end-to-end
/// test move an enforcement run past a key's expiry without touching the system clock.
#[cfg(debug_assertions)]
pub fn now() -> DateTime<Utc> {
    match env::var("FAKETIME_TIMESTAMP_FILE") {
        Ok(path) => fake_time_or_now(path),
        Err(_) => Utc::now(),
    }
}

/// Reads the fake time, using the system clock if the file can't be read or parsed
#[cfg(debug_assertions)]
fn fake_time_or_now(path: impl AsRef<Path>) -> DateTime<Utc> {
    match read_fake_time(&path) {
        Ok(time) => time,
        Err(err) => {
            tracing::error!(
                "Failed to read fake time from {}, using system clock: {:#}",
                path.as_ref().display(),
                err
            );
            Utc::now()
        }
    }
}

#[cfg(not(debug_assertions))]
pub fn now() -> DateTime<Utc> {
    Utc::now()
}

/// Milliseconds since the Unix epoch, the unit expirations are stored in
pub fn now_millis() -> i64 {
    now().timestamp_millis()
}
