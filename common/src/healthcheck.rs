use serde::{Deserialize, Serialize};

/// Body returned by a service's `/healthcheck` endpoint.
///
/// `commit` and `branch` are baked in at compile time from the `GIT_COMMIT`
/// and `GIT_BRANCH` environment variables when the build sets them.
#[derive(Clone, Debug, Deserialize, Serialize, PartialEq, Eq)]
#[serde(deny_unknown_fields)]
pub struct HealthCheck {
    pub name: String,
    pub status: String,
    pub commit: Option<String>,
    pub branch: Option<String>,
}

impl HealthCheck {
    pub fn ok(service_name: &str) -> Self {
        Self {
            name: service_name.to_owned(),
            status: "ok".to_owned(),
            commit: option_env!("GIT_COMMIT").map(str::to_owned),
            branch: option_env!("GIT_BRANCH").map(str::to_owned),
        }
    }
}
