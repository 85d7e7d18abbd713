use serde::{Deserialize, Serialize};

/// Body of `PUT /access-keys/{id}/data-limit`
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct PutDataLimitForm {
    pub limit: DataLimit,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub struct DataLimit {
    pub bytes: u64,
}

impl PutDataLimitForm {
    pub fn new(bytes: u64) -> Self {
        Self {
            limit: DataLimit { bytes },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn serializes_to_management_api_shape() {
        let json = serde_json::to_string(&PutDataLimitForm::new(1)).unwrap();

        assert_eq!(json, r#"{"limit":{"bytes":1}}"#);
    }
}
