use serde::Serialize;

use crate::constants::USAGE_QUERY_ERROR_CODE;

/// Structured error delivered over the bridge, both as a command
/// rejection and as the payload of a stream error event. The code is
/// fixed; only the message varies with the underlying fault.
#[derive(Debug, Clone, Serialize)]
pub struct BridgeError {
    pub code: &'static str,
    pub message: String,
}

impl BridgeError {
    pub fn usage_query(err: impl std::fmt::Display) -> Self {
        Self {
            code: USAGE_QUERY_ERROR_CODE,
            message: err.to_string(),
        }
    }
}

impl std::fmt::Display for BridgeError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {}", self.code, self.message)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn serializes_code_and_message() {
        let err = BridgeError::usage_query("device offline");
        let json = serde_json::to_value(&err).expect("serialize");
        assert_eq!(json["code"], "USAGE_QUERY_FAILED");
        assert_eq!(json["message"], "device offline");
    }
}
