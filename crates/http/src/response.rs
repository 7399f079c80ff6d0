//! The JSON envelope every bookshelf route answers with.

use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Status {
    Success,
    Fail,
}

/// `{status, message?, data?}`
///
/// Absent `message` and `data` are omitted from the serialized body rather
/// than written as `null`.
#[derive(Debug, Clone, Serialize)]
pub struct Envelope<T = ()> {
    pub status: Status,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
}

impl Envelope<()> {
    /// Success envelope carrying only a message
    pub fn message(message: impl Into<String>) -> Self {
        Self {
            status: Status::Success,
            message: Some(message.into()),
            data: None,
        }
    }

    pub fn fail(message: impl Into<String>) -> Self {
        Self {
            status: Status::Fail,
            message: Some(message.into()),
            data: None,
        }
    }
}

impl<T> Envelope<T> {
    /// Success envelope carrying a data payload
    pub fn data(data: T) -> Self {
        Self {
            status: Status::Success,
            message: None,
            data: Some(data),
        }
    }

    pub fn with_message(mut self, message: impl Into<String>) -> Self {
        self.message = Some(message.into());
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn message_only_envelope_omits_data() {
        let value = serde_json::to_value(Envelope::message("done")).unwrap();
        assert_eq!(value, json!({"status": "success", "message": "done"}));
    }

    #[test]
    fn data_envelope_omits_message_until_set() {
        let bare = serde_json::to_value(Envelope::data(json!({"n": 1}))).unwrap();
        assert_eq!(bare, json!({"status": "success", "data": {"n": 1}}));

        let with_message =
            serde_json::to_value(Envelope::data(json!({"n": 1})).with_message("ok")).unwrap();
        assert_eq!(
            with_message,
            json!({"status": "success", "message": "ok", "data": {"n": 1}})
        );
    }
}
