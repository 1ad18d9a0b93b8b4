use serde::{Deserialize, Serialize};

#[derive(Serialize, Debug, Clone, PartialEq, Eq)]
pub struct UpstreamMessage {
    pub role: String,
    pub content: String,
}

/// Body of the outbound chat-completion call.
#[derive(Serialize, Debug, Clone, PartialEq, Eq)]
pub struct UpstreamPayload {
    pub messages: Vec<UpstreamMessage>,
}

impl UpstreamPayload {
    /// A single user turn carrying `message` as-is.
    pub fn user(message: impl Into<String>) -> Self {
        Self {
            messages: vec![UpstreamMessage {
                role: "user".to_string(),
                content: message.into(),
            }],
        }
    }
}

#[derive(Deserialize, Debug, Default)]
pub struct ChoiceMessage {
    #[serde(default)]
    pub content: Option<String>,
}

#[derive(Deserialize, Debug)]
pub struct Choice {
    #[serde(default)]
    pub message: ChoiceMessage,
}

#[derive(Deserialize, Debug)]
pub struct UpstreamResponse {
    #[serde(default)]
    pub choices: Vec<Choice>,
}

impl UpstreamResponse {
    /// Content of the first choice, if it is present and non-empty.
    pub fn into_reply(self) -> Option<String> {
        self.choices
            .into_iter()
            .next()
            .and_then(|choice| choice.message.content)
            .filter(|content| !content.is_empty())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn user_payload_shape() {
        let payload = UpstreamPayload::user("hello");
        assert_eq!(
            serde_json::to_value(&payload).unwrap(),
            serde_json::json!({"messages": [{"role": "user", "content": "hello"}]})
        );
    }

    #[test]
    fn user_payload_keeps_message_verbatim() {
        for message in ["", "  padded  ", "line\nbreak", "quote \" and <tag>", "ünïcødé"] {
            let payload = UpstreamPayload::user(message);
            assert_eq!(payload.messages.len(), 1);
            assert_eq!(payload.messages[0].role, "user");
            assert_eq!(payload.messages[0].content, message);

            let encoded = serde_json::to_value(&payload).unwrap();
            assert_eq!(encoded["messages"][0]["content"], message);
        }
    }

    #[test]
    fn reply_is_first_choice_content() {
        let response: UpstreamResponse = serde_json::from_str(
            r#"{"id": "x", "choices": [
                {"index": 0, "message": {"role": "assistant", "content": "first"}},
                {"index": 1, "message": {"role": "assistant", "content": "second"}}
            ], "usage": {"total_tokens": 3}}"#,
        )
        .unwrap();
        assert_eq!(response.into_reply().as_deref(), Some("first"));
    }

    #[test]
    fn empty_structures_have_no_reply() {
        for body in [
            r#"{}"#,
            r#"{"choices": []}"#,
            r#"{"choices": [{}]}"#,
            r#"{"choices": [{"message": {}}]}"#,
            r#"{"choices": [{"message": {"content": null}}]}"#,
            r#"{"choices": [{"message": {"content": ""}}]}"#,
        ] {
            let response: UpstreamResponse = serde_json::from_str(body).unwrap();
            assert!(response.into_reply().is_none(), "{body}");
        }
    }

    #[test]
    fn non_string_content_is_rejected() {
        let result = serde_json::from_str::<UpstreamResponse>(
            r#"{"choices": [{"message": {"content": [1, 2]}}]}"#,
        );
        assert!(result.is_err());
    }
}
