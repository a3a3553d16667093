//! Transcript flattening for single-prompt backends.

use crate::message::Message;

/// Render a transcript into one prompt string.
///
/// Some backends take a single text prompt rather than a role-tagged
/// message list. This renders the system prompt first, then each turn as
/// a `User:` / `Assistant:` paragraph. Messages with other roles are
/// skipped.
pub fn flatten_transcript(messages: &[Message], system_prompt: Option<&str>) -> String {
    let mut prompt = String::new();

    if let Some(system) = system_prompt {
        prompt.push_str(system);
        prompt.push_str("\n\n");
    }

    for message in messages {
        match message.role.as_str() {
            "user" => {
                prompt.push_str("User: ");
                prompt.push_str(&message.content);
                prompt.push_str("\n\n");
            }
            "assistant" => {
                prompt.push_str("Assistant: ");
                prompt.push_str(&message.content);
                prompt.push_str("\n\n");
            }
            _ => {}
        }
    }

    prompt.trim().to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_flatten_with_system_prompt() {
        let messages = vec![Message::user("Hi"), Message::assistant("Hello!")];
        let prompt = flatten_transcript(&messages, Some("Be helpful."));

        assert_eq!(prompt, "Be helpful.\n\nUser: Hi\n\nAssistant: Hello!");
    }

    #[test]
    fn test_flatten_without_system_prompt() {
        let messages = vec![Message::user("Hi")];
        assert_eq!(flatten_transcript(&messages, None), "User: Hi");
    }

    #[test]
    fn test_flatten_skips_unknown_roles() {
        let messages = vec![
            Message::system("inline system"),
            Message::user("question"),
        ];
        let prompt = flatten_transcript(&messages, None);

        assert!(!prompt.contains("inline system"));
        assert_eq!(prompt, "User: question");
    }

    #[test]
    fn test_flatten_empty_transcript() {
        assert_eq!(flatten_transcript(&[], None), "");
        assert_eq!(flatten_transcript(&[], Some("sys")), "sys");
    }
}
