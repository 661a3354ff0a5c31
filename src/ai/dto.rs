use serde::{Deserialize, Serialize};

#[derive(Debug, Deserialize)]
pub struct GenerateRequest {
    pub topic: String,
    pub word_count: Option<u32>,
    pub tone: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct GenerateResponse {
    pub content: String,
}

pub fn build_prompt(topic: &str, word_count: Option<u32>, tone: Option<&str>) -> String {
    format!(
        "Write a {}-word blog.\nTopic: {}\nTone: {}\nInclude headings and conclusion.",
        word_count.unwrap_or(500),
        topic,
        tone.unwrap_or("informative"),
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn prompt_uses_defaults() {
        let prompt = build_prompt("Rust ownership", None, None);
        assert!(prompt.contains("500-word"));
        assert!(prompt.contains("Topic: Rust ownership"));
        assert!(prompt.contains("Tone: informative"));
        assert!(prompt.contains("headings and conclusion"));
    }

    #[test]
    fn prompt_uses_explicit_settings() {
        let prompt = build_prompt("Gardening", Some(800), Some("casual"));
        assert!(prompt.contains("800-word"));
        assert!(prompt.contains("Tone: casual"));
    }
}
