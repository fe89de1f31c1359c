use serde::{Deserialize, Serialize};

pub const DEFAULT_API_URL: &str = "https://api.groq.com/openai/v1/chat/completions";
pub const DEFAULT_MODEL: &str = "llama3-8b-8192";

const SYSTEM_PROMPT: &str =
    "Start each conversation by saying 'asba lomar' then proceed to answer the prompt.";

#[derive(Debug, thiserror::Error)]
pub enum LlmError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),
    #[error("API error: {0}")]
    Api(String),
}

// --- Request types ---

#[derive(Serialize)]
struct Request<'a> {
    model: &'a str,
    messages: Vec<Message<'a>>,
    temperature: f32,
    max_tokens: u32,
    top_p: f32,
    stream: bool,
}

#[derive(Serialize)]
struct Message<'a> {
    role: &'a str,
    content: &'a str,
}

// --- Response types ---

#[derive(Deserialize)]
struct Response {
    choices: Option<Vec<Choice>>,
    error: Option<ApiError>,
}

#[derive(Deserialize)]
struct Choice {
    message: Option<ChoiceMessage>,
}

#[derive(Deserialize)]
struct ChoiceMessage {
    content: Option<String>,
}

#[derive(Deserialize)]
struct ApiError {
    message: String,
}

fn extract_text(response: Response) -> Result<String, LlmError> {
    if let Some(err) = response.error {
        return Err(LlmError::Api(err.message));
    }

    response
        .choices
        .and_then(|c| c.into_iter().next())
        .and_then(|c| c.message)
        .and_then(|m| m.content)
        .filter(|text| !text.trim().is_empty())
        .ok_or_else(|| LlmError::Api("empty completion".to_string()))
}

/// Chat-completion client for an OpenAI-compatible endpoint.
#[derive(Clone)]
pub struct LlmClient {
    http: reqwest::Client,
    api_url: String,
    api_key: String,
    model: String,
}

impl LlmClient {
    pub fn new(http: reqwest::Client, api_url: &str, api_key: &str, model: &str) -> Self {
        Self {
            http,
            api_url: api_url.to_string(),
            api_key: api_key.to_string(),
            model: model.to_string(),
        }
    }

    /// One completion for `{system prompt, user_text}`. No retry.
    pub async fn complete(&self, user_text: &str) -> Result<String, LlmError> {
        let request = Request {
            model: &self.model,
            messages: vec![
                Message {
                    role: "system",
                    content: SYSTEM_PROMPT,
                },
                Message {
                    role: "user",
                    content: user_text,
                },
            ],
            temperature: 0.5,
            max_tokens: 1024,
            top_p: 1.0,
            stream: false,
        };

        let resp = self
            .http
            .post(&self.api_url)
            .bearer_auth(&self.api_key)
            .json(&request)
            .send()
            .await?;

        let response: Response = resp.json().await?;
        extract_text(response)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_extract_text_content() {
        let response: Response = serde_json::from_str(
            r#"{"choices":[{"index":0,"message":{"role":"assistant","content":"asba lomar, hi"}}]}"#,
        )
        .unwrap();
        assert_eq!(extract_text(response).unwrap(), "asba lomar, hi");
    }

    #[test]
    fn test_extract_text_api_error() {
        let response: Response =
            serde_json::from_str(r#"{"error":{"message":"invalid api key","type":"auth"}}"#)
                .unwrap();
        match extract_text(response) {
            Err(LlmError::Api(msg)) => assert_eq!(msg, "invalid api key"),
            _ => panic!("expected API error"),
        }
    }

    #[test]
    fn test_extract_text_empty() {
        let response: Response = serde_json::from_str(r#"{"choices":[]}"#).unwrap();
        assert!(matches!(extract_text(response), Err(LlmError::Api(_))));
    }

    #[test]
    fn test_request_shape() {
        let request = Request {
            model: DEFAULT_MODEL,
            messages: vec![Message {
                role: "user",
                content: "hello",
            }],
            temperature: 0.5,
            max_tokens: 1024,
            top_p: 1.0,
            stream: false,
        };
        let json = serde_json::to_value(&request).unwrap();
        assert_eq!(json["model"], "llama3-8b-8192");
        assert_eq!(json["messages"][0]["role"], "user");
        assert_eq!(json["max_tokens"], 1024);
        assert_eq!(json["stream"], false);
    }
}
