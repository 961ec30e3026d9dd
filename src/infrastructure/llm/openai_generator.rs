use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};

use crate::application::ports::{GenerationError, ItineraryGenerator};
use crate::domain::DayPlan;
use crate::infrastructure::llm::contract;
use crate::infrastructure::llm::retry::{RetryPolicy, TransientError, retry_transient};

/// Mid-range temperature: itineraries benefit from variety, the output
/// contract still has to hold.
const COMPLETION_TEMPERATURE: f32 = 0.7;

const SYSTEM_PROMPT: &str = "You are a travel planning assistant. Respond with a single JSON \
object and nothing else: no prose, no markdown, no code fences.";

pub struct OpenAiGenerator {
    client: Client,
    base_url: String,
    api_key: String,
    model: String,
    retry_policy: RetryPolicy,
}

#[derive(Serialize)]
struct ChatCompletionRequest {
    model: String,
    messages: Vec<ChatMessage>,
    temperature: f32,
    response_format: ResponseFormat,
}

#[derive(Serialize)]
struct ResponseFormat {
    #[serde(rename = "type")]
    format_type: &'static str,
}

#[derive(Serialize, Deserialize, Clone)]
struct ChatMessage {
    role: String,
    content: String,
}

#[derive(Deserialize)]
struct ChatCompletionResponse {
    choices: Vec<ChatChoice>,
}

#[derive(Deserialize)]
struct ChatChoice {
    message: ChatMessage,
}

#[derive(Debug, thiserror::Error)]
enum CompletionError {
    #[error("rate limited")]
    RateLimited,
    #[error("provider error HTTP {0}: {1}")]
    ServerError(u16, String),
    #[error("request rejected with HTTP {0}: {1}")]
    Rejected(u16, String),
    #[error("request failed: {0}")]
    Network(String),
    #[error("invalid completion envelope: {0}")]
    InvalidResponse(String),
}

impl TransientError for CompletionError {
    fn is_transient(&self) -> bool {
        matches!(
            self,
            CompletionError::RateLimited | CompletionError::ServerError(_, _)
        )
    }
}

impl OpenAiGenerator {
    pub fn new(base_url: String, api_key: String, model: String) -> Self {
        Self {
            client: Client::new(),
            base_url,
            api_key,
            model,
            retry_policy: RetryPolicy::default(),
        }
    }

    fn build_messages(&self, destination: &str, duration_days: u32) -> Vec<ChatMessage> {
        let user_content = format!(
            "Create a {duration_days}-day travel itinerary for {destination}. \
Produce exactly one themed day per day of the trip, and give every day exactly \
three activities, one for each of the time slots Morning, Afternoon and Evening. \
Each day's theme must be different. Use exactly this JSON shape:\n\
{{\n\
  \"itinerary\": [\n\
    {{\n\
      \"day\": 1,\n\
      \"theme\": \"Historic center\",\n\
      \"activities\": [\n\
        {{\"time\": \"Morning\", \"description\": \"Walk the old town walls\", \"location\": \"Old Town\"}},\n\
        {{\"time\": \"Afternoon\", \"description\": \"Visit the city museum\", \"location\": \"Museum quarter\"}},\n\
        {{\"time\": \"Evening\", \"description\": \"Dinner with a view\", \"location\": \"Harbour\"}}\n\
      ]\n\
    }}\n\
  ]\n\
}}"
        );

        vec![
            ChatMessage {
                role: "system".to_string(),
                content: SYSTEM_PROMPT.to_string(),
            },
            ChatMessage {
                role: "user".to_string(),
                content: user_content,
            },
        ]
    }

    async fn request_completion(
        &self,
        messages: &[ChatMessage],
    ) -> Result<String, CompletionError> {
        let request_body = ChatCompletionRequest {
            model: self.model.clone(),
            messages: messages.to_vec(),
            temperature: COMPLETION_TEMPERATURE,
            response_format: ResponseFormat {
                format_type: "json_object",
            },
        };

        let response = self
            .client
            .post(format!("{}/chat/completions", self.base_url))
            .header("Authorization", format!("Bearer {}", self.api_key))
            .json(&request_body)
            .send()
            .await
            .map_err(|e| CompletionError::Network(e.to_string()))?;

        let status = response.status();
        if status == reqwest::StatusCode::TOO_MANY_REQUESTS {
            return Err(CompletionError::RateLimited);
        }
        if status.is_server_error() {
            let body = response.text().await.unwrap_or_default();
            return Err(CompletionError::ServerError(status.as_u16(), body));
        }
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(CompletionError::Rejected(status.as_u16(), body));
        }

        let completion: ChatCompletionResponse = response
            .json()
            .await
            .map_err(|e| CompletionError::InvalidResponse(e.to_string()))?;

        completion
            .choices
            .into_iter()
            .next()
            .map(|choice| choice.message.content)
            .ok_or_else(|| CompletionError::InvalidResponse("empty choices".to_string()))
    }
}

#[async_trait]
impl ItineraryGenerator for OpenAiGenerator {
    #[tracing::instrument(skip(self))]
    async fn generate(
        &self,
        destination: &str,
        duration_days: u32,
    ) -> Result<Vec<DayPlan>, GenerationError> {
        let messages = self.build_messages(destination, duration_days);

        let raw = retry_transient(&self.retry_policy, || self.request_completion(&messages))
            .await
            .map_err(|e| match e {
                e if e.is_transient() => GenerationError::ProviderUnavailable(e.to_string()),
                CompletionError::InvalidResponse(msg) => GenerationError::MalformedOutput(msg),
                e => GenerationError::RequestRejected(e.to_string()),
            })?;

        contract::parse_itinerary(&raw, duration_days)
    }
}
