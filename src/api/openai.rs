use crate::libs::config::ConfigModule;
use crate::libs::messages::Message;
use crate::libs::task::{Task, TaskDraft};
use crate::{msg_bail_anyhow, msg_error_anyhow, msg_print};
use anyhow::Result;
use dialoguer::{theme::ColorfulTheme, Input};
use reqwest::Client;
use serde::{Deserialize, Serialize};
use std::env;
use std::time::Duration;

pub const DEFAULT_API_URL: &str = "https://api.openai.com/v1/chat/completions";
pub const DEFAULT_MODEL: &str = "gpt-4";
pub const API_KEY_ENV: &str = "OPENAI_API_KEY";
const REQUEST_TIMEOUT: Duration = Duration::from_secs(60);
const TEMPERATURE: f32 = 0.7;
const MAX_TOKENS: u32 = 1000;

const GENERATE_SYSTEM_PROMPT: &str = "You are an expert personal productivity assistant. \
Generate realistic, actionable tasks based on the user's description. \
Your response must be a valid JSON array of task objects with this exact format: \
[{\"text\": \"Task description\", \"startTime\": \"HH:MM in 24-hour format\", \"duration\": duration in minutes (number)}]. \
Each task should have a clear description, an estimated duration (30, 60, 90, 120 or 180 minutes) and a suggested time of day.";

const ASK_SYSTEM_PROMPT: &str = "You are an expert personal productivity assistant. \
Analyze the user's past tasks and provide insights, patterns and recommendations. \
Here is the user's task history: ";

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub struct AiConfig {
    pub api_url: String,
    pub model: String,
    /// Falls back to `OPENAI_API_KEY` when absent.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub api_key: Option<String>,
}

impl Default for AiConfig {
    fn default() -> Self {
        Self {
            api_url: DEFAULT_API_URL.to_string(),
            model: DEFAULT_MODEL.to_string(),
            api_key: None,
        }
    }
}

impl AiConfig {
    pub fn module() -> ConfigModule {
        ConfigModule {
            key: "ai".to_string(),
            name: Message::ConfigModuleAi.to_string(),
        }
    }

    pub fn init(config: &Option<Self>) -> Result<Self> {
        let default = config.clone().unwrap_or_default();
        msg_print!(Message::ConfigModuleAi);

        let api_key: String = Input::with_theme(&ColorfulTheme::default())
            .with_prompt(Message::PromptAiApiKey.to_string())
            .default(default.api_key.unwrap_or_default())
            .allow_empty(true)
            .interact_text()?;

        Ok(Self {
            api_url: Input::with_theme(&ColorfulTheme::default())
                .with_prompt(Message::PromptAiApiUrl.to_string())
                .default(default.api_url)
                .interact_text()?,
            model: Input::with_theme(&ColorfulTheme::default())
                .with_prompt(Message::PromptAiModel.to_string())
                .default(default.model)
                .interact_text()?,
            api_key: Some(api_key.trim().to_string()).filter(|key| !key.is_empty()),
        })
    }

    pub fn resolve_api_key(&self) -> Option<String> {
        self.api_key
            .clone()
            .or_else(|| env::var(API_KEY_ENV).ok())
            .filter(|key| !key.trim().is_empty())
    }
}

#[derive(Serialize, Deserialize, Clone, Debug)]
struct ChatMessage {
    role: String,
    content: String,
}

impl ChatMessage {
    fn system(content: impl Into<String>) -> Self {
        Self {
            role: "system".to_string(),
            content: content.into(),
        }
    }

    fn user(content: impl Into<String>) -> Self {
        Self {
            role: "user".to_string(),
            content: content.into(),
        }
    }
}

#[derive(Serialize, Debug)]
struct ChatRequest<'a> {
    model: &'a str,
    messages: Vec<ChatMessage>,
    temperature: f32,
    max_tokens: u32,
}

#[derive(Deserialize, Debug)]
struct ChatResponse {
    choices: Vec<ChatChoice>,
}

#[derive(Deserialize, Debug)]
struct ChatChoice {
    message: ChatMessage,
}

/// What the model gets to see of past tasks when answering questions.
#[derive(Serialize, Debug)]
struct TaskHistoryEntry<'a> {
    text: &'a str,
    date: String,
    completed: bool,
    duration: u32,
}

/// Client for an OpenAI-compatible chat completions endpoint.
#[derive(Debug)]
pub struct OpenAi {
    client: Client,
    config: AiConfig,
    api_key: String,
}

impl OpenAi {
    pub fn new(config: &AiConfig) -> Result<Self> {
        let api_key = match config.resolve_api_key() {
            Some(key) => key,
            None => msg_bail_anyhow!(Message::AiApiKeyMissing),
        };
        let client = Client::builder().timeout(REQUEST_TIMEOUT).build()?;

        Ok(Self {
            client,
            config: config.clone(),
            api_key,
        })
    }

    /// Asks the model for a task list matching `prompt`.
    ///
    /// The returned drafts carry no date; start time and duration may be
    /// missing and are filled in when the drafts become tasks.
    pub async fn generate_tasks(&self, prompt: &str) -> Result<Vec<TaskDraft>> {
        let content = self
            .complete(vec![
                ChatMessage::system(GENERATE_SYSTEM_PROMPT),
                ChatMessage::user(format!("Generate a list of tasks for: {}", prompt)),
            ])
            .await?;

        parse_generated_tasks(&content)
    }

    /// Answers a free-form question about the user's task history.
    pub async fn ask(&self, question: &str, history: &[Task]) -> Result<String> {
        let history: Vec<TaskHistoryEntry> = history
            .iter()
            .map(|task| TaskHistoryEntry {
                text: &task.text,
                date: task.date_string(),
                completed: task.completed,
                duration: task.duration,
            })
            .collect();

        self.complete(vec![
            ChatMessage::system(format!("{}{}", ASK_SYSTEM_PROMPT, serde_json::to_string(&history)?)),
            ChatMessage::user(format!("Based on my past tasks, {}", question)),
        ])
        .await
    }

    async fn complete(&self, messages: Vec<ChatMessage>) -> Result<String> {
        let request = ChatRequest {
            model: &self.config.model,
            messages,
            temperature: TEMPERATURE,
            max_tokens: MAX_TOKENS,
        };

        tracing::debug!(url = %self.config.api_url, model = %self.config.model, "sending chat completion");
        let res = self
            .client
            .post(&self.config.api_url)
            .bearer_auth(&self.api_key)
            .json(&request)
            .send()
            .await?;

        if !res.status().is_success() {
            msg_bail_anyhow!(Message::AiRequestFailed(res.status().to_string()));
        }

        let response = res.json::<ChatResponse>().await?;
        response
            .choices
            .into_iter()
            .next()
            .map(|choice| choice.message.content.trim().to_string())
            .ok_or_else(|| msg_error_anyhow!(Message::AiEmptyResponse))
    }
}

/// Extracts the JSON task array from a model reply.
///
/// Models often wrap JSON in markdown fences; the content of the first
/// ```` ```json ```` block (or plain ```` ``` ```` block) is used when present.
/// An empty `startTime` or a zero `duration` counts as not given.
pub fn parse_generated_tasks(content: &str) -> Result<Vec<TaskDraft>> {
    let json = fenced_block(content, "```json")
        .or_else(|| fenced_block(content, "```"))
        .unwrap_or(content)
        .trim();

    let drafts: Vec<TaskDraft> =
        serde_json::from_str(json).map_err(|e| msg_error_anyhow!(Message::AiResponseNotJson(e.to_string())))?;
    Ok(drafts.into_iter().map(TaskDraft::blank_as_missing).collect())
}

fn fenced_block<'a>(content: &'a str, opening: &str) -> Option<&'a str> {
    let (_, rest) = content.split_once(opening)?;
    Some(rest.split_once("```").map_or(rest, |(block, _)| block))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fenced_block_takes_first_block() {
        assert_eq!(fenced_block("a ```json [1] ``` b", "```json"), Some(" [1] "));
        assert_eq!(fenced_block("no fences", "```"), None);
        assert_eq!(fenced_block("```[2]", "```"), Some("[2]"));
    }

    #[test]
    fn api_key_prefers_config() {
        let config = AiConfig {
            api_key: Some("from-config".to_string()),
            ..AiConfig::default()
        };
        assert_eq!(config.resolve_api_key().as_deref(), Some("from-config"));
    }
}
