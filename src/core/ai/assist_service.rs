// Text assistance for the intake form: grammar fixes, short advisory answers
// and the thank-you message shown after a submission.
//
// The service only knows about prompts and output cleanup. Which hosted model
// answers is decided by the `AiProvider` injected at startup.

use super::models::{AiConfig, AiMessage};
use async_trait::async_trait;
use std::error::Error;
use thiserror::Error;

/// Longest input accepted from the form, in characters.
pub const MAX_INPUT_CHARS: usize = 5000;

const GRAMMAR_PROMPT: &str = "You are a careful copy editor. Correct spelling, grammar and \
punctuation in the user's text. Keep the author's voice, meaning, language and formatting. \
Reply with the corrected text only, without quotes or commentary.";

const ASK_PROMPT: &str = "You help new team members fill in a profile form that will be used \
on a public team page. Give short, friendly, practical advice in at most 120 words. \
Do not invent facts about the person.";

const ACK_PROMPT: &str = "Write a warm one- or two-sentence thank-you note to a new team \
member who just submitted their profile and photos. Mention their first name. \
Reply with the note only.";

#[derive(Debug, Error)]
pub enum AssistError {
    #[error("{0}")]
    InvalidInput(String),

    #[error("AI provider error: {0}")]
    Provider(String),

    #[error("AI provider returned an empty response")]
    EmptyResponse,
}

#[async_trait]
pub trait AiProvider: Send + Sync {
    /// Sends a chat completion request and returns the raw message content.
    async fn chat_complete(
        &self,
        messages: &[AiMessage],
        config: &AiConfig,
    ) -> Result<String, Box<dyn Error + Send + Sync>>;
}

// Lets the service hold a trait object chosen at startup.
#[async_trait]
impl AiProvider for Box<dyn AiProvider> {
    async fn chat_complete(
        &self,
        messages: &[AiMessage],
        config: &AiConfig,
    ) -> Result<String, Box<dyn Error + Send + Sync>> {
        (**self).chat_complete(messages, config).await
    }
}

pub type DynAssistService = AssistService<Box<dyn AiProvider>>;

pub struct AssistService<P: AiProvider> {
    provider: P,
    config: AiConfig,
}

impl<P: AiProvider> AssistService<P> {
    pub fn new(provider: P, config: AiConfig) -> Self {
        Self { provider, config }
    }

    /// Returns `text` with spelling and grammar corrected.
    pub async fn fix_grammar(&self, text: &str) -> Result<String, AssistError> {
        let text = validate_input("text", text)?;
        self.complete(GRAMMAR_PROMPT, text.to_string()).await
    }

    /// Answers a question about filling in the form, optionally scoped to a field.
    pub async fn ask(&self, question: &str, field: Option<&str>) -> Result<String, AssistError> {
        let question = validate_input("question", question)?;
        let prompt = match field.map(str::trim).filter(|f| !f.is_empty()) {
            Some(field) => format!("Form field: {}\nQuestion: {}", field, question),
            None => question.to_string(),
        };
        self.complete(ASK_PROMPT, prompt).await
    }

    /// Personalized thank-you message for a completed submission.
    pub async fn acknowledge(&self, name: &str, job_title: &str) -> Result<String, AssistError> {
        let mut prompt = format!("Name: {}", name.trim());
        if !job_title.trim().is_empty() {
            prompt.push_str(&format!("\nRole: {}", job_title.trim()));
        }
        self.complete(ACK_PROMPT, prompt).await
    }

    async fn complete(&self, system_prompt: &str, user_prompt: String) -> Result<String, AssistError> {
        let messages = [AiMessage::system(system_prompt), AiMessage::user(user_prompt)];

        let content = self
            .provider
            .chat_complete(&messages, &self.config)
            .await
            .map_err(|e| AssistError::Provider(e.to_string()))?;

        let cleaned = clean_output(&content);
        if cleaned.is_empty() {
            return Err(AssistError::EmptyResponse);
        }
        Ok(cleaned)
    }
}

fn validate_input<'a>(name: &str, value: &'a str) -> Result<&'a str, AssistError> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(AssistError::InvalidInput(format!("{} is required", name)));
    }
    if trimmed.chars().count() > MAX_INPUT_CHARS {
        return Err(AssistError::InvalidInput(format!(
            "{} must be at most {} characters",
            name, MAX_INPUT_CHARS
        )));
    }
    Ok(trimmed)
}

/// Strips `<answer>` wrappers and surrounding quotes some models add.
fn clean_output(content: &str) -> String {
    let mut answer = content.trim();

    if let Some(start) = answer.find("<answer>") {
        if let Some(end) = answer.find("</answer>") {
            if end > start {
                answer = answer[start + 8..end].trim();
            }
        }
    }

    for (open, close) in [('"', '"'), ('\u{201C}', '\u{201D}')] {
        if answer.len() >= 2 && answer.starts_with(open) && answer.ends_with(close) {
            answer = answer[open.len_utf8()..answer.len() - close.len_utf8()].trim();
        }
    }

    answer.to_string()
}
