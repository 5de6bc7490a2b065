use async_trait::async_trait;
use serde::Deserialize;
use serde_json::json;

use agent_actions_core::{
    Action, ActionError, ActionExample, ActionMetadata, ActionRegistry, FieldSpec, InputSchema,
    ProviderError, ValidatedArgs,
};

use crate::constants::{HostedModel, DEFAULT_MAX_TOKENS, DEFAULT_TEMPERATURE};
use crate::sdk::{ChatMessage, ChatRequest};
use crate::session::OpenGradientSession;

/// Arguments shared by every prompt action.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct PromptArgs {
    pub prompt: String,
    pub temperature: f64,
    pub max_tokens: i64,
}

/// Input schema of a prompt action for `model`.
pub fn prompt_schema(model: HostedModel) -> Result<InputSchema, ProviderError> {
    let label = model.label();
    InputSchema::new(vec![
        FieldSpec::string(
            "prompt",
            &format!("The prompt that you are asking the {label} model"),
        ),
        FieldSpec::float(
            "temperature",
            &format!(
                "The temperature of the LLM inference -- default is {DEFAULT_TEMPERATURE}"
            ),
        )
        .with_default(DEFAULT_TEMPERATURE),
        FieldSpec::integer(
            "max_tokens",
            &format!(
                "The maximum number of tokens that {label} can return -- default is {DEFAULT_MAX_TOKENS}"
            ),
        )
        .with_default(DEFAULT_MAX_TOKENS),
    ])
    .map_err(|source| ProviderError::Schema {
        action: model.action_name().to_string(),
        source,
    })
}

// =============================================================================
// prompt_<model> - Prompt a hosted LLM
// =============================================================================

pub struct PromptModelAction {
    meta: ActionMetadata,
    model: HostedModel,
}

impl PromptModelAction {
    pub fn new(model: HostedModel) -> Result<Self, ProviderError> {
        let input_schema = prompt_schema(model)?;
        let label = model.label();

        let flavour = match model {
            HostedModel::DobbyUnhinged => {
                "Dobby is a small, opinionated model fine-tuned to answer with a loyal, \
unfiltered and irreverent personality, useful when the user wants a blunt or humorous take."
            }
            HostedModel::Qwen => {
                "Qwen is a large general-purpose instruction model suited to reasoning, \
summarisation, coding help and other open-ended questions."
            }
        };

        let description = format!(
            "This tool sends a prompt to the {} LLM hosted on the OpenGradient network and returns \
the model's reply as plain text. {flavour}\n\n\
Inputs:\n\
- prompt: the message to send to the model\n\
- temperature: sampling temperature (optional, default {DEFAULT_TEMPERATURE})\n\
- max_tokens: maximum number of tokens in the reply (optional, default {DEFAULT_MAX_TOKENS})",
            model.display_name()
        );

        let examples = vec![ActionExample {
            input: json!({
                "prompt": "What do you think about ETH right now?",
                "temperature": 0.7,
                "max_tokens": 256,
            }),
            output: json!("<model reply>"),
            explanation: format!("Ask the {label} model a question"),
        }];

        let meta = ActionMetadata {
            name: model.action_name().to_string(),
            similes: vec![
                format!("ask {label}"),
                format!("prompt {label}"),
                format!("chat with {label}"),
            ],
            description,
            examples,
            input_schema,
            failure_context: format!("prompting {label} model"),
        };

        Ok(Self { meta, model })
    }
}

#[async_trait]
impl Action<OpenGradientSession> for PromptModelAction {
    fn metadata(&self) -> &ActionMetadata {
        &self.meta
    }

    async fn call(
        &self,
        session: &OpenGradientSession,
        args: ValidatedArgs,
    ) -> Result<String, ActionError> {
        let args: PromptArgs = args.parse()?;

        let request = ChatRequest {
            model_cid: self.model.model_cid().to_string(),
            messages: vec![ChatMessage::user(args.prompt)],
            temperature: args.temperature,
            max_tokens: args.max_tokens,
        };

        let completion = session
            .client
            .llm_chat(request)
            .await
            .map_err(ActionError::remote)?;

        completion
            .chat_output
            .get("content")
            .cloned()
            .ok_or_else(|| ActionError::MissingChatContent {
                model: self.model.label().to_string(),
            })
    }
}

// =============================================================================
// Register prompt actions
// =============================================================================

pub fn register_prompt_actions(
    registry: &mut ActionRegistry<OpenGradientSession>,
) -> Result<(), ProviderError> {
    for model in HostedModel::ALL {
        registry.register(PromptModelAction::new(model)?)?;
    }
    Ok(())
}
