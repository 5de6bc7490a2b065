use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::{ActionError, DispatchError, ProviderError};
use crate::schema::{InputSchema, ValidatedArgs};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ActionExample {
    pub input: Value,
    pub output: Value,
    pub explanation: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct ActionMetadata {
    pub name: String,
    pub similes: Vec<String>,
    pub description: String,
    pub examples: Vec<ActionExample>,
    pub input_schema: InputSchema,
    /// What the action is doing, used to prefix failure strings
    /// (`"Error <failure_context>: ..."`).
    pub failure_context: String,
}

impl ActionMetadata {
    /// Tool description handed to the LLM.
    pub fn tool_definition(&self) -> ToolDefinition {
        ToolDefinition {
            name: self.name.clone(),
            description: self.description.clone(),
            parameters: self.input_schema.to_json_schema(),
        }
    }
}

/// Function-calling definition of one action.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ToolDefinition {
    pub name: String,
    pub description: String,
    pub parameters: Value,
}

/// One externally callable operation bound to a provider session `S`.
#[async_trait]
pub trait Action<S>: Send + Sync
where
    S: Send + Sync,
{
    fn metadata(&self) -> &ActionMetadata;

    /// Run the operation with arguments that already passed the schema.
    async fn call(&self, session: &S, args: ValidatedArgs) -> Result<String, ActionError>;
}

/// Validate, run and render one action. Never fails: every error becomes an
/// `"Error ..."` string.
pub async fn invoke<S>(action: &dyn Action<S>, session: &S, input: Value) -> String
where
    S: Send + Sync,
{
    let meta = action.metadata();
    tracing::debug!(action = %meta.name, "invoking action");

    let outcome = match meta.input_schema.validate(&input) {
        Ok(args) => action.call(session, args).await,
        Err(err) => Err(ActionError::from(err)),
    };

    match outcome {
        Ok(output) => output,
        Err(err) => {
            tracing::warn!(action = %meta.name, error = %err, "action failed");
            err.render(&meta.failure_context)
        }
    }
}

/// Ordered set of actions sharing one session type.
pub struct ActionRegistry<S: Send + Sync> {
    actions: Vec<Arc<dyn Action<S>>>,
    index: HashMap<String, usize>,
}

impl<S: Send + Sync> Default for ActionRegistry<S> {
    fn default() -> Self {
        Self {
            actions: Vec::new(),
            index: HashMap::new(),
        }
    }
}

impl<S> ActionRegistry<S>
where
    S: Send + Sync,
{
    pub fn new() -> Self {
        Self::default()
    }

    /// Register an action. Names are unique within a registry.
    pub fn register<A>(&mut self, action: A) -> Result<(), ProviderError>
    where
        A: Action<S> + 'static,
    {
        let action = Arc::new(action) as Arc<dyn Action<S>>;
        let name = action.metadata().name.clone();
        if self.index.contains_key(&name) {
            return Err(ProviderError::DuplicateAction(name));
        }
        self.index.insert(name.clone(), self.actions.len());
        self.actions.push(action);
        tracing::debug!("Registered action: {}", name);
        Ok(())
    }

    pub fn get(&self, name: &str) -> Option<Arc<dyn Action<S>>> {
        self.index.get(name).map(|&i| Arc::clone(&self.actions[i]))
    }

    /// All actions in registration order.
    pub fn all(&self) -> Vec<Arc<dyn Action<S>>> {
        self.actions.clone()
    }

    pub fn len(&self) -> usize {
        self.actions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.actions.is_empty()
    }

    /// Execute an action by name with the given JSON input.
    ///
    /// Only an unknown name is reported as an error; everything else comes
    /// back as the action's output string.
    pub async fn execute(
        &self,
        provider: &str,
        name: &str,
        session: &S,
        input: Value,
    ) -> Result<String, DispatchError> {
        let action = self.get(name).ok_or_else(|| DispatchError::UnknownAction {
            provider: provider.to_string(),
            action: name.to_string(),
        })?;
        Ok(invoke(action.as_ref(), session, input).await)
    }

    /// Return metadata for all registered actions (useful for AI tool schemas).
    pub fn metadata(&self) -> Vec<ActionMetadata> {
        self.actions
            .iter()
            .map(|a| a.metadata().clone())
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schema::FieldSpec;
    use serde_json::json;

    struct Greeting {
        prefix: String,
    }

    struct GreetAction {
        meta: ActionMetadata,
    }

    impl GreetAction {
        fn new(name: &str) -> Self {
            Self {
                meta: ActionMetadata {
                    name: name.to_string(),
                    similes: vec!["say hello".to_string()],
                    description: "Greets someone".to_string(),
                    examples: vec![],
                    input_schema: InputSchema::new(vec![FieldSpec::string("who", "Who to greet")])
                        .unwrap(),
                    failure_context: "greeting".to_string(),
                },
            }
        }
    }

    #[async_trait]
    impl Action<Greeting> for GreetAction {
        fn metadata(&self) -> &ActionMetadata {
            &self.meta
        }

        async fn call(
            &self,
            session: &Greeting,
            args: ValidatedArgs,
        ) -> Result<String, ActionError> {
            let who = args.get_str("who").unwrap_or_default();
            if who == "nobody" {
                return Err(ActionError::remote("no one to greet"));
            }
            Ok(format!("{}, {}", session.prefix, who))
        }
    }

    fn registry() -> ActionRegistry<Greeting> {
        let mut registry = ActionRegistry::new();
        registry.register(GreetAction::new("greet")).unwrap();
        registry.register(GreetAction::new("wave")).unwrap();
        registry
    }

    fn session() -> Greeting {
        Greeting {
            prefix: "Hello".to_string(),
        }
    }

    #[tokio::test]
    async fn test_execute_success() {
        let out = registry()
            .execute("test", "greet", &session(), json!({"who": "Ada"}))
            .await
            .unwrap();
        assert_eq!(out, "Hello, Ada");
    }

    #[tokio::test]
    async fn test_validation_failure_becomes_string() {
        let out = registry()
            .execute("test", "greet", &session(), json!({}))
            .await
            .unwrap();
        assert_eq!(out, "Error greeting: missing required field 'who'");
    }

    #[tokio::test]
    async fn test_call_failure_becomes_string() {
        let out = registry()
            .execute("test", "greet", &session(), json!({"who": "nobody"}))
            .await
            .unwrap();
        assert_eq!(out, "Error greeting: no one to greet");
    }

    #[tokio::test]
    async fn test_unknown_action() {
        let err = registry()
            .execute("test", "shout", &session(), json!({}))
            .await
            .unwrap_err();
        assert_eq!(
            err,
            DispatchError::UnknownAction {
                provider: "test".to_string(),
                action: "shout".to_string(),
            }
        );
    }

    #[test]
    fn test_duplicate_registration_rejected() {
        let mut registry = registry();
        let err = registry.register(GreetAction::new("greet")).unwrap_err();
        assert!(matches!(err, ProviderError::DuplicateAction(name) if name == "greet"));
        assert_eq!(registry.len(), 2);
    }

    #[test]
    fn test_metadata_keeps_registration_order() {
        let names: Vec<String> = registry().metadata().into_iter().map(|m| m.name).collect();
        assert_eq!(names, vec!["greet", "wave"]);
    }

    #[test]
    fn test_metadata_serializes() {
        let meta = registry().metadata().remove(0);
        let value = serde_json::to_value(&meta).unwrap();
        assert_eq!(value["name"], "greet");
        assert_eq!(value["similes"], json!(["say hello"]));
        assert_eq!(value["input_schema"], meta.input_schema.to_json_schema());
        assert_eq!(value["failure_context"], "greeting");
    }

    #[test]
    fn test_tool_definition() {
        let def = registry().metadata()[0].tool_definition();
        assert_eq!(def.name, "greet");
        assert_eq!(def.parameters["required"], json!(["who"]));
    }
}
