use async_trait::async_trait;
use serde::Deserialize;
use serde_json::json;

use agent_actions_core::{
    Action, ActionError, ActionExample, ActionMetadata, ActionRegistry, FieldSpec, InputSchema,
    ProviderError, ValidatedArgs,
};

use crate::constants::{Forecast, VOLATILITY_TENSOR};
use crate::sdk::ModelOutput;
use crate::session::OpenGradientSession;

/// Render a model output as a percentage with ten decimals, e.g.
/// `0.0678` -> `"6.7800000000%"`.
pub fn format_percentage(value: f64) -> String {
    format!("{:.10}%", value * 100.0)
}

/// `0x` followed by 40 hex digits.
pub fn is_evm_address(address: &str) -> bool {
    address
        .strip_prefix("0x")
        .is_some_and(|hex| hex.len() == 40 && hex.chars().all(|c| c.is_ascii_hexdigit()))
}

fn read_percentage(output: &ModelOutput, tensor: &str) -> Result<String, ActionError> {
    let value = output
        .numbers
        .get(tensor)
        .copied()
        .ok_or_else(|| ActionError::MissingOutput(tensor.to_string()))?;
    if !value.is_finite() {
        return Err(ActionError::InvalidInput(format!(
            "tensor '{tensor}' is not a finite number ({value})"
        )));
    }
    Ok(format_percentage(value))
}

// =============================================================================
// Fixed forecast workflows
// =============================================================================

pub struct ReadForecastAction {
    meta: ActionMetadata,
    forecast: Forecast,
}

impl ReadForecastAction {
    pub fn new(forecast: Forecast) -> Self {
        let (subject, horizon, kind) = match forecast {
            Forecast::EthUsdtOneHourVolatility => ("ETH/USDT", "1 hour", "volatility"),
            Forecast::SuiUsdtSixHourReturn => ("SUI/USDT", "6 hour", "return"),
            Forecast::SuiUsdtThirtyMinuteReturn => ("SUI/USDT", "30 minute", "return"),
        };

        let description = format!(
            "This tool reads the latest {horizon} {kind} forecast for the {subject} trading pair \
from a workflow smart contract on the OpenGradient network. The workflow runs the model on a \
schedule and stores its latest prediction on-chain, so no inputs are required.\n\n\
The result is returned as a percentage string, e.g. \"6.7800000000%\" for a {kind} of 0.0678.\n\n\
More information at {}",
            forecast.hub_url()
        );

        let examples = vec![ActionExample {
            input: json!({}),
            output: json!("6.7800000000%"),
            explanation: format!("Latest {horizon} {subject} {kind} forecast"),
        }];

        let meta = ActionMetadata {
            name: forecast.action_name().to_string(),
            similes: vec![
                format!("{subject} {kind} forecast"),
                format!("{horizon} {subject} {kind}"),
                format!("predict {subject} {kind}"),
            ],
            description,
            examples,
            input_schema: InputSchema::empty(),
            failure_context: format!("reading {} workflow", forecast.workflow_label()),
        };

        Self { meta, forecast }
    }
}

#[async_trait]
impl Action<OpenGradientSession> for ReadForecastAction {
    fn metadata(&self) -> &ActionMetadata {
        &self.meta
    }

    async fn call(
        &self,
        session: &OpenGradientSession,
        _args: ValidatedArgs,
    ) -> Result<String, ActionError> {
        let output = session
            .client
            .read_workflow_result(self.forecast.contract_address())
            .await
            .map_err(ActionError::remote)?;

        read_percentage(&output, self.forecast.output_tensor())
    }
}

// =============================================================================
// read_workflow - Read any workflow contract
// =============================================================================

pub struct ReadWorkflowAction {
    meta: ActionMetadata,
}

impl ReadWorkflowAction {
    pub fn new() -> Result<Self, ProviderError> {
        let input_schema = InputSchema::new(vec![
            FieldSpec::string(
                "contract_address",
                "The address of the smart contract that is running the workflow",
            ),
            FieldSpec::string(
                "output_name",
                "The name of the numeric output tensor to read -- default is Y",
            )
            .with_default(VOLATILITY_TENSOR),
        ])
        .map_err(|source| ProviderError::Schema {
            action: "read_workflow".to_string(),
            source,
        })?;

        let examples = vec![ActionExample {
            input: json!({
                "contract_address": "0xD5629A5b95dde11e4B5772B5Ad8a13B933e33845",
                "output_name": "Y",
            }),
            output: json!("6.7800000000%"),
            explanation: "Read the Y tensor from a volatility workflow".to_string(),
        }];

        let meta = ActionMetadata {
            name: "read_workflow".to_string(),
            similes: vec![
                "read workflow".to_string(),
                "read model result".to_string(),
                "get workflow output".to_string(),
            ],
            description: "This tool reads the latest result of a workflow smart contract on the \
OpenGradient network. Workflows run a model on a schedule and store its output tensors on-chain.\n\n\
Inputs:\n\
- contract_address: the 0x-prefixed address of the contract running the workflow\n\
- output_name: the numeric output tensor to return (defaults to \"Y\")\n\n\
The tensor value is returned as a percentage string with ten decimals."
                .to_string(),
            examples,
            input_schema,
            failure_context: "reading workflow".to_string(),
        };

        Ok(Self { meta })
    }
}

#[async_trait]
impl Action<OpenGradientSession> for ReadWorkflowAction {
    fn metadata(&self) -> &ActionMetadata {
        &self.meta
    }

    async fn call(
        &self,
        session: &OpenGradientSession,
        args: ValidatedArgs,
    ) -> Result<String, ActionError> {
        #[derive(Deserialize)]
        struct Input {
            contract_address: String,
            output_name: String,
        }

        let input: Input = args.parse()?;
        let address = input.contract_address.trim();
        if !is_evm_address(address) {
            return Err(ActionError::InvalidInput(format!(
                "invalid contract address '{address}'"
            )));
        }

        let output = session
            .client
            .read_workflow_result(address)
            .await
            .map_err(ActionError::remote)?;

        read_percentage(&output, &input.output_name)
    }
}

// =============================================================================
// Register workflow actions
// =============================================================================

pub fn register_workflow_actions(
    registry: &mut ActionRegistry<OpenGradientSession>,
) -> Result<(), ProviderError> {
    for forecast in Forecast::ALL {
        registry.register(ReadForecastAction::new(forecast))?;
    }
    registry.register(ReadWorkflowAction::new()?)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;
    use std::sync::Arc;

    use agent_actions_core::invoke;
    use anyhow::anyhow;
    use serde_json::Value;

    use crate::constants::{
        ETH_USDT_ONE_HOUR_VOLATILITY_ADDRESS, SUI_USDT_SIX_HOUR_FORECAST_ADDRESS,
        SUI_USDT_THIRTY_MIN_FORECAST_ADDRESS,
    };
    use crate::sdk::MockOpenGradientSdk;

    fn output(tensor: &str, value: f64) -> ModelOutput {
        ModelOutput {
            numbers: HashMap::from([(tensor.to_string(), value)]),
            ..Default::default()
        }
    }

    fn session_reading(address: &'static str, result: ModelOutput) -> OpenGradientSession {
        let mut sdk = MockOpenGradientSdk::new();
        sdk.expect_read_workflow_result()
            .withf(move |a: &str| a == address)
            .times(1)
            .returning(move |_| Ok(result.clone()));
        OpenGradientSession::new(Arc::new(sdk))
    }

    fn failing_session() -> OpenGradientSession {
        let mut sdk = MockOpenGradientSdk::new();
        sdk.expect_read_workflow_result()
            .returning(|_| Err(anyhow!("Failed to read workflow")));
        OpenGradientSession::new(Arc::new(sdk))
    }

    async fn run(
        action: &dyn Action<OpenGradientSession>,
        session: &OpenGradientSession,
        input: Value,
    ) -> String {
        invoke(action, session, input).await
    }

    #[test]
    fn test_format_percentage() {
        assert_eq!(format_percentage(0.0678), "6.7800000000%");
        // -0.1083882451 renders as -10.8388245100%; see "Percentage example" in DESIGN.md.
        assert_eq!(format_percentage(-0.108388245106), "-10.8388245106%");
        assert_eq!(format_percentage(0.0123), "1.2300000000%");
        assert_eq!(format_percentage(0.0), "0.0000000000%");
    }

    #[test]
    fn test_is_evm_address() {
        assert!(is_evm_address(ETH_USDT_ONE_HOUR_VOLATILITY_ADDRESS));
        assert!(!is_evm_address("0x1234"));
        assert!(!is_evm_address("D5629A5b95dde11e4B5772B5Ad8a13B933e33845"));
        assert!(!is_evm_address("0xZZ629A5b95dde11e4B5772B5Ad8a13B933e33845"));
    }

    #[tokio::test]
    async fn test_read_eth_usdt_one_hour_volatility() {
        let session = session_reading(ETH_USDT_ONE_HOUR_VOLATILITY_ADDRESS, output("Y", 0.0678));
        let action = ReadForecastAction::new(Forecast::EthUsdtOneHourVolatility);
        assert_eq!(run(&action, &session, json!({})).await, "6.7800000000%");
    }

    #[tokio::test]
    async fn test_read_sui_usdt_six_hour_return() {
        let session = session_reading(
            SUI_USDT_SIX_HOUR_FORECAST_ADDRESS,
            output("destandardized_prediction", 0.0123),
        );
        let action = ReadForecastAction::new(Forecast::SuiUsdtSixHourReturn);
        assert_eq!(run(&action, &session, json!({})).await, "1.2300000000%");
    }

    #[tokio::test]
    async fn test_read_sui_usdt_30_minute_return() {
        let session = session_reading(
            SUI_USDT_THIRTY_MIN_FORECAST_ADDRESS,
            output("destandardized_prediction", 0.0534),
        );
        let action = ReadForecastAction::new(Forecast::SuiUsdtThirtyMinuteReturn);
        assert_eq!(run(&action, &session, json!({})).await, "5.3400000000%");
    }

    #[tokio::test]
    async fn test_forecast_sdk_error() {
        let session = failing_session();
        for (forecast, label) in [
            (Forecast::EthUsdtOneHourVolatility, "one_hour_eth_usdt_volatility"),
            (Forecast::SuiUsdtSixHourReturn, "sui_usdt_six_hour_return_forecast"),
            (Forecast::SuiUsdtThirtyMinuteReturn, "sui_usdt_30_minute_return_forecast"),
        ] {
            let action = ReadForecastAction::new(forecast);
            let out = run(&action, &session, json!({})).await;
            assert!(out.contains(&format!("Error reading {label} workflow:")), "{out}");
            assert!(out.contains("Failed to read workflow"));
        }
    }

    #[tokio::test]
    async fn test_forecast_missing_tensor() {
        let session = session_reading(
            ETH_USDT_ONE_HOUR_VOLATILITY_ADDRESS,
            output("destandardized_prediction", 0.1),
        );
        let action = ReadForecastAction::new(Forecast::EthUsdtOneHourVolatility);
        let out = run(&action, &session, json!({})).await;
        assert_eq!(
            out,
            "Error reading one_hour_eth_usdt_volatility workflow: 'Y' was not found in the model output"
        );
    }

    #[tokio::test]
    async fn test_forecast_rejects_arguments() {
        let session = OpenGradientSession::new(Arc::new(MockOpenGradientSdk::new()));
        let action = ReadForecastAction::new(Forecast::SuiUsdtSixHourReturn);
        let out = run(&action, &session, json!({"pair": "SUI/USDT"})).await;
        assert!(out.starts_with("Error reading sui_usdt_six_hour_return_forecast workflow:"));
    }

    #[tokio::test]
    async fn test_read_workflow_custom_tensor() {
        let address = "0x00000000000000000000000000000000000000aA";
        let session = session_reading(address, output("prediction", -0.108388245106));
        let action = ReadWorkflowAction::new().unwrap();
        let out = run(
            &action,
            &session,
            json!({"contract_address": address, "output_name": "prediction"}),
        )
        .await;
        assert_eq!(out, "-10.8388245106%");
    }

    #[tokio::test]
    async fn test_read_workflow_defaults_to_y() {
        let session = session_reading(ETH_USDT_ONE_HOUR_VOLATILITY_ADDRESS, output("Y", 0.0678));
        let action = ReadWorkflowAction::new().unwrap();
        let out = run(
            &action,
            &session,
            json!({"contract_address": ETH_USDT_ONE_HOUR_VOLATILITY_ADDRESS}),
        )
        .await;
        assert_eq!(out, "6.7800000000%");
    }

    #[tokio::test]
    async fn test_read_workflow_invalid_address_skips_sdk() {
        let mut sdk = MockOpenGradientSdk::new();
        sdk.expect_read_workflow_result().never();
        let session = OpenGradientSession::new(Arc::new(sdk));
        let action = ReadWorkflowAction::new().unwrap();
        let out = run(&action, &session, json!({"contract_address": "0xnothex"})).await;
        assert_eq!(
            out,
            "Error reading workflow: invalid contract address '0xnothex'"
        );
    }

    #[tokio::test]
    async fn test_read_workflow_missing_address() {
        let session = OpenGradientSession::new(Arc::new(MockOpenGradientSdk::new()));
        let action = ReadWorkflowAction::new().unwrap();
        let out = run(&action, &session, json!({})).await;
        assert_eq!(
            out,
            "Error reading workflow: missing required field 'contract_address'"
        );
    }

    #[tokio::test]
    async fn test_read_workflow_sdk_error() {
        let action = ReadWorkflowAction::new().unwrap();
        let out = run(
            &action,
            &failing_session(),
            json!({"contract_address": ETH_USDT_ONE_HOUR_VOLATILITY_ADDRESS}),
        )
        .await;
        assert_eq!(out, "Error reading workflow: Failed to read workflow");
    }

    #[test]
    fn test_register_workflow_actions() {
        let mut registry = ActionRegistry::new();
        register_workflow_actions(&mut registry).unwrap();
        let names: Vec<String> = registry.metadata().into_iter().map(|m| m.name).collect();
        assert_eq!(
            names,
            vec![
                "read_eth_usdt_one_hour_volatility_forecast",
                "read_sui_usdt_six_hour_return_forecast",
                "read_sui_usdt_30_minute_return_forecast",
                "read_workflow",
            ]
        );
    }
}
