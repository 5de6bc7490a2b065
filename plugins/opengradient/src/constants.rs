//! Well-known workflow contracts and hosted models on OpenGradient.

pub const ETH_USDT_ONE_HOUR_VOLATILITY_ADDRESS: &str = "0xD5629A5b95dde11e4B5772B5Ad8a13B933e33845";
pub const SUI_USDT_SIX_HOUR_FORECAST_ADDRESS: &str = "0x3C2E4DbD653Bd30F1333d456480c1b7aB122e946";
pub const SUI_USDT_THIRTY_MIN_FORECAST_ADDRESS: &str = "0xD85BA71f5701dc4C5BDf9780189Db49C6F3708D2";

pub const DOBBY_UNHINGED_3_1_8B: &str = "SentientAGI/Dobby-Mini-Unhinged-Llama-3.1-8B";
pub const QWEN_2_5_72B_INSTRUCT: &str = "Qwen/Qwen2.5-72B-Instruct";

/// Tensor holding the volatility forecast.
pub const VOLATILITY_TENSOR: &str = "Y";
/// Tensor holding the return forecast.
pub const RETURN_TENSOR: &str = "destandardized_prediction";

pub const DEFAULT_TEMPERATURE: f64 = 0.95;
pub const DEFAULT_MAX_TOKENS: i64 = 2048;

/// Forecast workflows with a fixed contract.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Forecast {
    EthUsdtOneHourVolatility,
    SuiUsdtSixHourReturn,
    SuiUsdtThirtyMinuteReturn,
}

impl Forecast {
    pub const ALL: [Forecast; 3] = [
        Forecast::EthUsdtOneHourVolatility,
        Forecast::SuiUsdtSixHourReturn,
        Forecast::SuiUsdtThirtyMinuteReturn,
    ];

    pub fn action_name(self) -> &'static str {
        match self {
            Forecast::EthUsdtOneHourVolatility => "read_eth_usdt_one_hour_volatility_forecast",
            Forecast::SuiUsdtSixHourReturn => "read_sui_usdt_six_hour_return_forecast",
            Forecast::SuiUsdtThirtyMinuteReturn => "read_sui_usdt_30_minute_return_forecast",
        }
    }

    pub fn contract_address(self) -> &'static str {
        match self {
            Forecast::EthUsdtOneHourVolatility => ETH_USDT_ONE_HOUR_VOLATILITY_ADDRESS,
            Forecast::SuiUsdtSixHourReturn => SUI_USDT_SIX_HOUR_FORECAST_ADDRESS,
            Forecast::SuiUsdtThirtyMinuteReturn => SUI_USDT_THIRTY_MIN_FORECAST_ADDRESS,
        }
    }

    pub fn output_tensor(self) -> &'static str {
        match self {
            Forecast::EthUsdtOneHourVolatility => VOLATILITY_TENSOR,
            Forecast::SuiUsdtSixHourReturn | Forecast::SuiUsdtThirtyMinuteReturn => RETURN_TENSOR,
        }
    }

    /// Short workflow label used in error strings.
    pub fn workflow_label(self) -> &'static str {
        match self {
            Forecast::EthUsdtOneHourVolatility => "one_hour_eth_usdt_volatility",
            Forecast::SuiUsdtSixHourReturn => "sui_usdt_six_hour_return_forecast",
            Forecast::SuiUsdtThirtyMinuteReturn => "sui_usdt_30_minute_return_forecast",
        }
    }

    pub fn hub_url(self) -> &'static str {
        match self {
            Forecast::EthUsdtOneHourVolatility => {
                "https://hub.opengradient.ai/models/OpenGradient/og-1hr-volatility-ethusdt"
            }
            Forecast::SuiUsdtSixHourReturn => {
                "https://hub.opengradient.ai/models/OpenGradient/og-6h-return-suiusdt"
            }
            Forecast::SuiUsdtThirtyMinuteReturn => {
                "https://hub.opengradient.ai/models/OpenGradient/og-30min-return-suiusdt"
            }
        }
    }
}

/// LLMs hosted on OpenGradient that have a prompt action.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum HostedModel {
    DobbyUnhinged,
    Qwen,
}

impl HostedModel {
    pub const ALL: [HostedModel; 2] = [HostedModel::DobbyUnhinged, HostedModel::Qwen];

    pub fn model_cid(self) -> &'static str {
        match self {
            HostedModel::DobbyUnhinged => DOBBY_UNHINGED_3_1_8B,
            HostedModel::Qwen => QWEN_2_5_72B_INSTRUCT,
        }
    }

    /// Short name used in action names and error strings.
    pub fn label(self) -> &'static str {
        match self {
            HostedModel::DobbyUnhinged => "dobby",
            HostedModel::Qwen => "qwen",
        }
    }

    pub fn display_name(self) -> &'static str {
        match self {
            HostedModel::DobbyUnhinged => "Dobby-Mini-Unhinged-Llama-3.1-8B",
            HostedModel::Qwen => "Qwen2.5-72B-Instruct",
        }
    }

    pub fn action_name(self) -> &'static str {
        match self {
            HostedModel::DobbyUnhinged => "prompt_dobby",
            HostedModel::Qwen => "prompt_qwen",
        }
    }
}
