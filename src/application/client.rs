use crate::config::ClientConfig;
use crate::domain::amount::Amount;
use crate::domain::currency::{convert_amount_to_gateway_format, currency_code};
use crate::domain::parameters::RequestParameters;
use crate::domain::ports::GatewayExecutorBox;
use crate::domain::response::Response;
use crate::error::{GatewayError, Result};
use crate::infrastructure::process::ProcessExecutor;
use rust_decimal::Decimal;
use std::path::Path;

/// SIPS API version the parameter names and response layout follow.
pub const API_VERSION: &str = "6.15";

pub const DEMO_PAYMENT_URL: &str =
    "https://payment.sips-atos.com:443/cgis-payment/demo/callpayment";
pub const PRODUCTION_PAYMENT_URL: &str =
    "https://payment.sips-atos.com:443/cgis-payment/prod/callpayment";

/// Client for the SIPS request and response binaries.
///
/// Every call runs one binary and waits for it to exit. The client holds no
/// mutable state and can be shared between tasks.
pub struct GatewayClient {
    config: ClientConfig,
    executor: GatewayExecutorBox,
}

impl GatewayClient {
    /// Creates a client that spawns the configured binaries.
    pub fn new(config: ClientConfig) -> Self {
        let executor = ProcessExecutor::with_timeout(config.timeout());
        Self::with_executor(config, Box::new(executor))
    }

    /// Creates a client running gateway calls through `executor`.
    pub fn with_executor(config: ClientConfig, executor: GatewayExecutorBox) -> Self {
        Self { config, executor }
    }

    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    /// Asks the request binary for the payment form of a checkout.
    ///
    /// `parameters` are passed through to the binary; the merchant, amount and
    /// currency parameters set by the client take precedence over them.
    pub async fn request_checkout_token(
        &self,
        amount: Decimal,
        currency: &str,
        parameters: RequestParameters,
    ) -> Result<Response> {
        let amount = Amount::new(amount)?;

        let mut params = parameters;
        params.insert("merchant_id", self.config.merchant_id());
        params.insert("merchant_country", self.config.country());
        params.insert("pathfile", self.config.pathfile().display().to_string());
        params.insert("amount", convert_amount_to_gateway_format(amount, currency)?);
        params.insert("currency_code", currency_code(currency));

        self.send_api_request(self.config.request_path(), params)
            .await
    }

    /// Decodes the encrypted `DATA` blob posted back by the gateway.
    pub async fn do_checkout_payment(&self, encrypted_data: &str) -> Result<Response> {
        let params = RequestParameters::new()
            .with("pathfile", self.config.pathfile().display().to_string())
            .with("message", encrypted_data);

        self.send_api_request(self.config.response_path(), params)
            .await
    }

    pub fn call_payment_url(&self) -> &'static str {
        if self.config.is_debug() {
            DEMO_PAYMENT_URL
        } else {
            PRODUCTION_PAYMENT_URL
        }
    }

    async fn send_api_request(&self, binary: &Path, params: RequestParameters) -> Result<Response> {
        let raw = self.executor.invoke(binary, &params).await?;
        if raw.trim().is_empty() {
            return Err(GatewayError::MalformedOutput);
        }

        let response = Response::parse(&raw);
        if response.is_error() {
            tracing::info!(
                binary = %binary.display(),
                status = response.status(),
                "Gateway request was not successful"
            );
            return Err(GatewayError::Communication {
                status: response.status().to_string(),
                message: response.message().map(str::to_owned),
            });
        }

        tracing::info!(
            binary = %binary.display(),
            fields = response.len(),
            "Gateway request succeeded"
        );
        Ok(response)
    }
}
