use contracts::domain::a001_business_settings::aggregate::{
    ComplianceCsidCall, CsidResponse, ProductionCsidCall,
};
use serde::Serialize;

use crate::shared::config::ComplianceEngineConfig;

/// HTTP client of the external compliance engine.
///
/// The engine owns CSR generation, signing and the CSID exchange with the
/// Fatoora portal; this side only forwards the OTP and stores request ids.
pub struct ComplianceEngineClient {
    client: reqwest::Client,
    base_url: String,
}

impl ComplianceEngineClient {
    pub fn from_config(config: &ComplianceEngineConfig) -> anyhow::Result<Self> {
        let base_url = config
            .url
            .as_deref()
            .map(str::trim)
            .filter(|u| !u.is_empty())
            .ok_or_else(|| anyhow::anyhow!("Compliance engine URL is not configured"))?
            .trim_end_matches('/')
            .to_string();
        let client = reqwest::Client::builder()
            .timeout(std::time::Duration::from_secs(config.timeout_secs))
            .build()?;
        Ok(Self { client, base_url })
    }

    /// POST {engine}/compliance_csid
    pub async fn compliance_csid(&self, call: &ComplianceCsidCall) -> anyhow::Result<CsidResponse> {
        self.post("compliance_csid", call).await
    }

    /// POST {engine}/production_csid
    pub async fn production_csid(&self, call: &ProductionCsidCall) -> anyhow::Result<CsidResponse> {
        self.post("production_csid", call).await
    }

    async fn post<B: Serialize>(&self, endpoint: &str, body: &B) -> anyhow::Result<CsidResponse> {
        let url = format!("{}/{}", self.base_url, endpoint);
        tracing::info!("Compliance engine request: POST {}", url);

        let response = self.client.post(&url).json(body).send().await?;
        let status = response.status();
        if !status.is_success() {
            let text = response.text().await.unwrap_or_default();
            tracing::error!("Compliance engine error {}: {}", status, text);
            anyhow::bail!("Compliance API Error ({}): {}", status.as_u16(), text);
        }

        let parsed: CsidResponse = response.json().await?;
        if parsed.request_id.trim().is_empty() {
            anyhow::bail!("Compliance engine returned an empty request id");
        }
        Ok(parsed)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_url_is_rejected() {
        let config = ComplianceEngineConfig {
            url: Some("  ".into()),
            timeout_secs: 5,
        };
        assert!(ComplianceEngineClient::from_config(&config).is_err());
    }

    #[test]
    fn test_trailing_slash_is_trimmed() {
        let config = ComplianceEngineConfig {
            url: Some("http://engine.local/api/".into()),
            timeout_secs: 5,
        };
        let client = ComplianceEngineClient::from_config(&config).unwrap();
        assert_eq!(client.base_url, "http://engine.local/api");
    }
}
