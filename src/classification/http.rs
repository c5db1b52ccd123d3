//! HTTP classification provider backed by a JSON lookup service

use async_trait::async_trait;
use serde::Deserialize;

use crate::traits::*;
use crate::types::HsnCode;
use crate::utils::json_number;

/// Response body of `GET {base_url}/{code}`
#[derive(Debug, Deserialize)]
struct HsnApiResponse {
    code: String,
    description: String,
    #[serde(with = "json_number")]
    rate: bigdecimal::BigDecimal,
    #[serde(default, with = "json_number::option")]
    cess: Option<bigdecimal::BigDecimal>,
    unit: Option<String>,
}

/// Provider that fetches classifications from an HTTP endpoint.
///
/// A `404` is treated as "code unknown"; other non-success statuses are
/// reported as [`ProviderError::Api`].
pub struct HttpProvider {
    name: String,
    base_url: String,
    client: reqwest::Client,
}

impl HttpProvider {
    pub fn new(name: &str, base_url: &str) -> Result<Self, ProviderError> {
        // The chain enforces its own timeout; this only guards stuck connections
        let client = reqwest::Client::builder()
            .timeout(std::time::Duration::from_secs(30))
            .build()
            .map_err(|e| ProviderError::Network(e.to_string()))?;

        Ok(Self {
            name: name.to_string(),
            base_url: base_url.trim_end_matches('/').to_string(),
            client,
        })
    }

    fn url(&self, code: &str) -> String {
        format!("{}/{}", self.base_url, code)
    }
}

#[async_trait]
impl ClassificationProvider for HttpProvider {
    fn name(&self) -> &str {
        &self.name
    }

    async fn fetch(&self, code: &str) -> Result<Option<HsnCode>, ProviderError> {
        let resp = self
            .client
            .get(self.url(code))
            .send()
            .await
            .map_err(|e| ProviderError::Network(e.to_string()))?;

        let status = resp.status();
        if status == reqwest::StatusCode::NOT_FOUND {
            return Ok(None);
        }

        let body = resp
            .text()
            .await
            .map_err(|e| ProviderError::Network(e.to_string()))?;

        if !status.is_success() {
            return Err(ProviderError::Api(format!("HTTP {status}: {body}")));
        }

        let api_resp: HsnApiResponse =
            serde_json::from_str(&body).map_err(|e| ProviderError::Parse(e.to_string()))?;

        let chapter = api_resp
            .code
            .get(..2)
            .filter(|c| c.chars().all(|ch| ch.is_ascii_digit()))
            .ok_or_else(|| ProviderError::Parse(format!("invalid code '{}'", api_resp.code)))?
            .to_string();

        Ok(Some(HsnCode {
            chapter,
            code: api_resp.code,
            description: api_resp.description,
            rate: api_resp.rate,
            cess: api_resp.cess,
            unit: api_resp.unit.filter(|u| !u.is_empty()),
        }))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_url_building() {
        let provider = HttpProvider::new("hsn-api", "https://hsn.example.com/v1/").unwrap();
        assert_eq!(provider.url("847130"), "https://hsn.example.com/v1/847130");
        assert_eq!(provider.name(), "hsn-api");
    }

    #[test]
    fn test_response_deserialization() {
        let json = r#"{"code":"847130","description":"Laptops","rate":18,"cess":null,"unit":"NOS"}"#;
        let resp: HsnApiResponse = serde_json::from_str(json).unwrap();
        assert_eq!(resp.rate, bigdecimal::BigDecimal::from(18));
        assert!(resp.cess.is_none());

        let json = r#"{"code":"2202","description":"Aerated","rate":"28","cess":12.0}"#;
        let resp: HsnApiResponse = serde_json::from_str(json).unwrap();
        assert_eq!(resp.cess, Some(bigdecimal::BigDecimal::from(12)));
        assert!(resp.unit.is_none());
    }
}
