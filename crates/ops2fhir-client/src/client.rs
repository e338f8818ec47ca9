//! The blocking validate-then-create submission client.

use reqwest::StatusCode;
use reqwest::header::{ACCEPT, CONTENT_TYPE, HeaderMap, HeaderValue};
use serde_json::Value;

use ops2fhir_model::ResourceType;

use crate::error::{ClientError, Result};
use crate::outcome::OperationOutcome;

/// The versioned FHIR JSON media type sent on every request.
pub const FHIR_MEDIA_TYPE: &str = "application/fhir+json; fhirVersion=4.0";

/// A resource the server accepted, with its assigned id.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CreatedResource {
    pub resource_type: ResourceType,
    pub id: String,
}

/// Anything that can take a resource and return the created id.
///
/// `FhirClient` is the production implementation; tests drive the pipeline
/// with fakes.
pub trait FhirEndpoint {
    /// Optionally validate, then create one resource.
    fn post_resource(
        &self,
        resource: &Value,
        resource_type: ResourceType,
        validate: bool,
    ) -> Result<CreatedResource>;
}

/// Thin synchronous client for a FHIR R4 endpoint.
///
/// One attempt per call: no retry, no backoff, no timeout configuration.
#[derive(Debug, Clone)]
pub struct FhirClient {
    http: reqwest::blocking::Client,
    base_url: String,
}

impl FhirClient {
    /// Configure the client once: base endpoint URL and TLS verification.
    ///
    /// `verify_tls == false` accepts invalid certificates, for test servers
    /// with self-signed chains.
    pub fn new(base_url: impl Into<String>, verify_tls: bool) -> Result<Self> {
        let mut headers = HeaderMap::new();
        headers.insert(ACCEPT, HeaderValue::from_static(FHIR_MEDIA_TYPE));
        headers.insert(CONTENT_TYPE, HeaderValue::from_static(FHIR_MEDIA_TYPE));

        let http = reqwest::blocking::Client::builder()
            .default_headers(headers)
            .danger_accept_invalid_certs(!verify_tls)
            .build()
            .map_err(|source| ClientError::Build { source })?;

        let base_url = base_url.into().trim_end_matches('/').to_string();
        Ok(Self { http, base_url })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn resource_url(&self, resource_type: ResourceType) -> String {
        format!("{}/{}", self.base_url, resource_type.as_str())
    }

    fn validate(&self, body: &str, resource_type: ResourceType) -> Result<()> {
        let url = format!("{}/$validate", self.resource_url(resource_type));
        let response = self
            .http
            .post(&url)
            .body(body.to_string())
            .send()
            .map_err(|source| ClientError::Connection {
                url: url.clone(),
                source,
            })?;

        let status = response.status();
        if status != StatusCode::OK {
            return Err(ClientError::ValidateTransport {
                url,
                status: status.as_u16(),
            });
        }

        let outcome: OperationOutcome =
            response.json().map_err(|e| ClientError::InvalidBody {
                url: url.clone(),
                message: e.to_string(),
            })?;
        let errors = outcome.errors();
        if errors.is_empty() {
            tracing::debug!(%url, "resource valid");
            Ok(())
        } else {
            Err(ClientError::Validation { issues: errors })
        }
    }

    fn create(&self, body: &str, resource_type: ResourceType) -> Result<CreatedResource> {
        let url = self.resource_url(resource_type);
        let response = self
            .http
            .post(&url)
            .body(body.to_string())
            .send()
            .map_err(|source| ClientError::Connection {
                url: url.clone(),
                source,
            })?;

        let status = response.status();
        if status != StatusCode::CREATED {
            let body = response.text().unwrap_or_default();
            return Err(ClientError::Creation {
                status: status.as_u16(),
                body,
            });
        }

        let created: Value = response.json().map_err(|e| ClientError::InvalidBody {
            url: url.clone(),
            message: e.to_string(),
        })?;
        let id = extract_id(&created).ok_or(ClientError::MissingId)?;
        tracing::debug!(resource_type = %resource_type, %id, "resource created");
        Ok(CreatedResource { resource_type, id })
    }
}

impl FhirEndpoint for FhirClient {
    fn post_resource(
        &self,
        resource: &Value,
        resource_type: ResourceType,
        validate: bool,
    ) -> Result<CreatedResource> {
        let body = serde_json::to_string(resource)?;
        if validate {
            self.validate(&body, resource_type)?;
        }
        self.create(&body, resource_type)
    }
}

/// The server-assigned id from a create response body.
fn extract_id(body: &Value) -> Option<String> {
    body.get("id").and_then(Value::as_str).map(ToOwned::to_owned)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_urls_are_built_from_base_and_type() {
        let client = FhirClient::new("https://fhir.example.org/r4/", true).unwrap();
        assert_eq!(client.base_url(), "https://fhir.example.org/r4");
        assert_eq!(
            client.resource_url(ResourceType::MedicationStatement),
            "https://fhir.example.org/r4/MedicationStatement"
        );
    }

    #[test]
    fn test_extract_id() {
        assert_eq!(
            extract_id(&json!({"resourceType": "Medication", "id": "42"})),
            Some("42".to_string())
        );
        assert_eq!(extract_id(&json!({"resourceType": "Medication"})), None);
        assert_eq!(extract_id(&json!({"id": 42})), None);
    }
}
