//! Dealer application endpoints.

use serde::{Deserialize, Serialize};

use super::{ApiClient, ApiError};
use crate::types::{BusinessType, DealerApplication};

/// Payload for `POST /dealer-applications/create/`.
#[derive(Debug, Clone, Serialize)]
pub struct DealerApplicationRequest {
    pub business_name: String,
    pub business_type: BusinessType,
    pub business_address: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub business_phone: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub business_email: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tax_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub business_license: Option<String>,
}

/// Discriminated status result: the backend answers the status endpoint
/// with either the application record or a "no application" message.
#[derive(Debug, Clone)]
pub enum DealerApplicationState {
    NotSubmitted,
    Submitted(DealerApplication),
}

impl DealerApplicationState {
    pub fn application(&self) -> Option<&DealerApplication> {
        match self {
            DealerApplicationState::Submitted(app) => Some(app),
            DealerApplicationState::NotSubmitted => None,
        }
    }
}

// The two wire shapes the status endpoint can produce.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum StatusWire {
    Application(DealerApplication),
    NoApplication {
        #[allow(dead_code)]
        message: String,
        has_application: bool,
    },
}

#[derive(Debug, Deserialize)]
struct SubmitResponse {
    #[allow(dead_code)]
    message: String,
    application: DealerApplication,
}

impl ApiClient {
    pub async fn submit_dealer_application(
        &self,
        req: &DealerApplicationRequest,
    ) -> Result<DealerApplication, ApiError> {
        self.require_auth()?;
        let response: SubmitResponse = self.post_json("/dealer-applications/create/", req).await?;
        Ok(response.application)
    }

    pub async fn dealer_application_status(&self) -> Result<DealerApplicationState, ApiError> {
        self.require_auth()?;
        let wire: StatusWire = self.get_json("/dealer-applications/status/", &[]).await?;
        Ok(match wire {
            StatusWire::Application(app) => DealerApplicationState::Submitted(app),
            StatusWire::NoApplication { has_application, .. } => {
                if has_application {
                    // Backend contradiction; treat as schema drift, not silence.
                    return Err(ApiError::schema(
                        "/dealer-applications/status/",
                        "has_application=true without application body",
                    ));
                }
                DealerApplicationState::NotSubmitted
            }
        })
    }
}
