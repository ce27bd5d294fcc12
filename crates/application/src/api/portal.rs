//! Typed wrappers over the portal backend's endpoints.
//!
//! Every endpoint shares the envelope contract, so the wrappers all follow
//! the same shape: serialize the request, call through the [`ApiClient`]
//! port, decode the envelope into a concrete result type at this boundary,
//! and translate `success: false` into [`PortalError::Rejected`]. Nothing
//! above this module handles loose JSON.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use lovejoy_domain::{Envelope, Provider, ProviderPatch, Session};

use crate::error::{PortalError, PortalResult};
use crate::ports::{ApiClient, ApiError};

/// Login endpoint.
pub const LOGIN: &str = "/doctorLogin";
/// Logout endpoint.
pub const LOGOUT: &str = "/logOutDoctor";
/// Profile fetch endpoint.
pub const FETCH_PROFILE: &str = "/fetchMyDoctorProfile";
/// Profile update endpoint.
pub const UPDATE_PROFILE: &str = "/updateDoctorDetails";
/// Registration endpoint.
pub const REGISTER: &str = "/doctorRegistration";
/// Account deletion endpoint.
pub const DELETE_ACCOUNT: &str = "/deleteDoctorAccount";
/// Presence update endpoint.
pub const UPDATE_STATES: &str = "/updateDoctorStates";
/// Profile existence check endpoint.
pub const CHECK_PROFILE: &str = "/checkDoctorProfile";

/// Login response payload: the provider record with its bearer token
/// alongside.
#[derive(Debug, Deserialize)]
struct LoginData {
    token: String,
    #[serde(flatten)]
    provider: Provider,
}

/// A new-provider registration request.
#[derive(Debug, Clone, Default, Serialize)]
pub struct Registration {
    /// Given name.
    pub first_name: String,
    /// Family name.
    pub last_name: String,
    /// Login email address.
    pub email: String,
    /// Chosen password.
    pub password: String,
    /// Contact number.
    pub mobile: String,
    /// Specialty category id.
    pub category_id: i64,
    /// Professional license number, if held.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub license_number: Option<String>,
    /// Years of practice.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub experience_years: Option<u32>,
}

/// Result of asking whether a profile exists for an email.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct ProfileCheck {
    /// Whether a provider record exists for the email.
    pub exists: bool,
    /// Account status when one exists (e.g. pending review).
    #[serde(default)]
    pub status: Option<String>,
}

/// Typed endpoint wrappers over an [`ApiClient`].
#[derive(Debug, Clone)]
pub struct PortalApi<C> {
    client: C,
}

impl<C: ApiClient> PortalApi<C> {
    /// Wraps an API client.
    pub const fn new(client: C) -> Self {
        Self { client }
    }

    /// Authenticates with email and password.
    ///
    /// # Errors
    ///
    /// [`PortalError::Rejected`] with the backend's message on bad
    /// credentials, or any transport failure.
    pub async fn login(&self, email: &str, password: &str) -> PortalResult<Session> {
        let body = serde_json::json!({ "email": email, "password": password });
        let raw = self.client.post(LOGIN, &body, None).await?;
        let data = decode::<LoginData>(raw)?.into_result()?;
        Ok(Session::new(data.token, data.provider))
    }

    /// Notifies the backend that the session is over.
    ///
    /// # Errors
    ///
    /// Propagates rejection and transport failures; the caller decides
    /// whether they matter.
    pub async fn logout(&self, token: &str) -> PortalResult<()> {
        let raw = self
            .client
            .post(LOGOUT, &Value::Object(serde_json::Map::new()), Some(token))
            .await?;
        decode::<Value>(raw)?.into_ack()?;
        Ok(())
    }

    /// Fetches the full provider record for the token's owner.
    ///
    /// # Errors
    ///
    /// Rejection or transport failure.
    pub async fn fetch_profile(&self, token: &str) -> PortalResult<Provider> {
        let raw = self
            .client
            .post(
                FETCH_PROFILE,
                &Value::Object(serde_json::Map::new()),
                Some(token),
            )
            .await?;
        Ok(decode::<Provider>(raw)?.into_result()?)
    }

    /// Submits a partial profile update; returns the fields the backend
    /// actually changed.
    ///
    /// # Errors
    ///
    /// Rejection or transport failure.
    pub async fn update_profile(
        &self,
        patch: &ProviderPatch,
        token: &str,
    ) -> PortalResult<ProviderPatch> {
        let body = serde_json::to_value(patch)
            .map_err(|e| PortalError::Api(ApiError::Decode(e.to_string())))?;
        let raw = self.client.post(UPDATE_PROFILE, &body, Some(token)).await?;
        Ok(decode::<ProviderPatch>(raw)?.into_result()?)
    }

    /// Registers a new provider account.
    ///
    /// # Errors
    ///
    /// Rejection (validation failures carry the backend's message) or
    /// transport failure.
    pub async fn register(&self, registration: &Registration) -> PortalResult<Provider> {
        let body = serde_json::to_value(registration)
            .map_err(|e| PortalError::Api(ApiError::Decode(e.to_string())))?;
        let raw = self.client.post(REGISTER, &body, None).await?;
        Ok(decode::<Provider>(raw)?.into_result()?)
    }

    /// Permanently deletes the token owner's account.
    ///
    /// # Errors
    ///
    /// Rejection or transport failure.
    pub async fn delete_account(&self, token: &str) -> PortalResult<()> {
        let raw = self
            .client
            .post(
                DELETE_ACCOUNT,
                &Value::Object(serde_json::Map::new()),
                Some(token),
            )
            .await?;
        decode::<Value>(raw)?.into_ack()?;
        Ok(())
    }

    /// Updates the provider's online/availability flags.
    ///
    /// # Errors
    ///
    /// Rejection or transport failure.
    pub async fn set_presence(
        &self,
        is_online: Option<bool>,
        is_available: Option<bool>,
        token: &str,
    ) -> PortalResult<()> {
        let mut body = serde_json::Map::new();
        if let Some(online) = is_online {
            body.insert("is_online".to_string(), Value::Bool(online));
        }
        if let Some(available) = is_available {
            body.insert("is_available".to_string(), Value::Bool(available));
        }
        let raw = self
            .client
            .post(UPDATE_STATES, &Value::Object(body), Some(token))
            .await?;
        decode::<Value>(raw)?.into_ack()?;
        Ok(())
    }

    /// Checks whether a provider profile exists for an email.
    ///
    /// # Errors
    ///
    /// Rejection or transport failure.
    pub async fn check_profile(&self, email: &str) -> PortalResult<ProfileCheck> {
        let body = serde_json::json!({ "email": email });
        let raw = self.client.post(CHECK_PROFILE, &body, None).await?;
        Ok(decode::<ProfileCheck>(raw)?.into_result()?)
    }
}

/// Decodes a raw response body into a typed envelope.
fn decode<T: serde::de::DeserializeOwned>(raw: Value) -> Result<Envelope<T>, PortalError> {
    serde_json::from_value(raw).map_err(|e| PortalError::Api(ApiError::Decode(e.to_string())))
}
