//! The provider (doctor) actor record.
//!
//! `Provider` mirrors the backend's doctor entity field for field. The
//! backend owns the record; this client only ever receives it whole (login,
//! profile fetch) or in parts (profile update), so the partial form lives
//! here too as [`ProviderPatch`].

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// The authenticated provider profile held by the session.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Provider {
    /// Backend-assigned identifier.
    pub id: i64,
    /// Given name.
    pub first_name: String,
    /// Family name.
    pub last_name: String,
    /// Login email address.
    pub email: String,
    /// Contact number.
    pub mobile: String,
    /// URL of the profile picture, if one was uploaded.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub profile_image: Option<String>,
    /// Specialty category id.
    #[serde(default)]
    pub category_id: i64,
    /// Human-readable specialty name.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category_name: Option<String>,
    /// Years of practice.
    #[serde(default)]
    pub experience_years: u32,
    /// Fee per consultation, in the platform currency.
    #[serde(default)]
    pub consultation_fee: f64,
    /// Average review rating.
    #[serde(default)]
    pub rating: f64,
    /// Number of reviews behind the rating.
    #[serde(default)]
    pub total_reviews: u32,
    /// Free-text biography.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bio: Option<String>,
    /// Free-text education summary.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub education: Option<String>,
    /// Languages offered for consultations.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub languages: Option<Vec<String>>,
    /// Clinical specializations.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub specializations: Option<Vec<String>>,
    /// Whether the provider is currently online.
    #[serde(default)]
    pub is_online: bool,
    /// Whether the platform has verified this provider.
    #[serde(default)]
    pub is_verified: bool,
    /// Current wallet balance.
    #[serde(default)]
    pub wallet_balance: f64,
    /// Professional license number.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub license_number: Option<String>,
    /// Whether the license has been verified.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub license_verified: Option<bool>,
    /// Whether the background check has cleared.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub background_check: Option<bool>,
    /// Practice location.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub location: Option<String>,
    /// Availability summary shown to patients.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub availability: Option<String>,
    /// Lifetime distinct-patient count.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub total_patients: Option<u32>,
    /// Lifetime appointment count.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub total_appointments: Option<u32>,
    /// When the backend created the record.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<DateTime<Utc>>,
    /// When the backend last touched the record.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<DateTime<Utc>>,
}

impl Provider {
    /// Full display name.
    #[must_use]
    pub fn full_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
    }

    /// True once both the license and the background check have cleared.
    #[must_use]
    pub fn is_fully_credentialed(&self) -> bool {
        self.is_verified
            && self.license_verified.unwrap_or(false)
            && self.background_check.unwrap_or(false)
    }

    /// Applies a partial update returned by the backend.
    ///
    /// Shallow merge: fields present in the patch win, fields absent from
    /// the patch are left untouched. A patch can never remove a field.
    pub fn apply(&mut self, patch: ProviderPatch) {
        macro_rules! merge {
            ($($field:ident),* $(,)?) => {
                $(if let Some(value) = patch.$field {
                    self.$field = value;
                })*
            };
        }
        macro_rules! merge_opt {
            ($($field:ident),* $(,)?) => {
                $(if patch.$field.is_some() {
                    self.$field = patch.$field;
                })*
            };
        }
        merge!(
            first_name,
            last_name,
            email,
            mobile,
            category_id,
            experience_years,
            consultation_fee,
            rating,
            total_reviews,
            is_online,
            is_verified,
            wallet_balance,
        );
        merge_opt!(
            profile_image,
            category_name,
            bio,
            education,
            languages,
            specializations,
            license_number,
            license_verified,
            background_check,
            location,
            availability,
            total_patients,
            total_appointments,
            updated_at,
        );
    }
}

/// Partial provider update, as sent to and returned by the profile-update
/// endpoint. Every field is optional; absent fields are not transmitted.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ProviderPatch {
    /// Given name.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub first_name: Option<String>,
    /// Family name.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_name: Option<String>,
    /// Login email address.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    /// Contact number.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub mobile: Option<String>,
    /// URL of the profile picture.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub profile_image: Option<String>,
    /// Specialty category id.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category_id: Option<i64>,
    /// Human-readable specialty name.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category_name: Option<String>,
    /// Years of practice.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub experience_years: Option<u32>,
    /// Fee per consultation.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub consultation_fee: Option<f64>,
    /// Average review rating.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rating: Option<f64>,
    /// Number of reviews behind the rating.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub total_reviews: Option<u32>,
    /// Free-text biography.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bio: Option<String>,
    /// Free-text education summary.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub education: Option<String>,
    /// Languages offered for consultations.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub languages: Option<Vec<String>>,
    /// Clinical specializations.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub specializations: Option<Vec<String>>,
    /// Whether the provider is currently online.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub is_online: Option<bool>,
    /// Whether the platform has verified this provider.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub is_verified: Option<bool>,
    /// Current wallet balance.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub wallet_balance: Option<f64>,
    /// Professional license number.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub license_number: Option<String>,
    /// Whether the license has been verified.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub license_verified: Option<bool>,
    /// Whether the background check has cleared.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub background_check: Option<bool>,
    /// Practice location.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub location: Option<String>,
    /// Availability summary shown to patients.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub availability: Option<String>,
    /// Lifetime distinct-patient count.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub total_patients: Option<u32>,
    /// Lifetime appointment count.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub total_appointments: Option<u32>,
    /// When the backend last touched the record.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<DateTime<Utc>>,
}

impl ProviderPatch {
    /// True if no field is set.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self == &Self::default()
    }

    /// Convenience constructor for a bio-only update.
    #[must_use]
    pub fn bio(text: impl Into<String>) -> Self {
        Self {
            bio: Some(text.into()),
            ..Self::default()
        }
    }
}
