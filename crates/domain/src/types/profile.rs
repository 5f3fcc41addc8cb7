//! Profile types
//!
//! The extended user record (designation, company, avatar...) distinct from
//! the bare account record carried in the session. One profile per
//! authenticated user, keyed server-side by the identity embedded in the
//! bearer token.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

/// Gender selection offered by the profile form.
///
/// The backend also uses this to assign a default avatar when no image is
/// supplied at creation time; the client never computes that avatar itself.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Gender {
    Male,
    Female,
    Other,
    Unspecified,
}

impl Gender {
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Male => "male",
            Self::Female => "female",
            Self::Other => "other",
            Self::Unspecified => "unspecified",
        }
    }
}

impl std::fmt::Display for Gender {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Profile record as returned by the backend
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Profile {
    #[serde(default)]
    pub user_id: Option<i64>,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub phone: Option<String>,
    #[serde(default)]
    pub gender: Option<Gender>,
    #[serde(default)]
    pub date_of_birth: Option<NaiveDate>,
    #[serde(default)]
    pub designation: Option<String>,
    #[serde(default)]
    pub company_name: Option<String>,
    /// URL or data URI; resolved server-side to a gender-based default
    /// avatar when nothing was uploaded.
    #[serde(default)]
    pub profile_image: Option<String>,
    #[serde(default)]
    pub created_on: Option<DateTime<Utc>>,
    #[serde(default)]
    pub updated_on: Option<DateTime<Utc>>,
}

/// Editable profile form fields, shared by the create and update paths.
///
/// Every field is optional at the type level; the create path enforces the
/// required fields (designation, gender) before any request is made.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProfileDraft {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub gender: Option<Gender>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub date_of_birth: Option<NaiveDate>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub designation: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub company_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub profile_image_url: Option<String>,
}

/// An image file attached to a profile submission.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImageUpload {
    pub file_name: String,
    pub content_type: String,
    pub bytes: Vec<u8>,
}

/// Request-body encoding for profile create/update, chosen explicitly by the
/// caller instead of being inferred from a flag buried in the submit path.
///
/// The multipart form uses the same field names as the JSON body, plus a
/// `file` part for the image.
#[derive(Debug, Clone, PartialEq)]
pub enum ProfilePayload {
    /// Plain JSON body, used when no image file is attached.
    Json(ProfileDraft),
    /// Multipart form with an attached image file.
    Multipart(ProfileDraft, ImageUpload),
}

impl ProfilePayload {
    /// Choose the encoding for a draft and optional attached file.
    ///
    /// An attached file takes precedence over `profile_image_url`: the URL
    /// field is dropped from the payload so the backend never sees both.
    #[must_use]
    pub fn new(mut draft: ProfileDraft, image: Option<ImageUpload>) -> Self {
        match image {
            Some(file) => {
                draft.profile_image_url = None;
                Self::Multipart(draft, file)
            }
            None => Self::Json(draft),
        }
    }

    /// The form fields regardless of encoding.
    #[must_use]
    pub fn draft(&self) -> &ProfileDraft {
        match self {
            Self::Json(draft) | Self::Multipart(draft, _) => draft,
        }
    }
}
