//! HTTP implementation of the auth, profile and feedback gateways
//!
//! One client per backend. All non-2xx responses go through the shared
//! classifier so controllers see the same error taxonomy regardless of
//! endpoint; the two transport-level cases (no response, unparseable 2xx
//! body) are mapped here as well.

use std::time::Duration;

use async_trait::async_trait;
use coreshift_core::classify;
use coreshift_core::{AuthGateway, FeedbackGateway, ProfileGateway};
use coreshift_domain::{
    BackendConfig, LoginResponse, NewFeedback, Profile, ProfilePayload, RegisterRequest, Result,
    TestimonialPage,
};
use reqwest::multipart::{Form, Part};
use reqwest::{Method, RequestBuilder, Response, StatusCode};
use serde::de::DeserializeOwned;
use serde::Deserialize;
use tracing::{debug, instrument};

use crate::http::HttpClient;

/// Configuration for the backend gateway.
#[derive(Debug, Clone)]
pub struct BackendClientConfig {
    /// Base URL without a trailing slash, e.g. `http://127.0.0.1:8000`.
    pub base_url: String,
    /// Per-request timeout.
    pub timeout: Duration,
}

impl Default for BackendClientConfig {
    fn default() -> Self {
        let defaults = BackendConfig {
            base_url: "http://127.0.0.1:8000".to_string(),
            timeout_seconds: 30,
        };
        Self::from(&defaults)
    }
}

impl From<&BackendConfig> for BackendClientConfig {
    fn from(config: &BackendConfig) -> Self {
        Self {
            base_url: config.base_url.trim_end_matches('/').to_string(),
            timeout: Duration::from_secs(config.timeout_seconds),
        }
    }
}

/// REST gateway to the CoreShift backend.
pub struct BackendClient {
    http: HttpClient,
    base_url: String,
}

impl BackendClient {
    /// Create a gateway for the configured backend.
    ///
    /// # Errors
    /// `Config` when the underlying HTTP client cannot be built.
    pub fn new(config: BackendClientConfig) -> Result<Self> {
        let http = HttpClient::builder()
            .timeout(config.timeout)
            .user_agent(concat!("coreshift/", env!("CARGO_PKG_VERSION")))
            .build()?;

        Ok(Self { http, base_url: config.base_url })
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    fn authorized(&self, method: Method, path: &str, token: &str) -> RequestBuilder {
        self.http.request(method, self.url(path)).bearer_auth(token)
    }

    /// Turn a non-2xx response into a typed error via the classifier.
    async fn classify(response: Response) -> coreshift_domain::CoreShiftError {
        let status = response.status().as_u16();
        let body = response.text().await.unwrap_or_default();
        classify::classify_response(status, &body)
    }

    /// Parse a 2xx JSON body, mapping parse failures to `MalformedResponse`.
    async fn parse_body<T: DeserializeOwned>(response: Response) -> Result<T> {
        let body = response
            .text()
            .await
            .map_err(|err| classify::malformed_response(&err.to_string()))?;
        serde_json::from_str(&body).map_err(|err| classify::malformed_response(&err.to_string()))
    }

    async fn expect_success(response: Response) -> Result<Response> {
        if response.status().is_success() {
            Ok(response)
        } else {
            Err(Self::classify(response).await)
        }
    }
}

#[async_trait]
impl AuthGateway for BackendClient {
    #[instrument(skip_all)]
    async fn register(&self, request: &RegisterRequest) -> Result<()> {
        let builder = self.http.request(Method::POST, self.url("/register")).json(request);
        let response = self.http.send(builder).await?;
        Self::expect_success(response).await?;
        debug!("account registered");
        Ok(())
    }

    #[instrument(skip_all, fields(username = %username))]
    async fn login(&self, username: &str, password: &str) -> Result<LoginResponse> {
        // OAuth2 password-grant style form body, not JSON.
        let form = [("username", username), ("password", password)];
        let builder = self.http.request(Method::POST, self.url("/login")).form(&form);
        let response = self.http.send(builder).await?;
        let response = Self::expect_success(response).await?;
        Self::parse_body(response).await
    }
}

/// Success body of `GET /profiles`: the profile record sits under a
/// `profile` key, absent or null when none exists yet.
#[derive(Debug, Deserialize)]
struct ProfileEnvelope {
    #[serde(default)]
    profile: Option<Profile>,
}

#[async_trait]
impl ProfileGateway for BackendClient {
    #[instrument(skip_all)]
    async fn fetch_profile(&self, token: &str) -> Result<Option<Profile>> {
        let builder = self.authorized(Method::GET, "/profiles", token);
        let response = self.http.send(builder).await?;

        // Absent profile is a normal outcome, not an error.
        if response.status() == StatusCode::NOT_FOUND {
            return Ok(None);
        }

        let response = Self::expect_success(response).await?;
        let envelope: ProfileEnvelope = Self::parse_body(response).await?;
        Ok(envelope.profile)
    }

    #[instrument(skip_all)]
    async fn create_profile(&self, token: &str, payload: &ProfilePayload) -> Result<()> {
        let builder = self.authorized(Method::POST, "/profiles/create", token);
        let response = self.http.send(attach_payload(builder, payload)?).await?;
        Self::expect_success(response).await?;
        Ok(())
    }

    #[instrument(skip_all)]
    async fn update_profile(&self, token: &str, payload: &ProfilePayload) -> Result<()> {
        let builder = self.authorized(Method::PUT, "/profiles/update-profile", token);
        let response = self.http.send(attach_payload(builder, payload)?).await?;
        Self::expect_success(response).await?;
        Ok(())
    }
}

/// Body shape of `GET /feedback/check`.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct SubmissionCheck {
    #[serde(default, alias = "submitted")]
    has_submitted: bool,
}

#[async_trait]
impl FeedbackGateway for BackendClient {
    #[instrument(skip_all)]
    async fn check_submission(&self, token: &str) -> Result<bool> {
        let builder = self.authorized(Method::GET, "/feedback/check", token);
        let response = self.http.send(builder).await?;
        let response = Self::expect_success(response).await?;
        let check: SubmissionCheck = Self::parse_body(response).await?;
        Ok(check.has_submitted)
    }

    #[instrument(skip_all)]
    async fn submit_feedback(&self, token: &str, feedback: &NewFeedback) -> Result<()> {
        let builder = self.authorized(Method::POST, "/feedback/add", token).json(feedback);
        let response = self.http.send(builder).await?;
        Self::expect_success(response).await?;
        Ok(())
    }

    #[instrument(skip_all)]
    async fn view_testimonials(&self, token: &str) -> Result<TestimonialPage> {
        let builder = self.authorized(Method::GET, "/feedback/view-feedback", token);
        let response = self.http.send(builder).await?;
        let response = Self::expect_success(response).await?;
        Self::parse_body(response).await
    }
}

/// Encode the profile payload onto the request: JSON body when no file is
/// attached, multipart form otherwise. The multipart form carries the same
/// field names as the JSON body plus a `file` part.
fn attach_payload(builder: RequestBuilder, payload: &ProfilePayload) -> Result<RequestBuilder> {
    match payload {
        ProfilePayload::Json(draft) => Ok(builder.json(draft)),
        ProfilePayload::Multipart(draft, image) => {
            let mut form = Form::new();
            if let Some(gender) = draft.gender {
                form = form.text("gender", gender.as_str());
            }
            if let Some(date) = draft.date_of_birth {
                form = form.text("dateOfBirth", date.to_string());
            }
            if let Some(designation) = &draft.designation {
                form = form.text("designation", designation.clone());
            }
            if let Some(company) = &draft.company_name {
                form = form.text("companyName", company.clone());
            }

            let part = Part::bytes(image.bytes.clone())
                .file_name(image.file_name.clone())
                .mime_str(&image.content_type)
                .map_err(|err| {
                    coreshift_domain::CoreShiftError::internal(format!(
                        "invalid image content type {:?}: {err}",
                        image.content_type
                    ))
                })?;

            Ok(builder.multipart(form.part("file", part)))
        }
    }
}

#[cfg(test)]
mod tests {
    use coreshift_domain::{ErrorKind, Gender, ImageUpload, ProfileDraft};
    use wiremock::matchers::{body_string_contains, header, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    use super::*;

    async fn client_for(server: &MockServer) -> BackendClient {
        let config = BackendClientConfig {
            base_url: server.uri(),
            timeout: Duration::from_secs(5),
        };
        BackendClient::new(config).expect("backend client")
    }

    #[tokio::test]
    async fn login_sends_form_encoded_credentials() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/login"))
            .and(header("content-type", "application/x-www-form-urlencoded"))
            .and(body_string_contains("username=asha%40corp.example"))
            .and(body_string_contains("password=s3cret"))
            .respond_with(
                ResponseTemplate::new(200).set_body_string(r#"{"access_token": "tok-123"}"#),
            )
            .expect(1)
            .mount(&server)
            .await;

        let client = client_for(&server).await;
        let response = client.login("asha@corp.example", "s3cret").await.expect("login");

        assert_eq!(response.access_token, "tok-123");
        assert!(response.user.is_none());
    }

    #[tokio::test]
    async fn login_failure_is_classified() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/login"))
            .respond_with(
                ResponseTemplate::new(401).set_body_string(r#"{"detail": "Bad credentials"}"#),
            )
            .mount(&server)
            .await;

        let client = client_for(&server).await;
        let err = client.login("asha@corp.example", "wrong").await.unwrap_err();
        assert_eq!(err.kind(), ErrorKind::SessionExpired);
        assert_eq!(err.http_status(), Some(401));
    }

    #[tokio::test]
    async fn register_posts_json_and_surfaces_validation_errors() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/register"))
            .and(header("content-type", "application/json"))
            .respond_with(ResponseTemplate::new(422).set_body_string(
                r#"{"detail": [{"msg": "invalid email"}, {"msg": "phone too short"}]}"#,
            ))
            .mount(&server)
            .await;

        let client = client_for(&server).await;
        let request = RegisterRequest {
            name: "Asha".into(),
            phone: "12".into(),
            email: "nope".into(),
            password: "pw".into(),
        };

        let err = client.register(&request).await.unwrap_err();
        assert_eq!(err.kind(), ErrorKind::ValidationFailed);
        assert_eq!(err.display_message(), "Validation failed: invalid email, phone too short");
    }

    #[tokio::test]
    async fn missing_profile_is_none_not_an_error() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/profiles"))
            .and(header("authorization", "Bearer tok"))
            .respond_with(ResponseTemplate::new(404).set_body_string(r#"{"detail": "No profile"}"#))
            .mount(&server)
            .await;

        let client = client_for(&server).await;
        let profile = client.fetch_profile("tok").await.expect("fetch");
        assert!(profile.is_none());
    }

    #[tokio::test]
    async fn fetch_profile_parses_camel_case_body() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/profiles"))
            .respond_with(ResponseTemplate::new(200).set_body_string(
                r#"{"profile": {"userId": 7, "name": "Asha", "designation": "HR Lead", "companyName": "Acme"}}"#,
            ))
            .mount(&server)
            .await;

        let client = client_for(&server).await;
        let profile = client.fetch_profile("tok").await.expect("fetch").expect("present");

        assert_eq!(profile.user_id, Some(7));
        assert_eq!(profile.designation.as_deref(), Some("HR Lead"));
        assert_eq!(profile.company_name.as_deref(), Some("Acme"));
    }

    #[tokio::test]
    async fn fetch_profile_without_profile_key_is_none() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/profiles"))
            .respond_with(ResponseTemplate::new(200).set_body_string(r#"{"detail": "ok"}"#))
            .mount(&server)
            .await;

        let client = client_for(&server).await;
        let profile = client.fetch_profile("tok").await.expect("fetch");
        assert!(profile.is_none());
    }

    #[tokio::test]
    async fn expired_token_on_fetch_is_session_expired() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/profiles"))
            .respond_with(ResponseTemplate::new(401))
            .mount(&server)
            .await;

        let client = client_for(&server).await;
        let err = client.fetch_profile("stale").await.unwrap_err();
        assert!(err.is_session_expired());
    }

    #[tokio::test]
    async fn create_profile_without_image_sends_json() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/profiles/create"))
            .and(header("authorization", "Bearer tok"))
            .and(header("content-type", "application/json"))
            .and(body_string_contains(r#""designation":"Engineer""#))
            .and(body_string_contains(r#""gender":"male""#))
            .respond_with(ResponseTemplate::new(201))
            .expect(1)
            .mount(&server)
            .await;

        let draft = ProfileDraft {
            gender: Some(Gender::Male),
            designation: Some("Engineer".into()),
            ..ProfileDraft::default()
        };
        let payload = ProfilePayload::new(draft, None);

        let client = client_for(&server).await;
        client.create_profile("tok", &payload).await.expect("create");
    }

    #[tokio::test]
    async fn create_profile_with_image_sends_multipart() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/profiles/create"))
            .and(body_string_contains("name=\"designation\""))
            .and(body_string_contains("name=\"file\""))
            .and(body_string_contains("filename=\"avatar.png\""))
            .respond_with(ResponseTemplate::new(201))
            .expect(1)
            .mount(&server)
            .await;

        let draft = ProfileDraft {
            gender: Some(Gender::Female),
            designation: Some("HR Lead".into()),
            ..ProfileDraft::default()
        };
        let image = ImageUpload {
            file_name: "avatar.png".into(),
            content_type: "image/png".into(),
            bytes: b"png-bytes".to_vec(),
        };
        let payload = ProfilePayload::new(draft, Some(image));

        let client = client_for(&server).await;
        client.create_profile("tok", &payload).await.expect("create");

        let requests = server.received_requests().await.unwrap();
        let content_type = requests[0]
            .headers
            .get("content-type")
            .and_then(|v| v.to_str().ok())
            .unwrap_or_default();
        assert!(content_type.starts_with("multipart/form-data"), "got {content_type}");
    }

    #[tokio::test]
    async fn create_then_fetch_echoes_server_fields() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/profiles/create"))
            .respond_with(ResponseTemplate::new(201))
            .expect(1)
            .mount(&server)
            .await;
        Mock::given(method("GET"))
            .and(path("/profiles"))
            .respond_with(ResponseTemplate::new(200).set_body_string(
                r#"{"profile": {"userId": 7, "designation": "Engineer", "profileImage": "/avatars/male.png"}}"#,
            ))
            .expect(1)
            .mount(&server)
            .await;

        let draft = ProfileDraft {
            gender: Some(Gender::Male),
            designation: Some("Engineer".into()),
            ..ProfileDraft::default()
        };
        let client = client_for(&server).await;
        client.create_profile("tok", &ProfilePayload::new(draft, None)).await.expect("create");

        // Server-computed fields (id, resolved default avatar) come back on
        // the follow-up fetch.
        let profile = client.fetch_profile("tok").await.expect("fetch").expect("present");
        assert_eq!(profile.user_id, Some(7));
        assert_eq!(profile.profile_image.as_deref(), Some("/avatars/male.png"));
    }

    #[tokio::test]
    async fn update_profile_uses_put() {
        let server = MockServer::start().await;
        Mock::given(method("PUT"))
            .and(path("/profiles/update-profile"))
            .respond_with(ResponseTemplate::new(200))
            .expect(1)
            .mount(&server)
            .await;

        let payload = ProfilePayload::new(ProfileDraft::default(), None);
        let client = client_for(&server).await;
        client.update_profile("tok", &payload).await.expect("update");
    }

    #[tokio::test]
    async fn submit_feedback_posts_expected_body() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/feedback/add"))
            .and(header("authorization", "Bearer tok"))
            .and(body_string_contains(r#""rating":4"#))
            .and(body_string_contains(r#""feedback":"Great onboarding experience""#))
            .and(body_string_contains(r#""submittedAt":"#))
            .respond_with(ResponseTemplate::new(201))
            .expect(1)
            .mount(&server)
            .await;

        let client = client_for(&server).await;
        let feedback = NewFeedback::now(4, "Great onboarding experience");
        client.submit_feedback("tok", &feedback).await.expect("submit");
    }

    #[tokio::test]
    async fn duplicate_feedback_is_classified_as_conflict() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/feedback/add"))
            .respond_with(
                ResponseTemplate::new(409)
                    .set_body_string(r#"{"detail": "Feedback already exists"}"#),
            )
            .mount(&server)
            .await;

        let client = client_for(&server).await;
        let err = client.submit_feedback("tok", &NewFeedback::now(5, "text")).await.unwrap_err();
        assert_eq!(err.kind(), ErrorKind::DuplicateSubmission);
        assert_eq!(err.http_status(), Some(409));
    }

    #[tokio::test]
    async fn check_submission_parses_flag() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/feedback/check"))
            .respond_with(ResponseTemplate::new(200).set_body_string(r#"{"hasSubmitted": true}"#))
            .mount(&server)
            .await;

        let client = client_for(&server).await;
        assert!(client.check_submission("tok").await.expect("check"));
    }

    #[tokio::test]
    async fn view_testimonials_parses_page() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/feedback/view-feedback"))
            .respond_with(ResponseTemplate::new(200).set_body_string(
                r#"{"data": [{"userName": "Ravi", "rating": 5}], "rating_used": 4}"#,
            ))
            .mount(&server)
            .await;

        let client = client_for(&server).await;
        let page = client.view_testimonials("tok").await.expect("view");
        assert_eq!(page.data.len(), 1);
        assert_eq!(page.data[0].user_name.as_deref(), Some("Ravi"));
        assert_eq!(page.rating_used, Some(4));
    }

    #[tokio::test]
    async fn unparseable_success_body_is_malformed_response() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/feedback/check"))
            .respond_with(ResponseTemplate::new(200).set_body_string("<html>gateway</html>"))
            .mount(&server)
            .await;

        let client = client_for(&server).await;
        let err = client.check_submission("tok").await.unwrap_err();
        assert_eq!(err.kind(), ErrorKind::MalformedResponse);
        assert!(err.display_message().starts_with("Server returned invalid response"));
    }
}
