//! Cognito User Pool Adapter
//!
//! Speaks the Cognito Identity Provider json-1.1 wire protocol directly:
//! every operation is a POST to the regional endpoint with an
//! `x-amz-target` header naming the operation, and errors come back as
//! `{"__type": "...", "message": "..."}` bodies. Only the unauthenticated
//! app-client operations are used here, so no request signing is needed.

use std::collections::HashMap;
use std::time::Duration;

use base64::Engine as _;
use hmac::{Hmac, Mac};
use reqwest::StatusCode;
use reqwest::header::CONTENT_TYPE;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use sha2::Sha256;

use crate::domain::entity::pool_user::{PoolUser, UserAttribute};
use crate::domain::entity::tokens::AuthTokens;
use crate::domain::provider::{
    CodeDelivery, ProviderError, ProviderErrorKind, ProviderResult, SignUpOutcome, UserPool,
};
use crate::domain::value_object::{
    confirmation_code::ConfirmationCode, email::Email, user_sub::UserSub, username::Username,
};

type HmacSha256 = Hmac<Sha256>;

const AMZ_JSON: &str = "application/x-amz-json-1.1";
const TARGET_HEADER: &str = "x-amz-target";
const TARGET_PREFIX: &str = "AWSCognitoIdentityProviderService";

/// Connection settings for one user pool app client
#[derive(Debug, Clone)]
pub struct CognitoConfig {
    /// Pool home region, e.g. `us-east-1`
    pub region: String,
    /// Pool identifier, e.g. `us-east-1_AbCdEfGhI`. Not sent on the
    /// wire by these operations; kept so operators can tell pools apart.
    pub user_pool_id: String,
    /// App client id the screens authenticate as
    pub client_id: String,
    /// App client secret, when the client is confidential
    pub client_secret: Option<String>,
    /// Endpoint override for local emulators and tests
    pub endpoint: Option<String>,
    /// Per-request deadline
    pub timeout: Duration,
}

impl CognitoConfig {
    pub fn new(
        region: impl Into<String>,
        user_pool_id: impl Into<String>,
        client_id: impl Into<String>,
    ) -> Self {
        Self {
            region: region.into(),
            user_pool_id: user_pool_id.into(),
            client_id: client_id.into(),
            client_secret: None,
            endpoint: None,
            timeout: Duration::from_secs(10),
        }
    }

    /// Service URL every operation is POSTed to
    fn base_url(&self) -> String {
        match &self.endpoint {
            Some(endpoint) => endpoint.trim_end_matches('/').to_string(),
            None => format!("https://cognito-idp.{}.amazonaws.com", self.region),
        }
    }
}

/// HTTP client for the user pool API
#[derive(Clone)]
pub struct CognitoUserPool {
    config: CognitoConfig,
    http: reqwest::Client,
}

impl CognitoUserPool {
    pub fn new(config: CognitoConfig) -> Self {
        let http = reqwest::Client::builder()
            .timeout(config.timeout)
            .build()
            .expect("Failed to create HTTP client");

        Self { config, http }
    }

    /// `SECRET_HASH` for confidential app clients: HMAC-SHA256 of
    /// username + client id, keyed with the client secret, base64 encoded.
    /// `None` when the client has no secret.
    fn secret_hash(&self, username: &str) -> Option<String> {
        let secret = self.config.client_secret.as_deref()?;

        let mut mac = HmacSha256::new_from_slice(secret.as_bytes())
            .expect("HMAC can take key of any size");
        mac.update(username.as_bytes());
        mac.update(self.config.client_id.as_bytes());

        Some(base64::engine::general_purpose::STANDARD.encode(mac.finalize().into_bytes()))
    }

    /// Issue one operation against the pool and decode the reply
    async fn call<I, O>(&self, operation: &str, input: &I) -> ProviderResult<O>
    where
        I: Serialize,
        O: DeserializeOwned,
    {
        let body = serde_json::to_vec(input)
            .map_err(|e| ProviderError::Malformed(format!("encoding {operation} request: {e}")))?;

        let response = self
            .http
            .post(self.config.base_url())
            .header(CONTENT_TYPE, AMZ_JSON)
            .header(TARGET_HEADER, format!("{TARGET_PREFIX}.{operation}"))
            .body(body)
            .send()
            .await
            .map_err(|e| transport_error(operation, &e))?;

        let status = response.status();
        let bytes = response
            .bytes()
            .await
            .map_err(|e| transport_error(operation, &e))?;

        tracing::debug!(operation, status = status.as_u16(), "User pool replied");

        if !status.is_success() {
            return Err(parse_api_error(status, &bytes));
        }

        // Operations without response fields answer with an empty body.
        let body: &[u8] = if bytes.is_empty() { b"{}" } else { &bytes };

        serde_json::from_slice(body)
            .map_err(|e| ProviderError::Malformed(format!("decoding {operation} response: {e}")))
    }
}

fn transport_error(operation: &str, err: &reqwest::Error) -> ProviderError {
    if err.is_timeout() {
        ProviderError::Timeout(format!("{operation}: {err}"))
    } else {
        ProviderError::Transport(format!("{operation}: {err}"))
    }
}

/// Decode a non-2xx reply into a typed pool error
fn parse_api_error(status: StatusCode, body: &[u8]) -> ProviderError {
    #[derive(Deserialize)]
    struct ApiErrorBody {
        #[serde(rename = "__type")]
        type_name: Option<String>,
        #[serde(rename = "message", alias = "Message")]
        message: Option<String>,
    }

    match serde_json::from_slice::<ApiErrorBody>(body) {
        Ok(ApiErrorBody {
            type_name: Some(type_name),
            message,
        }) => ProviderError::Api {
            kind: ProviderErrorKind::from_type_name(&type_name),
            message: message.unwrap_or_else(|| status.to_string()),
            type_name,
        },
        _ => {
            let excerpt: String = String::from_utf8_lossy(body).chars().take(200).collect();
            ProviderError::Malformed(format!("status {status} with body: {excerpt}"))
        }
    }
}

// ============================================================================
// UserPool Implementation
// ============================================================================

impl UserPool for CognitoUserPool {
    async fn sign_up(
        &self,
        username: &Username,
        password: &str,
        email: &Email,
    ) -> ProviderResult<SignUpOutcome> {
        let reply: SignUpReply = self
            .call(
                "SignUp",
                &SignUpCall {
                    client_id: &self.config.client_id,
                    username: username.as_str(),
                    password,
                    user_attributes: vec![AttributeCall {
                        name: "email",
                        value: email.as_str(),
                    }],
                    secret_hash: self.secret_hash(username.as_str()),
                },
            )
            .await?;

        let user_sub = UserSub::new(reply.user_sub).map_err(|_| {
            ProviderError::Malformed("SignUp response carried an empty user id".to_string())
        })?;

        Ok(SignUpOutcome {
            user_sub,
            confirmed: reply.user_confirmed,
            code_delivery: reply.code_delivery_details.map(CodeDelivery::from),
        })
    }

    async fn confirm_sign_up(
        &self,
        username: &Username,
        code: &ConfirmationCode,
    ) -> ProviderResult<()> {
        let _: EmptyReply = self
            .call(
                "ConfirmSignUp",
                &ConfirmSignUpCall {
                    client_id: &self.config.client_id,
                    username: username.as_str(),
                    confirmation_code: code.as_str(),
                    secret_hash: self.secret_hash(username.as_str()),
                },
            )
            .await?;

        Ok(())
    }

    async fn resend_confirmation_code(&self, username: &Username) -> ProviderResult<CodeDelivery> {
        let reply: CodeDeliveryEnvelope = self
            .call(
                "ResendConfirmationCode",
                &CodeRequestCall {
                    client_id: &self.config.client_id,
                    username: username.as_str(),
                    secret_hash: self.secret_hash(username.as_str()),
                },
            )
            .await?;

        Ok(reply
            .code_delivery_details
            .map(CodeDelivery::from)
            .unwrap_or_default())
    }

    async fn initiate_auth(
        &self,
        username: &Username,
        password: &str,
    ) -> ProviderResult<AuthTokens> {
        let mut auth_parameters = HashMap::new();
        auth_parameters.insert("USERNAME", username.as_str().to_string());
        auth_parameters.insert("PASSWORD", password.to_string());
        if let Some(hash) = self.secret_hash(username.as_str()) {
            auth_parameters.insert("SECRET_HASH", hash);
        }

        let reply: InitiateAuthReply = self
            .call(
                "InitiateAuth",
                &InitiateAuthCall {
                    auth_flow: "USER_PASSWORD_AUTH",
                    client_id: &self.config.client_id,
                    auth_parameters,
                },
            )
            .await?;

        reply.into_tokens()
    }

    async fn refresh_auth(
        &self,
        refresh_token: &str,
        username: Option<&str>,
    ) -> ProviderResult<AuthTokens> {
        let mut auth_parameters = HashMap::new();
        auth_parameters.insert("REFRESH_TOKEN", refresh_token.to_string());
        // Confidential clients must send SECRET_HASH on refresh too,
        // computed over the username the tokens were issued for.
        if let Some(username) = username {
            if let Some(hash) = self.secret_hash(username) {
                auth_parameters.insert("SECRET_HASH", hash);
            }
        }

        let reply: InitiateAuthReply = self
            .call(
                "InitiateAuth",
                &InitiateAuthCall {
                    auth_flow: "REFRESH_TOKEN_AUTH",
                    client_id: &self.config.client_id,
                    auth_parameters,
                },
            )
            .await?;

        reply.into_tokens()
    }

    async fn forgot_password(&self, username: &Username) -> ProviderResult<CodeDelivery> {
        let reply: CodeDeliveryEnvelope = self
            .call(
                "ForgotPassword",
                &CodeRequestCall {
                    client_id: &self.config.client_id,
                    username: username.as_str(),
                    secret_hash: self.secret_hash(username.as_str()),
                },
            )
            .await?;

        Ok(reply
            .code_delivery_details
            .map(CodeDelivery::from)
            .unwrap_or_default())
    }

    async fn confirm_forgot_password(
        &self,
        username: &Username,
        code: &ConfirmationCode,
        new_password: &str,
    ) -> ProviderResult<()> {
        let _: EmptyReply = self
            .call(
                "ConfirmForgotPassword",
                &ConfirmForgotPasswordCall {
                    client_id: &self.config.client_id,
                    username: username.as_str(),
                    confirmation_code: code.as_str(),
                    password: new_password,
                    secret_hash: self.secret_hash(username.as_str()),
                },
            )
            .await?;

        Ok(())
    }

    async fn fetch_user(&self, access_token: &str) -> ProviderResult<PoolUser> {
        let reply: GetUserReply = self
            .call("GetUser", &AccessTokenCall { access_token })
            .await?;

        Ok(PoolUser {
            username: reply.username,
            attributes: reply
                .user_attributes
                .into_iter()
                .map(UserAttribute::from)
                .collect(),
        })
    }

    async fn global_sign_out(&self, access_token: &str) -> ProviderResult<()> {
        let _: EmptyReply = self
            .call("GlobalSignOut", &AccessTokenCall { access_token })
            .await?;

        Ok(())
    }

    async fn revoke_token(&self, refresh_token: &str) -> ProviderResult<()> {
        let _: EmptyReply = self
            .call(
                "RevokeToken",
                &RevokeTokenCall {
                    token: refresh_token,
                    client_id: &self.config.client_id,
                    client_secret: self.config.client_secret.as_deref(),
                },
            )
            .await?;

        Ok(())
    }
}

// ============================================================================
// Wire Format
// ============================================================================

#[derive(Serialize)]
#[serde(rename_all = "PascalCase")]
struct SignUpCall<'a> {
    client_id: &'a str,
    username: &'a str,
    password: &'a str,
    user_attributes: Vec<AttributeCall<'a>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    secret_hash: Option<String>,
}

#[derive(Serialize)]
#[serde(rename_all = "PascalCase")]
struct AttributeCall<'a> {
    name: &'a str,
    value: &'a str,
}

#[derive(Deserialize)]
#[serde(rename_all = "PascalCase")]
struct SignUpReply {
    user_sub: String,
    #[serde(default)]
    user_confirmed: bool,
    code_delivery_details: Option<CodeDeliveryReply>,
}

#[derive(Serialize)]
#[serde(rename_all = "PascalCase")]
struct ConfirmSignUpCall<'a> {
    client_id: &'a str,
    username: &'a str,
    confirmation_code: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    secret_hash: Option<String>,
}

/// Body shared by ResendConfirmationCode and ForgotPassword
#[derive(Serialize)]
#[serde(rename_all = "PascalCase")]
struct CodeRequestCall<'a> {
    client_id: &'a str,
    username: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    secret_hash: Option<String>,
}

#[derive(Serialize)]
#[serde(rename_all = "PascalCase")]
struct ConfirmForgotPasswordCall<'a> {
    client_id: &'a str,
    username: &'a str,
    confirmation_code: &'a str,
    password: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    secret_hash: Option<String>,
}

#[derive(Serialize)]
#[serde(rename_all = "PascalCase")]
struct InitiateAuthCall<'a> {
    auth_flow: &'a str,
    client_id: &'a str,
    auth_parameters: HashMap<&'static str, String>,
}

/// Body shared by GetUser and GlobalSignOut
#[derive(Serialize)]
#[serde(rename_all = "PascalCase")]
struct AccessTokenCall<'a> {
    access_token: &'a str,
}

#[derive(Serialize)]
#[serde(rename_all = "PascalCase")]
struct RevokeTokenCall<'a> {
    token: &'a str,
    client_id: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    client_secret: Option<&'a str>,
}

#[derive(Deserialize)]
#[serde(rename_all = "PascalCase")]
struct CodeDeliveryReply {
    destination: Option<String>,
    delivery_medium: Option<String>,
    attribute_name: Option<String>,
}

impl From<CodeDeliveryReply> for CodeDelivery {
    fn from(reply: CodeDeliveryReply) -> Self {
        Self {
            destination: reply.destination,
            medium: reply.delivery_medium,
            attribute_name: reply.attribute_name,
        }
    }
}

#[derive(Deserialize)]
#[serde(rename_all = "PascalCase")]
struct CodeDeliveryEnvelope {
    code_delivery_details: Option<CodeDeliveryReply>,
}

#[derive(Deserialize)]
#[serde(rename_all = "PascalCase")]
struct InitiateAuthReply {
    authentication_result: Option<AuthenticationResultReply>,
    challenge_name: Option<String>,
}

impl InitiateAuthReply {
    /// Challenge flows (MFA, forced password change) are not implemented
    /// by these screens; surface them as a typed error.
    fn into_tokens(self) -> ProviderResult<AuthTokens> {
        if let Some(challenge) = self.challenge_name {
            return Err(ProviderError::UnsupportedChallenge(challenge));
        }

        let result = self.authentication_result.ok_or_else(|| {
            ProviderError::Malformed(
                "auth response carried neither tokens nor a challenge".to_string(),
            )
        })?;

        Ok(AuthTokens {
            access_token: result.access_token,
            id_token: result.id_token,
            refresh_token: result.refresh_token,
            expires_in_secs: result.expires_in,
        })
    }
}

#[derive(Deserialize)]
#[serde(rename_all = "PascalCase")]
struct AuthenticationResultReply {
    access_token: String,
    id_token: Option<String>,
    refresh_token: Option<String>,
    expires_in: i64,
}

#[derive(Deserialize)]
#[serde(rename_all = "PascalCase")]
struct GetUserReply {
    username: String,
    #[serde(default)]
    user_attributes: Vec<AttributeReply>,
}

#[derive(Deserialize)]
#[serde(rename_all = "PascalCase")]
struct AttributeReply {
    name: String,
    value: String,
}

impl From<AttributeReply> for UserAttribute {
    fn from(reply: AttributeReply) -> Self {
        Self {
            name: reply.name,
            value: reply.value,
        }
    }
}

#[derive(Deserialize)]
struct EmptyReply {}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use wiremock::matchers::{body_partial_json, header, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn pool_at(uri: &str) -> CognitoUserPool {
        let mut config = CognitoConfig::new("us-east-1", "us-east-1_TestPool", "client123");
        config.endpoint = Some(uri.to_string());
        CognitoUserPool::new(config)
    }

    fn confidential_pool_at(uri: &str) -> CognitoUserPool {
        let mut config = CognitoConfig::new("us-east-1", "us-east-1_TestPool", "client123");
        config.endpoint = Some(uri.to_string());
        config.client_secret = Some("sekrit".to_string());
        CognitoUserPool::new(config)
    }

    fn username(s: &str) -> Username {
        Username::new(s).unwrap()
    }

    fn email(s: &str) -> Email {
        Email::new(s).unwrap()
    }

    fn code(s: &str) -> ConfirmationCode {
        ConfirmationCode::new(s).unwrap()
    }

    fn tokens_reply() -> serde_json::Value {
        json!({
            "AuthenticationResult": {
                "AccessToken": "access-abc",
                "IdToken": "id-abc",
                "RefreshToken": "refresh-abc",
                "ExpiresIn": 3600,
                "TokenType": "Bearer"
            },
            "ChallengeParameters": {}
        })
    }

    #[tokio::test]
    async fn test_sign_up_decodes_outcome() {
        let server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path("/"))
            .and(header("content-type", AMZ_JSON))
            .and(header(TARGET_HEADER, "AWSCognitoIdentityProviderService.SignUp"))
            .and(body_partial_json(json!({
                "ClientId": "client123",
                "Username": "user@example.com",
                "UserAttributes": [{"Name": "email", "Value": "user@example.com"}]
            })))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "UserSub": "sub-123",
                "UserConfirmed": false,
                "CodeDeliveryDetails": {
                    "Destination": "u***@e***.com",
                    "DeliveryMedium": "EMAIL",
                    "AttributeName": "email"
                }
            })))
            .expect(1)
            .mount(&server)
            .await;

        let pool = pool_at(&server.uri());
        let outcome = pool
            .sign_up(
                &username("user@example.com"),
                "Password123!",
                &email("user@example.com"),
            )
            .await
            .unwrap();

        assert_eq!(outcome.user_sub.as_str(), "sub-123");
        assert!(!outcome.confirmed);
        let delivery = outcome.code_delivery.unwrap();
        assert_eq!(delivery.destination.as_deref(), Some("u***@e***.com"));
        assert_eq!(delivery.medium.as_deref(), Some("EMAIL"));
    }

    #[tokio::test]
    async fn test_sign_up_duplicate_username() {
        let server = MockServer::start().await;

        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(400).set_body_json(json!({
                "__type": "UsernameExistsException",
                "message": "User already exists"
            })))
            .mount(&server)
            .await;

        let pool = pool_at(&server.uri());
        let err = pool
            .sign_up(
                &username("user@example.com"),
                "Password123!",
                &email("user@example.com"),
            )
            .await
            .unwrap_err();

        assert_eq!(err.kind(), Some(ProviderErrorKind::UsernameExists));
    }

    #[tokio::test]
    async fn test_error_type_namespace_stripped() {
        let server = MockServer::start().await;

        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(400).set_body_json(json!({
                "__type": "com.amazonaws.cognito#NotAuthorizedException",
                "message": "Incorrect username or password."
            })))
            .mount(&server)
            .await;

        let pool = pool_at(&server.uri());
        let err = pool
            .initiate_auth(&username("user@example.com"), "wrong")
            .await
            .unwrap_err();

        assert_eq!(err.kind(), Some(ProviderErrorKind::NotAuthorized));
    }

    #[tokio::test]
    async fn test_confirm_sign_up_accepts_empty_reply() {
        let server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(header(
                TARGET_HEADER,
                "AWSCognitoIdentityProviderService.ConfirmSignUp",
            ))
            .respond_with(ResponseTemplate::new(200))
            .expect(1)
            .mount(&server)
            .await;

        let pool = pool_at(&server.uri());
        let result = pool
            .confirm_sign_up(&username("user@example.com"), &code("123456"))
            .await;

        assert!(result.is_ok());
    }

    #[tokio::test]
    async fn test_initiate_auth_returns_tokens() {
        let server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(body_partial_json(json!({
                "AuthFlow": "USER_PASSWORD_AUTH",
                "ClientId": "client123",
                "AuthParameters": {
                    "USERNAME": "user@example.com",
                    "PASSWORD": "Password123!"
                }
            })))
            .respond_with(ResponseTemplate::new(200).set_body_json(tokens_reply()))
            .expect(1)
            .mount(&server)
            .await;

        let pool = pool_at(&server.uri());
        let tokens = pool
            .initiate_auth(&username("user@example.com"), "Password123!")
            .await
            .unwrap();

        assert_eq!(tokens.access_token, "access-abc");
        assert_eq!(tokens.refresh_token.as_deref(), Some("refresh-abc"));
        assert_eq!(tokens.expires_in_secs, 3600);
    }

    #[tokio::test]
    async fn test_initiate_auth_rejects_challenge() {
        let server = MockServer::start().await;

        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "ChallengeName": "SMS_MFA",
                "Session": "session-token",
                "ChallengeParameters": {}
            })))
            .mount(&server)
            .await;

        let pool = pool_at(&server.uri());
        let err = pool
            .initiate_auth(&username("user@example.com"), "Password123!")
            .await
            .unwrap_err();

        assert!(matches!(
            err,
            ProviderError::UnsupportedChallenge(ref c) if c == "SMS_MFA"
        ));
    }

    #[tokio::test]
    async fn test_initiate_auth_sends_secret_hash() {
        let server = MockServer::start().await;
        let pool = confidential_pool_at(&server.uri());
        let expected = pool.secret_hash("user@example.com").unwrap();

        Mock::given(method("POST"))
            .and(body_partial_json(json!({
                "AuthParameters": { "SECRET_HASH": expected }
            })))
            .respond_with(ResponseTemplate::new(200).set_body_json(tokens_reply()))
            .expect(1)
            .mount(&server)
            .await;

        let result = pool
            .initiate_auth(&username("user@example.com"), "Password123!")
            .await;

        assert!(result.is_ok());
    }

    #[tokio::test]
    async fn test_refresh_auth_uses_refresh_flow() {
        let server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(body_partial_json(json!({
                "AuthFlow": "REFRESH_TOKEN_AUTH",
                "AuthParameters": { "REFRESH_TOKEN": "refresh-abc" }
            })))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "AuthenticationResult": {
                    "AccessToken": "access-new",
                    "IdToken": "id-new",
                    "ExpiresIn": 3600
                }
            })))
            .expect(1)
            .mount(&server)
            .await;

        let pool = pool_at(&server.uri());
        let tokens = pool.refresh_auth("refresh-abc", None).await.unwrap();

        assert_eq!(tokens.access_token, "access-new");
        // Refresh replies omit the refresh token; the original stays valid.
        assert!(tokens.refresh_token.is_none());
    }

    #[tokio::test]
    async fn test_get_user_maps_attributes() {
        let server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(header(
                TARGET_HEADER,
                "AWSCognitoIdentityProviderService.GetUser",
            ))
            .and(body_partial_json(json!({ "AccessToken": "access-abc" })))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "Username": "user@example.com",
                "UserAttributes": [
                    {"Name": "sub", "Value": "sub-123"},
                    {"Name": "email", "Value": "user@example.com"},
                    {"Name": "email_verified", "Value": "true"}
                ]
            })))
            .mount(&server)
            .await;

        let pool = pool_at(&server.uri());
        let user = pool.fetch_user("access-abc").await.unwrap();

        assert_eq!(user.username, "user@example.com");
        assert_eq!(user.sub(), Some("sub-123"));
        assert!(user.email_verified());
    }

    #[tokio::test]
    async fn test_revoke_token_sends_client_secret() {
        let server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(body_partial_json(json!({
                "Token": "refresh-abc",
                "ClientId": "client123",
                "ClientSecret": "sekrit"
            })))
            .respond_with(ResponseTemplate::new(200))
            .expect(1)
            .mount(&server)
            .await;

        let pool = confidential_pool_at(&server.uri());
        let result = pool.revoke_token("refresh-abc").await;

        assert!(result.is_ok());
    }

    #[tokio::test]
    async fn test_unparseable_error_body() {
        let server = MockServer::start().await;

        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(500).set_body_string("Internal Server Error"))
            .mount(&server)
            .await;

        let pool = pool_at(&server.uri());
        let err = pool
            .forgot_password(&username("user@example.com"))
            .await
            .unwrap_err();

        assert!(matches!(err, ProviderError::Malformed(_)));
    }

    #[tokio::test]
    async fn test_unreachable_pool_is_transport_error() {
        let pool = pool_at("http://127.0.0.1:9");
        let err = pool
            .forgot_password(&username("user@example.com"))
            .await
            .unwrap_err();

        assert!(matches!(err, ProviderError::Transport(_)));
    }

    #[tokio::test]
    async fn test_slow_pool_times_out() {
        let server = MockServer::start().await;

        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(200).set_delay(Duration::from_millis(250)))
            .mount(&server)
            .await;

        let mut config = CognitoConfig::new("us-east-1", "us-east-1_TestPool", "client123");
        config.endpoint = Some(server.uri());
        config.timeout = Duration::from_millis(50);
        let pool = CognitoUserPool::new(config);

        let err = pool
            .forgot_password(&username("user@example.com"))
            .await
            .unwrap_err();

        assert!(matches!(err, ProviderError::Timeout(_)));
    }

    #[test]
    fn test_secret_hash_deterministic() {
        let pool = confidential_pool_at("http://localhost");

        let first = pool.secret_hash("alice@example.com").unwrap();
        let second = pool.secret_hash("alice@example.com").unwrap();
        let other = pool.secret_hash("bob@example.com").unwrap();

        assert_eq!(first, second);
        assert_ne!(first, other);

        // HMAC-SHA256 output is 32 bytes before encoding.
        let raw = base64::engine::general_purpose::STANDARD
            .decode(&first)
            .unwrap();
        assert_eq!(raw.len(), 32);
    }

    #[test]
    fn test_secret_hash_absent_without_secret() {
        let pool = pool_at("http://localhost");
        assert!(pool.secret_hash("alice@example.com").is_none());
    }

    #[test]
    fn test_default_endpoint_is_regional() {
        let config = CognitoConfig::new("ap-northeast-1", "pool", "client");
        assert_eq!(
            config.base_url(),
            "https://cognito-idp.ap-northeast-1.amazonaws.com"
        );
    }
}
