use chrono::{Duration, Utc};
use jsonwebtoken::{
    decode, encode, errors::ErrorKind, Algorithm, DecodingKey, EncodingKey, Header, Validation,
};
use secrecy::ExposeSecret;
use serde::{Deserialize, Serialize};

use crate::config::JwtConfig;
use crate::models::Account;
use crate::services::ServiceError;

/// Request header carrying the account access token. The create-account
/// response returns a freshly issued token under the same name.
pub const ACCESS_TOKEN_HEADER: &str = "x-jwt-token";

/// Only the HMAC family is verifiable with a shared secret; anything else in
/// the token header is rejected before the signature is looked at.
const ACCEPTED_ALGORITHMS: [Algorithm; 3] = [Algorithm::HS256, Algorithm::HS384, Algorithm::HS512];

/// Claims carried by an account access token.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AccountClaims {
    /// Identity number of the account the bearer may act on
    #[serde(rename = "accountNumber")]
    pub account_number: i64,
    /// Issued at (Unix timestamp)
    pub iat: i64,
    /// Expiration time (Unix timestamp)
    pub exp: i64,
}

/// Issues and validates HS256 account access tokens.
///
/// Keys are derived once from the configured secret; the service is cheap to
/// clone and holds no mutable state.
#[derive(Clone)]
pub struct JwtService {
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    token_ttl_minutes: i64,
    enforce_expiry: bool,
}

impl JwtService {
    /// Create the service, refusing an empty secret or a non-positive TTL.
    pub fn new(config: &JwtConfig) -> Result<Self, ServiceError> {
        let secret = config.secret.expose_secret();
        if secret.trim().is_empty() {
            return Err(ServiceError::Configuration(
                "JWT_SECRET must not be empty".to_string(),
            ));
        }

        if config.token_ttl_minutes <= 0 {
            return Err(ServiceError::Configuration(
                "JWT_TOKEN_TTL_MINUTES must be positive".to_string(),
            ));
        }

        tracing::info!(
            token_ttl_minutes = config.token_ttl_minutes,
            enforce_expiry = config.enforce_expiry,
            "JWT service initialized with HMAC secret"
        );

        Ok(Self {
            encoding_key: EncodingKey::from_secret(secret.as_bytes()),
            decoding_key: DecodingKey::from_secret(secret.as_bytes()),
            token_ttl_minutes: config.token_ttl_minutes,
            enforce_expiry: config.enforce_expiry,
        })
    }

    /// Mint a token asserting the account's identity number, valid for the
    /// configured TTL from now.
    pub fn issue_token(&self, account: &Account) -> Result<String, ServiceError> {
        let now = Utc::now();
        let exp = now + Duration::minutes(self.token_ttl_minutes);

        let claims = AccountClaims {
            account_number: account.number,
            iat: now.timestamp(),
            exp: exp.timestamp(),
        };

        encode(&Header::new(Algorithm::HS256), &claims, &self.encoding_key)
            .map_err(ServiceError::Signing)
    }

    /// Verify signature, algorithm family and (when enforced) expiry.
    pub fn validate_token(&self, token: &str) -> Result<AccountClaims, ServiceError> {
        let mut validation = Validation::new(Algorithm::HS256);
        validation.algorithms = ACCEPTED_ALGORITHMS.to_vec();
        validation.validate_exp = self.enforce_expiry;
        // No grace window past `exp`
        validation.leeway = 0;

        decode::<AccountClaims>(token, &self.decoding_key, &validation)
            .map(|data| data.claims)
            .map_err(|e| match e.kind() {
                ErrorKind::ExpiredSignature => ServiceError::TokenExpired,
                _ => ServiceError::InvalidToken(e),
            })
    }

}
