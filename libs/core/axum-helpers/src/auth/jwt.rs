use super::config::JwtConfig;
use chrono::{Duration, Utc};
use jsonwebtoken::{Algorithm, DecodingKey, EncodingKey, Header, Validation, decode, encode};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

pub const ACCESS_TOKEN_TTL: i64 = 900; // 15 minutes
pub const REFRESH_TOKEN_TTL: i64 = 604800; // 7 days

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TokenType {
    Access,
    Refresh,
}

/// Claims carried by every token this service issues.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct JwtClaims {
    /// User id
    pub sub: String,
    pub username: String,
    pub email: String,
    pub token_type: TokenType,
    pub exp: i64,
    pub iat: i64,
    pub jti: String,
}

impl JwtClaims {
    pub fn user_id(&self) -> Option<Uuid> {
        Uuid::parse_str(&self.sub).ok()
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct TokenPair {
    pub access: String,
    pub refresh: String,
}

/// Issues and verifies HS256 tokens.
#[derive(Clone)]
pub struct JwtAuth {
    encoding: EncodingKey,
    decoding: DecodingKey,
}

impl JwtAuth {
    pub fn new(config: &JwtConfig) -> Self {
        Self {
            encoding: EncodingKey::from_secret(config.secret.as_bytes()),
            decoding: DecodingKey::from_secret(config.secret.as_bytes()),
        }
    }

    pub fn create_token_pair(
        &self,
        user_id: Uuid,
        username: &str,
        email: &str,
    ) -> eyre::Result<TokenPair> {
        Ok(TokenPair {
            access: self.create_token(user_id, username, email, TokenType::Access)?,
            refresh: self.create_token(user_id, username, email, TokenType::Refresh)?,
        })
    }

    pub fn create_token(
        &self,
        user_id: Uuid,
        username: &str,
        email: &str,
        token_type: TokenType,
    ) -> eyre::Result<String> {
        let ttl = match token_type {
            TokenType::Access => ACCESS_TOKEN_TTL,
            TokenType::Refresh => REFRESH_TOKEN_TTL,
        };
        let now = Utc::now();

        let claims = JwtClaims {
            sub: user_id.to_string(),
            username: username.to_string(),
            email: email.to_string(),
            token_type,
            exp: (now + Duration::seconds(ttl)).timestamp(),
            iat: now.timestamp(),
            jti: Uuid::new_v4().to_string(),
        };

        let token = encode(&Header::new(Algorithm::HS256), &claims, &self.encoding)?;
        Ok(token)
    }

    /// Verify signature and expiry and decode the claims.
    pub fn verify_token(&self, token: &str) -> eyre::Result<JwtClaims> {
        let data = decode::<JwtClaims>(token, &self.decoding, &Validation::new(Algorithm::HS256))?;
        Ok(data.claims)
    }

    /// Like [`verify_token`](Self::verify_token) but also checks the token type.
    pub fn verify_typed(&self, token: &str, expected: TokenType) -> eyre::Result<JwtClaims> {
        let claims = self.verify_token(token)?;
        if claims.token_type != expected {
            eyre::bail!("expected {:?} token, got {:?}", expected, claims.token_type);
        }
        Ok(claims)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn auth() -> JwtAuth {
        JwtAuth::new(&JwtConfig::new("test-secret-that-is-long-enough-for-hs256").unwrap())
    }

    #[test]
    fn access_token_round_trips_identity() {
        let auth = auth();
        let user_id = Uuid::now_v7();
        let token = auth
            .create_token(user_id, "mosh", "mosh@example.com", TokenType::Access)
            .unwrap();

        let claims = auth.verify_token(&token).unwrap();
        assert_eq!(claims.user_id(), Some(user_id));
        assert_eq!(claims.username, "mosh");
        assert_eq!(claims.token_type, TokenType::Access);
        assert_eq!(claims.exp - claims.iat, ACCESS_TOKEN_TTL);
    }

    #[test]
    fn refresh_token_is_not_an_access_token() {
        let auth = auth();
        let pair = auth
            .create_token_pair(Uuid::now_v7(), "mosh", "mosh@example.com")
            .unwrap();

        assert!(auth.verify_typed(&pair.refresh, TokenType::Access).is_err());
        assert!(auth.verify_typed(&pair.refresh, TokenType::Refresh).is_ok());
        assert!(auth.verify_typed(&pair.access, TokenType::Access).is_ok());
    }

    #[test]
    fn token_signed_with_other_secret_is_rejected() {
        let other = JwtAuth::new(&JwtConfig::new("another-secret-that-is-long-enough-too").unwrap());
        let token = other
            .create_token(Uuid::now_v7(), "a", "a@example.com", TokenType::Access)
            .unwrap();

        assert!(auth().verify_token(&token).is_err());
    }

    #[test]
    fn garbage_is_rejected() {
        assert!(auth().verify_token("not.a.jwt").is_err());
    }
}
