use jsonwebtoken::{decode, errors::Error as JwtError, DecodingKey, Validation};

use crate::auth::types::{AuthenticatedUser, Claims};
use crate::config::AppConfig;

/// Checks the HS256 bearer tokens that identify staff members.
/// Tokens are issued by the login service that shares `JWT_SECRET`.
#[derive(Clone)]
pub struct JwtService {
    decoding_key: DecodingKey,
}

impl JwtService {
    pub fn new(secret: &str) -> Self {
        Self {
            decoding_key: DecodingKey::from_secret(secret.as_bytes()),
        }
    }

    pub fn from_config(config: &AppConfig) -> Self {
        Self::new(&config.jwt_secret)
    }

    /// Resolve a bearer token to the staff member it was issued for.
    pub fn authenticate(&self, token: &str) -> Result<AuthenticatedUser, JwtError> {
        let token_data = decode::<Claims>(token, &self.decoding_key, &Validation::default())?;
        Ok(token_data.claims.into())
    }
}

#[cfg(test)]
mod tests {
    use chrono::{Duration, Utc};
    use jsonwebtoken::{encode, EncodingKey, Header};

    use super::*;

    fn token_for(secret: &str, staff_id: i32, email: &str, ttl: Duration) -> String {
        let now = Utc::now();
        let claims = Claims {
            sub: staff_id,
            email: email.to_string(),
            exp: (now + ttl).timestamp(),
            iat: now.timestamp(),
        };
        encode(&Header::default(), &claims, &EncodingKey::from_secret(secret.as_bytes())).unwrap()
    }

    #[test]
    fn token_resolves_to_same_staff_member() {
        let token = token_for("test-secret", 7, "staff@example.com", Duration::hours(1));
        let user = JwtService::new("test-secret").authenticate(&token).unwrap();
        assert_eq!(user.id, 7);
        assert_eq!(user.email, "staff@example.com");
    }

    #[test]
    fn token_signed_with_other_secret_is_rejected() {
        let token = token_for("one", 1, "a@b.c", Duration::hours(1));
        assert!(JwtService::new("two").authenticate(&token).is_err());
    }

    #[test]
    fn expired_token_is_rejected() {
        let token = token_for("test-secret", 3, "late@example.com", Duration::hours(-2));
        assert!(JwtService::new("test-secret").authenticate(&token).is_err());
    }
}
