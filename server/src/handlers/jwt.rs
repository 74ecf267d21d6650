use std::time::Duration;

use chrono::Utc;
use jsonwebtoken::{decode, encode, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};

use crate::models::session::Session;

#[derive(Debug, Serialize, Deserialize)]
pub struct Claims {
    #[serde(flatten)]
    pub session: Session,
    pub iat: i64,
    pub exp: i64,
}

/// Signs `session` into the value stored in the session cookie.
pub fn issue_session_token(
    session: &Session,
    secret: &[u8],
    ttl: Duration,
) -> jsonwebtoken::errors::Result<String> {
    let iat = Utc::now().timestamp();
    let ttl = i64::try_from(ttl.as_secs()).unwrap_or(i64::MAX);

    let claims = Claims {
        session: session.clone(),
        iat,
        exp: iat.saturating_add(ttl),
    };
    encode(&Header::default(), &claims, &EncodingKey::from_secret(secret))
}

pub fn verify_session_token(token: &str, secret: &[u8]) -> jsonwebtoken::errors::Result<Session> {
    let data = decode::<Claims>(token, &DecodingKey::from_secret(secret), &Validation::default())?;
    Ok(data.claims.session)
}
