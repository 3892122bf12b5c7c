use crate::config::JwtProperties;
use crate::error::{AppError, AppResult};
use crate::models::{Claims, CurrentEmployee};
use actix_web::{dev::ServiceRequest, web, Error, HttpMessage};
use actix_web_httpauth::extractors::bearer::BearerAuth;
use jsonwebtoken::{decode, encode, DecodingKey, EncodingKey, Header, Validation};
use serde_json::{Map, Value};

/// Claim key holding the employee id in admin tokens.
pub const EMP_ID: &str = "empId";

/// Signs `claims` with HS256. The token expires `ttl_millis` from now.
pub fn create_jwt(secret: &str, ttl_millis: i64, claims: Map<String, Value>) -> AppResult<String> {
    let expiration = chrono::Utc::now()
        .checked_add_signed(chrono::Duration::milliseconds(ttl_millis))
        .ok_or_else(|| AppError::Internal("token expiry out of range".to_string()))?
        .timestamp() as usize;

    let claims = Claims {
        claims,
        exp: expiration,
    };

    Ok(encode(
        &Header::default(),
        &claims,
        &EncodingKey::from_secret(secret.as_ref()),
    )?)
}

pub fn parse_jwt(secret: &str, token: &str) -> Result<Claims, jsonwebtoken::errors::Error> {
    decode::<Claims>(
        token,
        &DecodingKey::from_secret(secret.as_ref()),
        &Validation::default(),
    )
    .map(|data| data.claims)
}

pub fn employee_claims(emp_id: i64) -> Map<String, Value> {
    let mut claims = Map::new();
    claims.insert(EMP_ID.to_string(), Value::from(emp_id));
    claims
}

/// Mints admin tokens. Only called once an employee has authenticated.
pub trait TokenIssuer: Send + Sync {
    fn issue(&self, emp_id: i64) -> AppResult<String>;
}

pub struct JwtTokenIssuer {
    jwt: JwtProperties,
}

impl JwtTokenIssuer {
    pub fn new(jwt: JwtProperties) -> Self {
        Self { jwt }
    }
}

impl TokenIssuer for JwtTokenIssuer {
    fn issue(&self, emp_id: i64) -> AppResult<String> {
        create_jwt(
            &self.jwt.admin_secret_key,
            self.jwt.admin_ttl,
            employee_claims(emp_id),
        )
    }
}

/// Bearer guard for admin routes. Attaches the token's employee id to the request.
pub async fn validator(
    req: ServiceRequest,
    credentials: Option<BearerAuth>,
) -> Result<ServiceRequest, (Error, ServiceRequest)> {
    let Some(credentials) = credentials else {
        tracing::warn!(path = %req.path(), "missing admin token");
        return Err((AppError::NotLoggedIn.into(), req));
    };

    let secret = match req.app_data::<web::Data<JwtProperties>>() {
        Some(jwt) => jwt.admin_secret_key.clone(),
        None => {
            let err = AppError::Internal("jwt properties are not configured".to_string());
            return Err((err.into(), req));
        }
    };

    let emp_id = match parse_jwt(&secret, credentials.token()) {
        Ok(claims) => claims.claims.get(EMP_ID).and_then(Value::as_i64),
        Err(err) => {
            tracing::warn!(path = %req.path(), error = %err, "rejected admin token");
            None
        }
    };

    match emp_id {
        Some(id) => {
            tracing::debug!(emp_id = id, "admin token accepted");
            req.extensions_mut().insert(CurrentEmployee(id));
            Ok(req)
        }
        None => Err((AppError::NotLoggedIn.into(), req)),
    }
}
