use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::Acquire;
use uuid::Uuid;

use crate::auth::jwt::{encode_token, Claims};
use crate::auth::password;
use crate::db;
use crate::error::AppError;
use crate::models::{Tenant, User};
use crate::slug::slugify;
use crate::state::SharedState;

#[derive(Deserialize)]
pub struct RegisterRequest {
    pub email: String,
    pub password: String,
    pub full_name: Option<String>,
    /// Supplying a tenant name makes the registrant the admin of that tenant,
    /// creating it if the slug is unclaimed.
    pub tenant_name: Option<String>,
}

#[derive(Deserialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

/// Public projection of a user record. The password hash never leaves the
/// model layer.
#[derive(Serialize)]
pub struct UserResponse {
    pub id: Uuid,
    pub email: String,
    pub full_name: Option<String>,
    pub tenant_id: Uuid,
    pub role: String,
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
}

impl From<User> for UserResponse {
    fn from(user: User) -> Self {
        Self {
            id: user.id,
            email: user.email,
            full_name: user.full_name,
            tenant_id: user.tenant_id,
            role: user.role,
            is_active: user.is_active,
            created_at: user.created_at,
        }
    }
}

#[derive(Serialize)]
pub struct TokenResponse {
    pub access_token: String,
    pub token_type: String,
}

pub async fn register(
    State(state): State<SharedState>,
    Json(req): Json<RegisterRequest>,
) -> Result<(StatusCode, Json<UserResponse>), AppError> {
    // One transaction per request; every early return drops it unrolled.
    let mut tx = state.pool.begin().await?;

    // Email uniqueness is global, not per-tenant.
    if db::users::find_by_email(&mut *tx, &req.email).await?.is_some() {
        return Err(AppError::BadRequest("Email already registered".to_string()));
    }

    let (tenant, role) = match req.tenant_name.as_deref() {
        Some(name) => (resolve_or_create_tenant(&mut tx, name).await?, "admin"),
        None => {
            let tenant = db::tenants::find_demo(&mut *tx)
                .await?
                .ok_or_else(|| AppError::Misconfigured("Default tenant not found".to_string()))?;
            (tenant, "user")
        }
    };

    let pw_hash = password::hash(&req.password).map_err(AppError::Internal)?;

    let user = db::users::create(
        &mut *tx,
        tenant.id,
        &req.email,
        &pw_hash,
        req.full_name.as_deref(),
        role,
    )
    .await?;

    tx.commit().await?;

    tracing::info!("Registered user {} in tenant {}", user.id, tenant.id);

    Ok((StatusCode::CREATED, Json(user.into())))
}

/// Resolve a tenant by the slug of `name`, creating it when no tenant has
/// claimed that slug yet. Slugs are claimed first-come: a later registrant
/// whose name normalizes to an existing slug silently joins that tenant.
///
/// The create runs under a savepoint so that losing the concurrent
/// resolve-or-create race leaves the outer transaction usable for the
/// re-read of the winner's row.
async fn resolve_or_create_tenant(
    tx: &mut sqlx::Transaction<'_, sqlx::Postgres>,
    name: &str,
) -> Result<Tenant, AppError> {
    let slug = slugify(name);

    if let Some(existing) = db::tenants::find_by_slug(&mut **tx, &slug).await? {
        return Ok(existing);
    }

    let mut sp = tx.begin().await?;
    match db::tenants::create(&mut *sp, name, &slug).await {
        Ok(tenant) => {
            sp.commit().await?;
            Ok(tenant)
        }
        Err(err) if db::is_unique_violation(&err) => {
            sp.rollback().await?;
            db::tenants::find_by_slug(&mut **tx, &slug)
                .await?
                .ok_or_else(|| {
                    AppError::Internal(format!("Tenant slug '{slug}' gone after conflict"))
                })
        }
        Err(err) => Err(err.into()),
    }
}

pub async fn login(
    State(state): State<SharedState>,
    Json(req): Json<LoginRequest>,
) -> Result<Json<TokenResponse>, AppError> {
    let mut tx = state.pool.begin().await?;

    // Unknown email and wrong password must be indistinguishable to the caller.
    let user = db::users::find_by_email(&mut *tx, &req.email)
        .await?
        .ok_or_else(|| AppError::Unauthorized("Incorrect email or password".to_string()))?;

    let valid = password::verify(&req.password, &user.password_hash).map_err(AppError::Internal)?;
    if !valid {
        return Err(AppError::Unauthorized(
            "Incorrect email or password".to_string(),
        ));
    }

    if !user.is_active {
        return Err(AppError::Forbidden("User account is inactive".to_string()));
    }

    db::users::touch_last_login(&mut *tx, user.id).await?;
    tx.commit().await?;

    let claims = Claims::new(&user, state.config.token_expire_minutes);
    let access_token =
        encode_token(&claims, &state.config.jwt_secret).map_err(AppError::Internal)?;

    tracing::info!("User logged in: {}", user.id);

    Ok(Json(TokenResponse {
        access_token,
        token_type: "bearer".to_string(),
    }))
}

/// Deliberate stub: bearer-token verification has no extractor yet, so this
/// reports 501 no matter what the request carries.
pub async fn me() -> AppError {
    AppError::Unimplemented("Authentication dependency not yet implemented".to_string())
}
