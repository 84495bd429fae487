use uuid::Uuid;

use crate::models::User;

pub async fn create<'e, E: sqlx::PgExecutor<'e>>(
    executor: E,
    tenant_id: Uuid,
    email: &str,
    password_hash: &str,
    full_name: Option<&str>,
    role: &str,
) -> Result<User, sqlx::Error> {
    sqlx::query_as::<_, User>(
        "INSERT INTO users (tenant_id, email, password_hash, full_name, role, preferences, is_active)
         VALUES ($1, $2, $3, $4, $5, $6, TRUE) RETURNING *",
    )
    .bind(tenant_id)
    .bind(email)
    .bind(password_hash)
    .bind(full_name)
    .bind(role)
    .bind(serde_json::json!({}))
    .fetch_one(executor)
    .await
}

/// Email lookup is global, not tenant-scoped: the register flow enforces one
/// account per email across the whole system.
pub async fn find_by_email<'e, E: sqlx::PgExecutor<'e>>(
    executor: E,
    email: &str,
) -> Result<Option<User>, sqlx::Error> {
    sqlx::query_as::<_, User>("SELECT * FROM users WHERE email = $1")
        .bind(email)
        .fetch_optional(executor)
        .await
}

pub async fn touch_last_login<'e, E: sqlx::PgExecutor<'e>>(
    executor: E,
    id: Uuid,
) -> Result<(), sqlx::Error> {
    sqlx::query("UPDATE users SET last_login_at = now() WHERE id = $1")
        .bind(id)
        .execute(executor)
        .await?;
    Ok(())
}
