use crate::models::Tenant;

pub const DEMO_SLUG: &str = "demo";

pub async fn create<'e, E: sqlx::PgExecutor<'e>>(
    executor: E,
    name: &str,
    slug: &str,
) -> Result<Tenant, sqlx::Error> {
    sqlx::query_as::<_, Tenant>(
        "INSERT INTO tenants (name, slug, plan_type, settings, is_active)
         VALUES ($1, $2, 'free', $3, TRUE) RETURNING *",
    )
    .bind(name)
    .bind(slug)
    .bind(serde_json::json!({}))
    .fetch_one(executor)
    .await
}

pub async fn find_by_slug<'e, E: sqlx::PgExecutor<'e>>(
    executor: E,
    slug: &str,
) -> Result<Option<Tenant>, sqlx::Error> {
    sqlx::query_as::<_, Tenant>("SELECT * FROM tenants WHERE slug = $1")
        .bind(slug)
        .fetch_optional(executor)
        .await
}

/// The pre-seeded default tenant for users who register without an
/// organization of their own. Seeding happens outside the application.
pub async fn find_demo<'e, E: sqlx::PgExecutor<'e>>(
    executor: E,
) -> Result<Option<Tenant>, sqlx::Error> {
    find_by_slug(executor, DEMO_SLUG).await
}
