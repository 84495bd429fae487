pub mod tenants;
pub mod users;

/// True when the error is the database rejecting a duplicate key, as opposed
/// to any other failure. Flows use this to turn a lost resolve-or-create race
/// into a re-read instead of a 500.
pub fn is_unique_violation(err: &sqlx::Error) -> bool {
    match err {
        sqlx::Error::Database(db_err) => db_err.is_unique_violation(),
        _ => false,
    }
}
