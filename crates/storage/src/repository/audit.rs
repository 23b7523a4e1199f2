use sqlx::PgConnection;

use crate::error::Result;
use crate::models::AuditEntry;

/// Append one audit row. Callers run this inside the same transaction as
/// the mutation being recorded, so a failed write rolls back both.
pub async fn record(conn: &mut PgConnection, entry: &AuditEntry) -> Result<()> {
    sqlx::query(
        r#"
        INSERT INTO audit_trail (table_name, record_id, action, actor_id, changes)
        VALUES ($1, $2, $3, $4, $5)
        "#,
    )
    .bind(entry.table_name)
    .bind(entry.record_id)
    .bind(entry.action.as_str())
    .bind(entry.actor_id)
    .bind(&entry.changes)
    .execute(conn)
    .await?;

    Ok(())
}
