//! Shared query helpers

use sqlx::{Postgres, Transaction};
use uuid::Uuid;

/// Largest page an admin listing may request
pub const MAX_PAGE_SIZE: i64 = 100;

/// Clamp caller-supplied paging to sane bounds
pub fn page_bounds(limit: i64, offset: i64) -> (i64, i64) {
    (limit.clamp(1, MAX_PAGE_SIZE), offset.max(0))
}

/// `%term%` for ILIKE with `%`, `_` and `\` escaped; blank terms become `None`
pub fn like_pattern(term: Option<&str>) -> Option<String> {
    let term = term.map(str::trim).filter(|t| !t.is_empty())?;
    let mut pattern = String::with_capacity(term.len() + 2);
    pattern.push('%');
    for ch in term.chars() {
        if matches!(ch, '%' | '_' | '\\') {
            pattern.push('\\');
        }
        pattern.push(ch);
    }
    pattern.push('%');
    Some(pattern)
}

/// Serialize writers of a single-active table for the rest of the transaction
pub async fn lock_singleton(
    tx: &mut Transaction<'_, Postgres>,
    table: &'static str,
) -> Result<(), sqlx::Error> {
    sqlx::query("SELECT pg_advisory_xact_lock(hashtext($1))")
        .bind(table)
        .execute(&mut **tx)
        .await?;
    Ok(())
}

/// Deactivate every active row of `table` except `keep`
pub async fn deactivate_others(
    tx: &mut Transaction<'_, Postgres>,
    table: &'static str,
    keep: Uuid,
) -> Result<u64, sqlx::Error> {
    let sql = format!("UPDATE {table} SET is_active = FALSE WHERE id <> $1 AND is_active");
    let result = sqlx::query(&sql).bind(keep).execute(&mut **tx).await?;
    Ok(result.rows_affected())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_page_bounds() {
        assert_eq!(page_bounds(0, -5), (1, 0));
        assert_eq!(page_bounds(20, 40), (20, 40));
        assert_eq!(page_bounds(1000, 0), (MAX_PAGE_SIZE, 0));
    }

    #[test]
    fn test_like_pattern_escapes_wildcards() {
        assert_eq!(like_pattern(Some("вывеска")).unwrap(), "%вывеска%");
        assert_eq!(like_pattern(Some("100%_")).unwrap(), "%100\\%\\_%");
        assert_eq!(like_pattern(Some("  ")), None);
        assert_eq!(like_pattern(None), None);
    }
}
