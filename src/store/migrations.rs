use anyhow::{bail, Context, Result};
use rusqlite::Connection;

/// Ordered schema steps; slot N migrates the database to version N + 1.
const MIGRATIONS: &[&str] = &[include_str!("schemas/schema_v1.sql")];

pub fn run_migrations(conn: &mut Connection) -> Result<()> {
    let supported = MIGRATIONS.len() as i32;
    let version: i32 = conn
        .pragma_query_value(None, "user_version", |row| row.get(0))
        .context("failed to read user_version pragma")?;

    if version > supported {
        bail!("database version ({version}) is newer than supported schema ({supported})");
    }

    if version == supported {
        return Ok(());
    }

    let tx = conn
        .transaction()
        .context("failed to open migration transaction")?;

    for (index, sql) in MIGRATIONS.iter().enumerate().skip(version as usize) {
        tx.execute_batch(sql)
            .with_context(|| format!("migration to version {} failed", index + 1))?;
    }

    tx.pragma_update(None, "user_version", supported)
        .context("failed to update user_version pragma")?;
    tx.commit().context("failed to commit migrations")?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn schema_version(conn: &Connection) -> i32 {
        conn.pragma_query_value(None, "user_version", |row| row.get(0))
            .unwrap()
    }

    #[test]
    fn fresh_database_migrates_to_latest() {
        let mut conn = Connection::open_in_memory().unwrap();
        run_migrations(&mut conn).unwrap();
        assert_eq!(schema_version(&conn), MIGRATIONS.len() as i32);

        // Table exists and accepts a row.
        conn.execute(
            "INSERT INTO sleep_sessions (started_at, ended_at) VALUES ('a', 'a')",
            [],
        )
        .unwrap();
    }

    #[test]
    fn rerun_is_a_no_op() {
        let mut conn = Connection::open_in_memory().unwrap();
        run_migrations(&mut conn).unwrap();
        run_migrations(&mut conn).unwrap();
        assert_eq!(schema_version(&conn), MIGRATIONS.len() as i32);
    }

    #[test]
    fn refuses_database_from_a_newer_schema() {
        let mut conn = Connection::open_in_memory().unwrap();
        conn.pragma_update(None, "user_version", 99).unwrap();
        assert!(run_migrations(&mut conn).is_err());
    }
}
