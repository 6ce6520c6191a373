mod schema;

use anyhow::{Context, Result};
use rusqlite::{params, Connection, OptionalExtension};
#[cfg(test)]
use std::{cell::Cell, collections::HashMap, rc::Rc};
use std::path::Path;

pub(crate) const KEY_TRANSACTIONS: &str = "transactions";
pub(crate) const KEY_BUDGETS: &str = "budgets";
pub(crate) const KEY_THEME: &str = "theme";

/// Persistent key-value payload store. Values are serialized JSON documents.
pub(crate) trait Storage {
    fn get(&self, key: &str) -> rusqlite::Result<Option<String>>;

    fn set(&mut self, key: &str, value: &str) -> rusqlite::Result<()>;

    /// Write several keys as one unit.
    fn set_many(&mut self, entries: &[(&str, String)]) -> rusqlite::Result<()> {
        for (key, value) in entries {
            self.set(key, value)?;
        }
        Ok(())
    }
}

pub(crate) struct Database {
    conn: Connection,
}

impl Database {
    pub(crate) fn open(path: &Path) -> Result<Self> {
        let conn = Connection::open(path)
            .with_context(|| format!("Failed to open database: {}", path.display()))?;
        conn.execute_batch("PRAGMA journal_mode=WAL;")
            .context("Failed to set database pragmas")?;
        let mut db = Self { conn };
        db.migrate().context("Database migration failed")?;
        Ok(db)
    }

    #[cfg(test)]
    pub(crate) fn open_in_memory() -> Result<Self> {
        let conn = Connection::open_in_memory()?;
        let mut db = Self { conn };
        db.migrate()?;
        Ok(db)
    }

    fn migrate(&mut self) -> Result<()> {
        let has_version_table: bool = self.conn.query_row(
            "SELECT EXISTS(SELECT 1 FROM sqlite_master WHERE type='table' AND name='schema_version')",
            [],
            |row| row.get(0),
        )?;

        if !has_version_table {
            self.conn.execute_batch(schema::SCHEMA_V1)?;
            self.conn.execute(
                "INSERT INTO schema_version (version) VALUES (?1)",
                params![schema::CURRENT_VERSION],
            )?;
            tracing::debug!(version = schema::CURRENT_VERSION, "created fresh schema");
            return Ok(());
        }

        let current: i32 = self
            .conn
            .query_row("SELECT version FROM schema_version LIMIT 1", [], |row| {
                row.get(0)
            })
            .unwrap_or(0);

        for &(from_version, sql) in schema::MIGRATIONS {
            if current <= from_version {
                self.conn.execute_batch(sql)?;
            }
        }

        if current < schema::CURRENT_VERSION {
            self.conn.execute(
                "UPDATE schema_version SET version = ?1",
                params![schema::CURRENT_VERSION],
            )?;
            tracing::info!(
                from = current,
                to = schema::CURRENT_VERSION,
                "migrated schema"
            );
        }

        Ok(())
    }
}

fn upsert(conn: &Connection, key: &str, value: &str) -> rusqlite::Result<()> {
    conn.execute(
        "INSERT INTO kv (key, value, updated_at) VALUES (?1, ?2, ?3)
         ON CONFLICT(key) DO UPDATE SET value = ?2, updated_at = ?3",
        params![key, value, chrono::Utc::now().to_rfc3339()],
    )?;
    Ok(())
}

impl Storage for Database {
    fn get(&self, key: &str) -> rusqlite::Result<Option<String>> {
        self.conn
            .query_row("SELECT value FROM kv WHERE key = ?1", params![key], |row| {
                row.get(0)
            })
            .optional()
    }

    fn set(&mut self, key: &str, value: &str) -> rusqlite::Result<()> {
        upsert(&self.conn, key, value)
    }

    fn set_many(&mut self, entries: &[(&str, String)]) -> rusqlite::Result<()> {
        let tx = self.conn.transaction()?;
        for (key, value) in entries {
            upsert(&tx, key, value)?;
        }
        tx.commit()
    }
}

/// In-process storage with no backing file.
#[cfg(test)]
#[derive(Debug, Default, Clone)]
pub(crate) struct MemoryStorage {
    entries: HashMap<String, String>,
    /// While set, every write fails.
    fail_writes: Rc<Cell<bool>>,
}

#[cfg(test)]
impl MemoryStorage {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    pub(crate) fn with_entry(mut self, key: &str, value: &str) -> Self {
        self.entries.insert(key.to_string(), value.to_string());
        self
    }

    /// Handle that keeps controlling write failures after the storage is boxed.
    pub(crate) fn fail_switch(&self) -> Rc<Cell<bool>> {
        Rc::clone(&self.fail_writes)
    }
}

#[cfg(test)]
impl Storage for MemoryStorage {
    fn get(&self, key: &str) -> rusqlite::Result<Option<String>> {
        Ok(self.entries.get(key).cloned())
    }

    fn set(&mut self, key: &str, value: &str) -> rusqlite::Result<()> {
        if self.fail_writes.get() {
            return Err(rusqlite::Error::InvalidQuery);
        }
        self.entries.insert(key.to_string(), value.to_string());
        Ok(())
    }
}

#[cfg(test)]
mod tests;
