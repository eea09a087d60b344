//! Durable local backup for the reply (key-value store).

use std::path::Path;
use std::sync::{Arc, Mutex};

use chrono::Utc;
use rusqlite::{params, Connection, Result as SqliteResult};

/// Storage key for the reply text.
pub const REPLY_KEY: &str = "purvaReply";
/// Storage key for the capture timestamp (ISO-8601).
pub const TIMESTAMP_KEY: &str = "replyTimestamp";

/// Key-value store backing the reply backup. Survives restarts; the one
/// piece of state in the system that does.
#[derive(Clone)]
pub struct ReplyStore {
    conn: Arc<Mutex<Connection>>,
}

impl ReplyStore {
    /// Open (or create) the store at the given path.
    pub fn open(path: &Path) -> anyhow::Result<Self> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let conn = Connection::open(path)?;
        Self::init(conn)
    }

    /// In-memory store for tests.
    pub fn in_memory() -> anyhow::Result<Self> {
        Self::init(Connection::open_in_memory()?)
    }

    fn init(conn: Connection) -> anyhow::Result<Self> {
        conn.execute(
            "CREATE TABLE IF NOT EXISTS app_state (
                key TEXT PRIMARY KEY,
                value TEXT NOT NULL,
                updated_at TEXT NOT NULL
            )",
            [],
        )?;
        Ok(Self {
            conn: Arc::new(Mutex::new(conn)),
        })
    }

    /// Set a value (insert or update)
    pub fn set(&self, key: &str, value: &str) -> SqliteResult<()> {
        let conn = self.conn.lock().unwrap();
        conn.execute(
            "INSERT INTO app_state (key, value, updated_at)
             VALUES (?1, ?2, ?3)
             ON CONFLICT(key) DO UPDATE SET value = ?2, updated_at = ?3",
            params![key, value, Utc::now().to_rfc3339()],
        )?;
        Ok(())
    }

    /// Get a value by key
    pub fn get(&self, key: &str) -> SqliteResult<Option<String>> {
        let conn = self.conn.lock().unwrap();
        let mut stmt = conn.prepare("SELECT value FROM app_state WHERE key = ?1")?;
        let mut rows = stmt.query(params![key])?;
        if let Some(row) = rows.next()? {
            Ok(Some(row.get(0)?))
        } else {
            Ok(None)
        }
    }

    /// Persist the reply and its capture timestamp.
    pub fn record_reply(&self, text: &str) -> SqliteResult<()> {
        self.set(REPLY_KEY, text)?;
        self.set(TIMESTAMP_KEY, &Utc::now().to_rfc3339())
    }

    pub fn reply(&self) -> SqliteResult<Option<String>> {
        self.get(REPLY_KEY)
    }

    pub fn reply_timestamp(&self) -> SqliteResult<Option<String>> {
        self.get(TIMESTAMP_KEY)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_set_and_get() {
        let store = ReplyStore::in_memory().unwrap();
        store.set("greeting_seen", "true").unwrap();
        assert_eq!(
            store.get("greeting_seen").unwrap(),
            Some("true".to_string())
        );
    }

    #[test]
    fn test_update() {
        let store = ReplyStore::in_memory().unwrap();
        store.set(REPLY_KEY, "first").unwrap();
        store.set(REPLY_KEY, "second").unwrap();
        assert_eq!(store.reply().unwrap(), Some("second".to_string()));
    }

    #[test]
    fn test_get_nonexistent() {
        let store = ReplyStore::in_memory().unwrap();
        assert_eq!(store.get("nonexistent").unwrap(), None);
    }

    #[test]
    fn record_reply_writes_text_and_iso_timestamp() {
        let store = ReplyStore::in_memory().unwrap();
        store.record_reply("Hello").unwrap();
        assert_eq!(store.reply().unwrap(), Some("Hello".to_string()));

        let stamp = store.reply_timestamp().unwrap().unwrap();
        assert!(chrono::DateTime::parse_from_rfc3339(&stamp).is_ok());
    }

    #[test]
    fn survives_reopen() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("serenade.db");
        {
            let store = ReplyStore::open(&path).unwrap();
            store.record_reply("kept").unwrap();
        }
        let store = ReplyStore::open(&path).unwrap();
        assert_eq!(store.reply().unwrap(), Some("kept".to_string()));
    }
}
