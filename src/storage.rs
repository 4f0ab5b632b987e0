//! SQLite-backed team store.
//!
//! Teams are rows in a single `teams` table; the member list is stored as
//! a JSON text column. The connection sits behind a mutex — every
//! statement here is a short single-row operation, so the hold times are
//! negligible.

use std::path::Path;
use std::sync::{Arc, Mutex, MutexGuard};

use rusqlite::{Connection, ErrorCode, OptionalExtension, Row, params};
use tracing::debug;

use crate::types::{Pagination, Team, TeamDraft, TeamPage};
use crate::{Result, RotomError};

/// Keyed store for persisted teams.
pub struct TeamStore {
    conn: Arc<Mutex<Connection>>,
}

impl TeamStore {
    /// Create or open a team database at the given path.
    pub fn open(path: impl AsRef<Path>) -> Result<Self> {
        Self::from_connection(Connection::open(path.as_ref())?)
    }

    /// Create an in-memory store. Used by tests.
    pub fn in_memory() -> Result<Self> {
        Self::from_connection(Connection::open_in_memory()?)
    }

    fn from_connection(conn: Connection) -> Result<Self> {
        Self::configure_connection(&conn)?;
        Self::ensure_schema(&conn)?;
        Ok(Self {
            conn: Arc::new(Mutex::new(conn)),
        })
    }

    fn configure_connection(conn: &Connection) -> Result<()> {
        conn.execute_batch(
            "
            PRAGMA journal_mode=WAL;
            PRAGMA busy_timeout=5000;
            PRAGMA synchronous=NORMAL;
            ",
        )?;
        Ok(())
    }

    /// Ensure the base schema exists.
    fn ensure_schema(conn: &Connection) -> Result<()> {
        conn.execute(
            "CREATE TABLE IF NOT EXISTS teams (
                id INTEGER PRIMARY KEY AUTOINCREMENT,
                name TEXT NOT NULL UNIQUE,
                members TEXT NOT NULL
            )",
            [],
        )?;
        Ok(())
    }

    fn lock(&self) -> Result<MutexGuard<'_, Connection>> {
        self.conn
            .lock()
            .map_err(|_| RotomError::Storage("connection lock poisoned".to_string()))
    }

    /// Validate and insert a new team, returning the stored row.
    pub fn create(&self, draft: &TeamDraft) -> Result<Team> {
        draft.validate()?;
        let members = serde_json::to_string(&draft.members)?;

        let conn = self.lock()?;
        conn.execute(
            "INSERT INTO teams (name, members) VALUES (?1, ?2)",
            params![draft.name, members],
        )
        .map_err(|e| map_constraint(e, &draft.name))?;

        let id = conn.last_insert_rowid();
        debug!(id, name = %draft.name, "team created");

        Ok(Team {
            id,
            name: draft.name.clone(),
            members: draft.members.clone(),
        })
    }

    /// Fetch a team by id.
    pub fn get(&self, id: i64) -> Result<Option<Team>> {
        let conn = self.lock()?;
        let team = conn
            .query_row(
                "SELECT id, name, members FROM teams WHERE id = ?1",
                params![id],
                row_to_team,
            )
            .optional()?;
        Ok(team)
    }

    /// Fetch one page of teams plus the pagination envelope.
    ///
    /// `page` is 1-based; pages past the end return an empty data set.
    pub fn list(&self, page: u32, limit: u32) -> Result<TeamPage> {
        let page = page.max(1);
        let limit = limit.max(1);
        let offset = u64::from(page - 1) * u64::from(limit);

        let conn = self.lock()?;
        let total: u64 = conn.query_row("SELECT COUNT(*) FROM teams", [], |row| row.get(0))?;

        let mut stmt =
            conn.prepare("SELECT id, name, members FROM teams ORDER BY id LIMIT ?1 OFFSET ?2")?;
        let data = stmt
            .query_map(params![limit, offset], row_to_team)?
            .collect::<rusqlite::Result<Vec<_>>>()?;

        Ok(TeamPage {
            data,
            pagination: Pagination {
                page,
                limit,
                total,
                total_pages: total.div_ceil(u64::from(limit)),
            },
        })
    }

    /// Validate and fully replace a team's name and members.
    pub fn update(&self, id: i64, draft: &TeamDraft) -> Result<Team> {
        draft.validate()?;
        let members = serde_json::to_string(&draft.members)?;

        let conn = self.lock()?;
        let changed = conn
            .execute(
                "UPDATE teams SET name = ?1, members = ?2 WHERE id = ?3",
                params![draft.name, members, id],
            )
            .map_err(|e| map_constraint(e, &draft.name))?;

        if changed == 0 {
            return Err(RotomError::TeamNotFound(id));
        }

        Ok(Team {
            id,
            name: draft.name.clone(),
            members: draft.members.clone(),
        })
    }

    /// Delete a team.
    pub fn delete(&self, id: i64) -> Result<()> {
        let conn = self.lock()?;
        let changed = conn.execute("DELETE FROM teams WHERE id = ?1", params![id])?;
        if changed == 0 {
            return Err(RotomError::TeamNotFound(id));
        }
        debug!(id, "team deleted");
        Ok(())
    }
}

fn row_to_team(row: &Row<'_>) -> rusqlite::Result<Team> {
    let id: i64 = row.get(0)?;
    let name: String = row.get(1)?;
    let members_json: String = row.get(2)?;
    let members = serde_json::from_str(&members_json).map_err(|e| {
        rusqlite::Error::FromSqlConversionFailure(2, rusqlite::types::Type::Text, Box::new(e))
    })?;
    Ok(Team { id, name, members })
}

/// Surface unique-name violations as [`RotomError::DuplicateTeamName`];
/// everything else stays a storage error.
fn map_constraint(err: rusqlite::Error, name: &str) -> RotomError {
    match err.sqlite_error_code() {
        Some(ErrorCode::ConstraintViolation) => RotomError::DuplicateTeamName(name.to_string()),
        _ => err.into(),
    }
}
