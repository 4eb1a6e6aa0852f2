use super::file::ProgramSnapshot;
use super::{PersistenceResult, ProgramStore};
use crate::program::ProgramState;
use rusqlite::{Connection, OptionalExtension, params};
use std::sync::Mutex;

/// Single-slot store: the current program lives in one row as the same JSON
/// snapshot the file codec writes.
pub struct SqliteProgramStore {
    connection: Mutex<Connection>,
}

impl SqliteProgramStore {
    pub fn new<P: AsRef<std::path::Path>>(path: P) -> PersistenceResult<Self> {
        let connection = Connection::open(path)?;
        Self::initialize_schema(&connection)?;
        Ok(Self {
            connection: Mutex::new(connection),
        })
    }

    fn initialize_schema(connection: &Connection) -> PersistenceResult<()> {
        let ddl = r#"
            CREATE TABLE IF NOT EXISTS program_state (
                id INTEGER PRIMARY KEY CHECK (id = 1),
                program_json TEXT NOT NULL
            );
        "#;
        connection.execute_batch(ddl)?;
        Ok(())
    }
}

impl ProgramStore for SqliteProgramStore {
    fn save_program(&self, state: &ProgramState) -> PersistenceResult<()> {
        let snapshot = ProgramSnapshot::from_state(state);
        let json = serde_json::to_string(&snapshot)?;
        let mut conn = self.connection.lock().expect("sqlite mutex poisoned");
        let tx = conn.transaction()?;
        tx.execute("DELETE FROM program_state", [])?;
        tx.execute(
            "INSERT INTO program_state (id, program_json) VALUES (1, ?1)",
            params![json],
        )?;
        tx.commit()?;
        Ok(())
    }

    fn load_program(&self) -> PersistenceResult<Option<ProgramState>> {
        let conn = self.connection.lock().expect("sqlite mutex poisoned");

        let mut stmt = conn.prepare("SELECT program_json FROM program_state WHERE id = 1")?;
        let json_opt: Option<String> = stmt.query_row([], |row| row.get(0)).optional()?;

        let Some(json) = json_opt else {
            return Ok(None);
        };

        let snapshot: ProgramSnapshot = serde_json::from_str(&json)?;
        Ok(Some(snapshot.into_state()?))
    }
}
