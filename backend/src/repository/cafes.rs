use super::RepositoryError;
use common::model::cafe::{Cafe, NewCafe};
use rusqlite::{params, Connection, Row};
use std::path::{Path, PathBuf};
use std::time::Duration;

/// How long a writer waits for a competing writer to release the database.
const BUSY_TIMEOUT: Duration = Duration::from_secs(5);

const CREATE_TABLE: &str = "
    CREATE TABLE IF NOT EXISTS cafe (
        id             INTEGER PRIMARY KEY AUTOINCREMENT,
        name           VARCHAR(250) NOT NULL UNIQUE,
        map_url        VARCHAR(500) NOT NULL,
        img_url        VARCHAR(500) NOT NULL,
        location       VARCHAR(250) NOT NULL,
        has_sockets    BOOLEAN NOT NULL,
        has_toilet     BOOLEAN NOT NULL,
        has_wifi       BOOLEAN NOT NULL,
        can_take_calls BOOLEAN NOT NULL,
        seats          VARCHAR(250) NOT NULL,
        coffee_price   VARCHAR(250) NOT NULL
    )";

const SELECT_ALL: &str = "
    SELECT id, name, map_url, img_url, location, seats,
           has_toilet, has_wifi, has_sockets, can_take_calls, coffee_price
    FROM cafe
    ORDER BY id";

const INSERT: &str = "
    INSERT INTO cafe (name, map_url, img_url, location, seats,
                      has_toilet, has_wifi, has_sockets, can_take_calls, coffee_price)
    VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10)";

/// Reads and writes `Cafe` rows in a SQLite file.
///
/// A fresh connection is opened for every call, so the repository is cheap to
/// clone and safe to use from any worker thread. Uniqueness of `name` is left
/// to the store's `UNIQUE` constraint, which also arbitrates concurrent inserts.
#[derive(Debug, Clone)]
pub struct CafeRepository {
    path: PathBuf,
}

impl CafeRepository {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Creates the `cafe` table if it does not exist yet.
    pub fn init_schema(&self) -> Result<(), RepositoryError> {
        let conn = self.connect()?;
        conn.execute_batch(CREATE_TABLE)?;
        Ok(())
    }

    /// Every stored cafe. Rows come back by ascending id, which is insertion
    /// order, but callers should not depend on it.
    pub fn list_all(&self) -> Result<Vec<Cafe>, RepositoryError> {
        let conn = self.connect()?;
        let mut stmt = conn.prepare(SELECT_ALL)?;
        let cafes = stmt
            .query_map([], cafe_from_row)?
            .collect::<Result<Vec<_>, _>>()?;
        Ok(cafes)
    }

    /// Persists a validated candidate and returns it with its assigned id.
    ///
    /// A violation of the `name` uniqueness constraint becomes
    /// `RepositoryError::DuplicateName`; nothing is written in that case.
    pub fn insert(&self, cafe: NewCafe) -> Result<Cafe, RepositoryError> {
        let conn = self.connect()?;
        let result = conn.execute(
            INSERT,
            params![
                cafe.name,
                cafe.map_url,
                cafe.img_url,
                cafe.location,
                cafe.seats,
                cafe.has_toilet,
                cafe.has_wifi,
                cafe.has_sockets,
                cafe.can_take_calls,
                cafe.coffee_price,
            ],
        );

        match result {
            Ok(_) => Ok(cafe.with_id(conn.last_insert_rowid())),
            Err(e) if is_unique_violation(&e) => Err(RepositoryError::DuplicateName(cafe.name)),
            Err(e) => Err(e.into()),
        }
    }

    pub fn count(&self) -> Result<usize, RepositoryError> {
        let conn = self.connect()?;
        let count: i64 = conn.query_row("SELECT COUNT(*) FROM cafe", [], |row| row.get(0))?;
        Ok(count as usize)
    }

    fn connect(&self) -> Result<Connection, RepositoryError> {
        let conn = Connection::open(&self.path)?;
        conn.busy_timeout(BUSY_TIMEOUT)?;
        Ok(conn)
    }
}

fn cafe_from_row(row: &Row<'_>) -> rusqlite::Result<Cafe> {
    Ok(Cafe {
        id: row.get(0)?,
        name: row.get(1)?,
        map_url: row.get(2)?,
        img_url: row.get(3)?,
        location: row.get(4)?,
        seats: row.get(5)?,
        has_toilet: row.get(6)?,
        has_wifi: row.get(7)?,
        has_sockets: row.get(8)?,
        can_take_calls: row.get(9)?,
        coffee_price: row.get(10)?,
    })
}

fn is_unique_violation(e: &rusqlite::Error) -> bool {
    matches!(
        e,
        rusqlite::Error::SqliteFailure(err, _)
            if err.extended_code == rusqlite::ffi::SQLITE_CONSTRAINT_UNIQUE
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn repository() -> (TempDir, CafeRepository) {
        let dir = tempfile::tempdir().unwrap();
        let repository = CafeRepository::new(dir.path().join("cafes.db"));
        repository.init_schema().unwrap();
        (dir, repository)
    }

    fn candidate(name: &str) -> NewCafe {
        NewCafe {
            name: name.to_string(),
            map_url: "https://maps.example/x".to_string(),
            img_url: "https://img.example/y".to_string(),
            location: "SF".to_string(),
            seats: "10-20".to_string(),
            has_toilet: true,
            has_wifi: false,
            has_sockets: true,
            can_take_calls: false,
            coffee_price: "$4".to_string(),
        }
    }

    #[test]
    fn empty_store_lists_nothing() {
        let (_dir, repository) = repository();
        assert!(repository.list_all().unwrap().is_empty());
        assert_eq!(repository.count().unwrap(), 0);
    }

    #[test]
    fn inserted_cafe_is_listed_with_its_id() {
        let (_dir, repository) = repository();
        let stored = repository.insert(candidate("Blue Bottle")).unwrap();

        let listed = repository.list_all().unwrap();
        assert_eq!(listed, vec![candidate("Blue Bottle").with_id(stored.id)]);
    }

    #[test]
    fn ids_are_unique_and_listing_follows_insertion() {
        let (_dir, repository) = repository();
        let first = repository.insert(candidate("First")).unwrap();
        let second = repository.insert(candidate("Second")).unwrap();
        assert_ne!(first.id, second.id);

        let names: Vec<String> = repository
            .list_all()
            .unwrap()
            .into_iter()
            .map(|cafe| cafe.name)
            .collect();
        assert_eq!(names, vec!["First", "Second"]);
    }

    #[test]
    fn duplicate_name_is_rejected_without_writing() {
        let (_dir, repository) = repository();
        repository.insert(candidate("Blue Bottle")).unwrap();

        let err = repository.insert(candidate("Blue Bottle")).unwrap_err();
        assert!(matches!(err, RepositoryError::DuplicateName(ref name) if name == "Blue Bottle"));
        assert_eq!(repository.count().unwrap(), 1);
    }

    #[test]
    fn names_are_compared_case_sensitively() {
        let (_dir, repository) = repository();
        repository.insert(candidate("Blue Bottle")).unwrap();
        repository.insert(candidate("blue bottle")).unwrap();
        assert_eq!(repository.count().unwrap(), 2);
    }

    #[test]
    fn init_schema_is_idempotent_and_keeps_rows() {
        let (_dir, repository) = repository();
        repository.insert(candidate("Blue Bottle")).unwrap();
        repository.init_schema().unwrap();
        assert_eq!(repository.count().unwrap(), 1);
    }

    #[test]
    fn unreachable_store_is_storage_unavailable() {
        let dir = tempfile::tempdir().unwrap();
        let repository = CafeRepository::new(dir.path().join("missing").join("cafes.db"));

        assert!(matches!(
            repository.list_all(),
            Err(RepositoryError::StorageUnavailable(_))
        ));
        assert!(matches!(
            repository.insert(candidate("Blue Bottle")),
            Err(RepositoryError::StorageUnavailable(_))
        ));
    }

    #[test]
    fn storage_failure_keeps_the_sqlite_error_as_source() {
        let dir = tempfile::tempdir().unwrap();
        let repository = CafeRepository::new(dir.path().join("missing").join("cafes.db"));

        let err = repository.count().unwrap_err();
        let source = std::error::Error::source(&err).expect("storage errors carry a source");
        assert!(source.downcast_ref::<rusqlite::Error>().is_some());
        assert!(err.to_string().starts_with("storage unavailable: "));
    }

    #[test]
    fn missing_table_is_storage_unavailable() {
        let dir = tempfile::tempdir().unwrap();
        let repository = CafeRepository::new(dir.path().join("cafes.db"));
        assert!(matches!(
            repository.list_all(),
            Err(RepositoryError::StorageUnavailable(_))
        ));
    }
}
