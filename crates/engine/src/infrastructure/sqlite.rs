//! SQLite-backed address storage.
//!
//! Every operation runs inside its own transaction taken from the pool. The
//! transaction is committed explicitly on success; on any other exit path it
//! is dropped, which rolls it back and returns the connection to the pool.

use std::str::FromStr;

use addrbook_domain::{Address, AddressChanges, AddressDraft, AddressId, UniqueKey};
use async_trait::async_trait;
use sqlx::sqlite::{SqliteConnectOptions, SqliteJournalMode, SqlitePoolOptions, SqliteRow};
use sqlx::{Decode, Row, Sqlite, SqlitePool, Type};

use crate::infrastructure::ports::{AddressRepo, RepoError};

const ENTITY: &str = "Address";

/// Open a connection pool, creating the database file if it is missing.
pub async fn connect(database_url: &str, max_connections: u32) -> Result<SqlitePool, RepoError> {
    let options = SqliteConnectOptions::from_str(database_url)
        .map_err(|e| RepoError::database("connect", e))?
        .create_if_missing(true)
        .journal_mode(SqliteJournalMode::Wal);

    SqlitePoolOptions::new()
        .max_connections(max_connections.max(1))
        .connect_with(options)
        .await
        .map_err(|e| RepoError::database("connect", e))
}

/// Create the addresses table if it does not exist yet.
///
/// The `UNIQUE (name, latitude, longitude)` constraint is the final arbiter
/// of address uniqueness.
pub async fn ensure_schema(pool: &SqlitePool) -> Result<(), RepoError> {
    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS addresses (
            id TEXT PRIMARY KEY NOT NULL,
            name TEXT NOT NULL,
            street TEXT NOT NULL,
            city TEXT NOT NULL,
            state TEXT NOT NULL,
            country TEXT NOT NULL,
            latitude REAL NOT NULL,
            longitude REAL NOT NULL,
            CONSTRAINT uq_addresses_name_coordinates UNIQUE (name, latitude, longitude)
        )
        "#,
    )
    .execute(pool)
    .await
    .map_err(|e| RepoError::database("ensure_schema", e))?;

    Ok(())
}

/// SQLite implementation of [`AddressRepo`].
#[derive(Clone)]
pub struct SqliteAddressRepo {
    pool: SqlitePool,
}

impl SqliteAddressRepo {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    async fn begin(
        &self,
        operation: &'static str,
    ) -> Result<sqlx::Transaction<'static, Sqlite>, RepoError> {
        self.pool
            .begin()
            .await
            .map_err(|e| RepoError::database(operation, e))
    }
}

fn column<'r, T>(row: &'r SqliteRow, name: &str) -> Result<T, RepoError>
where
    T: Decode<'r, Sqlite> + Type<Sqlite>,
{
    row.try_get(name)
        .map_err(|e| RepoError::serialization(format!("column {name}: {e}")))
}

/// Rebuild an address from a row, re-running every field validation.
fn row_to_address(row: &SqliteRow) -> Result<Address, RepoError> {
    let id_str: String = column(row, "id")?;
    let id = AddressId::from_str(&id_str).map_err(RepoError::serialization)?;

    let draft = AddressDraft::new(
        column::<String>(row, "name")?,
        column::<String>(row, "street")?,
        column::<String>(row, "city")?,
        column::<String>(row, "state")?,
        column::<String>(row, "country")?,
        column::<f64>(row, "latitude")?,
        column::<f64>(row, "longitude")?,
    )
    .map_err(|e| RepoError::serialization(format!("stored address {id} is invalid: {e}")))?;

    Ok(Address::with_id(id, draft))
}

/// Unique-constraint violations become `ConstraintViolation`; anything else
/// is an opaque database failure.
fn write_error(operation: &'static str, error: sqlx::Error) -> RepoError {
    match &error {
        sqlx::Error::Database(db) if db.is_unique_violation() => {
            RepoError::constraint(db.message())
        }
        _ => RepoError::database(operation, error),
    }
}

#[async_trait]
impl AddressRepo for SqliteAddressRepo {
    async fn insert(&self, address: &Address) -> Result<(), RepoError> {
        let mut tx = self.begin("address.insert").await?;

        sqlx::query(
            r#"
            INSERT INTO addresses (id, name, street, city, state, country, latitude, longitude)
            VALUES (?, ?, ?, ?, ?, ?, ?, ?)
            "#,
        )
        .bind(address.id().to_string())
        .bind(address.name().as_str())
        .bind(address.street().as_str())
        .bind(address.city().as_str())
        .bind(address.state().as_str())
        .bind(address.country().as_str())
        .bind(address.latitude())
        .bind(address.longitude())
        .execute(&mut *tx)
        .await
        .map_err(|e| write_error("address.insert", e))?;

        tx.commit()
            .await
            .map_err(|e| write_error("address.insert", e))
    }

    async fn get(&self, id: AddressId) -> Result<Option<Address>, RepoError> {
        let mut tx = self.begin("address.get").await?;

        let row = sqlx::query(
            r#"
            SELECT id, name, street, city, state, country, latitude, longitude
            FROM addresses
            WHERE id = ?
            "#,
        )
        .bind(id.to_string())
        .fetch_optional(&mut *tx)
        .await
        .map_err(|e| RepoError::database("address.get", e))?;

        let address = row.as_ref().map(row_to_address).transpose()?;
        tx.commit()
            .await
            .map_err(|e| RepoError::database("address.get", e))?;
        Ok(address)
    }

    async fn find_by_key(&self, key: &UniqueKey) -> Result<Option<Address>, RepoError> {
        let mut tx = self.begin("address.find_by_key").await?;

        let row = sqlx::query(
            r#"
            SELECT id, name, street, city, state, country, latitude, longitude
            FROM addresses
            WHERE name = ? AND latitude = ? AND longitude = ?
            LIMIT 1
            "#,
        )
        .bind(key.name.as_str())
        .bind(key.latitude())
        .bind(key.longitude())
        .fetch_optional(&mut *tx)
        .await
        .map_err(|e| RepoError::database("address.find_by_key", e))?;

        let address = row.as_ref().map(row_to_address).transpose()?;
        tx.commit()
            .await
            .map_err(|e| RepoError::database("address.find_by_key", e))?;
        Ok(address)
    }

    async fn list(&self) -> Result<Vec<Address>, RepoError> {
        let mut tx = self.begin("address.list").await?;

        let rows = sqlx::query(
            r#"
            SELECT id, name, street, city, state, country, latitude, longitude
            FROM addresses
            ORDER BY rowid
            "#,
        )
        .fetch_all(&mut *tx)
        .await
        .map_err(|e| RepoError::database("address.list", e))?;

        let addresses = rows
            .iter()
            .map(row_to_address)
            .collect::<Result<Vec<_>, _>>()?;
        tx.commit()
            .await
            .map_err(|e| RepoError::database("address.list", e))?;
        Ok(addresses)
    }

    async fn update(&self, id: AddressId, changes: &AddressChanges) -> Result<Address, RepoError> {
        let mut tx = self.begin("address.update").await?;

        // A single statement merges and writes, so concurrent writers to the
        // same id are serialized by SQLite's write lock.
        let row = sqlx::query(
            r#"
            UPDATE addresses SET
                name = COALESCE(?, name),
                street = COALESCE(?, street),
                city = COALESCE(?, city),
                state = COALESCE(?, state),
                country = COALESCE(?, country),
                latitude = COALESCE(?, latitude),
                longitude = COALESCE(?, longitude)
            WHERE id = ?
            RETURNING id, name, street, city, state, country, latitude, longitude
            "#,
        )
        .bind(changes.name.as_ref().map(|v| v.as_str()))
        .bind(changes.street.as_ref().map(|v| v.as_str()))
        .bind(changes.city.as_ref().map(|v| v.as_str()))
        .bind(changes.state.as_ref().map(|v| v.as_str()))
        .bind(changes.country.as_ref().map(|v| v.as_str()))
        .bind(changes.latitude.map(|v| v.degrees()))
        .bind(changes.longitude.map(|v| v.degrees()))
        .bind(id.to_string())
        .fetch_optional(&mut *tx)
        .await
        .map_err(|e| write_error("address.update", e))?;

        let Some(row) = row else {
            return Err(RepoError::not_found(ENTITY, id));
        };

        // The merged row must still be a valid address before it is committed.
        // Every rule checks a single field and the patch was validated, so a
        // failure here means corrupt storage. A cross-field rule would have to
        // be checked in the use case, or it would surface as a storage error.
        let updated = row_to_address(&row)?;
        tx.commit()
            .await
            .map_err(|e| write_error("address.update", e))?;
        Ok(updated)
    }

    async fn delete(&self, id: AddressId) -> Result<Address, RepoError> {
        let mut tx = self.begin("address.delete").await?;

        let row = sqlx::query(
            r#"
            DELETE FROM addresses
            WHERE id = ?
            RETURNING id, name, street, city, state, country, latitude, longitude
            "#,
        )
        .bind(id.to_string())
        .fetch_optional(&mut *tx)
        .await
        .map_err(|e| RepoError::database("address.delete", e))?;

        let Some(row) = row else {
            return Err(RepoError::not_found(ENTITY, id));
        };

        let removed = row_to_address(&row)?;
        tx.commit()
            .await
            .map_err(|e| RepoError::database("address.delete", e))?;
        Ok(removed)
    }

    async fn ping(&self) -> Result<(), RepoError> {
        sqlx::query("SELECT 1")
            .execute(&self.pool)
            .await
            .map_err(|e| RepoError::database("ping", e))?;
        Ok(())
    }
}
