//! [`RecordStore`] on a SQLite database.
//!
//! Records live in one table with the record id as primary key and the geometry
//! stored as GeoJSON text next to its bounding box:
//!
//! ```sql
//! CREATE TABLE geo_records (
//! 	_id TEXT PRIMARY KEY NOT NULL, name TEXT NOT NULL, geometry TEXT NOT NULL,
//! 	min_x REAL NOT NULL, min_y REAL NOT NULL, max_x REAL NOT NULL, max_y REAL NOT NULL
//! );
//! ```
//!
//! The spatial index is an R*Tree virtual table named `<table>_geometry`, keyed by
//! the rowid of the record. Once it exists, inserts and deletes keep it current
//! inside the same transaction.

use super::{RecordStore, StoreError};
use anyhow::{Context, Result, ensure};
use async_trait::async_trait;
use geostore_geometry::{
	GeoRecord,
	codec::{StoredDocument, StoredGeometry},
};
use log::{debug, info};
use r2d2::Pool;
use r2d2_sqlite::{
	SqliteConnectionManager,
	rusqlite::{self, Connection, OptionalExtension, TransactionBehavior, ffi, params},
};
use regex::Regex;
use std::{fmt, path::Path};

#[derive(Clone, Debug)]
struct Tables {
	records: String,
	index: String,
}

impl Tables {
	fn new(table: &str) -> Result<Self> {
		let pattern = Regex::new(r"^[A-Za-z_][A-Za-z0-9_]*$")?;
		ensure!(pattern.is_match(table), "invalid table name '{table}'");
		Ok(Tables {
			records: table.to_string(),
			index: format!("{table}_geometry"),
		})
	}

	fn has_index(&self, conn: &Connection) -> rusqlite::Result<bool> {
		conn.query_row(
			"SELECT EXISTS(SELECT 1 FROM sqlite_master WHERE type = 'table' AND name = ?1)",
			[&self.index],
			|row| row.get(0),
		)
	}
}

pub struct SqliteRecordStore {
	name: String,
	tables: Tables,
	pool: Pool<SqliteConnectionManager>,
}

impl SqliteRecordStore {
	/// Opens (and creates if necessary) a database file.
	pub fn open_path(path: &Path, table: &str) -> Result<Self> {
		debug!("open {path:?}");
		if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
			ensure!(parent.is_dir(), "directory {parent:?} does not exist");
		}
		let manager = SqliteConnectionManager::file(path);
		let builder = Pool::builder().max_size(10);
		Self::open(manager, builder, path.display().to_string(), table)
			.with_context(|| format!("opening SQLite store at '{}'", path.display()))
	}

	/// Opens a private in-memory database. Its content is lost when the store is dropped.
	pub fn open_in_memory(table: &str) -> Result<Self> {
		// every connection to ":memory:" is a separate database, so the pool holds exactly one
		// and never retires it
		let builder = Pool::builder().max_size(1).idle_timeout(None).max_lifetime(None);
		Self::open(SqliteConnectionManager::memory(), builder, String::from(":memory:"), table)
			.context("opening in-memory SQLite store")
	}

	fn open(
		manager: SqliteConnectionManager,
		builder: r2d2::Builder<SqliteConnectionManager>,
		name: String,
		table: &str,
	) -> Result<Self> {
		let tables = Tables::new(table)?;
		let pool = builder.build(manager)?;

		pool.get()?.execute_batch(&format!(
			"CREATE TABLE IF NOT EXISTS {} (
				_id TEXT PRIMARY KEY NOT NULL,
				name TEXT NOT NULL,
				geometry TEXT NOT NULL,
				min_x REAL NOT NULL, min_y REAL NOT NULL, max_x REAL NOT NULL, max_y REAL NOT NULL
			);",
			tables.records
		))?;

		Ok(SqliteRecordStore { name, tables, pool })
	}

	/// Runs `f` on a pooled connection in the blocking thread pool.
	async fn with_connection<T, F>(&self, f: F) -> Result<T, StoreError>
	where
		F: FnOnce(&mut Connection, &Tables) -> Result<T, StoreError> + Send + 'static,
		T: Send + 'static,
	{
		let pool = self.pool.clone();
		let tables = self.tables.clone();
		tokio::task::spawn_blocking(move || {
			let mut conn = pool.get()?;
			f(&mut conn, &tables)
		})
		.await?
	}
}

impl fmt::Debug for SqliteRecordStore {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.debug_struct("SqliteRecordStore")
			.field("name", &self.name)
			.field("table", &self.tables.records)
			.finish()
	}
}

fn is_primary_key_violation(error: &rusqlite::Error) -> bool {
	matches!(
		error,
		rusqlite::Error::SqliteFailure(e, _)
			if matches!(e.extended_code, ffi::SQLITE_CONSTRAINT_PRIMARYKEY | ffi::SQLITE_CONSTRAINT_UNIQUE)
	)
}

fn row_to_record(id: String, name: String, geometry: &str) -> Result<GeoRecord, StoreError> {
	let geometry: StoredGeometry = match serde_json::from_str(geometry).context("parsing stored geometry") {
		Ok(geometry) => geometry,
		Err(err) => return Err(StoreError::corrupt(&id, &err)),
	};
	GeoRecord::try_from(StoredDocument { id: id.clone(), name, geometry }).map_err(|err| StoreError::corrupt(&id, &err))
}

#[async_trait]
impl RecordStore for SqliteRecordStore {
	fn describe(&self) -> String {
		format!("sqlite '{}' (table '{}')", self.name, self.tables.records)
	}

	async fn insert(&self, record: &GeoRecord) -> Result<(), StoreError> {
		let document = StoredDocument::from(record);
		let [min_x, min_y, max_x, max_y] = document.bounds().map_err(|err| StoreError::corrupt(&document.id, &err))?;
		let geometry = serde_json::to_string(&document.geometry).map_err(StoreError::unavailable)?;
		let StoredDocument { id, name, .. } = document;

		self
			.with_connection(move |conn, tables| {
				let transaction = conn.transaction_with_behavior(TransactionBehavior::Immediate)?;
				let inserted = transaction.execute(
					&format!(
						"INSERT INTO {} (_id, name, geometry, min_x, min_y, max_x, max_y) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7)",
						tables.records
					),
					params![id, name, geometry, min_x, min_y, max_x, max_y],
				);
				match inserted {
					Err(error) if is_primary_key_violation(&error) => return Err(StoreError::DuplicateId(id)),
					result => result?,
				};
				if tables.has_index(&transaction)? {
					let rowid = transaction.last_insert_rowid();
					transaction.execute(
						&format!(
							"INSERT INTO {} (id, min_x, max_x, min_y, max_y) VALUES (?1, ?2, ?3, ?4, ?5)",
							tables.index
						),
						params![rowid, min_x, max_x, min_y, max_y],
					)?;
				}
				transaction.commit()?;
				Ok(())
			})
			.await
	}

	async fn find_by_id(&self, id: &str) -> Result<Option<GeoRecord>, StoreError> {
		let id = id.to_string();
		self
			.with_connection(move |conn, tables| {
				let row = conn
					.query_row(
						&format!("SELECT _id, name, geometry FROM {} WHERE _id = ?1", tables.records),
						[&id],
						|row| Ok((row.get::<_, String>(0)?, row.get::<_, String>(1)?, row.get::<_, String>(2)?)),
					)
					.optional()?;
				row.map(|(id, name, geometry)| row_to_record(id, name, &geometry)).transpose()
			})
			.await
	}

	async fn find_all(&self) -> Result<Vec<GeoRecord>, StoreError> {
		self
			.with_connection(|conn, tables| {
				let mut stmt = conn.prepare(&format!(
					"SELECT _id, name, geometry FROM {} ORDER BY rowid",
					tables.records
				))?;
				let rows = stmt
					.query_map([], |row| {
						Ok((row.get::<_, String>(0)?, row.get::<_, String>(1)?, row.get::<_, String>(2)?))
					})?
					.collect::<rusqlite::Result<Vec<_>>>()?;
				rows
					.into_iter()
					.map(|(id, name, geometry)| row_to_record(id, name, &geometry))
					.collect()
			})
			.await
	}

	async fn delete_by_id(&self, id: &str) -> Result<u64, StoreError> {
		let id = id.to_string();
		self
			.with_connection(move |conn, tables| {
				let transaction = conn.transaction_with_behavior(TransactionBehavior::Immediate)?;
				let rowid: Option<i64> = transaction
					.query_row(
						&format!("SELECT rowid FROM {} WHERE _id = ?1", tables.records),
						[&id],
						|row| row.get(0),
					)
					.optional()?;
				let Some(rowid) = rowid else {
					return Ok(0);
				};
				transaction.execute(&format!("DELETE FROM {} WHERE rowid = ?1", tables.records), [rowid])?;
				if tables.has_index(&transaction)? {
					transaction.execute(&format!("DELETE FROM {} WHERE id = ?1", tables.index), [rowid])?;
				}
				transaction.commit()?;
				Ok(1)
			})
			.await
	}

	async fn ensure_spatial_index(&self) -> Result<(), StoreError> {
		self
			.with_connection(|conn, tables| {
				let transaction = conn.transaction_with_behavior(TransactionBehavior::Immediate)?;
				transaction.execute_batch(&format!(
					"CREATE VIRTUAL TABLE IF NOT EXISTS {} USING rtree(id, min_x, max_x, min_y, max_y);",
					tables.index
				))?;
				let added = transaction.execute(
					&format!(
						"INSERT INTO {index} (id, min_x, max_x, min_y, max_y)
						SELECT rowid, min_x, max_x, min_y, max_y FROM {records}
						WHERE rowid NOT IN (SELECT id FROM {index})",
						index = tables.index,
						records = tables.records
					),
					[],
				)?;
				transaction.commit()?;
				if added > 0 {
					info!("added {added} records to spatial index '{}'", tables.index);
				}
				Ok(())
			})
			.await
	}

	async fn spatial_index_len(&self) -> Result<Option<usize>, StoreError> {
		self
			.with_connection(|conn, tables| {
				if !tables.has_index(conn)? {
					return Ok(None);
				}
				let count: i64 = conn.query_row(&format!("SELECT COUNT(*) FROM {}", tables.index), [], |row| {
					row.get(0)
				})?;
				Ok(Some(usize::try_from(count).map_err(StoreError::unavailable)?))
			})
			.await
	}
}
