// src/db/properties.rs
use crate::db::connection::{init_db, Database};
use crate::db::store::{PropertyStore, StoreError};
use crate::domain::ids::generate_property_id;
use crate::domain::{NewProperty, Price, Property, PropertyPatch, PropertyStatus};
use chrono::{DateTime, Utc};
use rusqlite::{params, Connection, OptionalExtension, Row, TransactionBehavior};
use serde_json::{Map, Value};

const SELECT_COLUMNS: &str =
    "SELECT id, location, status, price, details, created_at, updated_at FROM properties";

/// Listings persisted in a SQLite table.
///
/// Creation order is the table's rowid order, so `list` matches what the
/// in-memory store returns for the same sequence of writes.
pub struct SqliteStore {
    db: Database,
}

impl SqliteStore {
    /// Opens (or creates) the database file and applies the schema.
    pub fn open(db: Database) -> Result<Self, StoreError> {
        init_db(&db)?;
        Ok(Self { db })
    }
}

/// Raw column values, converted to a `Property` outside the rusqlite row callback
/// so conversion errors keep their own `StoreError` variants.
struct PropertyRow {
    id: String,
    location: String,
    status: String,
    price: f64,
    details: String,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl PropertyRow {
    fn from_row(row: &Row<'_>) -> rusqlite::Result<Self> {
        Ok(PropertyRow {
            id: row.get(0)?,
            location: row.get(1)?,
            status: row.get(2)?,
            price: row.get(3)?,
            details: row.get(4)?,
            created_at: row.get(5)?,
            updated_at: row.get(6)?,
        })
    }

    fn into_property(self) -> Result<Property, StoreError> {
        let status = PropertyStatus::parse(&self.status).ok_or_else(|| StoreError::Corrupt {
            id: self.id.clone(),
            reason: format!("unknown status {:?}", self.status),
        })?;
        let price = Price::new(self.price).ok_or_else(|| StoreError::Corrupt {
            id: self.id.clone(),
            reason: format!("invalid price {}", self.price),
        })?;
        let details: Map<String, Value> = serde_json::from_str(&self.details)?;

        Ok(Property {
            id: self.id,
            location: self.location,
            status,
            price,
            details,
            created_at: self.created_at,
            updated_at: self.updated_at,
        })
    }
}

fn find_property(conn: &Connection, id: &str) -> Result<Option<Property>, StoreError> {
    conn.query_row(
        &format!("{SELECT_COLUMNS} WHERE id = ?1"),
        params![id],
        PropertyRow::from_row,
    )
    .optional()?
    .map(PropertyRow::into_property)
    .transpose()
}

fn id_exists(conn: &Connection, id: &str) -> Result<bool, StoreError> {
    let found: Option<i64> = conn
        .query_row("SELECT 1 FROM properties WHERE id = ?1", params![id], |row| row.get(0))
        .optional()?;
    Ok(found.is_some())
}

fn insert_property(conn: &Connection, property: &Property) -> Result<(), StoreError> {
    conn.execute(
        r#"
        INSERT INTO properties (id, location, status, price, details, created_at, updated_at)
        VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7)
        "#,
        params![
            &property.id,
            &property.location,
            property.status.as_str(),
            property.price.value(),
            serde_json::to_string(&property.details)?,
            property.created_at,
            property.updated_at,
        ],
    )?;
    Ok(())
}

fn write_property(conn: &Connection, property: &Property) -> Result<(), StoreError> {
    conn.execute(
        r#"
        UPDATE properties SET
            location = ?1, status = ?2, price = ?3, details = ?4, updated_at = ?5
        WHERE id = ?6
        "#,
        params![
            &property.location,
            property.status.as_str(),
            property.price.value(),
            serde_json::to_string(&property.details)?,
            property.updated_at,
            &property.id,
        ],
    )?;
    Ok(())
}

impl PropertyStore for SqliteStore {
    fn list(&self) -> Result<Vec<Property>, StoreError> {
        self.db.with_conn(|conn| {
            let mut stmt = conn.prepare(&format!("{SELECT_COLUMNS} ORDER BY rowid"))?;
            let rows = stmt.query_map([], PropertyRow::from_row)?;

            let mut properties = Vec::new();
            for row in rows {
                properties.push(row?.into_property()?);
            }
            Ok(properties)
        })
    }

    fn get(&self, id: &str) -> Result<Option<Property>, StoreError> {
        self.db.with_conn(|conn| find_property(conn, id))
    }

    fn create(&self, new: NewProperty) -> Result<Property, StoreError> {
        self.db.with_conn(|conn| {
            let tx = conn.transaction_with_behavior(TransactionBehavior::Immediate)?;

            let mut id = generate_property_id();
            while id_exists(&tx, &id)? {
                id = generate_property_id();
            }

            let property = Property::new(id, new, Utc::now());
            insert_property(&tx, &property)?;
            tx.commit()?;
            Ok(property)
        })
    }

    fn update(&self, id: &str, patch: PropertyPatch) -> Result<Option<Property>, StoreError> {
        self.db.with_conn(|conn| {
            let tx = conn.transaction_with_behavior(TransactionBehavior::Immediate)?;

            let Some(mut property) = find_property(&tx, id)? else {
                return Ok(None);
            };
            property.apply(patch, Utc::now());
            write_property(&tx, &property)?;

            tx.commit()?;
            Ok(Some(property))
        })
    }

    fn delete(&self, id: &str) -> Result<Option<Property>, StoreError> {
        self.db.with_conn(|conn| {
            let tx = conn.transaction_with_behavior(TransactionBehavior::Immediate)?;

            let Some(property) = find_property(&tx, id)? else {
                return Ok(None);
            };
            tx.execute("DELETE FROM properties WHERE id = ?1", params![id])?;

            tx.commit()?;
            Ok(Some(property))
        })
    }

    fn count(&self) -> Result<usize, StoreError> {
        self.db.with_conn(|conn| {
            let n: i64 = conn.query_row("SELECT COUNT(*) FROM properties", [], |row| row.get(0))?;
            Ok(n as usize)
        })
    }
}
