use crate::database::{Database, DBError};

use std::str::FromStr;


const DATABASE_VERSION_SETTING: &str = "PORTAL_DATABASE_VERSION";
const DATABASE_VERSION: u16 = 1;

pub const DATABASE_PATH_ENV: &str = "PORTAL_DATABASE_PATH";

pub struct SQLite {
    conn: rusqlite::Connection,
}

impl SQLite {
    pub fn open(path: &str) -> Result<SQLite, DBError> {
        match rusqlite::Connection::open(path) {
            Ok(c) => {
                log::debug!("opened local storage at {path}");
                Ok(SQLite { conn: c })
            },
            Err(e) => Err(DBError::ConnectionError(e.to_string()))
        }
    }

    fn update(&mut self, old_version: u16, new_version: u16) -> Result<(), DBError> {
        if new_version < old_version {
            return Err(DBError::DatabaseTooNew(format!("database version {old_version} is newer than our known version {new_version}")))
        }
        // version 1 is the only schema so far
        Ok(())
    }

    fn make_tables(&mut self) -> Result<(), DBError> {
        let tx = match self.conn.transaction() {
            Ok(tx) => tx,
            Err(e) => return Err(DBError::ConnectionError(format!("unable to start transaction: {e}")))
        };
        if let Err(e) = tx.execute(
            "INSERT INTO local_storage (name, value) VALUES (?1, ?2);",
            (DATABASE_VERSION_SETTING, DATABASE_VERSION.to_string())
        ) {
            return Err(DBError::DataInsertionError(e.to_string()))
        }
        if let Err(e) = tx.commit() {
            return Err(DBError::DataInsertionError(e.to_string()))
        }
        log::info!("local storage created at version {DATABASE_VERSION}");
        Ok(())
    }
}

impl super::Database for SQLite {
    fn setup(&mut self) -> Result<(), DBError> {
        if let Err(e) = self.conn.execute(
            "CREATE TABLE IF NOT EXISTS local_storage (
                name VARCHAR NOT NULL,
                value VARCHAR NOT NULL,
                UNIQUE (name) ON CONFLICT REPLACE
            );",
            []
        ) {
            return Err(DBError::DataInsertionError(e.to_string()))
        }
        match self.get_value(DATABASE_VERSION_SETTING) {
            Ok(v) => match u16::from_str(&v) {
                Ok(v) => self.update(v, DATABASE_VERSION),
                Err(_) => Err(DBError::DataRetrievalError(String::from("error parsing version value")))
            },
            Err(DBError::NotFound) => self.make_tables(),
            Err(e) => Err(e),
        }
    }

    fn get_value(&self, name: &str) -> Result<String, DBError> {
        match self.conn.query_row(
            "SELECT value FROM local_storage WHERE name=?1;",
            [name],
            |row| row.get(0)
        ) {
            Ok(it) => Ok(it),
            Err(rusqlite::Error::QueryReturnedNoRows) => Err(DBError::NotFound),
            Err(e) => Err(DBError::DataRetrievalError(e.to_string())),
        }
    }

    fn set_value(&mut self, name: &str, value: &str) -> Result<(), DBError> {
        match self.conn.execute(
            "INSERT INTO local_storage (name, value) VALUES (?1, ?2);",
            (name, value),
        ) {
            Ok(_) => Ok(()),
            Err(e) => Err(DBError::DataInsertionError(e.to_string()))
        }
    }

    fn remove_value(&mut self, name: &str) -> Result<usize, DBError> {
        match self.conn.execute(
            "DELETE FROM local_storage WHERE name=?1;",
            [name],
        ) {
            Ok(count) => Ok(count),
            Err(e) => Err(DBError::DataDeletionError(e.to_string()))
        }
    }
}
