use std::fmt;

pub mod memstore;
pub mod sqlite;

#[derive(Debug, PartialEq)]
pub enum DBError {
    ConnectionError(String),
    DatabaseTooNew(String),
    DataInsertionError(String),
    DataRetrievalError(String),
    DataDeletionError(String),
    NotFound,
}

impl std::error::Error for DBError {}

impl fmt::Display for DBError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            DBError::ConnectionError(val) => write!(f, "Connection Error: {val}"),
            DBError::DatabaseTooNew(val) => write!(f, "Database Version Too New: {val}"),
            DBError::DataInsertionError(val) => write!(f, "Error Inserting Data: {val}"),
            DBError::DataRetrievalError(val) => write!(f, "Error Retrieving Data: {val}"),
            DBError::DataDeletionError(val) => write!(f, "Error Deleting Data: {val}"),
            DBError::NotFound => write!(f, "Data Not Found"),
        }
    }
}

/// Local key/value storage that survives restarts.
pub trait Database {
    // Setup functions
    fn setup(&mut self) -> Result<(), DBError>;
    // Stored values
    fn get_value(&self, name: &str) -> Result<String, DBError>;
    fn set_value(&mut self, name: &str, value: &str) -> Result<(), DBError>;
    fn remove_value(&mut self, name: &str) -> Result<usize, DBError>;
}
