use std::collections::HashMap;

use crate::database::DBError;

/// Storage that lives only as long as the process.
#[derive(Default)]
pub struct MemStore {
    values: HashMap<String, String>,
}

impl MemStore {
    pub fn new() -> MemStore {
        MemStore {
            values: HashMap::new(),
        }
    }
}

impl super::Database for MemStore {
    fn setup(&mut self) -> Result<(), DBError> {
        Ok(())
    }

    fn get_value(&self, name: &str) -> Result<String, DBError> {
        match self.values.get(name) {
            Some(v) => Ok(v.clone()),
            None => Err(DBError::NotFound),
        }
    }

    fn set_value(&mut self, name: &str, value: &str) -> Result<(), DBError> {
        self.values.insert(String::from(name), String::from(value));
        Ok(())
    }

    fn remove_value(&mut self, name: &str) -> Result<usize, DBError> {
        match self.values.remove(name) {
            Some(_) => Ok(1),
            None => Ok(0),
        }
    }
}
