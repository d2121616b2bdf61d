use crate::entity::EntityError;
use serde_json::Error as SerdeJsonError;
use std::fmt;
use std::io;
use std::path::PathBuf;

#[derive(Debug)]
pub enum PersistenceError {
    Serialization(SerdeJsonError),
    Csv(csv::Error),
    Io(io::Error),
    Format(String),
    Entity(EntityError),
    NotFound(PathBuf),
}

impl fmt::Display for PersistenceError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PersistenceError::Serialization(err) => write!(f, "serialization error: {err}"),
            PersistenceError::Csv(err) => write!(f, "csv error: {err}"),
            PersistenceError::Io(err) => write!(f, "io error: {err}"),
            PersistenceError::Format(msg) => write!(f, "format error: {msg}"),
            PersistenceError::Entity(err) => write!(f, "entity error: {err}"),
            PersistenceError::NotFound(path) => {
                write!(f, "no timeline file at {}", path.display())
            }
        }
    }
}

impl std::error::Error for PersistenceError {}

impl From<SerdeJsonError> for PersistenceError {
    fn from(value: SerdeJsonError) -> Self {
        Self::Serialization(value)
    }
}

impl From<csv::Error> for PersistenceError {
    fn from(value: csv::Error) -> Self {
        Self::Csv(value)
    }
}

impl From<io::Error> for PersistenceError {
    fn from(value: io::Error) -> Self {
        Self::Io(value)
    }
}

impl From<EntityError> for PersistenceError {
    fn from(value: EntityError) -> Self {
        Self::Entity(value)
    }
}

pub type PersistenceResult<T> = Result<T, PersistenceError>;

pub mod file;

pub use file::{
    load_timeline_from_csv, load_timeline_from_json, parse_timeline, save_timeline_to_csv,
    save_timeline_to_json, write_timeline,
};
