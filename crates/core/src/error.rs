use thiserror::Error;

use crate::model::{IdError, RecordCodecError};
use crate::syllabus::SyllabusError;

#[derive(Debug, Error)]
pub enum Error {
    #[error(transparent)]
    Id(#[from] IdError),
    #[error(transparent)]
    Record(#[from] RecordCodecError),
    #[error(transparent)]
    Syllabus(#[from] SyllabusError),
}
