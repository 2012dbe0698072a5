use thiserror::Error;

#[derive(Error, Debug)]
pub enum DeepSkyError {
    #[error("Latitude out of range [-90, 90]: {0}")]
    InvalidLatitude(f64),

    #[error("Invalid parameter: {0}")]
    InvalidParameter(String),

    #[error("Invalid catalog designation: {0}")]
    InvalidDesignation(String),

    #[error("Unknown target type: {0}")]
    UnknownTargetType(String),

    #[error("The target catalog is empty")]
    EmptyCatalog,

    #[error("Duplicate target identifier in catalog: {0}")]
    DuplicateTarget(String),

    #[error("Error while reading the CSV catalog: {0}")]
    Csv(#[from] csv::Error),

    #[error("Unable to perform file operation: {0}")]
    IoError(#[from] std::io::Error),
}

impl PartialEq for DeepSkyError {
    fn eq(&self, other: &Self) -> bool {
        use DeepSkyError::*;
        match (self, other) {
            (InvalidLatitude(a), InvalidLatitude(b)) => a == b,
            (InvalidParameter(a), InvalidParameter(b)) => a == b,
            (InvalidDesignation(a), InvalidDesignation(b)) => a == b,
            (UnknownTargetType(a), UnknownTargetType(b)) => a == b,
            (DuplicateTarget(a), DuplicateTarget(b)) => a == b,

            // not comparable: same variant is enough
            (Csv(_), Csv(_)) => true,
            (IoError(_), IoError(_)) => true,

            (EmptyCatalog, EmptyCatalog) => true,

            _ => false,
        }
    }
}
