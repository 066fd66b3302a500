use std::fmt::{Debug, Display};
use std::io::Error as IoError;

use actix_web::error::{JsonPayloadError, PathError, QueryPayloadError};
use actix_web::http::StatusCode;
use actix_web::{HttpResponse, ResponseError};
use derivative::Derivative;
use mongodb::bson::ser::Error as BsonError;
use mongodb::error::Error as DatabaseError;
use serde::{Serialize, Serializer};

use crate::form::{Field, FieldErrors};
use crate::placement::PlacementId;
use crate::reference::{ReferenceId, ReferenceKind};

#[derive(Debug, Serialize, Derivative)]
#[derivative(PartialEq, Eq)]
#[serde(untagged)]
pub enum Error {
    // 400
    #[serde(serialize_with = "display")]
    InvalidJson(#[derivative(PartialEq = "ignore")] JsonPayloadError),
    #[serde(serialize_with = "display")]
    InvalidPath(#[derivative(PartialEq = "ignore")] PathError),
    #[serde(serialize_with = "display")]
    InvalidQuery(#[derivative(PartialEq = "ignore")] QueryPayloadError),
    InvalidReferenceName {
        kind: ReferenceKind,
    },
    DraftViolatesSchema {
        violations: FieldErrors,
    },
    FieldTypeMismatch {
        field: Field,
    },

    // 404
    PathNotFound,
    ReferenceNotFound {
        kind: ReferenceKind,
        reference_id: ReferenceId,
    },
    PlacementNotFound {
        placement_id: PlacementId,
    },
    TrackingCodeNotFound {
        tracking_code: String,
    },

    // 409
    ConcurrentModificationDetected,
    DuplicateReferenceName {
        kind: ReferenceKind,
        name: String,
    },
    PlacementIsArchived {
        placement_id: PlacementId,
    },
    DuplicateTrackingCode {
        tracking_code: String,
    },

    // 500
    ExistentialState(String),
    TrackingCodesExhausted {
        attempts: usize,
    },
    InvalidConfiguration {
        key: String,
        value: String,
    },
    #[serde(serialize_with = "display")]
    FailedDatabaseCall(#[derivative(PartialEq = "ignore")] DatabaseError),
    #[serde(serialize_with = "display")]
    FailedToSerializeToBson(#[derivative(PartialEq = "ignore")] BsonError),
    #[serde(serialize_with = "display")]
    IoError(#[derivative(PartialEq = "ignore")] IoError),
}

impl Error {
    pub fn error_code(&self) -> &'static str {
        match self {
            Error::InvalidJson(_) => "E4001000",
            Error::InvalidPath(_) => "E4001001",
            Error::InvalidQuery(_) => "E4001003",
            Error::InvalidReferenceName { .. } => "E4001004",
            Error::DraftViolatesSchema { .. } => "E4001005",
            Error::FieldTypeMismatch { .. } => "E4001006",
            Error::PathNotFound => "E4041000",
            Error::ReferenceNotFound { .. } => "E4041001",
            Error::PlacementNotFound { .. } => "E4041002",
            Error::TrackingCodeNotFound { .. } => "E4041003",
            Error::ConcurrentModificationDetected => "E4091000",
            Error::DuplicateReferenceName { .. } => "E4091001",
            Error::PlacementIsArchived { .. } => "E4091002",
            Error::DuplicateTrackingCode { .. } => "E4091003",
            Error::ExistentialState(_) => "E5001000",
            Error::FailedDatabaseCall(_) => "E5001001",
            Error::FailedToSerializeToBson(_) => "E5001002",
            Error::IoError(_) => "E5001003",
            Error::TrackingCodesExhausted { .. } => "E5001004",
            Error::InvalidConfiguration { .. } => "E5001005",
        }
    }

    pub fn error_message(&self) -> &'static str {
        match self {
            Error::InvalidJson(_) => "The given json could not be parsed",
            Error::InvalidPath(_) => "The given path could not be parsed",
            Error::InvalidQuery(_) => "The given query could not be parsed",
            Error::InvalidReferenceName { .. } => "The given name must not be empty",
            Error::DraftViolatesSchema { .. } => "The given campaign draft has invalid fields",
            Error::FieldTypeMismatch { .. } => "The given value does not fit the field",
            Error::PathNotFound => "The requested path was not found",
            Error::ReferenceNotFound { .. } => "The requested record was not found",
            Error::PlacementNotFound { .. } => "The requested placement was not found",
            Error::TrackingCodeNotFound { .. } => {
                "No placement exists with the requested tracking code"
            }
            Error::ConcurrentModificationDetected => {
                "The server detected a concurrent modification"
            }
            Error::DuplicateReferenceName { .. } => "A record with the given name already exists",
            Error::PlacementIsArchived { .. } => "The requested placement is archived",
            Error::DuplicateTrackingCode { .. } => {
                "A placement with the tracking code already exists"
            }
            Error::ExistentialState(_) => "The server detected an invalid state",
            Error::TrackingCodesExhausted { .. } => {
                "The server could not generate a unique tracking code"
            }
            Error::InvalidConfiguration { .. } => "The server configuration could not be parsed",
            Error::FailedDatabaseCall(_) => {
                "An error occurred when communicating with the database"
            }
            Error::FailedToSerializeToBson(_) => {
                "An error occurred when serializing an object to bson"
            }
            Error::IoError(_) => "An error occurred during an I/O operation",
        }
    }
}

impl ResponseError for Error {
    fn status_code(&self) -> StatusCode {
        match self {
            Error::InvalidJson(_) => StatusCode::BAD_REQUEST,
            Error::InvalidPath(_) => StatusCode::BAD_REQUEST,
            Error::InvalidQuery(_) => StatusCode::BAD_REQUEST,
            Error::InvalidReferenceName { .. } => StatusCode::BAD_REQUEST,
            Error::DraftViolatesSchema { .. } => StatusCode::BAD_REQUEST,
            Error::FieldTypeMismatch { .. } => StatusCode::BAD_REQUEST,
            Error::PathNotFound => StatusCode::NOT_FOUND,
            Error::ReferenceNotFound { .. } => StatusCode::NOT_FOUND,
            Error::PlacementNotFound { .. } => StatusCode::NOT_FOUND,
            Error::TrackingCodeNotFound { .. } => StatusCode::NOT_FOUND,
            Error::ConcurrentModificationDetected => StatusCode::CONFLICT,
            Error::DuplicateReferenceName { .. } => StatusCode::CONFLICT,
            Error::PlacementIsArchived { .. } => StatusCode::CONFLICT,
            Error::DuplicateTrackingCode { .. } => StatusCode::CONFLICT,
            Error::ExistentialState(_) => StatusCode::INTERNAL_SERVER_ERROR,
            Error::TrackingCodesExhausted { .. } => StatusCode::INTERNAL_SERVER_ERROR,
            Error::InvalidConfiguration { .. } => StatusCode::INTERNAL_SERVER_ERROR,
            Error::FailedDatabaseCall(_) => StatusCode::INTERNAL_SERVER_ERROR,
            Error::FailedToSerializeToBson(_) => StatusCode::INTERNAL_SERVER_ERROR,
            Error::IoError(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn error_response(&self) -> HttpResponse {
        #[derive(Serialize)]
        struct Dummy<'a> {
            error_code: &'static str,
            error_message: &'static str,
            error_meta: &'a Error,
        }

        HttpResponse::build(self.status_code()).json(&Dummy {
            error_code: self.error_code(),
            error_message: self.error_message(),
            error_meta: self,
        })
    }
}

impl Display for Error {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> Result<(), std::fmt::Error> {
        Debug::fmt(self, f)
    }
}

impl From<DatabaseError> for Error {
    fn from(error: DatabaseError) -> Error {
        Error::FailedDatabaseCall(error)
    }
}

impl From<BsonError> for Error {
    fn from(error: BsonError) -> Error {
        Error::FailedToSerializeToBson(error)
    }
}

impl From<IoError> for Error {
    fn from(error: IoError) -> Error {
        Error::IoError(error)
    }
}

impl std::error::Error for Error {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Error::InvalidJson(err) => Some(err),
            Error::InvalidPath(err) => Some(err),
            Error::InvalidQuery(err) => Some(err),
            Error::FailedDatabaseCall(err) => Some(err),
            Error::FailedToSerializeToBson(err) => Some(err),
            Error::IoError(err) => Some(err),
            _ => None,
        }
    }
}

fn display<T, S>(value: &T, serializer: S) -> Result<S::Ok, S::Error>
where
    T: Display,
    S: Serializer,
{
    serializer.collect_str(value)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_response_uses_envelope() {
        let error = Error::DuplicateReferenceName {
            kind: ReferenceKind::Partner,
            name: "Acme".to_string(),
        };

        let body = serde_json::to_value(&error).unwrap();

        assert_eq!(error.status_code(), StatusCode::CONFLICT);
        assert_eq!(error.error_code(), "E4091001");
        assert_eq!(body["kind"], "partner");
        assert_eq!(body["name"], "Acme");
    }

    #[test]
    fn violations_serialize_by_field_name() {
        let mut violations = FieldErrors::new();
        violations.insert(Field::SubLedger, "This field is required".to_string());
        let error = Error::DraftViolatesSchema { violations };

        let body = serde_json::to_value(&error).unwrap();

        assert_eq!(error.status_code(), StatusCode::BAD_REQUEST);
        assert_eq!(body["violations"]["sub_ledger"], "This field is required");
    }
}
