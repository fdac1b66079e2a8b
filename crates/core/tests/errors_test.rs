use std::error::Error;
use studyconnect_core::errors::{StudyError, StudyResult};

#[test]
fn test_study_error_display() {
    let not_found = StudyError::NotFound("Profile not found".to_string());
    let validation = StudyError::Validation("Invalid input".to_string());
    let malformed = StudyError::malformed("s1", "missing sessionDate");
    let store = StudyError::Store(eyre::eyre!("Connection refused"));
    let geocode = StudyError::Geocode("No match".to_string());
    let storage = StudyError::Storage("Disk full".to_string());
    let internal = StudyError::Internal(Box::new(std::io::Error::new(
        std::io::ErrorKind::Other,
        "Internal error",
    )));

    assert_eq!(
        not_found.to_string(),
        "Resource not found: Profile not found"
    );
    assert_eq!(validation.to_string(), "Validation error: Invalid input");
    assert_eq!(
        malformed.to_string(),
        "Malformed record s1: missing sessionDate"
    );
    assert!(store.to_string().contains("Store error:"));
    assert_eq!(geocode.to_string(), "Geocoding error: No match");
    assert_eq!(storage.to_string(), "Storage error: Disk full");
    assert!(internal.to_string().contains("Internal error:"));
}

#[test]
fn test_error_source() {
    let io_error = std::io::Error::new(std::io::ErrorKind::Other, "IO error");
    let study_error = StudyError::Internal(Box::new(io_error));

    assert!(study_error.source().is_some());
}

#[test]
fn test_study_result() {
    let result: StudyResult<i32> = Ok(42);
    assert_eq!(result.unwrap(), 42);

    let result: StudyResult<i32> = Err(StudyError::NotFound("Not found".to_string()));
    assert!(result.is_err());
}

#[test]
fn test_from_eyre_report() {
    fn fails() -> StudyResult<()> {
        Err(eyre::eyre!("pool timed out"))?
    }

    let err = fails().unwrap_err();
    assert!(matches!(err, StudyError::Store(_)));
    assert!(err.to_string().contains("pool timed out"));
}
