//! Driver and relocation errors

use super::StevedoreError;

pub fn unsupported_driver(driver: impl Into<String>) -> StevedoreError {
    StevedoreError::UnsupportedDriver {
        driver: driver.into(),
    }
}

pub fn invalid_relocation_mapping(
    path: impl Into<String>,
    reason: impl Into<String>,
) -> StevedoreError {
    StevedoreError::InvalidRelocationMapping {
        path: path.into(),
        reason: reason.into(),
    }
}

pub fn driver_failed(message: impl Into<String>) -> StevedoreError {
    StevedoreError::DriverFailed {
        message: message.into(),
    }
}

pub fn unknown_action(bundle: impl Into<String>, action: impl Into<String>) -> StevedoreError {
    StevedoreError::UnknownAction {
        bundle: bundle.into(),
        action: action.into(),
    }
}
