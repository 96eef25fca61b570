use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ControllerError {
    #[error("browser window is unavailable")]
    NoWindow,
    #[error("document is unavailable")]
    NoDocument,
    #[error("required element `{0}` is missing from the page")]
    MissingElement(&'static str),
    #[error("local storage is unavailable")]
    StorageUnavailable,
    #[error("{api} failed: {message}")]
    Browser { api: &'static str, message: String },
}

/// Turns an absent required element into [`ControllerError::MissingElement`].
pub fn require<T>(element: Option<T>, selector: &'static str) -> Result<T, ControllerError> {
    element.ok_or(ControllerError::MissingElement(selector))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_element_names_the_selector() {
        let error = require::<()>(None, "#themeToggle").unwrap_err();
        assert_eq!(error, ControllerError::MissingElement("#themeToggle"));
        assert_eq!(
            error.to_string(),
            "required element `#themeToggle` is missing from the page"
        );
    }

    #[test]
    fn present_element_passes_through() {
        assert_eq!(require(Some(7), ".navbar"), Ok(7));
    }
}
