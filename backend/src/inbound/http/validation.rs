//! Presence checks for `GET /route` query parameters.

use serde_json::json;

use crate::domain::Error;

/// Detail code attached to every missing-parameter error.
const MISSING_FIELD: &str = "missing_field";

/// Query parameter naming one end of the route.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum LocationField {
    Start,
    Destination,
}

impl LocationField {
    const fn name(self) -> &'static str {
        match self {
            Self::Start => "start",
            Self::Destination => "destination",
        }
    }

    fn missing(self) -> Error {
        let name = self.name();
        Error::invalid_request(format!("missing required field: {name}"))
            .with_details(json!({ "field": name, "code": MISSING_FIELD }))
    }
}

/// Trim the parameter, treating absent and whitespace-only values alike.
pub(crate) fn require_location(
    value: Option<String>,
    field: LocationField,
) -> Result<String, Error> {
    match value.as_deref().map(str::trim) {
        Some(trimmed) if !trimmed.is_empty() => Ok(trimmed.to_owned()),
        _ => Err(field.missing()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::ErrorCode;
    use rstest::rstest;

    #[rstest]
    #[case(None, LocationField::Start)]
    #[case(Some(String::new()), LocationField::Destination)]
    #[case(Some("   ".to_owned()), LocationField::Start)]
    fn absent_or_blank_values_are_missing(
        #[case] value: Option<String>,
        #[case] field: LocationField,
    ) {
        let err = require_location(value, field).expect_err("missing");
        assert_eq!(err.code(), ErrorCode::InvalidRequest);
        assert_eq!(
            err.details(),
            Some(&json!({ "field": field.name(), "code": "missing_field" }))
        );
    }

    #[test]
    fn values_are_trimmed() {
        let value =
            require_location(Some(" Pune ".to_owned()), LocationField::Start).expect("present");
        assert_eq!(value, "Pune");
    }
}
