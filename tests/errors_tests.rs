use geolookup::errors::{GeoLookupError, Result};
use std::error::Error;

#[cfg(test)]
mod error_creation_tests {
    use super::*;

    #[test]
    fn test_missing_parameter_error() {
        let error = GeoLookupError::missing_parameter("ip");

        assert!(matches!(error, GeoLookupError::MissingParameter(_)));
        assert_eq!(error.to_string(), "Missing Parameter: ip");
    }

    #[test]
    fn test_invalid_target_error() {
        let error = GeoLookupError::invalid_target("not-a-host");

        assert!(matches!(error, GeoLookupError::InvalidTarget(_)));
        assert!(error.to_string().contains("Invalid Target"));
        assert!(error.to_string().contains("not-a-host"));
    }

    #[test]
    fn test_resolution_failure_error() {
        let error = GeoLookupError::resolution_failure("NXDOMAIN");

        assert!(matches!(error, GeoLookupError::ResolutionFailure(_)));
        assert!(error.to_string().contains("Resolution Failure"));
    }

    #[test]
    fn test_upstream_errors() {
        let failure = GeoLookupError::upstream_failure("timed out");
        let rejected = GeoLookupError::upstream_rejected("fail");

        assert!(matches!(failure, GeoLookupError::UpstreamFailure(_)));
        assert!(matches!(rejected, GeoLookupError::UpstreamRejected(_)));
        assert_ne!(failure.code(), rejected.code());
    }

    #[test]
    fn test_message_is_inner_text() {
        let error = GeoLookupError::file_operation("permission denied");
        assert_eq!(error.message(), "permission denied");
    }
}

#[cfg(test)]
mod error_code_tests {
    use super::*;

    #[test]
    fn test_codes_are_unique() {
        let errors = [
            GeoLookupError::missing_parameter(""),
            GeoLookupError::invalid_target(""),
            GeoLookupError::resolution_failure(""),
            GeoLookupError::upstream_failure(""),
            GeoLookupError::upstream_rejected(""),
            GeoLookupError::file_operation(""),
            GeoLookupError::serialization(""),
            GeoLookupError::config(""),
        ];

        let mut codes: Vec<&str> = errors.iter().map(|e| e.code()).collect();
        codes.sort();
        codes.dedup();
        assert_eq!(codes.len(), errors.len());
        assert_eq!(errors[0].code(), "E001");
        assert_eq!(errors[7].code(), "E008");
    }

    #[test]
    fn test_format_colored_contains_code_and_message() {
        let error = GeoLookupError::config("bad port");
        let output = error.format_colored();

        assert!(output.contains("E008"));
        assert!(output.contains("bad port"));
    }
}

#[cfg(test)]
mod conversion_tests {
    use super::*;

    #[test]
    fn test_from_io_error() {
        let io = std::io::Error::new(std::io::ErrorKind::PermissionDenied, "denied");
        let error: GeoLookupError = io.into();

        assert!(matches!(error, GeoLookupError::FileOperation(_)));
        assert!(error.message().contains("denied"));
    }

    #[test]
    fn test_from_serde_json_error() {
        let json_err = serde_json::from_str::<Vec<String>>("{").unwrap_err();
        let error: GeoLookupError = json_err.into();

        assert!(matches!(error, GeoLookupError::Serialization(_)));
    }

    #[test]
    fn test_question_mark_propagation() {
        fn parse(raw: &str) -> Result<Vec<String>> {
            Ok(serde_json::from_str(raw)?)
        }

        assert!(parse(r#"["1.1.1.1"]"#).is_ok());
        assert!(matches!(
            parse("nope"),
            Err(GeoLookupError::Serialization(_))
        ));
    }

    #[test]
    fn test_implements_std_error() {
        let error = GeoLookupError::upstream_failure("x");
        let boxed: Box<dyn Error> = Box::new(error);
        assert!(boxed.source().is_none());
    }
}
