//! Unit tests for JsError and ErrorKind

use core_types::{ErrorKind, JsError, Value};

#[cfg(test)]
mod error_kind_tests {
    use super::*;

    #[test]
    fn test_error_kind_type_error() {
        let kind = ErrorKind::TypeError;
        assert!(matches!(kind, ErrorKind::TypeError));
    }

    #[test]
    fn test_error_kind_display_uses_constructor_name() {
        assert_eq!(format!("{}", ErrorKind::TypeError), "TypeError");
        assert_eq!(format!("{}", ErrorKind::Error), "Error");
    }

    #[test]
    fn test_error_kind_equality() {
        assert_eq!(ErrorKind::TypeError, ErrorKind::TypeError);
        assert_ne!(ErrorKind::TypeError, ErrorKind::Error);
    }
}

#[cfg(test)]
mod js_error_tests {
    use super::*;

    #[test]
    fn test_js_error_constructors_set_kind() {
        assert_eq!(JsError::error("a").kind, ErrorKind::Error);
        assert_eq!(JsError::type_error("b").kind, ErrorKind::TypeError);
    }

    #[test]
    fn test_js_error_is_std_error() {
        let error: Box<dyn std::error::Error> = Box::new(JsError::type_error("bad executor"));
        assert_eq!(error.to_string(), "TypeError: bad executor");
    }

    #[test]
    fn test_js_error_equality_by_kind_and_message() {
        assert_eq!(JsError::type_error("x"), JsError::type_error("x"));
        assert_ne!(JsError::type_error("x"), JsError::error("x"));
        assert_ne!(JsError::type_error("x"), JsError::type_error("y"));
    }

    #[test]
    fn test_js_error_as_thrown_value() {
        let thrown = Value::from(JsError::type_error("cycle"));
        assert!(thrown.is_error_of(ErrorKind::TypeError));
        assert!(!Value::from("cycle").is_error_of(ErrorKind::TypeError));
    }
}
