//! Unit tests for Value enum

use core_types::{Function, JsError, PlainObject, Value};

#[cfg(test)]
mod value_creation_tests {
    use super::*;

    #[test]
    fn test_value_from_primitives() {
        assert_eq!(Value::from(true), Value::Boolean(true));
        assert_eq!(Value::from(42), Value::Smi(42));
        assert_eq!(Value::from(1.5), Value::Double(1.5));
        assert_eq!(Value::from("a"), Value::String("a".to_string()));
    }

    #[test]
    fn test_value_from_vec() {
        let value = Value::from(vec![Value::Smi(1), Value::Smi(2)]);
        assert_eq!(value.as_array(), Some(&[Value::Smi(1), Value::Smi(2)][..]));
    }

    #[test]
    fn test_value_debug_hides_callables() {
        let value = Value::Function(Function::constant(Value::Null));
        assert_eq!(format!("{:?}", value), "Function(...)");
        let obj = PlainObject::new().into_value();
        assert_eq!(format!("{:?}", obj), "Object(Object)");
    }
}

#[cfg(test)]
mod value_equality_tests {
    use super::*;

    #[test]
    fn test_double_nan_not_equal() {
        assert_ne!(Value::Double(f64::NAN), Value::Double(f64::NAN));
    }

    #[test]
    fn test_different_variants_not_equal() {
        assert_ne!(Value::Smi(1), Value::Double(1.0));
        assert_ne!(Value::Null, Value::Undefined);
    }

    #[test]
    fn test_functions_compare_by_identity() {
        let f = Function::constant(Value::Null);
        assert_eq!(Value::Function(f.clone()), Value::Function(f));
        assert_ne!(
            Value::Function(Function::constant(Value::Null)),
            Value::Function(Function::constant(Value::Null))
        );
    }

    #[test]
    fn test_errors_compare_by_content() {
        assert_eq!(
            Value::from(JsError::type_error("t")),
            Value::from(JsError::type_error("t"))
        );
    }
}

#[cfg(test)]
mod value_accessor_tests {
    use super::*;

    #[test]
    fn test_as_function() {
        let value = Value::Function(Function::constant(Value::Smi(1)));
        let f = value.as_function().unwrap();
        assert_eq!(f.call(&[]).unwrap(), Value::Smi(1));
        assert!(Value::Null.as_function().is_none());
    }

    #[test]
    fn test_as_object() {
        assert!(PlainObject::new().into_value().as_object().is_some());
        assert!(Value::Array(vec![]).as_object().is_none());
    }

    #[test]
    fn test_as_array() {
        assert!(Value::Array(vec![]).as_array().unwrap().is_empty());
        assert!(Value::from("[]").as_array().is_none());
    }
}
