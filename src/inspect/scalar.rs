//! Scalar strategy: a leaf with display text and no children

use super::format::{format_value, FormatOptions};
use super::InspectOptions;
use crate::errors::InspectError;
use crate::host::Host;
use crate::memory::Value;

pub struct ScalarInspector<'a> {
    value: &'a Value,
    host: &'a dyn Host,
    options: InspectOptions,
}

impl<'a> ScalarInspector<'a> {
    pub fn new(value: &'a Value, host: &'a dyn Host, options: InspectOptions) -> Self {
        ScalarInspector {
            value,
            host,
            options,
        }
    }

    pub fn value(&self) -> &'a Value {
        self.value
    }

    pub fn to_display_string(&self) -> Result<String, InspectError> {
        format_value(self.value, self.host, FormatOptions::raw(self.options.format))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::memory::Type;

    struct NoHost;
    impl Host for NoHost {}

    #[test]
    fn test_honours_format_letter() {
        let v = Value::int(&Type::int("int"), 255);
        let hex = InspectOptions {
            format: Some('x'),
            ..InspectOptions::default()
        };
        assert_eq!(
            ScalarInspector::new(&v, &NoHost, InspectOptions::default())
                .to_display_string()
                .unwrap(),
            "255"
        );
        assert_eq!(
            ScalarInspector::new(&v, &NoHost, hex).to_display_string().unwrap(),
            "0xff"
        );
    }

    #[test]
    fn test_bad_format_letter_is_an_error() {
        let v = Value::int(&Type::int("int"), 1);
        let options = InspectOptions {
            format: Some('y'),
            ..InspectOptions::default()
        };
        assert_eq!(
            ScalarInspector::new(&v, &NoHost, options).to_display_string(),
            Err(InspectError::BadFormat('y'))
        );
    }
}
