use std::fmt;

/// One failed field rule.
#[derive(Debug, Clone, PartialEq, Eq)]
struct FieldError {
    field: &'static str,
    message: String,
}

/// All rule failures collected for a record, in field declaration order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ValidationErrors {
    errors: Vec<FieldError>,
}

impl ValidationErrors {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add(&mut self, field: &'static str, message: impl Into<String>) {
        self.errors.push(FieldError {
            field,
            message: message.into(),
        });
    }

    pub fn is_empty(&self) -> bool {
        self.errors.is_empty()
    }

    pub fn has_field(&self, field: &str) -> bool {
        self.errors.iter().any(|e| e.field == field)
    }

    /// `Ok(())` when no rule failed.
    pub fn into_result(self) -> Result<(), ValidationErrors> {
        if self.is_empty() {
            Ok(())
        } else {
            Err(self)
        }
    }

    /// Requires a non-blank string. Returns the value when present so further
    /// rules can run on it.
    pub fn required<'a>(
        &mut self,
        field: &'static str,
        value: Option<&'a str>,
        message: &str,
    ) -> Option<&'a str> {
        match value {
            Some(v) if !v.trim().is_empty() => Some(v),
            _ => {
                self.add(field, message);
                None
            }
        }
    }

    pub fn min_len(&mut self, field: &'static str, value: &str, min: usize) {
        if value.chars().count() < min {
            self.add(field, format!("{} must be at least {} characters", field, min));
        }
    }

    pub fn max_len(&mut self, field: &'static str, value: &str, max: usize) {
        if value.chars().count() > max {
            self.add(field, format!("{} must be at most {} characters", field, max));
        }
    }
}

impl fmt::Display for ValidationErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let joined = self
            .errors
            .iter()
            .map(|e| e.message.as_str())
            .collect::<Vec<_>>()
            .join(",");
        f.write_str(&joined)
    }
}

impl std::error::Error for ValidationErrors {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn joins_messages_in_order() {
        let mut errors = ValidationErrors::new();
        errors.required("name", None, "Please provide name");
        errors.required("email", Some("   "), "Please provide email");

        assert_eq!(errors.to_string(), "Please provide name,Please provide email");
        assert!(errors.has_field("email"));
        assert!(errors.into_result().is_err());
    }

    #[test]
    fn length_rules_count_characters() {
        let mut errors = ValidationErrors::new();
        errors.min_len("name", "Zoë", 3);
        errors.max_len("name", "Zoë", 3);
        assert!(errors.is_empty());

        errors.min_len("name", "Al", 3);
        assert_eq!(errors.to_string(), "name must be at least 3 characters");
    }
}
