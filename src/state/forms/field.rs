//! Form field state

use super::rules::{FieldKind, FieldRule, ValidationOutcome};

/// Live state of one rendered field: its rule, current value and last outcome
#[derive(Debug, Clone)]
pub struct FieldState {
    pub rule: FieldRule,
    pub value: String,
    /// `None` until the field has been validated once
    pub last_outcome: Option<ValidationOutcome>,
}

impl FieldState {
    pub fn new(rule: FieldRule) -> Self {
        Self {
            rule,
            value: String::new(),
            last_outcome: None,
        }
    }

    pub fn name(&self) -> &'static str {
        self.rule.name
    }

    pub fn label(&self) -> &'static str {
        self.rule.label
    }

    pub fn is_multiline(&self) -> bool {
        self.rule.kind.is_multiline()
    }

    /// Whether the field is currently marked invalid
    pub fn is_invalid(&self) -> bool {
        matches!(self.last_outcome, Some(ValidationOutcome::Invalid(_)))
    }

    pub fn error_message(&self) -> Option<&str> {
        self.last_outcome.as_ref().and_then(ValidationOutcome::message)
    }

    /// Re-run the field's rule against its current value
    pub fn revalidate(&mut self) -> &ValidationOutcome {
        self.last_outcome.insert(self.rule.validate(&self.value))
    }

    /// Trimmed copy of the value, as collected for submission
    pub fn trimmed(&self) -> String {
        self.value.trim().to_string()
    }

    /// Push a character to the field value
    ///
    /// Number fields only accept ASCII digits; select fields ignore typing.
    pub fn push_char(&mut self, c: char) -> bool {
        match self.rule.kind {
            FieldKind::Number if !c.is_ascii_digit() => false,
            FieldKind::Select(_) => false,
            _ => {
                self.value.push(c);
                true
            }
        }
    }

    /// Remove the last character from the field value
    pub fn pop_char(&mut self) -> bool {
        if matches!(self.rule.kind, FieldKind::Select(_)) {
            return false;
        }
        self.value.pop().is_some()
    }

    /// Step through a select field's options, wrapping around
    pub fn cycle_option(&mut self, forward: bool) -> bool {
        let FieldKind::Select(options) = self.rule.kind else {
            return false;
        };
        if options.is_empty() {
            return false;
        }
        let current = options
            .iter()
            .position(|o| o.value == self.value)
            .unwrap_or(0);
        let next = if forward {
            (current + 1) % options.len()
        } else if current == 0 {
            options.len() - 1
        } else {
            current - 1
        };
        self.value = options[next].value.to_string();
        true
    }

    /// Reset to a pristine, never-validated field
    pub fn clear(&mut self) {
        self.value.clear();
        self.last_outcome = None;
    }

    /// Get the display value for rendering
    pub fn display_value(&self) -> String {
        match self.rule.kind {
            FieldKind::Select(options) => options
                .iter()
                .find(|o| o.value == self.value)
                .map(|o| o.label.to_string())
                .unwrap_or_else(|| self.value.clone()),
            _ => self.value.clone(),
        }
    }
}
