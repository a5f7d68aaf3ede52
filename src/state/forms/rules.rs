//! Field rules and the pure field validator

use regex::Regex;
use std::sync::LazyLock;

static NAME_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[a-zA-Z\s'-]{2,50}$").expect("name pattern is a valid regex")
});

static EMAIL_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").expect("email pattern is a valid regex")
});

// ASCII digits only; `\d` would also accept other Unicode digits.
static AGE_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^(?:1[6-9]|[2-9][0-9]|100)$").expect("age pattern is a valid regex")
});

pub const REQUIRED_MESSAGE: &str = "This field is required";
pub const NAME_MESSAGE: &str = "Please enter a valid name (2-50 characters, letters only)";
pub const EMAIL_MESSAGE: &str = "Please enter a valid email address";
pub const AGE_MESSAGE: &str = "Please enter a valid age (16-100)";
pub const SESSION_TYPE_MESSAGE: &str = "Please select a session type";
pub const AVAILABILITY_MESSAGE: &str = "Please provide more details about your availability";

const MIN_AGE: u32 = 16;
const MAX_AGE: u32 = 100;
const MIN_AVAILABILITY_CHARS: usize = 5;

/// Result of validating one field value
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ValidationOutcome {
    Valid,
    Invalid(String),
}

impl ValidationOutcome {
    pub fn is_valid(&self) -> bool {
        matches!(self, Self::Valid)
    }

    pub fn message(&self) -> Option<&str> {
        match self {
            Self::Valid => None,
            Self::Invalid(message) => Some(message),
        }
    }

    fn invalid(message: &str) -> Self {
        Self::Invalid(message.to_string())
    }
}

/// A selectable option for a select field
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SelectOption {
    pub value: &'static str,
    pub label: &'static str,
}

/// How a field is edited and rendered
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldKind {
    Text,
    Email,
    Number,
    Select(&'static [SelectOption]),
    TextArea,
}

impl FieldKind {
    pub fn is_multiline(&self) -> bool {
        matches!(self, Self::TextArea)
    }
}

/// Fixed validation contract for one named form input
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldRule {
    pub name: &'static str,
    pub label: &'static str,
    pub required: bool,
    pub kind: FieldKind,
}

impl FieldRule {
    pub const fn new(
        name: &'static str,
        label: &'static str,
        required: bool,
        kind: FieldKind,
    ) -> Self {
        Self {
            name,
            label,
            required,
            kind,
        }
    }

    /// Validate a raw value against this rule
    pub fn validate(&self, raw: &str) -> ValidationOutcome {
        FieldValidator::validate(self.name, self.required, raw)
    }
}

/// Maps a field's name and raw value to a [`ValidationOutcome`]
///
/// Validation is pure: presentation effects are applied by the caller.
pub struct FieldValidator;

impl FieldValidator {
    pub fn validate(name: &str, required: bool, raw: &str) -> ValidationOutcome {
        let value = raw.trim();

        if value.is_empty() {
            return if required {
                ValidationOutcome::invalid(REQUIRED_MESSAGE)
            } else {
                ValidationOutcome::Valid
            };
        }

        match name {
            "fullName" if !NAME_PATTERN.is_match(value) => {
                ValidationOutcome::invalid(NAME_MESSAGE)
            }
            "email" if !EMAIL_PATTERN.is_match(value) => ValidationOutcome::invalid(EMAIL_MESSAGE),
            "age" if !is_valid_age(value) => ValidationOutcome::invalid(AGE_MESSAGE),
            // Unreachable after the empty check above
            "sessionType" if value.is_empty() => ValidationOutcome::invalid(SESSION_TYPE_MESSAGE),
            "availability" if value.chars().count() < MIN_AVAILABILITY_CHARS => {
                ValidationOutcome::invalid(AVAILABILITY_MESSAGE)
            }
            _ => ValidationOutcome::Valid,
        }
    }
}

fn is_valid_age(value: &str) -> bool {
    AGE_PATTERN.is_match(value)
        && value
            .parse::<u32>()
            .is_ok_and(|age| (MIN_AGE..=MAX_AGE).contains(&age))
}

pub const SESSION_TYPES: &[SelectOption] = &[
    SelectOption {
        value: "",
        label: "Select a session type",
    },
    SelectOption {
        value: "initial-consultation",
        label: "Initial Consultation (free, 20 min)",
    },
    SelectOption {
        value: "individual",
        label: "Individual Therapy (50 min)",
    },
    SelectOption {
        value: "emdr",
        label: "EMDR Session (80 min)",
    },
    SelectOption {
        value: "online",
        label: "Online Session (50 min)",
    },
];

/// Rules of the booking form, in document order
pub fn booking_rules() -> Vec<FieldRule> {
    vec![
        FieldRule::new("fullName", "Full Name", true, FieldKind::Text),
        FieldRule::new("email", "Email Address", true, FieldKind::Email),
        FieldRule::new("age", "Age", true, FieldKind::Number),
        FieldRule::new(
            "sessionType",
            "Session Type",
            true,
            FieldKind::Select(SESSION_TYPES),
        ),
        FieldRule::new("availability", "Availability", true, FieldKind::TextArea),
        FieldRule::new(
            "message",
            "Anything else we should know?",
            false,
            FieldKind::TextArea,
        ),
    ]
}
