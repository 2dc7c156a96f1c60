use {
    crate::{display_json, serutil::is_present, Effect, PolicyError, SchemaError},
    log::debug,
    serde::{Deserialize, Serialize},
    serde_json::{Map, Value},
};

/// The outcome of validating policy text: `{"valid": true}` or `{"valid": false, "error": "..."}`.
#[derive(Clone, Debug, Deserialize, Eq, PartialEq, Serialize)]
pub struct Validation {
    valid: bool,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    error: Option<String>,
}

impl Validation {
    #[inline]
    pub fn ok() -> Self {
        Self {
            valid: true,
            error: None,
        }
    }

    #[inline]
    pub fn is_valid(&self) -> bool {
        self.valid
    }

    #[inline]
    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }
}

impl From<Result<(), PolicyError>> for Validation {
    fn from(result: Result<(), PolicyError>) -> Self {
        match result {
            Ok(()) => Self::ok(),
            Err(e) => Self {
                valid: false,
                error: Some(e.to_string()),
            },
        }
    }
}

display_json!(Validation);

/// Validate policy text, reporting the first problem found as a message.
pub fn validate(text: &str) -> Validation {
    check(text).into()
}

/// Validate policy text, stopping at the first problem found.
///
/// Checks run in document order: JSON syntax, `Version`, `Statement`, then for each statement its `Effect`,
/// `Action`/`NotAction`, and `Resource`/`NotResource`.
pub fn check(text: &str) -> Result<(), PolicyError> {
    let policy: Value = serde_json::from_str(text).map_err(|e| {
        debug!("Policy is not valid JSON: {}", e);
        PolicyError::from(e)
    })?;

    let empty = Map::new();
    let policy = policy.as_object().unwrap_or(&empty);

    match policy.get("Version") {
        Some(version) if is_present(version) => {
            if !version.is_string() {
                return Err(SchemaError::InvalidVersion.into());
            }
        }
        _ => return Err(SchemaError::MissingVersion.into()),
    }

    let statements = match policy.get("Statement") {
        Some(Value::Array(statements)) => statements,
        _ => return Err(SchemaError::MissingStatement.into()),
    };

    for (i, statement) in statements.iter().enumerate() {
        check_statement(statement).map_err(|e| {
            debug!("Statement {} is invalid: {}", i, e);
            PolicyError::from(e)
        })?;
    }

    Ok(())
}

fn check_statement(statement: &Value) -> Result<(), SchemaError> {
    let statement = match statement.as_object() {
        Some(statement) => statement,
        None => return Err(SchemaError::InvalidEffect),
    };

    if statement.get("Effect").and_then(Value::as_str).and_then(Effect::from_json_str).is_none() {
        return Err(SchemaError::InvalidEffect);
    }

    check_either(statement, "Action", "NotAction", SchemaError::MissingAction)?;
    check_either(statement, "Resource", "NotResource", SchemaError::MissingResource)
}

/// At least one of the two fields must be present, and every present value must be a string or a list of strings.
fn check_either(
    statement: &Map<String, Value>,
    field: &'static str,
    not_field: &'static str,
    missing: SchemaError,
) -> Result<(), SchemaError> {
    let value = statement.get(field);
    let not_value = statement.get(not_field);

    if !value.map(is_present).unwrap_or(false) && !not_value.map(is_present).unwrap_or(false) {
        return Err(missing);
    }

    for (name, value) in [(field, value), (not_field, not_value)] {
        if let Some(value) = value.filter(|v| is_present(v)) {
            if !is_string_list(value) {
                return Err(SchemaError::InvalidStringList(name));
            }
        }
    }

    Ok(())
}

fn is_string_list(value: &Value) -> bool {
    match value {
        Value::String(_) => true,
        Value::Array(items) => items.iter().all(Value::is_string),
        _ => false,
    }
}
