use std::{
    error::Error,
    fmt::{Display, Formatter, Result as FmtResult},
};

/// Structural problems with a policy document that parsed as JSON but does not have the shape of an IAM policy.
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum SchemaError {
    MissingVersion,
    InvalidVersion,
    MissingStatement,
    InvalidEffect,
    MissingAction,
    MissingResource,

    /// A present `Action`, `NotAction`, `Resource`, or `NotResource` value was neither a string nor an array of
    /// strings. The field name is carried along.
    InvalidStringList(&'static str),
}

impl Display for SchemaError {
    fn fmt(&self, f: &mut Formatter) -> FmtResult {
        match self {
            Self::MissingVersion => f.write_str(r#"Missing "Version" field in policy"#),
            Self::InvalidVersion => f.write_str(r#"Invalid "Version" field in policy (must be a string)"#),
            Self::MissingStatement => f.write_str(r#"Missing or invalid "Statement" array in policy"#),
            Self::InvalidEffect => f.write_str(r#"Statement missing valid "Effect" (must be "Allow" or "Deny")"#),
            Self::MissingAction => f.write_str(r#"Statement missing "Action" or "NotAction" field"#),
            Self::MissingResource => f.write_str(r#"Statement missing "Resource" or "NotResource" field"#),
            Self::InvalidStringList(field) => {
                write!(f, r#"Statement "{}" must be a string or an array of strings"#, field)
            }
        }
    }
}

impl Error for SchemaError {}

#[derive(Clone, Debug, Eq, PartialEq)]
pub enum PolicyError {
    /// The text is not well-formed JSON. Carries the parser's message.
    Parse(String),

    /// The JSON does not have the shape of an IAM policy.
    Schema(SchemaError),
}

impl PolicyError {
    #[inline]
    pub fn is_parse(&self) -> bool {
        matches!(self, Self::Parse(_))
    }

    #[inline]
    pub fn is_schema(&self) -> bool {
        matches!(self, Self::Schema(_))
    }
}

impl Display for PolicyError {
    fn fmt(&self, f: &mut Formatter) -> FmtResult {
        match self {
            Self::Parse(msg) => f.write_str(msg),
            Self::Schema(e) => Display::fmt(e, f),
        }
    }
}

impl Error for PolicyError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Parse(_) => None,
            Self::Schema(e) => Some(e),
        }
    }
}

impl From<serde_json::Error> for PolicyError {
    fn from(e: serde_json::Error) -> Self {
        Self::Parse(e.to_string())
    }
}

impl From<SchemaError> for PolicyError {
    fn from(e: SchemaError) -> Self {
        Self::Schema(e)
    }
}
