use {
    crate::{
        display_json, from_str_json,
        serutil::{deserialize_present_string_list, StringList},
        Effect,
    },
    derive_builder::Builder,
    serde::{Deserialize, Serialize},
    serde_json::Value,
};

/// A single Allow/Deny rule within a policy document.
///
/// Only the elements the lens displays are modeled. Other statement elements (`Sid`, `Principal`, ...) are accepted
/// and ignored when deserializing. A falsy `Action`, `NotAction`, `Resource`, or `NotResource` (`null`, `false`, `0`,
/// `""`) reads as absent.
#[derive(Builder, Clone, Debug, Deserialize, Eq, PartialEq, Serialize)]
#[builder(build_fn(validate = "Self::validate"))]
#[serde(rename_all = "PascalCase")]
pub struct Statement {
    effect: Effect,

    #[builder(setter(into, strip_option), default)]
    #[serde(default, deserialize_with = "deserialize_present_string_list", skip_serializing_if = "Option::is_none")]
    action: Option<StringList>,

    #[builder(setter(into, strip_option), default)]
    #[serde(default, deserialize_with = "deserialize_present_string_list", skip_serializing_if = "Option::is_none")]
    not_action: Option<StringList>,

    #[builder(setter(into, strip_option), default)]
    #[serde(default, deserialize_with = "deserialize_present_string_list", skip_serializing_if = "Option::is_none")]
    resource: Option<StringList>,

    #[builder(setter(into, strip_option), default)]
    #[serde(default, deserialize_with = "deserialize_present_string_list", skip_serializing_if = "Option::is_none")]
    not_resource: Option<StringList>,

    /// The condition block, kept as opaque JSON.
    #[builder(setter(into, strip_option), default)]
    #[serde(default, skip_serializing_if = "Option::is_none")]
    condition: Option<Value>,
}

impl Statement {
    pub fn builder() -> StatementBuilder {
        StatementBuilder::default()
    }

    #[inline]
    pub fn effect(&self) -> Effect {
        self.effect
    }

    #[inline]
    pub fn action(&self) -> Option<&StringList> {
        self.action.as_ref()
    }

    #[inline]
    pub fn not_action(&self) -> Option<&StringList> {
        self.not_action.as_ref()
    }

    #[inline]
    pub fn resource(&self) -> Option<&StringList> {
        self.resource.as_ref()
    }

    #[inline]
    pub fn not_resource(&self) -> Option<&StringList> {
        self.not_resource.as_ref()
    }

    #[inline]
    pub fn condition(&self) -> Option<&Value> {
        self.condition.as_ref()
    }

    /// Actions named by `Action`, normalized to a sequence. A statement that only uses `NotAction` yields an empty
    /// sequence.
    pub fn actions(&self) -> Vec<String> {
        self.action.clone().map(StringList::into_vec).unwrap_or_default()
    }

    /// Resources named by `Resource`, normalized to a sequence. A statement that only uses `NotResource` yields an
    /// empty sequence.
    pub fn resources(&self) -> Vec<String> {
        self.resource.clone().map(StringList::into_vec).unwrap_or_default()
    }
}

display_json!(Statement);
from_str_json!(Statement);

impl StatementBuilder {
    fn validate(&self) -> Result<(), String> {
        let mut errors = Vec::with_capacity(3);
        if self.effect.is_none() {
            errors.push("Effect must be set.");
        }

        if matches!((&self.action, &self.not_action), (None | Some(None), None | Some(None))) {
            errors.push("Either Action or NotAction must be set.");
        }

        if matches!((&self.resource, &self.not_resource), (None | Some(None), None | Some(None))) {
            errors.push("Either Resource or NotResource must be set.");
        }

        if errors.is_empty() {
            Ok(())
        } else {
            Err(errors.join(" "))
        }
    }
}

/// The top-level structure of a policy document.
#[derive(Builder, Clone, Debug, Deserialize, Eq, PartialEq, Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct PolicyDocument {
    /// The version string. Any non-empty string is accepted; the lens does not interpret it.
    #[builder(setter(into))]
    version: String,

    #[builder(setter(into))]
    statement: Vec<Statement>,
}

impl PolicyDocument {
    #[inline]
    pub fn builder() -> PolicyDocumentBuilder {
        PolicyDocumentBuilder::default()
    }

    #[inline]
    pub fn version(&self) -> &str {
        &self.version
    }

    #[inline]
    pub fn statement(&self) -> &[Statement] {
        &self.statement
    }
}

display_json!(PolicyDocument);
from_str_json!(PolicyDocument);
