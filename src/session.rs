use {
    crate::{build_tree, highlight_html, summarize, validate, PolicySummary, ResourceTreeNode, Validation},
    log::debug,
};

/// The policy loaded into a fresh session.
pub const DEFAULT_POLICY: &str = r#"{
  "Version": "2025-05-24",
  "Statement": [
    {
      "Effect": "Allow",
      "Action": [
      ],
      "Resource": []
    }
  ]
}"#;

/// The text left behind after clearing a session.
pub const CLEARED_POLICY: &str = "{\n  \n}";

/// Everything a policy editor shows at one moment: the text being edited, the result of the last validation, and
/// the summary produced by it.
///
/// Each transition consumes the old state and returns a new one; nothing is updated in place. The tree and the
/// highlighted text are derived on demand.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct SessionState {
    text: String,
    validation: Option<Validation>,
    summary: Option<PolicySummary>,
}

impl SessionState {
    /// A session holding [DEFAULT_POLICY], already validated.
    pub fn new() -> Self {
        Self::with_text(DEFAULT_POLICY).validate()
    }

    /// A session holding the given text that has not been validated yet.
    pub fn with_text<S: Into<String>>(text: S) -> Self {
        Self {
            text: text.into(),
            validation: None,
            summary: None,
        }
    }

    #[inline]
    pub fn text(&self) -> &str {
        &self.text
    }

    #[inline]
    pub fn validation(&self) -> Option<&Validation> {
        self.validation.as_ref()
    }

    #[inline]
    pub fn summary(&self) -> Option<&PolicySummary> {
        self.summary.as_ref()
    }

    /// Replace the text. The last validation result and summary are kept until the next [SessionState::validate].
    pub fn set_text<S: Into<String>>(self, text: S) -> Self {
        Self {
            text: text.into(),
            ..self
        }
    }

    /// Validate the current text. A valid policy gets a fresh summary; an invalid one leaves no summary behind.
    ///
    /// Unlike an editor that keeps the previous summary on screen after a failed validation, the summary here always
    /// belongs to the validation next to it, so a failure clears it.
    pub fn validate(self) -> Self {
        let validation = validate(&self.text);
        let summary = if validation.is_valid() {
            summarize(&self.text)
        } else {
            debug!("Validation failed: {}", validation.error().unwrap_or_default());
            None
        };

        Self {
            text: self.text,
            validation: Some(validation),
            summary,
        }
    }

    /// Reset to an empty object with no validation result and no summary.
    pub fn clear(self) -> Self {
        Self::with_text(CLEARED_POLICY)
    }

    /// The permission tree for the current summary.
    pub fn tree(&self) -> Vec<ResourceTreeNode> {
        build_tree(self.summary.as_ref())
    }

    /// The current text as highlighted HTML.
    pub fn highlighted(&self) -> String {
        highlight_html(&self.text)
    }
}

impl Default for SessionState {
    fn default() -> Self {
        Self::new()
    }
}
