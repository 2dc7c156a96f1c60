#![warn(clippy::all)]
//! Parse, validate, summarize, and visualize AWS IAM-style JSON policies.
//!
//! The flow mirrors a policy editor: text is [validate()]d, a valid policy is [summarize()]d, and the summary is turned
//! into a service/resource tree with [build_tree()]. None of this evaluates whether a request would be allowed; it
//! only re-displays what the policy declares.
pub mod arn;
pub(crate) mod document;
pub(crate) mod effect;
pub(crate) mod error;
pub(crate) mod highlight;
pub(crate) mod session;
pub(crate) mod summary;
pub(crate) mod tree;
pub(crate) mod validate;

#[macro_use]
pub(crate) mod serutil;

pub use {
    arn::{action_service, extract_resource_name, service_key},
    document::{
        PolicyDocument, PolicyDocumentBuilder, PolicyDocumentBuilderError, Statement, StatementBuilder,
        StatementBuilderError,
    },
    effect::Effect,
    error::{PolicyError, SchemaError},
    highlight::{highlight_html, highlight_tokens, JsonToken, TokenKind},
    serutil::StringList,
    session::{SessionState, CLEARED_POLICY, DEFAULT_POLICY},
    summary::{summarize, PolicySummary, StatementSummary},
    tree::{build_tree, NodeKind, ResourceTreeNode},
    validate::{check, validate, Validation},
};
