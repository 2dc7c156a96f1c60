use {
    crate::{arn::action_service, display_json, Effect, PolicyDocument, Statement},
    log::{debug, warn},
    serde::{Deserialize, Serialize},
    serde_json::Value,
    std::str::FromStr,
};

/// One statement of a policy with its actions and resources normalized to sequences.
#[derive(Clone, Debug, Deserialize, Eq, PartialEq, Serialize)]
pub struct StatementSummary {
    effect: Effect,
    actions: Vec<String>,
    resources: Vec<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    conditions: Option<Value>,
}

impl StatementSummary {
    pub fn new(effect: Effect, actions: Vec<String>, resources: Vec<String>, conditions: Option<Value>) -> Self {
        Self {
            effect,
            actions,
            resources,
            conditions,
        }
    }

    #[inline]
    pub fn effect(&self) -> Effect {
        self.effect
    }

    #[inline]
    pub fn actions(&self) -> &[String] {
        &self.actions
    }

    #[inline]
    pub fn resources(&self) -> &[String] {
        &self.resources
    }

    #[inline]
    pub fn conditions(&self) -> Option<&Value> {
        self.conditions.as_ref()
    }

    /// The distinct service prefixes of this statement's actions, in first-seen order.
    pub fn services(&self) -> Vec<&str> {
        let mut result: Vec<&str> = Vec::new();
        for action in &self.actions {
            let service = action_service(action);
            if !result.contains(&service) {
                result.push(service);
            }
        }
        result
    }
}

impl From<&Statement> for StatementSummary {
    fn from(statement: &Statement) -> Self {
        Self::new(statement.effect(), statement.actions(), statement.resources(), statement.condition().cloned())
    }
}

/// Aggregate view of a policy document.
///
/// A summary is a snapshot; it is rebuilt from the policy text on every validation and never updated in place.
#[derive(Clone, Debug, Deserialize, Eq, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PolicySummary {
    version: String,
    statement_count: usize,
    action_count: usize,
    resource_count: usize,
    allow_count: usize,
    deny_count: usize,
    statements: Vec<StatementSummary>,
}

impl PolicySummary {
    #[inline]
    pub fn version(&self) -> &str {
        &self.version
    }

    #[inline]
    pub fn statement_count(&self) -> usize {
        self.statement_count
    }

    #[inline]
    pub fn action_count(&self) -> usize {
        self.action_count
    }

    #[inline]
    pub fn resource_count(&self) -> usize {
        self.resource_count
    }

    #[inline]
    pub fn allow_count(&self) -> usize {
        self.allow_count
    }

    #[inline]
    pub fn deny_count(&self) -> usize {
        self.deny_count
    }

    #[inline]
    pub fn statements(&self) -> &[StatementSummary] {
        &self.statements
    }
}

impl From<&PolicyDocument> for PolicySummary {
    fn from(policy: &PolicyDocument) -> Self {
        let mut action_count = 0;
        let mut resource_count = 0;
        let mut allow_count = 0;
        let mut deny_count = 0;
        let mut statements = Vec::with_capacity(policy.statement().len());

        for statement in policy.statement() {
            let summary = StatementSummary::from(statement);
            action_count += summary.actions.len();
            resource_count += summary.resources.len();

            match summary.effect {
                Effect::Allow => allow_count += 1,
                Effect::Deny => deny_count += 1,
            }

            statements.push(summary);
        }

        Self {
            version: policy.version().to_string(),
            statement_count: statements.len(),
            action_count,
            resource_count,
            allow_count,
            deny_count,
            statements,
        }
    }
}

display_json!(PolicySummary);

/// Summarize policy text.
///
/// The text is parsed again rather than reusing a validation result. Text that does not parse into a policy
/// document yields `None`; this never panics, even for text that was not validated first.
pub fn summarize(text: &str) -> Option<PolicySummary> {
    match PolicyDocument::from_str(text) {
        Ok(policy) => {
            let summary = PolicySummary::from(&policy);
            debug!(
                "Summarized policy: {} statements, {} actions, {} resources",
                summary.statement_count, summary.action_count, summary.resource_count
            );
            Some(summary)
        }
        Err(e) => {
            warn!("Error generating policy summary: {}", e);
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use {
        super::{summarize, PolicySummary, StatementSummary},
        crate::{validate, Effect, PolicyDocument, Statement},
        indoc::indoc,
        pretty_assertions::assert_eq,
        serde_json::json,
    };

    const COMPLEX: &str = indoc! { r#"
        {
          "Version": "2025-05-24",
          "Statement": [
            {
              "Effect": "Allow",
              "Action": ["s3:GetObject", "s3:PutObject", "s3:ListBucket"],
              "Resource": ["arn:aws:s3:::app-bucket", "arn:aws:s3:::app-bucket/*"],
              "Condition": {
                "IpAddress": {"aws:SourceIp": "192.0.2.0/24"}
              }
            },
            {
              "Effect": "Deny",
              "Action": "s3:DeleteObject",
              "Resource": "arn:aws:s3:::app-bucket/*"
            },
            {
              "Effect": "Allow",
              "Action": ["dynamodb:GetItem", "dynamodb:Query"],
              "Resource": "arn:aws:dynamodb:us-east-1:123456789012:table/Orders"
            }
          ]
        }"# };

    #[test_log::test]
    fn test_example_counts() {
        let summary = summarize(
            r#"{"Version":"2025-05-24","Statement":[{"Effect":"Allow","Action":["s3:GetObject"],"Resource":["arn:aws:s3:::b","arn:aws:s3:::b/*"]}]}"#,
        )
        .unwrap();

        assert_eq!(summary.version(), "2025-05-24");
        assert_eq!(summary.statement_count(), 1);
        assert_eq!(summary.action_count(), 1);
        assert_eq!(summary.resource_count(), 2);
        assert_eq!(summary.allow_count(), 1);
        assert_eq!(summary.deny_count(), 0);
        assert_eq!(summary.statements()[0].resources(), &["arn:aws:s3:::b", "arn:aws:s3:::b/*"]);
        assert!(summary.statements()[0].conditions().is_none());
    }

    #[test_log::test]
    fn test_complex_policy() {
        assert!(validate(COMPLEX).is_valid());
        let summary = summarize(COMPLEX).unwrap();

        assert_eq!(summary.statement_count(), 3);
        assert_eq!(summary.action_count(), 3 + 1 + 2);
        assert_eq!(summary.resource_count(), 2 + 1 + 1);
        assert_eq!(summary.allow_count(), 2);
        assert_eq!(summary.deny_count(), 1);
        assert_eq!(summary.allow_count() + summary.deny_count(), summary.statement_count());

        let s = &summary.statements()[1];
        assert_eq!(s.effect(), Effect::Deny);
        assert_eq!(s.actions(), &["s3:DeleteObject"]);
        assert_eq!(s.resources(), &["arn:aws:s3:::app-bucket/*"]);

        assert_eq!(summary.statements()[0].conditions(), Some(&json!({"IpAddress": {"aws:SourceIp": "192.0.2.0/24"}})));
        assert_eq!(summary.statements()[2].services(), vec!["dynamodb"]);
    }

    #[test_log::test]
    fn test_counts_match_statements() {
        let summary = summarize(COMPLEX).unwrap();
        let actions: usize = summary.statements().iter().map(|s| s.actions().len()).sum();
        let resources: usize = summary.statements().iter().map(|s| s.resources().len()).sum();
        assert_eq!(summary.action_count(), actions);
        assert_eq!(summary.resource_count(), resources);
        assert_eq!(summary.statement_count(), summary.statements().len());
    }

    #[test_log::test]
    fn test_deterministic() {
        assert_eq!(summarize(COMPLEX), summarize(COMPLEX));
        assert_eq!(summarize(COMPLEX).unwrap().to_string(), summarize(COMPLEX).unwrap().to_string());
    }

    #[test_log::test]
    fn test_not_action_and_not_resource() {
        let summary = summarize(
            r#"{"Version":"1","Statement":[{"Effect":"Deny","NotAction":"iam:*","NotResource":["arn:aws:iam::1:role/x"]}]}"#,
        )
        .unwrap();
        assert_eq!(summary.statement_count(), 1);
        assert_eq!(summary.action_count(), 0);
        assert_eq!(summary.resource_count(), 0);
        assert_eq!(summary.deny_count(), 1);
    }

    #[test_log::test]
    fn test_unvalidated_input() {
        assert!(summarize("{").is_none());
        assert!(summarize(r#"{"Version":"1"}"#).is_none());
        assert!(summarize(r#"{"Version":"1","Statement":{}}"#).is_none());
        assert!(summarize(r#"{"Statement":[]}"#).is_none());
        assert!(summarize(r#"{"Version":"1","Statement":[{"Effect":"Maybe","Action":"*","Resource":"*"}]}"#).is_none());
    }

    #[test_log::test]
    fn test_validated_documents_summarize() {
        let docs = [
            r#"{"Version":"1","Statement":[]}"#,
            r#"{"Version":"1","Statement":[{"Effect":"Allow","Action":[],"Resource":[]}]}"#,
            r#"{"Version":"1","Statement":[{"Effect":"Allow","Action":"","NotAction":"a:b","Resource":"*"}]}"#,
            r#"{"Version":"1","Statement":[{"Effect":"Allow","Action":"a:b","Resource":"*","Condition":null}]}"#,
            r#"{"Version":"1","Statement":[{"Effect":"Allow","Effect":"Deny","Action":"a:b","Resource":"*"}]}"#,
            r#"{"Version":"1","Id":7,"Statement":[{"Sid":1,"Effect":"Allow","Action":"a:b","Resource":"*"}]}"#,
        ];

        for doc in docs {
            assert!(validate(doc).is_valid(), "{}", doc);
            assert!(summarize(doc).is_some(), "{}", doc);
        }
    }

    #[test_log::test]
    fn test_falsy_fields_are_absent() {
        let summary = summarize(
            r#"{"Version":"1","Statement":[{"Effect":"Allow","Action":false,"NotAction":"a:b","Resource":"*"}]}"#,
        )
        .unwrap();
        assert_eq!(summary.action_count(), 0);
        assert_eq!(summary.resource_count(), 1);

        let summary =
            summarize(r#"{"Version":"1","Statement":[{"Effect":"Deny","Action":0,"NotAction":"a:b","Resource":"*"}]}"#)
                .unwrap();
        assert_eq!(summary.action_count(), 0);
        assert_eq!(summary.deny_count(), 1);

        let summary = summarize(
            r#"{"Version":"1","Statement":[{"Effect":"Allow","Action":"a:b","Resource":"x","NotResource":false}]}"#,
        )
        .unwrap();
        assert_eq!(summary.statements()[0].actions(), &["a:b"]);
        assert_eq!(summary.statements()[0].resources(), &["x"]);
    }

    #[test_log::test]
    fn test_built_document() {
        let statement = Statement::builder()
            .effect(Effect::Deny)
            .action(vec!["iam:CreateUser".to_string(), "iam:DeleteUser".to_string()])
            .resource("arn:aws:iam::123456789012:user/*")
            .build()
            .unwrap();
        let policy = PolicyDocument::builder().version("2012-10-17").statement(vec![statement]).build().unwrap();
        let summary = PolicySummary::from(&policy);

        assert_eq!(summary.version(), "2012-10-17");
        assert_eq!(summary.action_count(), 2);
        assert_eq!(summary.deny_count(), 1);
        assert_eq!(summary.statements()[0].services(), vec!["iam"]);

        // The built document and its JSON text summarize the same way.
        assert_eq!(summarize(&policy.to_string()), Some(summary));
    }

    #[test_log::test]
    fn test_json_structure() {
        let summary = summarize(
            r#"{"Version":"v1","Statement":[{"Effect":"Allow","Action":"ec2:StartInstances","Resource":"*"}]}"#,
        )
        .unwrap();
        assert_eq!(
            summary.to_string(),
            indoc! { r#"
            {
              "version": "v1",
              "statementCount": 1,
              "actionCount": 1,
              "resourceCount": 1,
              "allowCount": 1,
              "denyCount": 0,
              "statements": [
                {
                  "effect": "Allow",
                  "actions": [
                    "ec2:StartInstances"
                  ],
                  "resources": [
                    "*"
                  ]
                }
              ]
            }"# }
        );

        let back: PolicySummary = serde_json::from_str(&summary.to_string()).unwrap();
        assert_eq!(back, summary);
    }

    #[test_log::test]
    fn test_services() {
        let s = StatementSummary::new(
            Effect::Allow,
            vec!["s3:GetObject".into(), "ec2:Describe*".into(), "s3:PutObject".into(), "*".into()],
            vec![],
            None,
        );
        assert_eq!(s.services(), vec!["s3", "ec2", "*"]);
    }
}
