use {
    crate::{
        arn::{extract_resource_name, service_key, WILDCARD},
        display_json, PolicySummary,
    },
    log::trace,
    serde::{Deserialize, Serialize},
    std::fmt::{Display, Formatter, Result as FmtResult},
};

#[derive(Clone, Copy, Debug, Deserialize, Eq, Hash, PartialEq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum NodeKind {
    Service,
    Resource,
    Action,
}

impl Display for NodeKind {
    fn fmt(&self, f: &mut Formatter) -> FmtResult {
        match self {
            Self::Service => f.write_str("service"),
            Self::Resource => f.write_str("resource"),
            Self::Action => f.write_str("action"),
        }
    }
}

/// A node in the permission tree: services contain resources, and resources contain the actions granted or denied
/// on them.
#[derive(Clone, Debug, Deserialize, Eq, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ResourceTreeNode {
    name: String,

    #[serde(rename = "type")]
    kind: NodeKind,

    is_allowed: bool,

    #[serde(default)]
    children: Vec<ResourceTreeNode>,
}

impl ResourceTreeNode {
    pub fn new<S: Into<String>>(name: S, kind: NodeKind, is_allowed: bool) -> Self {
        Self {
            name: name.into(),
            kind,
            is_allowed,
            children: Vec::new(),
        }
    }

    #[inline]
    pub fn name(&self) -> &str {
        &self.name
    }

    #[inline]
    pub fn kind(&self) -> NodeKind {
        self.kind
    }

    #[inline]
    pub fn is_allowed(&self) -> bool {
        self.is_allowed
    }

    #[inline]
    pub fn children(&self) -> &[ResourceTreeNode] {
        &self.children
    }

    /// Names of the action leaves directly under this node.
    pub fn actions(&self) -> Vec<&str> {
        self.children.iter().filter(|c| c.kind == NodeKind::Action).map(|c| c.name.as_str()).collect()
    }

    /// Find the child with the given name, creating it with `make` if there is none. An existing child is returned
    /// unchanged.
    fn child_or_insert_with<F: FnOnce() -> ResourceTreeNode>(&mut self, name: &str, make: F) -> &mut ResourceTreeNode {
        let index = match self.children.iter().position(|c| c.name == name) {
            Some(index) => index,
            None => {
                self.children.push(make());
                self.children.len() - 1
            }
        };

        &mut self.children[index]
    }

    fn add_action(&mut self, action: &str) {
        let is_allowed = self.is_allowed;
        self.child_or_insert_with(action, || ResourceTreeNode::new(action, NodeKind::Action, is_allowed));
    }
}

display_json!(ResourceTreeNode);

/// Group the resources of a summary by service and resource name.
///
/// Services appear in the order they are first referenced. Wildcard resources are skipped. The `is_allowed` flag of
/// a service or resource node comes from the statement that first created it; later statements naming the same
/// service or resource only add actions.
pub fn build_tree(summary: Option<&PolicySummary>) -> Vec<ResourceTreeNode> {
    let summary = match summary {
        Some(summary) => summary,
        None => return Vec::new(),
    };

    let mut services: Vec<(&str, ResourceTreeNode)> = Vec::new();

    for statement in summary.statements() {
        let is_allowed = statement.effect().is_allow();

        for resource in statement.resources() {
            if resource == WILDCARD {
                continue;
            }

            let key = service_key(resource);
            let index = match services.iter().position(|(k, _)| *k == key) {
                Some(index) => index,
                None => {
                    trace!("New service node {} from {}", key, resource);
                    services.push((key, ResourceTreeNode::new(key.to_uppercase(), NodeKind::Service, is_allowed)));
                    services.len() - 1
                }
            };

            let name = extract_resource_name(resource);
            let resource_node = services[index]
                .1
                .child_or_insert_with(name, || ResourceTreeNode::new(name, NodeKind::Resource, is_allowed));

            for action in statement.actions() {
                resource_node.add_action(action);
            }
        }
    }

    services.into_iter().map(|(_, node)| node).collect()
}
