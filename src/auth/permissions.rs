//! Static (resource, action) -> allowed roles table.
//!
//! The table is built once at startup, either from the built-in defaults or
//! from a YAML policy file, and is read-only afterwards.

use std::collections::{HashMap, HashSet};
use std::path::Path;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use super::Role;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Resource {
    Users,
    Categories,
    Posts,
    Comments,
    Likes,
}

impl Resource {
    pub const ALL: [Resource; 5] = [
        Resource::Users,
        Resource::Categories,
        Resource::Posts,
        Resource::Comments,
        Resource::Likes,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Resource::Users => "users",
            Resource::Categories => "categories",
            Resource::Posts => "posts",
            Resource::Comments => "comments",
            Resource::Likes => "likes",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Action {
    Create,
    Update,
    Delete,
    Read,
}

impl Action {
    pub fn as_str(&self) -> &'static str {
        match self {
            Action::Create => "create",
            Action::Update => "update",
            Action::Delete => "delete",
            Action::Read => "read",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PermissionRule {
    pub resource: Resource,
    pub action: Action,
    pub roles: HashSet<Role>,
}

#[derive(Debug, Error)]
pub enum PermissionError {
    #[error("failed to read permissions file: {0}")]
    Io(#[from] std::io::Error),

    #[error("invalid permissions file: {0}")]
    Parse(#[from] serde_yaml::Error),

    #[error("duplicate rule for {resource}:{action}")]
    Duplicate { resource: &'static str, action: &'static str },
}

#[derive(Debug, Clone, Default)]
pub struct PermissionTable {
    rules: HashMap<(Resource, Action), HashSet<Role>>,
}

impl PermissionTable {
    pub fn new(rules: impl IntoIterator<Item = PermissionRule>) -> Result<Self, PermissionError> {
        let mut table = HashMap::new();
        for rule in rules {
            if table.insert((rule.resource, rule.action), rule.roles).is_some() {
                return Err(PermissionError::Duplicate {
                    resource: rule.resource.as_str(),
                    action: rule.action.as_str(),
                });
            }
        }
        Ok(Self { rules: table })
    }

    pub fn from_yaml_str(yaml: &str) -> Result<Self, PermissionError> {
        let rules: Vec<PermissionRule> = serde_yaml::from_str(yaml)?;
        Self::new(rules)
    }

    pub fn from_yaml_file(path: impl AsRef<Path>) -> Result<Self, PermissionError> {
        let contents = std::fs::read_to_string(path)?;
        Self::from_yaml_str(&contents)
    }

    /// Built-in policy: admins may do everything; users may write posts,
    /// comments, likes and `users:update` but not create or delete accounts
    /// or touch categories. Restricting a user update to the caller's own
    /// account happens in the handler, not here.
    pub fn standard() -> Self {
        let both = || HashSet::from([Role::User, Role::Admin]);
        let admin = || HashSet::from([Role::Admin]);

        let mut rules = HashMap::new();
        for resource in Resource::ALL {
            rules.insert((resource, Action::Read), both());
        }

        rules.insert((Resource::Users, Action::Create), admin());
        rules.insert((Resource::Users, Action::Update), both());
        rules.insert((Resource::Users, Action::Delete), admin());

        rules.insert((Resource::Categories, Action::Create), admin());
        rules.insert((Resource::Categories, Action::Update), admin());
        rules.insert((Resource::Categories, Action::Delete), admin());

        for resource in [Resource::Posts, Resource::Comments, Resource::Likes] {
            for action in [Action::Create, Action::Update, Action::Delete] {
                rules.insert((resource, action), both());
            }
        }

        Self { rules }
    }

    /// Roles allowed for an exact (resource, action) pair. No wildcards.
    pub fn allowed_roles(&self, resource: Resource, action: Action) -> Option<&HashSet<Role>> {
        self.rules.get(&(resource, action))
    }

    /// A pair without a rule denies every role.
    pub fn is_allowed(&self, resource: Resource, action: Action, role: Role) -> bool {
        self.allowed_roles(resource, action)
            .is_some_and(|roles| roles.contains(&role))
    }

    /// Rules in a stable (resource, action) order
    pub fn to_rules(&self) -> Vec<PermissionRule> {
        let mut rules: Vec<PermissionRule> = self
            .rules
            .iter()
            .map(|(&(resource, action), roles)| PermissionRule {
                resource,
                action,
                roles: roles.clone(),
            })
            .collect();
        rules.sort_by_key(|rule| (rule.resource.as_str(), rule.action.as_str()));
        rules
    }

    pub fn len(&self) -> usize {
        self.rules.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }
}
