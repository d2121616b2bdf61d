use serde::{Deserialize, Serialize};

use crate::entity::Entity;

/// An ordered sequence of groups of entities. Each group shares a default
/// row when rendered; rows only advance past groups that drew something.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Timeline {
    groups: Vec<Vec<Entity>>,
}

impl Timeline {
    pub fn new() -> Self {
        Self { groups: Vec::new() }
    }

    pub fn push_group(&mut self, group: Vec<Entity>) {
        self.groups.push(group);
    }

    pub fn groups(&self) -> &[Vec<Entity>] {
        &self.groups
    }

    pub fn is_empty(&self) -> bool {
        self.groups.is_empty()
    }

    /// Total entity count across all groups, manipulations included.
    pub fn len(&self) -> usize {
        self.groups.iter().map(Vec::len).sum()
    }
}

impl From<Vec<Vec<Entity>>> for Timeline {
    fn from(groups: Vec<Vec<Entity>>) -> Self {
        Self { groups }
    }
}
