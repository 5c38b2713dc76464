//! Reverse index from object name to the unions that list it as a member.
//!
//! Built from unions only. `ObjectSchema::implements` is a separate mechanism
//! and never feeds this index.
use indexmap::{IndexMap, IndexSet};

use crate::schema::UnionSchema;

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct UnionMembership {
    unions_by_object: IndexMap<String, IndexSet<String>>,
}

impl UnionMembership {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn build<'a>(unions: impl IntoIterator<Item = &'a UnionSchema>) -> Self {
        let mut membership = Self::new();
        for union in unions {
            membership.record(union);
        }
        membership
    }

    /// Adds `union` to every member's entry. Recording the same union twice is a no-op.
    pub fn record(&mut self, union: &UnionSchema) {
        for member in union.members() {
            self.unions_by_object
                .entry(member.to_string())
                .or_default()
                .insert(union.name.clone());
        }
    }

    /// Unions `object` must assert membership in, in the order they were recorded.
    pub fn unions_of(&self, object: &str) -> impl Iterator<Item = &str> {
        self.unions_by_object
            .get(object)
            .into_iter()
            .flat_map(|unions| unions.iter().map(String::as_str))
    }

    pub fn len(&self) -> usize {
        self.unions_by_object.len()
    }

    pub fn is_empty(&self) -> bool {
        self.unions_by_object.is_empty()
    }
}
