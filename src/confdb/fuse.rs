//! Recursion fuse for relationship traversals.
//!
//! Segments and module containers are expected to form a tree, but a database
//! file can contain a cycle. Every recursive traversal pushes the object it
//! enters; exceeding the limit reports the objects on the current path.

use crate::confdb::dal::ObjectRef;
use crate::error::DaqEnvError;

/// Maximum nesting depth of a traversal.
pub const RECURSION_LIMIT: usize = 64;

#[derive(Debug)]
pub struct CircularDependencyFuse {
    goal: &'static str,
    path: Vec<ObjectRef>,
}

impl CircularDependencyFuse {
    pub fn new(goal: &'static str, first: ObjectRef) -> Self {
        Self {
            goal,
            path: vec![first],
        }
    }

    /// Run `f` with `object` pushed on the traversal path.
    pub fn within<T>(
        &mut self,
        object: ObjectRef,
        f: impl FnOnce(&mut Self) -> Result<T, DaqEnvError>,
    ) -> Result<T, DaqEnvError> {
        if self.path.len() >= RECURSION_LIMIT {
            return Err(DaqEnvError::CircularDependency {
                limit: RECURSION_LIMIT,
                goal: self.goal.to_string(),
                objects: self
                    .path
                    .iter()
                    .map(|o| o.to_string())
                    .collect::<Vec<_>>()
                    .join(", "),
            });
        }
        self.path.push(object);
        let result = f(self);
        self.path.pop();
        result
    }

    pub fn depth(&self) -> usize {
        self.path.len()
    }
}
