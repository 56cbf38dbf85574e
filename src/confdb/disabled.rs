//! Disablement oracle: is a component active for a given session?

use crate::confdb::contract::ConfigDatabase;
use crate::confdb::dal::{DalObject, ObjectRef, ResourceSet, ResourceSetKind, Segment, Session};
use crate::confdb::fuse::CircularDependencyFuse;
use crate::confdb::queries::component_parents;
use crate::error::DaqEnvError;
use std::collections::BTreeSet;
use tracing::{debug, warn};

/// Predicate deciding whether a component is disabled within a session.
pub trait DisablementOracle {
    fn component_disabled(
        &self,
        db: &dyn ConfigDatabase,
        session_id: &str,
        component_id: &str,
    ) -> Result<bool, DaqEnvError>;
}

/// Upper bound on auto-disabling passes over a session's resource sets.
const MAX_AUTO_DISABLE_PASSES: usize = 1000;

/// Session disabled list plus per-run user overrides.
///
/// The explicitly disabled components are the user-disabled ones plus the
/// session's `disabled` list minus the user-enabled ones. Disabling a segment
/// disables its nested segments and the members of its resource sets, and
/// disabling a resource set disables its members. Resource sets are then
/// auto-disabled until nothing changes: a ResourceSetOR once any member is
/// disabled, a ResourceSetAND once all of its members are. Finally a
/// component is also disabled when any container on one of its parent paths
/// is.
#[derive(Debug, Clone, Default)]
pub struct DisabledComponents {
    user_disabled: BTreeSet<String>,
    user_enabled: BTreeSet<String>,
}

impl DisabledComponents {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace the set of components explicitly disabled for this run.
    pub fn set_disabled<I, S>(&mut self, ids: I)
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.user_disabled = ids.into_iter().map(Into::into).collect();
    }

    /// Replace the set of components explicitly enabled for this run.
    pub fn set_enabled<I, S>(&mut self, ids: I)
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.user_enabled = ids.into_iter().map(Into::into).collect();
    }

    pub fn user_disabled(&self) -> &BTreeSet<String> {
        &self.user_disabled
    }

    pub fn user_enabled(&self) -> &BTreeSet<String> {
        &self.user_enabled
    }

    /// Ids of every component disabled in `session`, before parent-path
    /// inheritance.
    pub fn disabled_set(
        &self,
        db: &dyn ConfigDatabase,
        session: &Session,
    ) -> Result<BTreeSet<String>, DaqEnvError> {
        let mut disabled = BTreeSet::new();
        if session.disabled.is_empty() && self.user_disabled.is_empty() {
            return Ok(disabled);
        }

        let mut fuse = CircularDependencyFuse::new(
            "component 'is-disabled' status",
            ObjectRef::new(session.id.clone(), "Session"),
        );
        let sets = session_resource_sets(db, session, &mut fuse)?;

        let explicit = self.user_disabled.iter().chain(
            session
                .disabled
                .iter()
                .filter(|id| !self.user_enabled.contains(id.as_str())),
        );
        for id in explicit {
            debug!(component = %id, "disable explicitly disabled component");
            disabled.insert(id.clone());
            match db.get_dal("Component", id)? {
                DalObject::Segment(segment) => {
                    disable_segment_children(db, &segment, &mut disabled, &mut fuse)?
                }
                DalObject::ResourceSet(set) => {
                    disable_set_children(db, &set, &mut disabled, &mut fuse)?
                }
                DalObject::Application(app) => {
                    if let Some(set) = app.resource_set() {
                        disable_set_children(db, &set, &mut disabled, &mut fuse)?;
                    }
                }
                _ => {}
            }
        }

        auto_disable(db, &sets, &mut disabled, &mut fuse)?;
        Ok(disabled)
    }
}

/// Every resource set reachable from the session's segments, through segment
/// applications, segment resources, and nested sets.
fn session_resource_sets(
    db: &dyn ConfigDatabase,
    session: &Session,
    fuse: &mut CircularDependencyFuse,
) -> Result<Vec<ResourceSet>, DaqEnvError> {
    let mut sets = Vec::new();
    for id in &session.segments {
        let segment = db.segment(id)?;
        collect_segment_sets(db, &segment, &mut sets, fuse)?;
    }
    Ok(sets)
}

fn collect_segment_sets(
    db: &dyn ConfigDatabase,
    segment: &Segment,
    sets: &mut Vec<ResourceSet>,
    fuse: &mut CircularDependencyFuse,
) -> Result<(), DaqEnvError> {
    fuse.within(ObjectRef::new(segment.id.clone(), "Segment"), |fuse| {
        for id in &segment.applications {
            if let Some(set) = db.application(id)?.resource_set() {
                collect_set(db, set, sets, fuse)?;
            }
        }
        for resource in segment.resources.iter().filter(|r| r.is_a("ResourceSet")) {
            collect_set(db, db.resource_set(&resource.id)?, sets, fuse)?;
        }
        for id in &segment.segments {
            let child = db.segment(id)?;
            collect_segment_sets(db, &child, sets, fuse)?;
        }
        Ok(())
    })
}

fn collect_set(
    db: &dyn ConfigDatabase,
    set: ResourceSet,
    sets: &mut Vec<ResourceSet>,
    fuse: &mut CircularDependencyFuse,
) -> Result<(), DaqEnvError> {
    fuse.within(set.reference(), |fuse| {
        for member in set.contains.iter().filter(|m| m.is_a("ResourceSet")) {
            collect_set(db, db.resource_set(&member.id)?, sets, fuse)?;
        }
        Ok(())
    })?;
    sets.push(set);
    Ok(())
}

fn disable_set_children(
    db: &dyn ConfigDatabase,
    set: &ResourceSet,
    disabled: &mut BTreeSet<String>,
    fuse: &mut CircularDependencyFuse,
) -> Result<(), DaqEnvError> {
    fuse.within(set.reference(), |fuse| {
        for member in &set.contains {
            disabled.insert(member.id.clone());
            if member.is_a("ResourceSet") {
                let nested = db.resource_set(&member.id)?;
                disable_set_children(db, &nested, disabled, fuse)?;
            }
        }
        Ok(())
    })
}

fn disable_segment_children(
    db: &dyn ConfigDatabase,
    segment: &Segment,
    disabled: &mut BTreeSet<String>,
    fuse: &mut CircularDependencyFuse,
) -> Result<(), DaqEnvError> {
    fuse.within(ObjectRef::new(segment.id.clone(), "Segment"), |fuse| {
        for resource in segment.resources.iter().filter(|r| r.is_a("ResourceSet")) {
            let set = db.resource_set(&resource.id)?;
            disable_set_children(db, &set, disabled, fuse)?;
        }
        for id in &segment.segments {
            debug!(segment = %id, parent = %segment.id, "disable segment because its parent is disabled");
            disabled.insert(id.clone());
            let child = db.segment(id)?;
            disable_segment_children(db, &child, disabled, fuse)?;
        }
        Ok(())
    })
}

/// Disable resource sets until a pass changes nothing.
fn auto_disable(
    db: &dyn ConfigDatabase,
    sets: &[ResourceSet],
    disabled: &mut BTreeSet<String>,
    fuse: &mut CircularDependencyFuse,
) -> Result<(), DaqEnvError> {
    for pass in 1..=MAX_AUTO_DISABLE_PASSES {
        let before = disabled.len();
        for set in sets {
            if disabled.contains(&set.id) {
                continue;
            }
            let trips = match set.kind {
                ResourceSetKind::Or => set.contains.iter().any(|m| disabled.contains(&m.id)),
                ResourceSetKind::And => {
                    !set.contains.is_empty()
                        && set.contains.iter().all(|m| disabled.contains(&m.id))
                }
            };
            if trips {
                debug!(set = %set.reference(), kind = ?set.kind, "auto-disable resource set");
                disabled.insert(set.id.clone());
                disable_set_children(db, set, disabled, fuse)?;
            }
        }
        if disabled.len() == before {
            debug!(passes = pass, disabled = disabled.len(), "auto-disabling converged");
            return Ok(());
        }
    }
    warn!(
        limit = MAX_AUTO_DISABLE_PASSES,
        "exceeded the maximum of auto-disabling passes"
    );
    Ok(())
}

impl DisablementOracle for DisabledComponents {
    fn component_disabled(
        &self,
        db: &dyn ConfigDatabase,
        session_id: &str,
        component_id: &str,
    ) -> Result<bool, DaqEnvError> {
        let session = db.session(session_id)?;
        db.get_dal("Component", component_id)?;
        let disabled_set = self.disabled_set(db, &session)?;
        let disabled = if disabled_set.is_empty() {
            false
        } else if disabled_set.contains(component_id) {
            true
        } else {
            component_parents(db, &session, component_id)?
                .iter()
                .flatten()
                .any(|parent| disabled_set.contains(&parent.id))
        };
        debug!(
            session = session_id,
            component = component_id,
            disabled,
            "component_disabled"
        );
        Ok(disabled)
    }
}
