//! Session-scoped queries over the segment hierarchy.

use crate::confdb::contract::ConfigDatabase;
use crate::confdb::dal::{Application, ObjectRef, ResourceSet, Segment, Session};
use crate::confdb::fuse::CircularDependencyFuse;
use crate::error::DaqEnvError;
use std::collections::BTreeSet;
use tracing::debug;

fn session_ref(session: &Session) -> ObjectRef {
    ObjectRef::new(session.id.clone(), "Session")
}

fn segment_ref(segment: &Segment) -> ObjectRef {
    ObjectRef::new(segment.id.clone(), "Segment")
}

/// All applications of a session: session-level ones first, then each
/// top-level segment's applications followed by its nested segments'.
pub fn all_applications(
    db: &dyn ConfigDatabase,
    session: &Session,
) -> Result<Vec<Application>, DaqEnvError> {
    let mut apps = session
        .applications
        .iter()
        .map(|id| db.application(id))
        .collect::<Result<Vec<_>, _>>()?;
    let mut fuse = CircularDependencyFuse::new("session applications", session_ref(session));
    for id in &session.segments {
        let segment = db.segment(id)?;
        collect_segment_applications(db, &segment, &mut fuse, &mut apps)?;
    }
    Ok(apps)
}

fn collect_segment_applications(
    db: &dyn ConfigDatabase,
    segment: &Segment,
    fuse: &mut CircularDependencyFuse,
    out: &mut Vec<Application>,
) -> Result<(), DaqEnvError> {
    fuse.within(segment_ref(segment), |fuse| {
        for id in &segment.applications {
            out.push(db.application(id)?);
        }
        for id in &segment.segments {
            let child = db.segment(id)?;
            collect_segment_applications(db, &child, fuse, out)?;
        }
        Ok(())
    })
}

/// Containment paths from the session to `component_id`.
///
/// Each path lists the segments and resource sets that enclose the component,
/// outermost first. Segment resources and resource-set members are followed,
/// and a DaqApplication counts as the resource set of its modules. A top-level
/// segment that is the component itself yields an empty path.
pub fn component_parents(
    db: &dyn ConfigDatabase,
    session: &Session,
    component_id: &str,
) -> Result<Vec<Vec<ObjectRef>>, DaqEnvError> {
    let target = db.get_dal("Component", component_id)?.reference();
    let is_segment = target.is_a("Segment");

    let mut out = Vec::new();
    let mut fuse = CircularDependencyFuse::new("component parents", session_ref(session));
    let mut path = Vec::new();

    for id in &session.segments {
        let segment = db.segment(id)?;
        if segment.id == target.id {
            out.push(Vec::new());
        }
        segment_parents(db, &segment, &target, is_segment, &mut path, &mut out, &mut fuse)?;
    }
    for id in &session.applications {
        let app = db.application(id)?;
        if app.id == target.id {
            out.push(Vec::new());
        }
        if let Some(set) = app.resource_set() {
            resource_set_parents(db, &set, &target, &mut path, &mut out, &mut fuse)?;
        }
    }

    if out.is_empty() {
        debug!(
            component = %target,
            session = %session.id,
            "cannot find segment/resource path(s) between component and session"
        );
    }
    Ok(out)
}

fn segment_parents(
    db: &dyn ConfigDatabase,
    segment: &Segment,
    target: &ObjectRef,
    is_segment: bool,
    path: &mut Vec<ObjectRef>,
    out: &mut Vec<Vec<ObjectRef>>,
    fuse: &mut CircularDependencyFuse,
) -> Result<(), DaqEnvError> {
    fuse.within(segment_ref(segment), |fuse| {
        path.push(segment_ref(segment));
        for id in &segment.segments {
            if *id == target.id {
                out.push(path.clone());
            } else {
                let child = db.segment(id)?;
                segment_parents(db, &child, target, is_segment, path, out, fuse)?;
            }
        }
        if !is_segment {
            for id in &segment.applications {
                if *id == target.id {
                    out.push(path.clone());
                } else if let Some(set) = db.application(id)?.resource_set() {
                    resource_set_parents(db, &set, target, path, out, fuse)?;
                }
            }
            for resource in &segment.resources {
                if resource.id == target.id {
                    out.push(path.clone());
                } else if resource.is_a("ResourceSet") {
                    let set = db.resource_set(&resource.id)?;
                    resource_set_parents(db, &set, target, path, out, fuse)?;
                }
            }
        }
        path.pop();
        Ok(())
    })
}

fn resource_set_parents(
    db: &dyn ConfigDatabase,
    set: &ResourceSet,
    target: &ObjectRef,
    path: &mut Vec<ObjectRef>,
    out: &mut Vec<Vec<ObjectRef>>,
    fuse: &mut CircularDependencyFuse,
) -> Result<(), DaqEnvError> {
    fuse.within(set.reference(), |fuse| {
        path.push(set.reference());
        for member in &set.contains {
            if member.id == target.id {
                out.push(path.clone());
            } else if member.is_a("ResourceSet") {
                let nested = db.resource_set(&member.id)?;
                resource_set_parents(db, &nested, target, path, out, fuse)?;
            }
        }
        path.pop();
        Ok(())
    })
}

/// Host resources used by the modules of a DaqApplication, without duplicates.
///
/// Members of `contains` that are not DaqModules are skipped.
pub fn used_host_resources(
    db: &dyn ConfigDatabase,
    application_id: &str,
) -> Result<Vec<ObjectRef>, DaqEnvError> {
    let app = db.application(application_id)?;
    if !app.is_daq_application() {
        return Err(DaqEnvError::WrongClass {
            id: app.id.clone(),
            expected: "DaqApplication".to_string(),
            actual: app.class_name.clone(),
        });
    }
    let mut resources = BTreeSet::new();
    for member in app.contains.iter().filter(|m| m.is_a("DaqModule")) {
        resources.extend(db.module(&member.id)?.used_resources);
    }
    Ok(resources.into_iter().collect())
}
