//! Segment Walker
//!
//! Depth-first traversal of a session's segment tree. The nearest enclosing
//! controller is tracked on the way down, and every application gets either a
//! skip notice (disabled) or its merged environment (session defaults, then
//! application overrides).

use crate::confdb::fuse::CircularDependencyFuse;
use crate::confdb::{ConfigDatabase, DisablementOracle, ObjectRef, Segment, Session};
use crate::error::DaqEnvError;
use crate::resolver::{resolve_into, resolve_parameters};
use crate::types::{EnvMap, ROOT_CONTROLLER};
use serde::Serialize;
use tracing::{debug, info};

/// Outcome for one application.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum AppEnvironmentReport {
    Enabled {
        controller: String,
        application: ObjectRef,
        environment: EnvMap,
    },
    Disabled {
        application: ObjectRef,
    },
}

impl AppEnvironmentReport {
    pub fn application(&self) -> &ObjectRef {
        match self {
            AppEnvironmentReport::Enabled { application, .. }
            | AppEnvironmentReport::Disabled { application } => application,
        }
    }

    pub fn is_enabled(&self) -> bool {
        matches!(self, AppEnvironmentReport::Enabled { .. })
    }
}

/// Full result of walking one session.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SessionEnvironmentReport {
    pub session: String,
    pub session_environment: EnvMap,
    pub applications: Vec<AppEnvironmentReport>,
}

pub struct SegmentWalker<'a> {
    db: &'a dyn ConfigDatabase,
    oracle: &'a dyn DisablementOracle,
    session: &'a Session,
    session_environment: EnvMap,
}

impl<'a> SegmentWalker<'a> {
    pub fn new(
        db: &'a dyn ConfigDatabase,
        oracle: &'a dyn DisablementOracle,
        session: &'a Session,
    ) -> Self {
        Self {
            db,
            oracle,
            session,
            session_environment: resolve_parameters(&session.environment),
        }
    }

    /// Session defaults, independent of any application.
    pub fn session_environment(&self) -> &EnvMap {
        &self.session_environment
    }

    /// Walk every top-level segment of the session.
    pub fn walk_session(&self) -> Result<SessionEnvironmentReport, DaqEnvError> {
        let mut reports = Vec::new();
        let mut fuse = self.fuse();
        for id in &self.session.segments {
            let segment = self.db.segment(id)?;
            self.visit(&segment, None, &mut fuse, &mut reports)?;
        }
        Ok(SessionEnvironmentReport {
            session: self.session.id.clone(),
            session_environment: self.session_environment.clone(),
            applications: reports,
        })
    }

    /// Walk one segment with an inherited controller (`None` at the top).
    pub fn walk_segment(
        &self,
        segment: &Segment,
        controller: Option<&ObjectRef>,
    ) -> Result<Vec<AppEnvironmentReport>, DaqEnvError> {
        let mut reports = Vec::new();
        let mut fuse = self.fuse();
        self.visit(segment, controller, &mut fuse, &mut reports)?;
        Ok(reports)
    }

    fn fuse(&self) -> CircularDependencyFuse {
        CircularDependencyFuse::new(
            "segment walk",
            ObjectRef::new(self.session.id.clone(), "Session"),
        )
    }

    fn visit(
        &self,
        segment: &Segment,
        inherited: Option<&ObjectRef>,
        fuse: &mut CircularDependencyFuse,
        out: &mut Vec<AppEnvironmentReport>,
    ) -> Result<(), DaqEnvError> {
        let controller = segment.controller.as_ref().or(inherited);
        let controller_id = controller
            .map(|c| c.id.as_str())
            .unwrap_or(ROOT_CONTROLLER);
        debug!(segment = %segment.id, controller = controller_id, "Visiting segment");

        fuse.within(ObjectRef::new(segment.id.clone(), "Segment"), |fuse| {
            for id in &segment.segments {
                let child = self.db.segment(id)?;
                self.visit(&child, controller, fuse, out)?;
            }

            for id in &segment.applications {
                let app = self.db.application(id)?;
                let reference = app.reference();
                if self
                    .oracle
                    .component_disabled(self.db, &self.session.id, &app.id)?
                {
                    info!(application = %reference, "Ignoring disabled app");
                    out.push(AppEnvironmentReport::Disabled {
                        application: reference,
                    });
                } else {
                    let environment =
                        resolve_into(&self.session_environment, &app.application_environment);
                    info!(
                        controller = controller_id,
                        application = %reference,
                        variables = environment.len(),
                        "Resolved application environment"
                    );
                    out.push(AppEnvironmentReport::Enabled {
                        controller: controller_id.to_string(),
                        application: reference,
                        environment,
                    });
                }
            }
            Ok(())
        })
    }
}
