use crate::confdb::dal::{
    Application, DaqModule, DalObject, Parameter, ResourceSet, Segment, Session,
};
use crate::error::DaqEnvError;

/// Read-only access to a configuration database.
///
/// `get_dal` looks an object up by class and id. The class may be a
/// superclass of the stored object (`Component`, `Application`, `Parameter`).
pub trait ConfigDatabase {
    fn get_dal(&self, class_name: &str, uid: &str) -> Result<DalObject, DaqEnvError>;

    fn session(&self, uid: &str) -> Result<Session, DaqEnvError> {
        match self.get_dal("Session", uid)? {
            DalObject::Session(session) => Ok(session),
            other => Err(wrong_class(&other, "Session")),
        }
    }

    fn segment(&self, uid: &str) -> Result<Segment, DaqEnvError> {
        match self.get_dal("Segment", uid)? {
            DalObject::Segment(segment) => Ok(segment),
            other => Err(wrong_class(&other, "Segment")),
        }
    }

    fn application(&self, uid: &str) -> Result<Application, DaqEnvError> {
        match self.get_dal("Application", uid)? {
            DalObject::Application(app) => Ok(app),
            other => Err(wrong_class(&other, "Application")),
        }
    }

    /// Resource set by id; a DaqApplication is viewed through its `contains`.
    fn resource_set(&self, uid: &str) -> Result<ResourceSet, DaqEnvError> {
        match self.get_dal("ResourceSet", uid)? {
            DalObject::ResourceSet(set) => Ok(set),
            DalObject::Application(app) => match app.resource_set() {
                Some(set) => Ok(set),
                None => Err(wrong_class(&DalObject::Application(app), "ResourceSet")),
            },
            other => Err(wrong_class(&other, "ResourceSet")),
        }
    }

    fn module(&self, uid: &str) -> Result<DaqModule, DaqEnvError> {
        match self.get_dal("DaqModule", uid)? {
            DalObject::Module(module) => Ok(module),
            other => Err(wrong_class(&other, "DaqModule")),
        }
    }

    /// Resolve an ordered list of Variable / VariableSet ids.
    fn parameters(&self, uids: &[String]) -> Result<Vec<Parameter>, DaqEnvError> {
        uids.iter()
            .map(|uid| match self.get_dal("Parameter", uid)? {
                DalObject::Parameter(parameter) => Ok(parameter),
                other => Err(wrong_class(&other, "Parameter")),
            })
            .collect()
    }
}

fn wrong_class(object: &DalObject, expected: &str) -> DaqEnvError {
    DaqEnvError::WrongClass {
        id: object.id().to_string(),
        expected: expected.to_string(),
        actual: object.class_name().to_string(),
    }
}
