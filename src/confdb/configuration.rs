//! In-memory configuration database loaded from a YAML or JSON file.

use crate::confdb::contract::ConfigDatabase;
use crate::confdb::dal::{
    Application, DaqModule, DalObject, ObjectRef, Parameter, ResourceSet, ResourceSetKind,
    Segment, Session, Variable, VariableSet,
};
use crate::confdb::locator::{Backend, DatabaseLocator};
use crate::confdb::objects::{ConfigObject, DatabaseDocument, VariableRecord};
use crate::error::DaqEnvError;
use std::collections::HashMap;
use std::path::Path;
use tracing::{debug, info};

/// Configuration database handle.
///
/// All objects are loaded when the handle is opened; lookups never touch disk.
#[derive(Debug, Clone, Default)]
pub struct Configuration {
    locator: Option<DatabaseLocator>,
    objects: HashMap<String, ConfigObject>,
}

impl Configuration {
    /// Open a database from a full `scheme:path` locator.
    pub fn open(locator: &str) -> Result<Self, DaqEnvError> {
        let locator: DatabaseLocator = locator.parse()?;
        Self::from_locator(locator)
    }

    pub fn from_locator(locator: DatabaseLocator) -> Result<Self, DaqEnvError> {
        let document = load_document(locator.backend, &locator.path)?;
        let mut db = Self::from_objects(document.objects)?;
        info!(
            locator = %locator,
            objects = db.objects.len(),
            "Loaded configuration database"
        );
        db.locator = Some(locator);
        Ok(db)
    }

    /// Build a database from objects already in memory.
    pub fn from_objects(objects: Vec<ConfigObject>) -> Result<Self, DaqEnvError> {
        let mut map = HashMap::with_capacity(objects.len());
        for object in objects {
            let id = object.id().to_string();
            if map.contains_key(&id) {
                return Err(DaqEnvError::DuplicateObject { id });
            }
            map.insert(id, object);
        }
        Ok(Self {
            locator: None,
            objects: map,
        })
    }

    pub fn locator(&self) -> Option<&DatabaseLocator> {
        self.locator.as_ref()
    }

    pub fn len(&self) -> usize {
        self.objects.len()
    }

    pub fn is_empty(&self) -> bool {
        self.objects.is_empty()
    }

    /// Stored object `uid`, checked to be an instance of `class_name`.
    fn raw(&self, class_name: &str, uid: &str) -> Result<&ConfigObject, DaqEnvError> {
        let object = self
            .objects
            .get(uid)
            .ok_or_else(|| DaqEnvError::not_found(class_name, uid))?;
        if !object.castable(class_name) {
            return Err(DaqEnvError::WrongClass {
                id: uid.to_string(),
                expected: class_name.to_string(),
                actual: object.class_name().to_string(),
            });
        }
        Ok(object)
    }

    fn reference(&self, class_name: &str, uid: &str) -> Result<ObjectRef, DaqEnvError> {
        let object = self.raw(class_name, uid)?;
        Ok(ObjectRef::new(uid, object.class_name()))
    }

    fn references(&self, class_name: &str, ids: &[String]) -> Result<Vec<ObjectRef>, DaqEnvError> {
        ids.iter().map(|id| self.reference(class_name, id)).collect()
    }

    fn parameter_list(&self, ids: &[String]) -> Result<Vec<Parameter>, DaqEnvError> {
        ids.iter().map(|id| self.parameter(id)).collect()
    }

    fn parameter(&self, uid: &str) -> Result<Parameter, DaqEnvError> {
        match self.raw("Parameter", uid)? {
            ConfigObject::Variable(record) => Ok(Parameter::Variable(variable(record))),
            ConfigObject::VariableSet(record) => {
                let contains = record
                    .contains
                    .iter()
                    .map(|id| match self.objects.get(id) {
                        Some(ConfigObject::Variable(v)) => Ok(variable(v)),
                        Some(other) => Err(DaqEnvError::InvalidRelationship {
                            id: record.id.clone(),
                            relationship: "contains".to_string(),
                            message: format!(
                                "'{}' is a {}, a VariableSet may only contain Variables",
                                id,
                                other.class_name()
                            ),
                        }),
                        None => Err(DaqEnvError::not_found("Variable", id)),
                    })
                    .collect::<Result<Vec<_>, _>>()?;
                Ok(Parameter::VariableSet(VariableSet {
                    id: record.id.clone(),
                    contains,
                }))
            }
            other => Err(DaqEnvError::WrongClass {
                id: uid.to_string(),
                expected: "Parameter".to_string(),
                actual: other.class_name().to_string(),
            }),
        }
    }

    fn resolve(&self, object: &ConfigObject) -> Result<DalObject, DaqEnvError> {
        let dal = match object {
            ConfigObject::Session(r) => DalObject::Session(Session {
                id: r.id.clone(),
                environment: self.parameter_list(&r.environment)?,
                segments: r.segments.clone(),
                applications: r.applications.clone(),
                disabled: r.disabled.clone(),
            }),
            ConfigObject::Segment(r) => DalObject::Segment(Segment {
                id: r.id.clone(),
                controller: r
                    .controller
                    .as_deref()
                    .map(|id| self.reference("Application", id))
                    .transpose()?,
                segments: r.segments.clone(),
                applications: r.applications.clone(),
                resources: self.references("ResourceBase", &r.resources)?,
            }),
            ConfigObject::Application(r)
            | ConfigObject::DaqApplication(r)
            | ConfigObject::RcApplication(r) => DalObject::Application(Application {
                id: r.id.clone(),
                class_name: object.class_name().to_string(),
                application_environment: self.parameter_list(&r.application_environment)?,
                contains: self.references("ResourceBase", &r.contains)?,
            }),
            ConfigObject::DaqModule(r) => DalObject::Module(DaqModule {
                id: r.id.clone(),
                used_resources: self.references("HostResource", &r.used_resources)?,
            }),
            ConfigObject::ResourceSetAnd(r) | ConfigObject::ResourceSetOr(r) => {
                DalObject::ResourceSet(ResourceSet {
                    id: r.id.clone(),
                    class_name: object.class_name().to_string(),
                    kind: if matches!(object, ConfigObject::ResourceSetAnd(_)) {
                        ResourceSetKind::And
                    } else {
                        ResourceSetKind::Or
                    },
                    contains: self.references("ResourceBase", &r.contains)?,
                })
            }
            ConfigObject::HostResource(r) => {
                DalObject::Resource(ObjectRef::new(r.id.clone(), "HostResource"))
            }
            ConfigObject::Variable(_) | ConfigObject::VariableSet(_) => {
                DalObject::Parameter(self.parameter(object.id())?)
            }
        };
        Ok(dal)
    }
}

impl ConfigDatabase for Configuration {
    fn get_dal(&self, class_name: &str, uid: &str) -> Result<DalObject, DaqEnvError> {
        debug!(class = class_name, id = uid, "get_dal");
        let object = self.raw(class_name, uid)?;
        self.resolve(object)
    }
}

fn variable(record: &VariableRecord) -> Variable {
    Variable {
        id: record.id.clone(),
        name: record.name.clone(),
        value: record.value.clone(),
    }
}

fn load_document(backend: Backend, path: &Path) -> Result<DatabaseDocument, DaqEnvError> {
    let content = std::fs::read_to_string(path).map_err(|e| DaqEnvError::Io {
        path: path.to_path_buf(),
        source: e,
    })?;
    let parse_error = |message: String| DaqEnvError::Parse {
        path: path.to_path_buf(),
        message,
    };
    match backend {
        Backend::Yaml => serde_yaml::from_str(&content).map_err(|e| parse_error(e.to_string())),
        Backend::Json => serde_json::from_str(&content).map_err(|e| parse_error(e.to_string())),
    }
}
