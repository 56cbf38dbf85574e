//! Typed, relationship-resolved views over configuration database objects.

use crate::confdb::objects::class_castable;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Reference to a database object by id and class, rendered as `id@Class`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct ObjectRef {
    pub id: String,
    #[serde(rename = "class")]
    pub class_name: String,
}

impl ObjectRef {
    pub fn new(id: impl Into<String>, class_name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            class_name: class_name.into(),
        }
    }
}

impl ObjectRef {
    /// Whether the referenced object is an instance of `class_name`.
    pub fn is_a(&self, class_name: &str) -> bool {
        class_castable(&self.class_name, class_name)
    }
}

impl fmt::Display for ObjectRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}@{}", self.id, self.class_name)
    }
}

/// Single name/value environment entry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Variable {
    pub id: String,
    pub name: String,
    pub value: String,
}

/// Named collection of variables. Its own id is never an environment key.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VariableSet {
    pub id: String,
    pub contains: Vec<Variable>,
}

/// Parameter entry: either one variable or a set of them.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Parameter {
    Variable(Variable),
    VariableSet(VariableSet),
}

impl Parameter {
    pub fn id(&self) -> &str {
        match self {
            Parameter::Variable(v) => &v.id,
            Parameter::VariableSet(s) => &s.id,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Session {
    pub id: String,
    pub environment: Vec<Parameter>,
    /// Top-level segment ids
    pub segments: Vec<String>,
    /// Session-level application ids
    pub applications: Vec<String>,
    pub disabled: Vec<String>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Segment {
    pub id: String,
    pub controller: Option<ObjectRef>,
    pub segments: Vec<String>,
    pub applications: Vec<String>,
    pub resources: Vec<ObjectRef>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Application {
    pub id: String,
    pub class_name: String,
    pub application_environment: Vec<Parameter>,
    /// Resources of a DaqApplication (its modules); empty for other classes
    pub contains: Vec<ObjectRef>,
}

impl Application {
    pub fn reference(&self) -> ObjectRef {
        ObjectRef::new(self.id.clone(), self.class_name.clone())
    }

    pub fn is_daq_application(&self) -> bool {
        self.class_name == "DaqApplication"
    }

    /// The application viewed as a resource set, when its class is one.
    pub fn resource_set(&self) -> Option<ResourceSet> {
        let kind = if class_castable(&self.class_name, "ResourceSetAND") {
            ResourceSetKind::And
        } else if class_castable(&self.class_name, "ResourceSetOR") {
            ResourceSetKind::Or
        } else {
            return None;
        };
        Some(ResourceSet {
            id: self.id.clone(),
            class_name: self.class_name.clone(),
            kind,
            contains: self.contains.clone(),
        })
    }
}

/// How a resource set reacts to disabled members.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResourceSetKind {
    /// Disabled once every member is disabled
    And,
    /// Disabled as soon as any member is disabled
    Or,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ResourceSet {
    pub id: String,
    pub class_name: String,
    pub kind: ResourceSetKind,
    pub contains: Vec<ObjectRef>,
}

impl ResourceSet {
    pub fn reference(&self) -> ObjectRef {
        ObjectRef::new(self.id.clone(), self.class_name.clone())
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct DaqModule {
    pub id: String,
    pub used_resources: Vec<ObjectRef>,
}

/// Object returned by a `get_dal` lookup.
#[derive(Debug, Clone, PartialEq)]
pub enum DalObject {
    Session(Session),
    Segment(Segment),
    Application(Application),
    Module(DaqModule),
    ResourceSet(ResourceSet),
    /// A plain resource such as a HostResource
    Resource(ObjectRef),
    Parameter(Parameter),
}

impl DalObject {
    pub fn id(&self) -> &str {
        match self {
            DalObject::Session(s) => &s.id,
            DalObject::Segment(s) => &s.id,
            DalObject::Application(a) => &a.id,
            DalObject::Module(m) => &m.id,
            DalObject::ResourceSet(r) => &r.id,
            DalObject::Resource(r) => &r.id,
            DalObject::Parameter(p) => p.id(),
        }
    }

    pub fn class_name(&self) -> &str {
        match self {
            DalObject::Session(_) => "Session",
            DalObject::Segment(_) => "Segment",
            DalObject::Application(a) => &a.class_name,
            DalObject::Module(_) => "DaqModule",
            DalObject::ResourceSet(r) => &r.class_name,
            DalObject::Resource(r) => &r.class_name,
            DalObject::Parameter(Parameter::Variable(_)) => "Variable",
            DalObject::Parameter(Parameter::VariableSet(_)) => "VariableSet",
        }
    }

    pub fn reference(&self) -> ObjectRef {
        ObjectRef::new(self.id(), self.class_name())
    }
}
