//! Raw configuration database records as they appear in a database file.
//!
//! Every object carries a `class` tag and an `id`. Relationships are stored as
//! lists of ids and are resolved into typed views by [`super::Configuration`].

use serde::de::{self, Visitor};
use serde::{Deserialize, Deserializer, Serialize};
use std::fmt;

/// Top-level layout of a database file.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct DatabaseDocument {
    #[serde(default)]
    pub objects: Vec<ConfigObject>,
}

/// One stored object, tagged by its schema class.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "class")]
pub enum ConfigObject {
    Session(SessionRecord),
    Segment(SegmentRecord),
    Application(ApplicationRecord),
    DaqApplication(ApplicationRecord),
    #[serde(rename = "RCApplication")]
    RcApplication(ApplicationRecord),
    DaqModule(ModuleRecord),
    #[serde(rename = "ResourceSetAND")]
    ResourceSetAnd(ResourceSetRecord),
    #[serde(rename = "ResourceSetOR")]
    ResourceSetOr(ResourceSetRecord),
    HostResource(HostResourceRecord),
    Variable(VariableRecord),
    VariableSet(VariableSetRecord),
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SessionRecord {
    pub id: String,
    /// Default environment: ids of Variable / VariableSet objects, in order
    #[serde(default)]
    pub environment: Vec<String>,
    #[serde(default)]
    pub segments: Vec<String>,
    #[serde(default)]
    pub applications: Vec<String>,
    /// Components disabled for this session
    #[serde(default)]
    pub disabled: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SegmentRecord {
    pub id: String,
    #[serde(default)]
    pub controller: Option<String>,
    #[serde(default)]
    pub segments: Vec<String>,
    #[serde(default)]
    pub applications: Vec<String>,
    /// Resources and resource sets attached to the segment
    #[serde(default)]
    pub resources: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ApplicationRecord {
    pub id: String,
    #[serde(default)]
    pub application_environment: Vec<String>,
    /// Resources held by a DaqApplication (normally its modules)
    #[serde(default)]
    pub contains: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ModuleRecord {
    pub id: String,
    /// HostResource ids the module runs on
    #[serde(default)]
    pub used_resources: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ResourceSetRecord {
    pub id: String,
    #[serde(default)]
    pub contains: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HostResourceRecord {
    pub id: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VariableRecord {
    pub id: String,
    pub name: String,
    #[serde(deserialize_with = "quoted_value")]
    pub value: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VariableSetRecord {
    pub id: String,
    #[serde(default)]
    pub contains: Vec<String>,
}

/// Variable values are taken verbatim, so they must be strings in the file.
///
/// An unquoted `4.10` or `0o17` has already been read as a number by the
/// document parser and its original spelling is gone.
fn quoted_value<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    struct QuotedValue;

    impl<'de> Visitor<'de> for QuotedValue {
        type Value = String;

        fn expecting(&self, f: &mut fmt::Formatter) -> fmt::Result {
            f.write_str("a quoted string (numbers and booleans must be quoted)")
        }

        fn visit_str<E: de::Error>(self, v: &str) -> Result<String, E> {
            Ok(v.to_string())
        }

        fn visit_string<E: de::Error>(self, v: String) -> Result<String, E> {
            Ok(v)
        }
    }

    deserializer.deserialize_string(QuotedValue)
}

/// `class_name` followed by its superclasses, or `None` for an unknown class.
pub fn class_chain(class_name: &str) -> Option<&'static [&'static str]> {
    let chain: &'static [&'static str] = match class_name {
        "Session" => &["Session"],
        "Segment" => &["Segment", "Component"],
        "Application" => &["Application", "Component"],
        "DaqApplication" => &[
            "DaqApplication",
            "Application",
            "ResourceSetAND",
            "ResourceSet",
            "ResourceBase",
            "Component",
        ],
        "RCApplication" => &["RCApplication", "Application", "Component"],
        "DaqModule" => &["DaqModule", "Resource", "ResourceBase", "Component"],
        "ResourceSetAND" => &["ResourceSetAND", "ResourceSet", "ResourceBase", "Component"],
        "ResourceSetOR" => &["ResourceSetOR", "ResourceSet", "ResourceBase", "Component"],
        "HostResource" => &["HostResource", "Resource", "ResourceBase", "Component"],
        "Variable" => &["Variable", "Parameter"],
        "VariableSet" => &["VariableSet", "Parameter"],
        _ => return None,
    };
    Some(chain)
}

/// Whether an object of class `class_name` can be viewed as `target`.
pub fn class_castable(class_name: &str, target: &str) -> bool {
    class_chain(class_name).is_some_and(|chain| chain.contains(&target))
}

impl ConfigObject {
    pub fn id(&self) -> &str {
        match self {
            ConfigObject::Session(r) => &r.id,
            ConfigObject::Segment(r) => &r.id,
            ConfigObject::Application(r)
            | ConfigObject::DaqApplication(r)
            | ConfigObject::RcApplication(r) => &r.id,
            ConfigObject::DaqModule(r) => &r.id,
            ConfigObject::ResourceSetAnd(r) | ConfigObject::ResourceSetOr(r) => &r.id,
            ConfigObject::HostResource(r) => &r.id,
            ConfigObject::Variable(r) => &r.id,
            ConfigObject::VariableSet(r) => &r.id,
        }
    }

    /// Schema class name of this object.
    pub fn class_name(&self) -> &'static str {
        match self {
            ConfigObject::Session(_) => "Session",
            ConfigObject::Segment(_) => "Segment",
            ConfigObject::Application(_) => "Application",
            ConfigObject::DaqApplication(_) => "DaqApplication",
            ConfigObject::RcApplication(_) => "RCApplication",
            ConfigObject::DaqModule(_) => "DaqModule",
            ConfigObject::ResourceSetAnd(_) => "ResourceSetAND",
            ConfigObject::ResourceSetOr(_) => "ResourceSetOR",
            ConfigObject::HostResource(_) => "HostResource",
            ConfigObject::Variable(_) => "Variable",
            ConfigObject::VariableSet(_) => "VariableSet",
        }
    }

    /// Whether this object can be viewed as an instance of `class_name`.
    pub fn castable(&self, class_name: &str) -> bool {
        class_castable(self.class_name(), class_name)
    }
}
