//! Configuration database client.
//!
//! Loads a session database from a `scheme:path` locator, exposes typed views
//! through [`ConfigDatabase::get_dal`], and answers session-scoped queries:
//! all applications, component parents, host resources used by an application,
//! and whether a component is disabled.

mod configuration;
mod contract;
pub mod dal;
pub mod disabled;
pub mod fuse;
pub mod locator;
pub mod objects;
pub mod queries;

pub use configuration::Configuration;
pub use contract::ConfigDatabase;
pub use dal::{
    Application, DaqModule, DalObject, ObjectRef, Parameter, ResourceSet, ResourceSetKind,
    Segment, Session, Variable, VariableSet,
};
pub use disabled::{DisabledComponents, DisablementOracle};
pub use locator::{Backend, DatabaseLocator};
pub use queries::{all_applications, component_parents, used_host_resources};
