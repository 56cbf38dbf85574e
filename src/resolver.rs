//! Parameter Resolver
//!
//! Flattens Variable / VariableSet entries into an environment dictionary.
//! Entries are applied in order, so a later entry overrides an earlier one
//! with the same name.

use crate::confdb::{Parameter, Variable};
use crate::types::EnvMap;

/// Flatten a sequence of parameter entries into a fresh environment.
pub fn resolve_parameters(parameters: &[Parameter]) -> EnvMap {
    let mut env = EnvMap::new();
    for parameter in parameters {
        match parameter {
            Parameter::Variable(variable) => write_variable(&mut env, variable),
            Parameter::VariableSet(set) => {
                for variable in &set.contains {
                    write_variable(&mut env, variable);
                }
            }
        }
    }
    env
}

fn write_variable(env: &mut EnvMap, variable: &Variable) {
    env.insert(variable.name.clone(), variable.value.clone());
}

/// Merge `overrides` over `base`; entries in `overrides` win on collision.
pub fn merge(base: &EnvMap, overrides: &EnvMap) -> EnvMap {
    let mut merged = base.clone();
    merged.extend(overrides.iter().map(|(k, v)| (k.clone(), v.clone())));
    merged
}

/// Resolve `parameters` and merge the result over `base`.
pub fn resolve_into(base: &EnvMap, parameters: &[Parameter]) -> EnvMap {
    merge(base, &resolve_parameters(parameters))
}
