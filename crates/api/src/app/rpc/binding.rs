//! Binding of positional and named RPC arguments to declared parameters.

use std::collections::HashMap;

use serde::de::DeserializeOwned;
use serde_json::Value;

use sebo_core::{DomainError, DomainResult};

use super::envelope::Arguments;
use super::methods::Param;

/// Arguments matched to parameter names.
#[derive(Debug, Default)]
pub struct BoundArgs {
    values: HashMap<&'static str, Value>,
}

impl BoundArgs {
    /// Take a required parameter. `bind` has already checked presence.
    pub fn required<T: DeserializeOwned>(&mut self, name: &str) -> DomainResult<T> {
        match self.optional(name)? {
            Some(value) => Ok(value),
            None => Err(missing(name)),
        }
    }

    /// Take an optional parameter; an explicit `null` counts as absent.
    pub fn optional<T: DeserializeOwned>(&mut self, name: &str) -> DomainResult<Option<T>> {
        match self.values.remove(name) {
            None | Some(Value::Null) => Ok(None),
            Some(value) => serde_json::from_value(value).map(Some).map_err(|e| {
                DomainError::bad_request(format!("Argumento '{name}' inválido: {e}"))
            }),
        }
    }
}

fn missing(name: &str) -> DomainError {
    DomainError::bad_request(format!("Argumento obrigatório '{name}' ausente."))
}

/// Bind positionals first, then kwargs by name.
pub fn bind(params: &'static [Param], arguments: Arguments) -> DomainResult<BoundArgs> {
    let Arguments { args, kwargs } = arguments;

    if args.len() > params.len() {
        return Err(DomainError::bad_request(format!(
            "Argumentos demais: esperado no máximo {}, recebido {}.",
            params.len(),
            args.len()
        )));
    }

    let mut values: HashMap<&'static str, Value> = params
        .iter()
        .zip(args)
        .map(|(param, value)| (param.name, value))
        .collect();

    for (name, value) in kwargs {
        let param = params
            .iter()
            .find(|p| p.name == name)
            .ok_or_else(|| DomainError::bad_request(format!("Argumento inesperado '{name}'.")))?;
        if values.insert(param.name, value).is_some() {
            return Err(DomainError::bad_request(format!(
                "Argumento '{name}' informado mais de uma vez."
            )));
        }
    }

    if let Some(param) = params
        .iter()
        .find(|p| p.required && !values.contains_key(p.name))
    {
        return Err(missing(param.name));
    }

    Ok(BoundArgs { values })
}
