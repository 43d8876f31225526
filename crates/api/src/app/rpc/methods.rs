//! Static `(objectReference, methodId)` table.

use std::collections::{HashMap, HashSet};

use serde::Serialize;
use serde_json::Value;
use thiserror::Error;

use sebo_catalog::{Product, ProductKind};
use sebo_core::{DomainError, DomainResult, ProductId};

use super::binding::BoundArgs;
use crate::app::services::AppServices;

pub const CATALOG_SERVICE: &str = "CatalogoService";
pub const TRANSACTION_SERVICE: &str = "TransacaoService";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Param {
    pub name: &'static str,
    pub required: bool,
}

impl Param {
    pub const fn required(name: &'static str) -> Self {
        Self {
            name,
            required: true,
        }
    }

    pub const fn optional(name: &'static str) -> Self {
        Self {
            name,
            required: false,
        }
    }
}

pub type Handler = fn(&AppServices, BoundArgs) -> DomainResult<Value>;

pub struct MethodSpec {
    pub object: &'static str,
    pub method: &'static str,
    pub params: &'static [Param],
    pub handler: Handler,
}

impl core::fmt::Debug for MethodSpec {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("MethodSpec")
            .field("object", &self.object)
            .field("method", &self.method)
            .field("params", &self.params)
            .finish()
    }
}

pub static METHODS: &[MethodSpec] = &[
    MethodSpec {
        object: CATALOG_SERVICE,
        method: "listar",
        params: &[Param::optional("tipo")],
        handler: list_products,
    },
    MethodSpec {
        object: CATALOG_SERVICE,
        method: "buscar",
        params: &[Param::required("termo")],
        handler: search_products,
    },
    MethodSpec {
        object: CATALOG_SERVICE,
        method: "obter",
        params: &[Param::required("produto_id")],
        handler: get_product,
    },
    MethodSpec {
        object: CATALOG_SERVICE,
        method: "cadastrar",
        params: &[Param::required("produto")],
        handler: register_product,
    },
    MethodSpec {
        object: CATALOG_SERVICE,
        method: "remover",
        params: &[Param::required("produto_id")],
        handler: remove_product,
    },
    MethodSpec {
        object: TRANSACTION_SERVICE,
        method: "vender",
        params: &[Param::required("produto_id")],
        handler: sell_product,
    },
    MethodSpec {
        object: TRANSACTION_SERVICE,
        method: "trocar",
        params: &[Param::required("produto_a_id"), Param::required("produto_b_id")],
        handler: exchange_products,
    },
];

#[derive(Debug, Error, PartialEq, Eq)]
pub enum TableError {
    #[error("duplicate method {object}.{method}")]
    DuplicateMethod {
        object: &'static str,
        method: &'static str,
    },
    #[error("{object}.{method}: parameter '{param}' declared twice")]
    DuplicateParam {
        object: &'static str,
        method: &'static str,
        param: &'static str,
    },
    #[error("{object}.{method}: required parameter '{param}' follows an optional one")]
    RequiredAfterOptional {
        object: &'static str,
        method: &'static str,
        param: &'static str,
    },
}

/// Validated method lookup, keyed by object then method.
#[derive(Debug)]
pub struct MethodTable {
    objects: HashMap<&'static str, HashMap<&'static str, &'static MethodSpec>>,
}

impl MethodTable {
    pub fn new(specs: &'static [MethodSpec]) -> Result<Self, TableError> {
        let mut objects: HashMap<&'static str, HashMap<&'static str, &'static MethodSpec>> =
            HashMap::new();

        for spec in specs {
            let mut seen = HashSet::new();
            let mut optional_seen = false;
            for param in spec.params {
                if !seen.insert(param.name) {
                    return Err(TableError::DuplicateParam {
                        object: spec.object,
                        method: spec.method,
                        param: param.name,
                    });
                }
                if param.required && optional_seen {
                    return Err(TableError::RequiredAfterOptional {
                        object: spec.object,
                        method: spec.method,
                        param: param.name,
                    });
                }
                optional_seen |= !param.required;
            }

            let methods = objects.entry(spec.object).or_default();
            if methods.insert(spec.method, spec).is_some() {
                return Err(TableError::DuplicateMethod {
                    object: spec.object,
                    method: spec.method,
                });
            }
        }

        Ok(Self { objects })
    }

    /// The table served on `/invoke`.
    pub fn standard() -> Result<Self, TableError> {
        Self::new(METHODS)
    }

    pub fn resolve(&self, object: &str, method: &str) -> DomainResult<&'static MethodSpec> {
        let methods = self.objects.get(object).ok_or_else(|| {
            DomainError::method_not_found(format!("Serviço '{object}' não encontrado."))
        })?;
        methods.get(method).copied().ok_or_else(|| {
            DomainError::method_not_found(format!("Método '{method}' não existe em '{object}'."))
        })
    }
}

fn to_result(value: impl Serialize) -> DomainResult<Value> {
    serde_json::to_value(value).map_err(|e| DomainError::internal(format!("encode result: {e}")))
}

fn list_products(services: &AppServices, mut args: BoundArgs) -> DomainResult<Value> {
    let kind = args
        .optional::<String>("tipo")?
        .map(|tipo| ProductKind::parse(&tipo))
        .transpose()?;
    to_result(services.catalog.list(kind)?)
}

fn search_products(services: &AppServices, mut args: BoundArgs) -> DomainResult<Value> {
    let term: String = args.required("termo")?;
    to_result(services.catalog.search(&term, None)?)
}

fn get_product(services: &AppServices, mut args: BoundArgs) -> DomainResult<Value> {
    let id: ProductId = args.required("produto_id")?;
    to_result(services.catalog.get(&id)?)
}

fn register_product(services: &AppServices, mut args: BoundArgs) -> DomainResult<Value> {
    let raw: Value = args.required("produto")?;
    to_result(services.catalog.create(Product::from_wire(raw)?)?)
}

fn remove_product(services: &AppServices, mut args: BoundArgs) -> DomainResult<Value> {
    let id: ProductId = args.required("produto_id")?;
    services.catalog.delete(&id)?;
    Ok(Value::Null)
}

fn sell_product(services: &AppServices, mut args: BoundArgs) -> DomainResult<Value> {
    let id: ProductId = args.required("produto_id")?;
    to_result(services.engine.sell(id)?)
}

fn exchange_products(services: &AppServices, mut args: BoundArgs) -> DomainResult<Value> {
    let a: ProductId = args.required("produto_a_id")?;
    let b: ProductId = args.required("produto_b_id")?;
    to_result(services.engine.exchange(a, b)?)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn noop(_: &AppServices, _: BoundArgs) -> DomainResult<Value> {
        Ok(Value::Null)
    }

    #[test]
    fn standard_table_is_valid() {
        let table = MethodTable::standard().unwrap();
        assert_eq!(table.resolve("TransacaoService", "trocar").unwrap().params.len(), 2);
    }

    #[test]
    fn unknown_object_and_method_are_method_not_found() {
        let table = MethodTable::standard().unwrap();

        let err = table.resolve("EstoqueService", "listar").unwrap_err();
        assert_eq!(err, DomainError::method_not_found("Serviço 'EstoqueService' não encontrado."));

        let err = table.resolve("CatalogoService", "vender").unwrap_err();
        assert_eq!(
            err,
            DomainError::method_not_found("Método 'vender' não existe em 'CatalogoService'.")
        );
    }

    #[test]
    fn rejects_duplicate_methods() {
        static SPECS: &[MethodSpec] = &[
            MethodSpec {
                object: "S",
                method: "m",
                params: &[],
                handler: noop,
            },
            MethodSpec {
                object: "S",
                method: "m",
                params: &[],
                handler: noop,
            },
        ];
        assert_eq!(
            MethodTable::new(SPECS).unwrap_err(),
            TableError::DuplicateMethod {
                object: "S",
                method: "m"
            }
        );
    }

    #[test]
    fn rejects_bad_parameter_lists() {
        static DUPLICATE: &[MethodSpec] = &[MethodSpec {
            object: "S",
            method: "m",
            params: &[Param::required("a"), Param::required("a")],
            handler: noop,
        }];
        assert!(matches!(
            MethodTable::new(DUPLICATE),
            Err(TableError::DuplicateParam { param: "a", .. })
        ));

        static ORDER: &[MethodSpec] = &[MethodSpec {
            object: "S",
            method: "m",
            params: &[Param::optional("a"), Param::required("b")],
            handler: noop,
        }];
        assert!(matches!(
            MethodTable::new(ORDER),
            Err(TableError::RequiredAfterOptional { param: "b", .. })
        ));
    }
}
