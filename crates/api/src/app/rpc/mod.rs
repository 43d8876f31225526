//! Object-RPC façade.
//!
//! ```text
//! InvokeRequest
//!   ↓ resolve (objectReference, methodId) in the static MethodTable
//!   ↓ bind args/kwargs to the method's declared parameters
//!   ↓ typed handler → CatalogService / TransactionEngine
//! InvokeReply { isException, result | error }
//! ```
//!
//! Domain failures never escape as transport errors: they come back as an
//! exception reply carrying the error message.

pub mod binding;
pub mod envelope;
pub mod methods;

pub use envelope::{Arguments, InvokeReply, InvokeRequest};
pub use methods::{MethodTable, TableError};

use sebo_core::DomainError;

use crate::app::services::AppServices;

pub fn dispatch(
    services: &AppServices,
    table: &MethodTable,
    request: InvokeRequest,
) -> InvokeReply {
    let InvokeRequest {
        request_id,
        object_reference,
        method_id,
        arguments,
    } = request;

    let outcome = table
        .resolve(&object_reference, &method_id)
        .and_then(|spec| {
            let bound = binding::bind(spec.params, arguments)?;
            (spec.handler)(services, bound)
        });

    match outcome {
        Ok(result) => InvokeReply::ok(request_id, result),
        Err(err) => {
            match &err {
                DomainError::Internal(cause) => tracing::error!(
                    object = %object_reference,
                    method = %method_id,
                    %cause,
                    "rpc call failed"
                ),
                other => tracing::debug!(
                    object = %object_reference,
                    method = %method_id,
                    kind = other.kind(),
                    "rpc call raised"
                ),
            }
            InvokeReply::exception(request_id, &err)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::{json, Value};

    fn call(services: &AppServices, envelope: Value) -> InvokeReply {
        let table = MethodTable::standard().unwrap();
        dispatch(services, &table, serde_json::from_value(envelope).unwrap())
    }

    fn services() -> AppServices {
        AppServices::in_memory(true).unwrap()
    }

    #[test]
    fn listar_returns_catalog_in_order() {
        let reply = call(
            &services(),
            json!({"requestId": "r1", "objectReference": "CatalogoService", "methodId": "listar"}),
        );
        assert!(!reply.is_exception);
        assert_eq!(reply.request_id, Some(json!("r1")));
        let ids: Vec<&str> = reply
            .result
            .as_array()
            .unwrap()
            .iter()
            .map(|p| p["id"].as_str().unwrap())
            .collect();
        assert_eq!(ids, vec!["L1", "L2", "E1", "E2", "A1", "A2", "C1"]);
    }

    #[test]
    fn listar_filters_by_kind() {
        let reply = call(
            &services(),
            json!({
                "objectReference": "CatalogoService",
                "methodId": "listar",
                "arguments": {"kwargs": {"tipo": "apostila"}}
            }),
        );
        let kinds: Vec<&str> = reply
            .result
            .as_array()
            .unwrap()
            .iter()
            .map(|p| p["__type__"].as_str().unwrap())
            .collect();
        assert_eq!(kinds, vec!["Apostila", "Apostila"]);
    }

    #[test]
    fn vender_twice_raises_unavailable() {
        let services = services();
        let envelope = json!({
            "objectReference": "TransacaoService",
            "methodId": "vender",
            "arguments": {"args": ["L2"]}
        });

        let first = call(&services, envelope.clone());
        assert!(!first.is_exception);
        assert_eq!(first.result["produto"]["disponivel"], json!(false));
        assert_eq!(first.result["mensagem"], json!("Venda realizada com sucesso"));

        let second = call(&services, envelope);
        assert!(second.is_exception);
        assert_eq!(second.error.as_deref(), Some("Produto L2 indisponível."));
        assert_eq!(second.result, Value::Null);
    }

    #[test]
    fn trocar_cross_kind_raises_incompatible() {
        let reply = call(
            &services(),
            json!({
                "objectReference": "TransacaoService",
                "methodId": "trocar",
                "arguments": {"args": ["E1"], "kwargs": {"produto_b_id": "L1"}}
            }),
        );
        assert!(reply.is_exception);
        assert!(reply.error.unwrap().starts_with("Troca não permitida"));
    }

    #[test]
    fn unknown_method_is_an_exception_reply() {
        let reply = call(
            &services(),
            json!({"objectReference": "CatalogoService", "methodId": "apagarTudo"}),
        );
        assert!(reply.is_exception);
        assert_eq!(
            reply.error.as_deref(),
            Some("Método 'apagarTudo' não existe em 'CatalogoService'.")
        );
    }

    #[test]
    fn cadastrar_then_obter_then_remover() {
        let services = services();
        let produto = json!({
            "id": "A3",
            "titulo": "Apostila de Química",
            "preco": 22.5,
            "estado": "novo",
            "__type__": "Apostila",
            "materia": "Química",
            "instituicao": "IFSP"
        });

        let created = call(
            &services,
            json!({
                "objectReference": "CatalogoService",
                "methodId": "cadastrar",
                "arguments": {"args": [produto]}
            }),
        );
        assert!(!created.is_exception, "{:?}", created.error);
        assert_eq!(created.result["disponivel"], json!(true));

        let fetched = call(
            &services,
            json!({
                "objectReference": "CatalogoService",
                "methodId": "obter",
                "arguments": {"args": ["A3"]}
            }),
        );
        assert_eq!(fetched.result["materia"], json!("Química"));

        let removed = call(
            &services,
            json!({
                "objectReference": "CatalogoService",
                "methodId": "remover",
                "arguments": {"args": ["A3"]}
            }),
        );
        assert!(!removed.is_exception);
        assert_eq!(removed.result, Value::Null);

        let missing = call(
            &services,
            json!({
                "objectReference": "CatalogoService",
                "methodId": "obter",
                "arguments": {"args": ["A3"]}
            }),
        );
        assert_eq!(missing.error.as_deref(), Some("Produto A3 não encontrado."));
    }

    #[test]
    fn cadastrar_rejects_fields_outside_the_kind() {
        let services = services();
        let produto = json!({
            "id": "A4",
            "titulo": "Apostila de Biologia",
            "preco": 18.0,
            "estado": "usado",
            "disponivel": false,
            "__type__": "Apostila",
            "materia": "Biologia",
            "instituicao": "USP",
            "cor": "azul"
        });

        let reply = call(
            &services,
            json!({
                "objectReference": "CatalogoService",
                "methodId": "cadastrar",
                "arguments": {"args": [produto]}
            }),
        );
        assert!(reply.is_exception);
        assert_eq!(reply.result, Value::Null);
        assert!(reply.error.as_deref().unwrap().contains("cor"));

        let missing = call(
            &services,
            json!({
                "objectReference": "CatalogoService",
                "methodId": "obter",
                "arguments": {"args": ["A4"]}
            }),
        );
        assert_eq!(missing.error.as_deref(), Some("Produto A4 não encontrado."));
    }

    #[test]
    fn trocar_checks_existence_before_self_exchange() {
        let services = services();
        let reply = call(
            &services,
            json!({
                "objectReference": "TransacaoService",
                "methodId": "trocar",
                "arguments": {"args": ["X9", "X9"]}
            }),
        );
        assert!(reply.is_exception);
        assert_eq!(reply.error.as_deref(), Some("Produto X9 não encontrado."));
    }
}
