use std::sync::atomic::{AtomicU64, Ordering};

use serde_json::{json, Map, Value};

use sebo_catalog::Product;
use sebo_transactions::{ExchangeReceipt, SaleReceipt};

use crate::error::{decode, decode_value, read_body, ClientError};
use crate::Storefront;

pub const CATALOG_SERVICE: &str = "CatalogoService";
pub const TRANSACTION_SERVICE: &str = "TransacaoService";

/// Client for the Object-RPC façade (`POST /invoke`).
#[derive(Debug)]
pub struct RpcClient {
    http: reqwest::Client,
    endpoint: String,
    next_request_id: AtomicU64,
}

impl RpcClient {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            http: reqwest::Client::new(),
            endpoint: format!("{}/invoke", base_url.into().trim_end_matches('/')),
            next_request_id: AtomicU64::new(1),
        }
    }

    /// Invoke `object.method(*args, **kwargs)` and return the raw result.
    ///
    /// An `isException` reply becomes [`ClientError::Exception`].
    pub async fn call(
        &self,
        object: &str,
        method: &str,
        args: Vec<Value>,
        kwargs: Map<String, Value>,
    ) -> Result<Value, ClientError> {
        let request_id = self.next_request_id.fetch_add(1, Ordering::Relaxed);
        let envelope = json!({
            "requestId": request_id.to_string(),
            "objectReference": object,
            "methodId": method,
            "arguments": { "args": args, "kwargs": kwargs },
        });

        let response = self.http.post(&self.endpoint).json(&envelope).send().await?;
        let mut reply: Value = decode(&read_body(response).await?)?;

        if reply.get("isException").and_then(Value::as_bool).unwrap_or(false) {
            let message = reply
                .get("error")
                .and_then(Value::as_str)
                .unwrap_or("exceção remota sem mensagem")
                .to_string();
            return Err(ClientError::Exception(message));
        }
        Ok(reply.get_mut("result").map(Value::take).unwrap_or(Value::Null))
    }

    async fn call_args(
        &self,
        object: &str,
        method: &str,
        args: Vec<Value>,
    ) -> Result<Value, ClientError> {
        self.call(object, method, args, Map::new()).await
    }

    pub async fn list_kind(&self, kind: Option<&str>) -> Result<Vec<Product>, ClientError> {
        let args = kind.map(|k| vec![json!(k)]).unwrap_or_default();
        decode_value(self.call_args(CATALOG_SERVICE, "listar", args).await?)
    }

    pub async fn get(&self, id: &str) -> Result<Product, ClientError> {
        decode_value(self.call_args(CATALOG_SERVICE, "obter", vec![json!(id)]).await?)
    }

    /// `CatalogoService.cadastrar` with a product in wire format.
    pub async fn register(&self, product: &Product) -> Result<Product, ClientError> {
        let product =
            serde_json::to_value(product).map_err(|e| ClientError::Decode(e.to_string()))?;
        decode_value(self.call_args(CATALOG_SERVICE, "cadastrar", vec![product]).await?)
    }

    pub async fn remove(&self, id: &str) -> Result<(), ClientError> {
        self.call_args(CATALOG_SERVICE, "remover", vec![json!(id)])
            .await
            .map(|_| ())
    }
}

impl Storefront for RpcClient {
    async fn list(&self) -> Result<Vec<Product>, ClientError> {
        self.list_kind(None).await
    }

    async fn search(&self, term: &str) -> Result<Vec<Product>, ClientError> {
        decode_value(self.call_args(CATALOG_SERVICE, "buscar", vec![json!(term)]).await?)
    }

    async fn sell(&self, id: &str) -> Result<SaleReceipt, ClientError> {
        decode_value(self.call_args(TRANSACTION_SERVICE, "vender", vec![json!(id)]).await?)
    }

    async fn exchange(&self, a: &str, b: &str) -> Result<ExchangeReceipt, ClientError> {
        let mut kwargs = Map::new();
        kwargs.insert("produto_a_id".to_string(), json!(a));
        kwargs.insert("produto_b_id".to_string(), json!(b));
        decode_value(self.call(TRANSACTION_SERVICE, "trocar", Vec::new(), kwargs).await?)
    }
}
