use serde::Serialize;
use serde_json::json;

use sebo_catalog::Product;
use sebo_transactions::{ExchangeReceipt, SaleReceipt};

use crate::error::{decode, read_body, ClientError};
use crate::Storefront;

/// Client for the REST façade.
#[derive(Debug, Clone)]
pub struct RestClient {
    http: reqwest::Client,
    base_url: String,
}

impl RestClient {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            http: reqwest::Client::new(),
            base_url: base_url.into().trim_end_matches('/').to_string(),
        }
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    /// `GET /produtos`, optionally filtered by kind slug.
    pub async fn list_kind(&self, kind: Option<&str>) -> Result<Vec<Product>, ClientError> {
        let mut request = self.http.get(self.url("/produtos"));
        if let Some(kind) = kind {
            request = request.query(&[("tipo", kind)]);
        }
        decode(&read_body(request.send().await?).await?)
    }

    pub async fn get(&self, id: &str) -> Result<Product, ClientError> {
        let response = self.http.get(self.url(&format!("/produtos/{id}"))).send().await?;
        decode(&read_body(response).await?)
    }

    /// `POST /produtos` with a registration body
    /// (`{id, tipo_produto, titulo, preco, estado, extras}`).
    pub async fn create(&self, body: &impl Serialize) -> Result<Product, ClientError> {
        let response = self.http.post(self.url("/produtos")).json(body).send().await?;
        decode(&read_body(response).await?)
    }

    pub async fn replace(&self, id: &str, body: &impl Serialize) -> Result<Product, ClientError> {
        let response = self
            .http
            .put(self.url(&format!("/produtos/{id}")))
            .json(body)
            .send()
            .await?;
        decode(&read_body(response).await?)
    }

    pub async fn delete(&self, id: &str) -> Result<(), ClientError> {
        let response = self
            .http
            .delete(self.url(&format!("/produtos/{id}")))
            .send()
            .await?;
        read_body(response).await.map(|_| ())
    }
}

impl Storefront for RestClient {
    async fn list(&self) -> Result<Vec<Product>, ClientError> {
        self.list_kind(None).await
    }

    async fn search(&self, term: &str) -> Result<Vec<Product>, ClientError> {
        let response = self
            .http
            .get(self.url("/produtos"))
            .query(&[("termo", term)])
            .send()
            .await?;
        decode(&read_body(response).await?)
    }

    async fn sell(&self, id: &str) -> Result<SaleReceipt, ClientError> {
        let response = self
            .http
            .post(self.url(&format!("/produtos/{id}/venda")))
            .send()
            .await?;
        decode(&read_body(response).await?)
    }

    async fn exchange(&self, a: &str, b: &str) -> Result<ExchangeReceipt, ClientError> {
        let response = self
            .http
            .post(self.url("/transacoes/troca"))
            .json(&json!({ "produto_a_id": a, "produto_b_id": b }))
            .send()
            .await?;
        decode(&read_body(response).await?)
    }
}
