//! HTTP clients for the storefront service.
//!
//! [`RestClient`] talks to the REST resources, [`RpcClient`] to the Object-RPC
//! endpoint. Both implement [`Storefront`] and report failures as
//! [`ClientError`] with the server's message.

pub mod error;
pub mod rest;
pub mod rpc;

pub use error::{extract_message, ClientError};
pub use rest::RestClient;
pub use rpc::RpcClient;

use sebo_catalog::Product;
use sebo_transactions::{ExchangeReceipt, SaleReceipt};

pub const DEFAULT_BASE_URL: &str = "http://127.0.0.1:8000";

/// Operations both façades expose.
#[allow(async_fn_in_trait)]
pub trait Storefront {
    async fn list(&self) -> Result<Vec<Product>, ClientError>;
    async fn search(&self, term: &str) -> Result<Vec<Product>, ClientError>;
    async fn sell(&self, id: &str) -> Result<SaleReceipt, ClientError>;
    async fn exchange(&self, a: &str, b: &str) -> Result<ExchangeReceipt, ClientError>;
}
