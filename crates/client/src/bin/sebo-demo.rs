//! Replays the storefront walkthrough against a running server.

use clap::Parser;

use sebo_catalog::Product;
use sebo_client::{DEFAULT_BASE_URL, RestClient, RpcClient, Storefront};

#[derive(Debug, Parser)]
#[command(name = "sebo-demo", about = "Walk through list, search, sale and exchanges")]
struct Args {
    /// Use the Object-RPC endpoint instead of the REST resources.
    #[arg(long)]
    rpc: bool,

    #[arg(long, env = "SEBO_BASE_URL", default_value = DEFAULT_BASE_URL)]
    base_url: String,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    if args.rpc {
        println!("== Object-RPC em {} ==", args.base_url);
        run(&RpcClient::new(args.base_url)).await
    } else {
        println!("== REST em {} ==", args.base_url);
        run(&RestClient::new(args.base_url)).await
    }
}

fn print_products(heading: &str, products: &[Product]) {
    println!("\n{heading}");
    for product in products {
        println!("  {product}");
    }
}

async fn run(client: &impl Storefront) -> anyhow::Result<()> {
    print_products("Catálogo:", &client.list().await?);
    print_products("Busca por 'python':", &client.search("python").await?);

    println!("\nVenda de L2:");
    match client.sell("L2").await {
        Ok(receipt) => println!("  {} -> {}", receipt.message, receipt.product),
        Err(e) => println!("  erro: {e}"),
    }

    println!("\nTroca válida A1 <-> A2:");
    match client.exchange("A1", "A2").await {
        Ok(receipt) => println!("  {}", receipt.message),
        Err(e) => println!("  erro: {e}"),
    }

    println!("\nTroca inválida E1 <-> L1:");
    match client.exchange("E1", "L1").await {
        Ok(receipt) => println!("  inesperado: {}", receipt.message),
        Err(e) => println!("  erro: {e}"),
    }

    print_products("Catálogo final:", &client.list().await?);
    Ok(())
}
