//! snapmint-relay: credential-hiding IPFS pin relay.

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    snapmint::server::run().await
}
