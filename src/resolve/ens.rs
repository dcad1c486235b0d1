//! ENS-compatible name lookup
//!
//! Resolution runs against a dedicated RPC endpoint that may differ
//! from the mint chain: name registries typically live on mainnet while
//! minting happens elsewhere, so the resolver carries its own network
//! configuration.

use alloy::primitives::{address, keccak256, Address, B256};
use alloy::providers::ProviderBuilder;
use alloy::sol;
use async_trait::async_trait;

use crate::infra::{MinterError, Result};

/// Canonical ENS registry address on mainnet.
pub const ENS_REGISTRY_ADDRESS: Address = address!("00000000000C2E074eC69A0dFb2997BA6C7d2e1e");

/// Default resolution RPC endpoint.
const DEFAULT_RESOLVER_RPC_URL: &str = "https://eth.llamarpc.com";

sol! {
    #[sol(rpc)]
    interface IEnsRegistry {
        function resolver(bytes32 node) external view returns (address);
    }

    #[sol(rpc)]
    interface IEnsResolver {
        function addr(bytes32 node) external view returns (address);
    }
}

/// EIP-137 namehash.
pub fn namehash(name: &str) -> B256 {
    let mut node = B256::ZERO;
    if name.is_empty() {
        return node;
    }
    for label in name.split('.').rev() {
        let label_hash = keccak256(label.as_bytes());
        let mut buf = [0u8; 64];
        buf[..32].copy_from_slice(node.as_slice());
        buf[32..].copy_from_slice(label_hash.as_slice());
        node = keccak256(buf);
    }
    node
}

/// Seam over the resolution service.
#[async_trait]
pub trait AddressResolver: Send + Sync + 'static {
    /// Resolve a name to an address. `Ok(None)` means the registry has
    /// no match; `Err` means the service itself failed.
    async fn resolve_name(&self, name: &str) -> Result<Option<Address>>;
}

/// Resolver configuration.
#[derive(Debug, Clone)]
pub struct ResolverConfig {
    /// RPC endpoint for the chain hosting the name registry
    pub rpc_url: String,
    /// Registry contract address
    pub registry_address: Address,
}

impl ResolverConfig {
    /// Load configuration from environment variables.
    pub fn from_env() -> Self {
        Self {
            rpc_url: std::env::var("RESOLVER_RPC_URL")
                .unwrap_or_else(|_| DEFAULT_RESOLVER_RPC_URL.into()),
            registry_address: std::env::var("ENS_REGISTRY_ADDRESS")
                .ok()
                .and_then(|s| s.parse().ok())
                .unwrap_or(ENS_REGISTRY_ADDRESS),
        }
    }
}

/// On-chain ENS lookup: registry `resolver(node)`, then resolver
/// `addr(node)`. The zero address at either step means no match.
pub struct EnsResolver {
    config: ResolverConfig,
}

impl EnsResolver {
    pub fn new(config: ResolverConfig) -> Self {
        Self { config }
    }
}

#[async_trait]
impl AddressResolver for EnsResolver {
    async fn resolve_name(&self, name: &str) -> Result<Option<Address>> {
        let provider = ProviderBuilder::new().on_http(
            self.config
                .rpc_url
                .parse()
                .map_err(|e| MinterError::Configuration(format!("Invalid resolver RPC URL: {e}")))?,
        );

        let node = namehash(name);

        let registry = IEnsRegistry::new(self.config.registry_address, &provider);
        let resolver_address = registry
            .resolver(node)
            .call()
            .await
            .map_err(|e| MinterError::Resolution(format!("registry lookup failed: {e}")))?
            ._0;

        if resolver_address == Address::ZERO {
            return Ok(None);
        }

        let resolver = IEnsResolver::new(resolver_address, &provider);
        let resolved = resolver
            .addr(node)
            .call()
            .await
            .map_err(|e| MinterError::Resolution(format!("resolver lookup failed: {e}")))?
            ._0;

        if resolved == Address::ZERO {
            return Ok(None);
        }

        tracing::info!(name, address = %resolved, "name resolved");
        Ok(Some(resolved))
    }
}
