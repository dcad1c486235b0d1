//! Mint contract gateway
//!
//! Submits team mints to the soulbound token contract and answers the
//! read-only capability and price queries.

use std::time::Duration;

use alloy::network::EthereumWallet;
use alloy::primitives::{Address, TxHash, U256};
use alloy::providers::{Provider, ProviderBuilder};
use alloy::signers::local::PrivateKeySigner;
use alloy::sol;
use async_trait::async_trait;
use tracing::info;

use crate::domain::{MintConfirmation, MintRequest};
use crate::infra::{MinterError, Result};

// Fixed ABI of the deployed team-minter contract.
sol! {
    #[sol(rpc)]
    interface ITeamMinter {
        function teamMint(
            address recipient,
            string customImage,
            string customText,
            string eventName,
            uint256 eventDate
        ) external;

        function mintPrice() external view returns (uint256);

        function teamMinters(address minter) external view returns (bool);
    }
}

/// Gateway configuration.
#[derive(Debug, Clone)]
pub struct MintConfig {
    /// RPC URL for the mint chain
    pub rpc_url: String,
    /// Deployed contract address
    pub contract_address: Address,
    /// Private key for signing mint transactions
    pub private_key: String,
    /// Chain ID of the mint chain
    pub chain_id: u64,
    /// Interval between receipt polls while waiting for inclusion
    pub receipt_poll_interval: Duration,
    /// Maximum receipt polls before the wait is abandoned
    pub receipt_poll_attempts: u32,
}

impl MintConfig {
    /// Load configuration from environment variables.
    pub fn from_env() -> Option<Self> {
        let rpc_url = std::env::var("MINT_RPC_URL").ok()?;
        let contract_address = std::env::var("MINT_CONTRACT_ADDRESS")
            .ok()
            .and_then(|s| s.parse().ok())?;
        let private_key = std::env::var("TEAM_MINTER_PRIVATE_KEY").ok()?;
        let chain_id = std::env::var("MINT_CHAIN_ID")
            .ok()
            .and_then(|s| s.parse().ok())
            .unwrap_or(137);

        Some(Self {
            rpc_url,
            contract_address,
            private_key,
            chain_id,
            receipt_poll_interval: Duration::from_secs(2),
            receipt_poll_attempts: 60,
        })
    }
}

/// Seam over the mint chain, so the submitter can be exercised against
/// a fake in tests.
#[async_trait]
pub trait MintGateway: Send + Sync {
    /// Read-only capability query.
    async fn is_team_minter(&self, caller: Address) -> Result<bool>;

    /// Read-only mint price query.
    async fn mint_price(&self) -> Result<U256>;

    /// Send the privileged mint call; returns the transaction hash once
    /// the chain accepted the dispatch.
    async fn dispatch(&self, request: &MintRequest) -> Result<TxHash>;

    /// Wait for the dispatched transaction to be included.
    async fn confirm(&self, tx_hash: TxHash) -> Result<MintConfirmation>;
}

/// EVM implementation of [`MintGateway`].
pub struct EvmMintGateway {
    config: MintConfig,
}

impl EvmMintGateway {
    pub fn new(config: MintConfig) -> Self {
        Self { config }
    }

    pub fn chain_id(&self) -> u64 {
        self.config.chain_id
    }

    /// Address of the configured signing key.
    pub fn caller(&self) -> Result<Address> {
        Ok(self.signer()?.address())
    }

    fn signer(&self) -> Result<PrivateKeySigner> {
        self.config
            .private_key
            .parse()
            .map_err(|e| MinterError::Configuration(format!("Invalid private key: {e}")))
    }

    fn rpc_url(&self) -> Result<reqwest::Url> {
        self.config
            .rpc_url
            .parse()
            .map_err(|e| MinterError::Configuration(format!("Invalid RPC URL: {e}")))
    }
}

#[async_trait]
impl MintGateway for EvmMintGateway {
    async fn is_team_minter(&self, caller: Address) -> Result<bool> {
        let provider = ProviderBuilder::new().on_http(self.rpc_url()?);
        let contract = ITeamMinter::new(self.config.contract_address, &provider);

        let authorized = contract
            .teamMinters(caller)
            .call()
            .await
            .map_err(|e| MinterError::Dispatch(format!("capability query failed: {e}")))?;

        Ok(authorized._0)
    }

    async fn mint_price(&self) -> Result<U256> {
        let provider = ProviderBuilder::new().on_http(self.rpc_url()?);
        let contract = ITeamMinter::new(self.config.contract_address, &provider);

        let price = contract
            .mintPrice()
            .call()
            .await
            .map_err(|e| MinterError::Dispatch(format!("price query failed: {e}")))?;

        Ok(price._0)
    }

    async fn dispatch(&self, request: &MintRequest) -> Result<TxHash> {
        info!(
            request_id = %request.id,
            recipient = %request.recipient,
            event_name = %request.event_name,
            custom_image = !request.content_url.is_empty(),
            "dispatching team mint"
        );

        let wallet = EthereumWallet::from(self.signer()?);
        let provider = ProviderBuilder::new()
            .with_recommended_fillers()
            .wallet(wallet)
            .on_http(self.rpc_url()?);
        let contract = ITeamMinter::new(self.config.contract_address, &provider);

        let pending = contract
            .teamMint(
                request.recipient,
                request.content_url.clone(),
                request.custom_text.clone(),
                request.event_name.clone(),
                U256::from(request.event_date),
            )
            .send()
            .await
            .map_err(|e| MinterError::Dispatch(e.to_string()))?;

        let tx_hash = *pending.tx_hash();
        info!(request_id = %request.id, tx = %tx_hash, "mint transaction sent");
        Ok(tx_hash)
    }

    async fn confirm(&self, tx_hash: TxHash) -> Result<MintConfirmation> {
        let provider = ProviderBuilder::new().on_http(self.rpc_url()?);

        for _ in 0..self.config.receipt_poll_attempts {
            let receipt = provider
                .get_transaction_receipt(tx_hash)
                .await
                .map_err(|e| MinterError::Inclusion(e.to_string()))?;

            if let Some(receipt) = receipt {
                if !receipt.status() {
                    return Err(MinterError::Inclusion(format!(
                        "transaction {tx_hash} reverted"
                    )));
                }
                info!(
                    tx = %tx_hash,
                    block = receipt.block_number.unwrap_or(0),
                    "mint confirmed"
                );
                return Ok(MintConfirmation {
                    tx_hash,
                    block_number: receipt.block_number,
                });
            }

            tokio::time::sleep(self.config.receipt_poll_interval).await;
        }

        Err(MinterError::Inclusion(format!(
            "timed out waiting for inclusion of {tx_hash}"
        )))
    }
}
