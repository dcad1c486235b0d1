//! Common test utilities and fixtures for integration tests

#![allow(dead_code)]

use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;

use alloy::primitives::{Address, TxHash, U256};
use async_trait::async_trait;
use image::codecs::jpeg::JpegEncoder;

use snapmint::domain::{MintConfirmation, MintRequest};
use snapmint::infra::{MinterError, PinPayload, PinReceipt, PinningClient, Result};
use snapmint::mint::MintGateway;
use snapmint::resolve::AddressResolver;

/// Fixed recipient address used across tests.
pub fn test_address() -> Address {
    "0xF993f484225900D2Be4F7253Cfd4Ab14fC9f4621"
        .parse()
        .unwrap()
}

/// Another fixed address, for stale-result tests.
pub fn other_address() -> Address {
    "0x1111111111111111111111111111111111111111"
        .parse()
        .unwrap()
}

/// Encode a uniform-color JPEG of the given dimensions.
pub fn uniform_jpeg(width: u32, height: u32) -> Vec<u8> {
    let img = image::RgbImage::from_pixel(width, height, image::Rgb([180, 60, 220]));
    let mut buf = Vec::new();
    JpegEncoder::new_with_quality(&mut buf, 90)
        .encode_image(&img)
        .unwrap();
    buf
}

/// Configured behavior for the fake pinning client.
#[derive(Debug, Clone, Copy)]
pub enum FakePinOutcome {
    Success,
    AuthFailure,
    Rejected,
    Unavailable,
}

/// In-memory pinning client counting outbound calls.
pub struct FakePinningClient {
    pub calls: AtomicUsize,
    outcome: FakePinOutcome,
}

impl FakePinningClient {
    pub fn new(outcome: FakePinOutcome) -> Self {
        Self {
            calls: AtomicUsize::new(0),
            outcome,
        }
    }

    pub fn call_count(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl PinningClient for FakePinningClient {
    async fn pin_image(&self, payload: PinPayload) -> Result<PinReceipt> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        match self.outcome {
            FakePinOutcome::Success => Ok(PinReceipt {
                hash: "QmFakeHash".to_string(),
                pinned_size: payload.bytes.len() as u64,
                timestamp: "2026-08-06T00:00:00Z".to_string(),
            }),
            FakePinOutcome::AuthFailure => Err(MinterError::PinningAuth),
            FakePinOutcome::Rejected => {
                Err(MinterError::PinningRejected("unsupported pin options".to_string()))
            }
            FakePinOutcome::Unavailable => {
                Err(MinterError::PinningUnavailable("connection refused".to_string()))
            }
        }
    }
}

/// In-memory name resolver with a fixed lookup table and optional
/// artificial latency, counting dispatched lookups.
pub struct FakeResolver {
    pub calls: AtomicUsize,
    table: HashMap<String, Address>,
    delay: Option<Duration>,
}

impl FakeResolver {
    pub fn new(entries: &[(&str, Address)]) -> Self {
        Self {
            calls: AtomicUsize::new(0),
            table: entries
                .iter()
                .map(|(name, address)| (name.to_string(), *address))
                .collect(),
            delay: None,
        }
    }

    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = Some(delay);
        self
    }

    pub fn call_count(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl AddressResolver for FakeResolver {
    async fn resolve_name(&self, name: &str) -> Result<Option<Address>> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        if let Some(delay) = self.delay {
            tokio::time::sleep(delay).await;
        }
        Ok(self.table.get(name).copied())
    }
}

/// In-memory mint gateway counting capability queries and dispatches.
pub struct FakeGateway {
    pub authorized: bool,
    pub fail_dispatch: bool,
    pub fail_confirm: bool,
    pub capability_calls: AtomicUsize,
    pub dispatch_calls: AtomicUsize,
}

impl FakeGateway {
    pub fn authorized() -> Self {
        Self {
            authorized: true,
            fail_dispatch: false,
            fail_confirm: false,
            capability_calls: AtomicUsize::new(0),
            dispatch_calls: AtomicUsize::new(0),
        }
    }

    pub fn unauthorized() -> Self {
        Self {
            authorized: false,
            ..Self::authorized()
        }
    }

    pub fn dispatch_count(&self) -> usize {
        self.dispatch_calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl MintGateway for FakeGateway {
    async fn is_team_minter(&self, _caller: Address) -> Result<bool> {
        self.capability_calls.fetch_add(1, Ordering::SeqCst);
        Ok(self.authorized)
    }

    async fn mint_price(&self) -> Result<U256> {
        Ok(U256::ZERO)
    }

    async fn dispatch(&self, _request: &MintRequest) -> Result<TxHash> {
        self.dispatch_calls.fetch_add(1, Ordering::SeqCst);
        if self.fail_dispatch {
            return Err(MinterError::Dispatch("nonce too low".to_string()));
        }
        Ok(TxHash::repeat_byte(0xAB))
    }

    async fn confirm(&self, tx_hash: TxHash) -> Result<MintConfirmation> {
        if self.fail_confirm {
            return Err(MinterError::Inclusion(format!(
                "transaction {tx_hash} reverted"
            )));
        }
        Ok(MintConfirmation {
            tx_hash,
            block_number: Some(123),
        })
    }
}
