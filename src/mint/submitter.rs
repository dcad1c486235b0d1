//! Mint submitter
//!
//! Checks every client-side precondition, then issues exactly one
//! privileged mint call and tracks its lifecycle. Nothing here retries:
//! a failure is surfaced with the underlying message and the operator
//! resubmits a fresh request.

use std::sync::Arc;

use alloy::primitives::Address;
use tracing::{info, warn};

use crate::domain::{MintReceipt, MintStatus};
use crate::infra::{MinterError, Result};
use crate::mint::MintGateway;
use crate::session::MintSession;

pub struct MintSubmitter<G: MintGateway> {
    gateway: Arc<G>,
}

impl<G: MintGateway> MintSubmitter<G> {
    pub fn new(gateway: Arc<G>) -> Self {
        Self { gateway }
    }

    /// Validate the session, dispatch one mint, and wait for inclusion.
    ///
    /// Precondition order: capability first (a read-only chain query),
    /// then the session checks (resolution, required fields, upload
    /// completeness). Upload completion is guaranteed to precede
    /// dispatch because the content URL is read from the session's
    /// finished upload record — there is no parallel race between the
    /// two.
    ///
    /// On confirmation the session's transient state resets while its
    /// free-text templates are preserved for the next mint.
    pub async fn submit(&self, session: &mut MintSession, caller: Address) -> Result<MintReceipt> {
        if !self.gateway.is_team_minter(caller).await? {
            return Err(MinterError::NotTeamMinter(caller));
        }

        let mut request = session.build_request()?;

        let tx_hash = match self.gateway.dispatch(&request).await {
            Ok(tx_hash) => {
                request.transition(MintStatus::Submitted)?;
                tx_hash
            }
            Err(e) => {
                request.transition(MintStatus::Failed)?;
                warn!(request_id = %request.id, error = %e, "mint dispatch rejected");
                return Err(e);
            }
        };

        match self.gateway.confirm(tx_hash).await {
            Ok(confirmation) => {
                request.transition(MintStatus::Confirmed)?;
                info!(
                    request_id = %request.id,
                    tx = %tx_hash,
                    block = confirmation.block_number.unwrap_or(0),
                    "mint confirmed"
                );
                session.reset_after_confirm();
                Ok(MintReceipt {
                    request_id: request.id,
                    tx_hash,
                    block_number: confirmation.block_number,
                })
            }
            Err(e) => {
                request.transition(MintStatus::Failed)?;
                warn!(request_id = %request.id, tx = %tx_hash, error = %e, "mint inclusion failed");
                Err(e)
            }
        }
    }
}
