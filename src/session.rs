//! Per-operator minting session
//!
//! All mutable pipeline state lives in one explicit object: the current
//! compressed photo, its upload record, the recipient resolution
//! snapshot and the form fields. The stages are functions over this
//! state; there are no ambient globals.
//!
//! A monotonic generation counter tags each capture/selection. A
//! compression or upload result arriving for an older generation is
//! discarded — no cancellation primitive, just stale-result detection.

use chrono::{DateTime, Utc};
use uuid::Uuid;

use crate::domain::{
    CompressionResult, MintRequest, MintStatus, RecipientResolution, UploadRecord,
};
use crate::infra::{MinterError, Result};

/// Template values restored after each confirmed mint, so an operator
/// minting in sequence does not retype boilerplate.
#[derive(Debug, Clone)]
pub struct SessionDefaults {
    pub custom_text: String,
    pub event_name: String,
}

impl Default for SessionDefaults {
    fn default() -> Self {
        Self {
            custom_text: "Great connecting at the event!".to_string(),
            event_name: "Networking Event".to_string(),
        }
    }
}

/// State for one operator's minting session.
#[derive(Debug)]
pub struct MintSession {
    generation: u64,
    photo: Option<CompressionResult>,
    upload: Option<UploadRecord>,
    recipient: RecipientResolution,
    defaults: SessionDefaults,

    pub custom_text: String,
    pub event_name: String,
    pub event_date: DateTime<Utc>,
    pub use_default_image: bool,
}

impl MintSession {
    pub fn new(defaults: SessionDefaults) -> Self {
        Self {
            generation: 0,
            photo: None,
            upload: None,
            recipient: RecipientResolution::default(),
            custom_text: defaults.custom_text.clone(),
            event_name: defaults.event_name.clone(),
            defaults,
            event_date: Utc::now(),
            use_default_image: true,
        }
    }

    /// Start a new capture/selection and return its generation tag.
    /// Any compression or upload still in flight for an earlier
    /// generation becomes stale.
    pub fn begin_generation(&mut self) -> u64 {
        self.generation += 1;
        self.generation
    }

    pub fn current_generation(&self) -> u64 {
        self.generation
    }

    /// Attach a compression result. Returns false (and discards the
    /// result) when a newer capture superseded it.
    pub fn attach_photo(&mut self, generation: u64, photo: CompressionResult) -> bool {
        if generation != self.generation {
            return false;
        }
        self.photo = Some(photo);
        self.upload = None;
        self.use_default_image = false;
        true
    }

    /// Record a finished upload. Returns false (and discards the
    /// record) when a newer capture superseded it.
    pub fn record_upload(&mut self, generation: u64, record: UploadRecord) -> bool {
        if generation != self.generation {
            return false;
        }
        self.upload = Some(record);
        true
    }

    /// Drop the current photo and upload, returning to the default
    /// image.
    pub fn clear_photo(&mut self) {
        self.photo = None;
        self.upload = None;
        self.use_default_image = true;
    }

    pub fn photo(&self) -> Option<&CompressionResult> {
        self.photo.as_ref()
    }

    pub fn upload(&self) -> Option<&UploadRecord> {
        self.upload.as_ref()
    }

    /// Replace the resolution snapshot (taken from the resolver
    /// session).
    pub fn set_resolution(&mut self, resolution: RecipientResolution) {
        self.recipient = resolution;
    }

    pub fn resolution(&self) -> &RecipientResolution {
        &self.recipient
    }

    /// Assemble a mint request, failing fast with a specific error on
    /// the first unmet precondition.
    pub fn build_request(&self) -> Result<MintRequest> {
        let recipient = if self.recipient.is_resolved() {
            self.recipient
                .resolved
                .ok_or_else(|| MinterError::Internal("resolved state without address".into()))?
        } else {
            return Err(MinterError::RecipientNotResolved);
        };

        if self.event_name.trim().is_empty() {
            return Err(MinterError::MissingField("event_name"));
        }

        // Empty content URL is the "use the contract's default image"
        // sentinel; it is only valid when the operator did not choose a
        // custom image.
        let content_url = if self.use_default_image {
            String::new()
        } else {
            match &self.upload {
                Some(record) if !record.ipfs_url.is_empty() => record.ipfs_url.clone(),
                _ => return Err(MinterError::UploadIncomplete),
            }
        };

        Ok(MintRequest {
            id: Uuid::new_v4(),
            recipient,
            content_url,
            custom_text: self.custom_text.clone(),
            event_name: self.event_name.trim().to_string(),
            event_date: self.event_date.timestamp().max(0) as u64,
            status: MintStatus::Building,
        })
    }

    /// Reset transient state after a confirmed mint. The free-text
    /// fields return to their templates rather than blanking, and the
    /// event date is left alone.
    pub fn reset_after_confirm(&mut self) {
        self.photo = None;
        self.upload = None;
        self.recipient = RecipientResolution::default();
        self.use_default_image = true;
        self.custom_text = self.defaults.custom_text.clone();
        self.event_name = self.defaults.event_name.clone();
    }
}

impl Default for MintSession {
    fn default() -> Self {
        Self::new(SessionDefaults::default())
    }
}
