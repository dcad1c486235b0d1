//! Resolution and mint submission integration tests.
//!
//! Timing-sensitive cases run on a paused clock so the debounce quiet
//! period and in-flight latencies are deterministic.

mod common;

use std::sync::Arc;
use std::time::Duration;

use snapmint::domain::{CompressionResult, ResolutionStatus, UploadRecord};
use snapmint::infra::MinterError;
use snapmint::mint::MintSubmitter;
use snapmint::resolve::ResolverSession;
use snapmint::session::MintSession;

use common::*;

const QUIET: Duration = Duration::from_millis(500);

fn photo() -> CompressionResult {
    CompressionResult {
        bytes: uniform_jpeg(64, 64),
        mime_type: "image/jpeg",
        width: 64,
        height: 64,
        quality: 90,
        attempts: 1,
    }
}

// ---------------------------------------------------------------------------
// Name resolution
// ---------------------------------------------------------------------------

#[tokio::test]
async fn test_literal_address_resolves_with_zero_lookups() {
    let resolver = Arc::new(FakeResolver::new(&[]));
    let session = ResolverSession::with_quiet_period(resolver.clone(), QUIET);

    let handle = session.edit("0xF993f484225900D2Be4F7253Cfd4Ab14fC9f4621");
    assert!(handle.is_none());

    let snapshot = session.snapshot();
    assert_eq!(snapshot.status, ResolutionStatus::Resolved);
    assert_eq!(snapshot.resolved, Some(test_address()));
    assert_eq!(resolver.call_count(), 0);
}

#[tokio::test]
async fn test_invalid_input_rejected_without_dispatch() {
    let resolver = Arc::new(FakeResolver::new(&[]));
    let session = ResolverSession::with_quiet_period(resolver.clone(), QUIET);

    assert!(session.edit("not-an-address").is_none());

    let snapshot = session.snapshot();
    assert_eq!(snapshot.status, ResolutionStatus::Invalid);
    assert_eq!(snapshot.resolved, None);
    assert_eq!(resolver.call_count(), 0);
}

#[tokio::test(start_paused = true)]
async fn test_burst_of_edits_dispatches_exactly_one_lookup() {
    let resolver = Arc::new(FakeResolver::new(&[("alice.eth", test_address())]));
    let session = ResolverSession::with_quiet_period(resolver.clone(), QUIET);

    // Three edits inside one quiet period; only the last settles.
    let h1 = session.edit("a.eth").unwrap();
    let h2 = session.edit("al.eth").unwrap();
    let h3 = session.edit("alice.eth").unwrap();
    assert_eq!(session.snapshot().status, ResolutionStatus::Resolving);

    h1.await.unwrap();
    h2.await.unwrap();
    h3.await.unwrap();

    assert_eq!(resolver.call_count(), 1);
    let snapshot = session.snapshot();
    assert_eq!(snapshot.status, ResolutionStatus::Resolved);
    assert_eq!(snapshot.resolved, Some(test_address()));
    assert_eq!(snapshot.input, "alice.eth");
}

#[tokio::test(start_paused = true)]
async fn test_stale_in_flight_result_is_dropped() {
    let resolver = Arc::new(
        FakeResolver::new(&[("old.eth", other_address()), ("new.eth", test_address())])
            .with_delay(Duration::from_millis(200)),
    );
    let session = ResolverSession::with_quiet_period(resolver.clone(), QUIET);

    let h1 = session.edit("old.eth").unwrap();
    // Let the first lookup pass its quiet period and go in flight.
    tokio::time::sleep(Duration::from_millis(510)).await;
    let h2 = session.edit("new.eth").unwrap();

    h1.await.unwrap();
    h2.await.unwrap();

    // Both lookups ran, but only the newer result survives.
    assert_eq!(resolver.call_count(), 2);
    let snapshot = session.snapshot();
    assert_eq!(snapshot.status, ResolutionStatus::Resolved);
    assert_eq!(snapshot.resolved, Some(test_address()));
}

#[tokio::test(start_paused = true)]
async fn test_unknown_name_ends_not_found() {
    let resolver = Arc::new(FakeResolver::new(&[]));
    let session = ResolverSession::with_quiet_period(resolver.clone(), QUIET);

    session.edit("bob.xyz").unwrap().await.unwrap();

    let snapshot = session.snapshot();
    assert_eq!(snapshot.status, ResolutionStatus::NotFound);
    assert_eq!(snapshot.resolved, None);
    assert_eq!(resolver.call_count(), 1);
}

// ---------------------------------------------------------------------------
// Mint submission
// ---------------------------------------------------------------------------

#[tokio::test(start_paused = true)]
async fn test_unresolved_recipient_blocks_dispatch() {
    let resolver = Arc::new(FakeResolver::new(&[]));
    let resolution = ResolverSession::with_quiet_period(resolver, QUIET);
    resolution.edit("bob.xyz").unwrap().await.unwrap();

    let mut session = MintSession::default();
    session.set_resolution(resolution.snapshot());

    let gateway = Arc::new(FakeGateway::authorized());
    let submitter = MintSubmitter::new(gateway.clone());

    let err = submitter.submit(&mut session, test_address()).await.unwrap_err();
    assert!(matches!(err, MinterError::RecipientNotResolved));
    assert_eq!(gateway.dispatch_count(), 0);
}

#[tokio::test]
async fn test_custom_image_without_upload_blocks_dispatch() {
    let mut session = MintSession::default();
    session.set_resolution(snapmint::domain::RecipientResolution {
        input: test_address().to_string(),
        resolved: Some(test_address()),
        status: ResolutionStatus::Resolved,
    });
    let generation = session.begin_generation();
    session.attach_photo(generation, photo());

    let gateway = Arc::new(FakeGateway::authorized());
    let submitter = MintSubmitter::new(gateway.clone());

    let err = submitter.submit(&mut session, test_address()).await.unwrap_err();
    assert!(matches!(err, MinterError::UploadIncomplete));
    assert_eq!(gateway.dispatch_count(), 0);
}

#[tokio::test]
async fn test_default_image_mints_with_empty_content_url() {
    let mut session = MintSession::default();
    session.set_resolution(snapmint::domain::RecipientResolution {
        input: test_address().to_string(),
        resolved: Some(test_address()),
        status: ResolutionStatus::Resolved,
    });
    assert!(session.use_default_image);

    let gateway = Arc::new(FakeGateway::authorized());
    let submitter = MintSubmitter::new(gateway.clone());

    let receipt = submitter.submit(&mut session, test_address()).await.unwrap();
    assert_eq!(gateway.dispatch_count(), 1);
    assert_eq!(receipt.block_number, Some(123));
}

#[tokio::test]
async fn test_unauthorized_caller_blocks_dispatch() {
    let mut session = MintSession::default();
    session.set_resolution(snapmint::domain::RecipientResolution {
        input: test_address().to_string(),
        resolved: Some(test_address()),
        status: ResolutionStatus::Resolved,
    });

    let gateway = Arc::new(FakeGateway::unauthorized());
    let submitter = MintSubmitter::new(gateway.clone());

    let err = submitter.submit(&mut session, other_address()).await.unwrap_err();
    assert!(matches!(err, MinterError::NotTeamMinter(_)));
    assert_eq!(gateway.dispatch_count(), 0);
}

#[tokio::test]
async fn test_dispatch_rejection_surfaces_without_retry() {
    let mut session = MintSession::default();
    session.set_resolution(snapmint::domain::RecipientResolution {
        input: test_address().to_string(),
        resolved: Some(test_address()),
        status: ResolutionStatus::Resolved,
    });

    let gateway = Arc::new(FakeGateway {
        fail_dispatch: true,
        ..FakeGateway::authorized()
    });
    let submitter = MintSubmitter::new(gateway.clone());

    let err = submitter.submit(&mut session, test_address()).await.unwrap_err();
    assert!(matches!(err, MinterError::Dispatch(_)));
    assert_eq!(gateway.dispatch_count(), 1);
    // Session state survives for a manual resubmission.
    assert!(session.resolution().is_resolved());
}

#[tokio::test]
async fn test_inclusion_failure_surfaces_without_retry() {
    let mut session = MintSession::default();
    session.set_resolution(snapmint::domain::RecipientResolution {
        input: test_address().to_string(),
        resolved: Some(test_address()),
        status: ResolutionStatus::Resolved,
    });

    let gateway = Arc::new(FakeGateway {
        fail_confirm: true,
        ..FakeGateway::authorized()
    });
    let submitter = MintSubmitter::new(gateway.clone());

    let err = submitter.submit(&mut session, test_address()).await.unwrap_err();
    assert!(matches!(err, MinterError::Inclusion(_)));
    assert_eq!(gateway.dispatch_count(), 1);
}

#[tokio::test]
async fn test_confirmed_mint_resets_session_but_keeps_templates() {
    let mut session = MintSession::default();
    session.set_resolution(snapmint::domain::RecipientResolution {
        input: "alice.eth".to_string(),
        resolved: Some(test_address()),
        status: ResolutionStatus::Resolved,
    });
    let generation = session.begin_generation();
    session.attach_photo(generation, photo());
    session.record_upload(
        generation,
        UploadRecord::new("QmHash", "gateway.test", 10, "2026-08-06"),
    );
    session.custom_text = "So glad we met!".to_string();
    session.event_name = "ETH Denver 2026".to_string();

    let gateway = Arc::new(FakeGateway::authorized());
    let submitter = MintSubmitter::new(gateway.clone());

    submitter.submit(&mut session, test_address()).await.unwrap();

    assert!(session.photo().is_none());
    assert!(session.upload().is_none());
    assert!(session.use_default_image);
    assert_eq!(session.resolution().status, ResolutionStatus::Unresolved);
    // Templates come back, not blanks.
    assert_eq!(session.custom_text, "Great connecting at the event!");
    assert_eq!(session.event_name, "Networking Event");
}

// ---------------------------------------------------------------------------
// End-to-end: compress, upload, resolve, mint
// ---------------------------------------------------------------------------

#[tokio::test(start_paused = true)]
async fn test_full_pipeline_with_custom_image() {
    use snapmint::domain::ImageAsset;
    use snapmint::infra::{normalize_receipt, PinPayload, PinningClient};
    use snapmint::media::{compress, CompressorConfig};

    // Compress a large capture.
    let asset = ImageAsset::from_encoded(uniform_jpeg(3000, 4000), "image/jpeg").unwrap();
    let compressed = compress(&asset, &CompressorConfig::default()).unwrap();
    assert!(compressed.size() <= 700 * 1024);

    // Pin it and record the upload.
    let pinning = FakePinningClient::new(FakePinOutcome::Success);
    let receipt = pinning
        .pin_image(PinPayload {
            bytes: compressed.bytes.clone(),
            file_name: "photo.jpg".to_string(),
            mime_type: compressed.mime_type.to_string(),
        })
        .await
        .unwrap();
    let record = normalize_receipt(&receipt, "gateway.test");

    let mut session = MintSession::default();
    let generation = session.begin_generation();
    session.attach_photo(generation, compressed);
    session.record_upload(generation, record);

    // Resolve the recipient name.
    let resolver = Arc::new(FakeResolver::new(&[("alice.eth", test_address())]));
    let resolution = ResolverSession::with_quiet_period(resolver, QUIET);
    resolution.edit("alice.eth").unwrap().await.unwrap();
    session.set_resolution(resolution.snapshot());

    // Mint.
    let gateway = Arc::new(FakeGateway::authorized());
    let submitter = MintSubmitter::new(gateway.clone());
    let receipt = submitter.submit(&mut session, test_address()).await.unwrap();

    assert_eq!(gateway.dispatch_count(), 1);
    assert_eq!(receipt.block_number, Some(123));
}
