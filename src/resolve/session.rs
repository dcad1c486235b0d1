//! Debounced, version-tagged resolution session
//!
//! Every edit bumps a monotonic version. A name lookup task sleeps for
//! the quiet period and dispatches only if its version is still current
//! when it wakes, so a burst of edits produces exactly one upstream
//! call. The same check runs again when the result arrives: a lookup
//! that was in flight when the input changed is dropped on arrival
//! rather than cancelled. Last write wins by sequencing, not by
//! completion order.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use tokio::task::JoinHandle;

use crate::domain::{RecipientResolution, ResolutionStatus};
use crate::resolve::{classify_recipient, AddressResolver, RecipientKind};

/// Quiet period before a name lookup is dispatched.
pub const DEFAULT_QUIET_PERIOD: Duration = Duration::from_millis(500);

/// Tracks one recipient input field across edits.
pub struct ResolverSession<R: AddressResolver> {
    resolver: Arc<R>,
    quiet_period: Duration,
    version: Arc<AtomicU64>,
    state: Arc<Mutex<RecipientResolution>>,
}

impl<R: AddressResolver> ResolverSession<R> {
    pub fn new(resolver: Arc<R>) -> Self {
        Self::with_quiet_period(resolver, DEFAULT_QUIET_PERIOD)
    }

    pub fn with_quiet_period(resolver: Arc<R>, quiet_period: Duration) -> Self {
        Self {
            resolver,
            quiet_period,
            version: Arc::new(AtomicU64::new(0)),
            state: Arc::new(Mutex::new(RecipientResolution::default())),
        }
    }

    /// Record an edit to the recipient input.
    ///
    /// Addresses, invalid strings and blank input settle synchronously
    /// and return `None`. A name schedules a debounced lookup and
    /// returns its task handle; awaiting it is only needed by callers
    /// that want to observe completion.
    pub fn edit(&self, input: &str) -> Option<JoinHandle<()>> {
        let version = self.version.fetch_add(1, Ordering::SeqCst) + 1;
        let trimmed = input.trim();

        if trimmed.is_empty() {
            self.apply(version, |st| {
                st.input.clear();
                st.resolved = None;
                st.status = ResolutionStatus::Unresolved;
            });
            return None;
        }

        match classify_recipient(trimmed) {
            RecipientKind::Address(address) => {
                self.apply(version, |st| {
                    st.input = trimmed.to_string();
                    st.resolved = Some(address);
                    st.status = ResolutionStatus::Resolved;
                });
                None
            }
            RecipientKind::Invalid => {
                self.apply(version, |st| {
                    st.input = trimmed.to_string();
                    st.resolved = None;
                    st.status = ResolutionStatus::Invalid;
                });
                None
            }
            RecipientKind::Name(name) => {
                self.apply(version, |st| {
                    st.input = name.clone();
                    st.resolved = None;
                    st.status = ResolutionStatus::Resolving;
                });

                let resolver = self.resolver.clone();
                let current = self.version.clone();
                let state = self.state.clone();
                let quiet = self.quiet_period;
                Some(tokio::spawn(async move {
                    tokio::time::sleep(quiet).await;
                    // Superseded during the quiet period: do not dispatch.
                    if current.load(Ordering::SeqCst) != version {
                        return;
                    }

                    let outcome = resolver.resolve_name(&name).await;

                    let mut st = state.lock().expect("resolution state poisoned");
                    // Superseded while in flight: drop the result.
                    if current.load(Ordering::SeqCst) != version {
                        return;
                    }
                    match outcome {
                        Ok(Some(address)) => {
                            st.resolved = Some(address);
                            st.status = ResolutionStatus::Resolved;
                        }
                        Ok(None) | Err(_) => {
                            st.resolved = None;
                            st.status = ResolutionStatus::NotFound;
                        }
                    }
                }))
            }
        }
    }

    /// Current resolution state.
    pub fn snapshot(&self) -> RecipientResolution {
        self.state.lock().expect("resolution state poisoned").clone()
    }

    fn apply(&self, version: u64, f: impl FnOnce(&mut RecipientResolution)) {
        let mut st = self.state.lock().expect("resolution state poisoned");
        if self.version.load(Ordering::SeqCst) == version {
            f(&mut st);
        }
    }
}
