//! Atomic publication of cache generations.
//!
//! # Refresh
//!
//! ```text
//!            resolve()          from_grants()           store()
//! resolver ───────────▶ grants ──────────────▶ new cache ───────▶ current
//!                                                                   │
//! readers ◀──────────────────── snapshot() (lock-free) ─────────────┘
//! ```
//!
//! The new generation is built entirely off the hot path and published by a
//! single pointer swap. A reader holding a snapshot keeps seeing the old
//! generation until it drops it; it is never blocked or torn by a refresh.

use crate::{CacheError, PermissionCache, PermissionResolver};
use arc_swap::ArcSwap;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use tracing::{info, warn};

/// Outcome of a successful [`SharedCache::refresh`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RefreshStats {
    /// Generation number now installed.
    pub generation: u64,
    /// Users in the new generation.
    pub users: usize,
    /// Permission entries in the new generation.
    pub entries: usize,
}

/// Shared, atomically replaceable handle to the current [`PermissionCache`].
///
/// Cloning the handle is cheap; all clones observe the same publications.
///
/// # Example
///
/// ```
/// use rbac_cache::{Grant, PermissionCache, SharedCache, StaticResolver};
/// use rbac_model::{Action, Permission, Scope};
///
/// let shared = SharedCache::new(PermissionCache::new());
/// let before = shared.snapshot();
///
/// let resolver = StaticResolver::new(vec![Grant::global("admin", Permission::admin())]);
/// shared.refresh(&resolver).unwrap();
///
/// // The old snapshot is unchanged; new snapshots see the refresh.
/// assert!(!before.has_permission("admin", Action::Read, "p", Scope::Dashboard));
/// assert!(shared.snapshot().has_permission("admin", Action::Read, "p", Scope::Dashboard));
/// ```
#[derive(Debug, Clone)]
pub struct SharedCache {
    current: Arc<ArcSwap<PermissionCache>>,
    generation: Arc<AtomicU64>,
}

impl SharedCache {
    /// Publishes `cache` as generation 0.
    #[must_use]
    pub fn new(cache: PermissionCache) -> Self {
        Self {
            current: Arc::new(ArcSwap::from_pointee(cache)),
            generation: Arc::new(AtomicU64::new(0)),
        }
    }

    /// Returns the currently published generation.
    ///
    /// Lock-free. The returned snapshot stays valid and unchanged for as
    /// long as the caller holds it.
    #[must_use]
    pub fn snapshot(&self) -> Arc<PermissionCache> {
        self.current.load_full()
    }

    /// Replaces the published generation with `cache`.
    ///
    /// Returns the new generation number.
    pub fn publish(&self, cache: PermissionCache) -> u64 {
        let users = cache.user_count();
        let entries = cache.entry_count();
        self.current.store(Arc::new(cache));
        let generation = self.generation.fetch_add(1, Ordering::AcqRel) + 1;
        info!(generation, users, entries, "Published permission cache");
        generation
    }

    /// Rebuilds the cache from `resolver` and publishes it.
    ///
    /// # Errors
    ///
    /// Returns [`CacheError`] if the resolver fails or yields a grant with
    /// an empty identifier. The current generation stays installed.
    pub fn refresh(&self, resolver: &dyn PermissionResolver) -> Result<RefreshStats, CacheError> {
        let cache = match resolver.resolve() {
            Ok(grants) => PermissionCache::from_grants(grants),
            Err(e) => Err(CacheError::from(e)),
        }
        .inspect_err(|e| {
            warn!(
                error = %e,
                generation = self.generation(),
                "Permission refresh failed, keeping current cache"
            );
        })?;

        let users = cache.user_count();
        let entries = cache.entry_count();
        let generation = self.publish(cache);
        Ok(RefreshStats {
            generation,
            users,
            entries,
        })
    }

    /// Number of publications since construction.
    #[must_use]
    pub fn generation(&self) -> u64 {
        self.generation.load(Ordering::Acquire)
    }
}

impl Default for SharedCache {
    fn default() -> Self {
        Self::new(PermissionCache::new())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{Grant, ResolveError, StaticResolver};
    use rbac_model::{Action, Permission, Scope};
    use std::thread;

    struct FailingResolver;

    impl PermissionResolver for FailingResolver {
        fn resolve(&self) -> Result<Vec<Grant>, ResolveError> {
            Err(ResolveError::backend(std::io::Error::new(
                std::io::ErrorKind::ConnectionRefused,
                "role store unavailable",
            )))
        }
    }

    fn admin_resolver() -> StaticResolver {
        StaticResolver::new(vec![Grant::global("admin", Permission::admin())])
    }

    #[test]
    fn starts_at_generation_zero() {
        let shared = SharedCache::default();
        assert_eq!(shared.generation(), 0);
        assert!(shared.snapshot().is_empty());
    }

    #[test]
    fn refresh_publishes_new_generation() {
        let shared = SharedCache::default();
        let stats = shared.refresh(&admin_resolver()).expect("refresh");

        assert_eq!(
            stats,
            RefreshStats {
                generation: 1,
                users: 1,
                entries: 1
            }
        );
        assert_eq!(shared.generation(), 1);
        assert!(shared
            .snapshot()
            .has_permission("admin", Action::Delete, "any", Scope::Secret));
    }

    #[test]
    fn old_snapshot_survives_refresh() {
        let shared = SharedCache::default();
        shared.refresh(&admin_resolver()).expect("first refresh");
        let old = shared.snapshot();

        shared.publish(PermissionCache::new());

        assert!(old.has_permission("admin", Action::Read, "any", Scope::Dashboard));
        assert!(!shared
            .snapshot()
            .has_permission("admin", Action::Read, "any", Scope::Dashboard));
        assert_eq!(shared.generation(), 2);
    }

    #[test]
    fn failed_refresh_keeps_current_generation() {
        let shared = SharedCache::default();
        shared.refresh(&admin_resolver()).expect("first refresh");

        let err = shared.refresh(&FailingResolver).expect_err("backend down");
        assert!(matches!(err, CacheError::Resolve(_)));
        assert_eq!(shared.generation(), 1);
        assert!(shared
            .snapshot()
            .has_permission("admin", Action::Read, "any", Scope::Dashboard));
    }

    #[test]
    fn invalid_grant_does_not_publish() {
        let shared = SharedCache::default();
        let resolver = StaticResolver::new(vec![Grant::new("", "p", Permission::admin())]);

        let err = shared.refresh(&resolver).expect_err("empty user");
        assert!(matches!(err, CacheError::EmptyUser { .. }));
        assert_eq!(shared.generation(), 0);
    }

    #[test]
    fn clones_share_publications() {
        let shared = SharedCache::default();
        let clone = shared.clone();
        shared.refresh(&admin_resolver()).expect("refresh");

        assert_eq!(clone.generation(), 1);
        assert!(clone
            .snapshot()
            .has_permission("admin", Action::Read, "any", Scope::Dashboard));
    }

    #[test]
    fn concurrent_readers_see_consistent_generations() {
        let shared = SharedCache::default();

        let readers: Vec<_> = (0..4)
            .map(|_| {
                let shared = shared.clone();
                thread::spawn(move || {
                    for _ in 0..1_000 {
                        let snapshot = shared.snapshot();
                        // Each generation is either empty or fully populated.
                        let read = snapshot.has_permission("admin", Action::Read, "p", Scope::Role);
                        let delete =
                            snapshot.has_permission("admin", Action::Delete, "p", Scope::Secret);
                        assert_eq!(read, delete);
                    }
                })
            })
            .collect();

        for _ in 0..50 {
            shared.refresh(&admin_resolver()).expect("refresh");
            shared.publish(PermissionCache::new());
        }

        for reader in readers {
            reader.join().expect("reader panicked");
        }
        assert_eq!(shared.generation(), 100);
    }
}
