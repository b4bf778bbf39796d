//! The permission cache.
//!
//! Evaluating a view's permission policy is cheap here but may be backed by
//! an expensive host check, so results are memoized per
//! `(user, view, action)` key until explicitly invalidated. The cache is an
//! explicit service object: construct one at startup, wrap it in an `Arc`,
//! and hand the handle to every autocomplete view. There is no ambient
//! singleton.
//!
//! Invalidation is synchronous: once [`PermissionCache::invalidate_user`]
//! or [`PermissionCache::invalidate_all`] returns, no subsequent check can
//! observe a pre-invalidation value. There is no time-based expiry; hosts
//! that change a user's grants call `invalidate_user`.
//!
//! # Examples
//!
//! ```
//! use tomselect_rs_auth::cache::{PermissionCache, PermissionPolicy};
//! use tomselect_rs_auth::user::RequestUser;
//!
//! let cache = PermissionCache::new();
//! let policy = PermissionPolicy::require(["library.view_book"]);
//!
//! let alice = RequestUser::new(1, "alice").with_permissions(["library.view_book"]);
//! assert!(cache.check(&alice, "autocomplete-book", "view", &policy));
//!
//! cache.invalidate_user(1);
//! assert!(cache.check(&alice, "autocomplete-book", "view", &policy));
//! ```

use std::collections::HashMap;
use std::sync::Mutex;

use tracing::debug;

use crate::user::RequestUser;

/// How a view decides whether a caller may use it.
///
/// Evaluated in priority order: `skip_authorization` short-circuits to
/// allow; `allow_anonymous` short-circuits to allow for unauthenticated
/// callers; otherwise the required permission set is tested against the
/// user.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct PermissionPolicy {
    /// Bypass authorization entirely.
    pub skip_authorization: bool,
    /// Let unauthenticated callers through.
    pub allow_anonymous: bool,
    /// Permission codenames an authenticated caller must hold, all of them.
    pub required_permissions: Vec<String>,
}

impl PermissionPolicy {
    /// A policy requiring the given permissions of authenticated callers.
    pub fn require<I, S>(perms: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            skip_authorization: false,
            allow_anonymous: false,
            required_permissions: perms.into_iter().map(Into::into).collect(),
        }
    }

    /// A policy that bypasses authorization.
    pub const fn skip() -> Self {
        Self {
            skip_authorization: true,
            allow_anonymous: false,
            required_permissions: Vec::new(),
        }
    }

    /// A policy that admits anonymous callers.
    pub const fn anonymous() -> Self {
        Self {
            skip_authorization: false,
            allow_anonymous: true,
            required_permissions: Vec::new(),
        }
    }

    /// Evaluates the policy against a user, uncached.
    pub fn decide(&self, user: &RequestUser) -> bool {
        if self.skip_authorization {
            return true;
        }
        if !user.is_authenticated {
            return self.allow_anonymous;
        }
        user.has_perms(&self.required_permissions)
    }
}

type CacheKey = (i64, String, String);

/// Memoizes permission decisions per `(user, view, action)` key.
///
/// Anonymous callers have no identity to key on; their decisions are
/// evaluated fresh on every check and never stored. Safe for concurrent
/// checks and invalidations from multiple worker threads.
#[derive(Debug, Default)]
pub struct PermissionCache {
    enabled: bool,
    entries: Mutex<HashMap<CacheKey, bool>>,
}

impl PermissionCache {
    /// Creates an enabled cache.
    pub fn new() -> Self {
        Self {
            enabled: true,
            entries: Mutex::new(HashMap::new()),
        }
    }

    /// Creates a disabled cache: every check evaluates the policy fresh.
    pub fn disabled() -> Self {
        Self {
            enabled: false,
            entries: Mutex::new(HashMap::new()),
        }
    }

    /// Checks whether `user` may perform `action` on `view_id`.
    ///
    /// The first check for a key evaluates `policy` and stores the result;
    /// later checks return the stored value until invalidated.
    pub fn check(
        &self,
        user: &RequestUser,
        view_id: &str,
        action: &str,
        policy: &PermissionPolicy,
    ) -> bool {
        let Some(user_id) = user.id else {
            return policy.decide(user);
        };
        if !self.enabled {
            return policy.decide(user);
        }

        let key = (user_id, view_id.to_string(), action.to_string());
        let mut entries = self.entries.lock().expect("permission cache lock poisoned");
        if let Some(&allowed) = entries.get(&key) {
            return allowed;
        }
        let allowed = policy.decide(user);
        if !allowed {
            debug!(user = user_id, view = view_id, action, "permission denied");
        }
        entries.insert(key, allowed);
        allowed
    }

    /// Removes every cached entry for the given user.
    pub fn invalidate_user(&self, user_id: i64) {
        self.entries
            .lock()
            .expect("permission cache lock poisoned")
            .retain(|(id, _, _), _| *id != user_id);
    }

    /// Removes every cached entry.
    pub fn invalidate_all(&self) {
        self.entries
            .lock()
            .expect("permission cache lock poisoned")
            .clear();
    }

    /// Returns the number of cached entries.
    pub fn len(&self) -> usize {
        self.entries
            .lock()
            .expect("permission cache lock poisoned")
            .len()
    }

    /// Returns `true` if no entries are cached.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
