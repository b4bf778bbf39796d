//! The request user model.
//!
//! The toolkit does not own authentication; the host resolves the caller
//! and hands a [`RequestUser`] snapshot to the autocomplete view. The
//! snapshot carries just enough for authorization: identity, active and
//! superuser flags, and the set of permission codenames.
//!
//! Permission codenames follow the `"app.codename"` convention (e.g.
//! `"library.view_book"`).

use std::collections::HashSet;

use serde::{Deserialize, Serialize};

/// A snapshot of the requesting user, as resolved by the host application.
///
/// # Examples
///
/// ```
/// use tomselect_rs_auth::user::RequestUser;
///
/// let user = RequestUser::new(7, "alice").with_permissions(["library.view_book"]);
/// assert!(user.has_perm("library.view_book"));
/// assert!(!user.has_perm("library.add_book"));
///
/// let guest = RequestUser::anonymous();
/// assert!(!guest.is_authenticated);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RequestUser {
    /// The user's identity, or `None` for anonymous callers.
    pub id: Option<i64>,
    /// The username, empty for anonymous callers.
    pub username: String,
    /// Inactive accounts hold no permissions.
    pub is_active: bool,
    /// Whether the host authenticated this caller.
    pub is_authenticated: bool,
    /// Superusers hold every permission.
    pub is_superuser: bool,
    /// Permission codenames granted to this user.
    pub permissions: HashSet<String>,
}

impl RequestUser {
    /// Creates an authenticated, active user with no permissions.
    pub fn new(id: i64, username: impl Into<String>) -> Self {
        Self {
            id: Some(id),
            username: username.into(),
            is_active: true,
            is_authenticated: true,
            is_superuser: false,
            permissions: HashSet::new(),
        }
    }

    /// Creates the anonymous user.
    pub fn anonymous() -> Self {
        Self {
            id: None,
            username: String::new(),
            is_active: true,
            is_authenticated: false,
            is_superuser: false,
            permissions: HashSet::new(),
        }
    }

    /// Grants permission codenames, returning the user for chaining.
    #[must_use]
    pub fn with_permissions<I, S>(mut self, perms: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.permissions.extend(perms.into_iter().map(Into::into));
        self
    }

    /// Marks this user as a superuser.
    #[must_use]
    pub const fn as_superuser(mut self) -> Self {
        self.is_superuser = true;
        self
    }

    /// Checks a single permission codename.
    ///
    /// Inactive users hold no permissions; superusers hold all of them.
    pub fn has_perm(&self, perm: &str) -> bool {
        if !self.is_active {
            return false;
        }
        if self.is_superuser {
            return true;
        }
        self.permissions.contains(perm)
    }

    /// Checks that the user holds every permission in the slice.
    pub fn has_perms<S: AsRef<str>>(&self, perms: &[S]) -> bool {
        perms.iter().all(|p| self.has_perm(p.as_ref()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_user_defaults() {
        let user = RequestUser::new(1, "alice");
        assert_eq!(user.id, Some(1));
        assert!(user.is_active);
        assert!(user.is_authenticated);
        assert!(!user.is_superuser);
        assert!(user.permissions.is_empty());
    }

    #[test]
    fn test_anonymous() {
        let guest = RequestUser::anonymous();
        assert_eq!(guest.id, None);
        assert!(!guest.is_authenticated);
        assert!(guest.is_active);
    }

    #[test]
    fn test_has_perm_direct() {
        let user = RequestUser::new(1, "alice").with_permissions(["library.view_book"]);
        assert!(user.has_perm("library.view_book"));
        assert!(!user.has_perm("library.delete_book"));
    }

    #[test]
    fn test_has_perm_superuser() {
        let user = RequestUser::new(1, "root").as_superuser();
        assert!(user.has_perm("anything.at_all"));
    }

    #[test]
    fn test_has_perm_inactive() {
        let mut user = RequestUser::new(1, "alice")
            .as_superuser()
            .with_permissions(["library.view_book"]);
        user.is_active = false;
        assert!(!user.has_perm("library.view_book"));
    }

    #[test]
    fn test_has_perms_all_required() {
        let user =
            RequestUser::new(1, "alice").with_permissions(["library.view_book", "library.add_book"]);
        assert!(user.has_perms(&["library.view_book", "library.add_book"]));
        assert!(!user.has_perms(&["library.view_book", "library.delete_book"]));
        assert!(user.has_perms::<&str>(&[]));
    }
}
