use crate::Role;

/// Live capability lookup for an authenticated identity.
///
/// Role guards resolve the caller's **current** role through this seam
/// instead of trusting the role claim baked into the session token: a user
/// promoted or demoted after login is authorized against directory state,
/// not against what the token says.
pub trait CapabilityResolver: Send + Sync {
    /// Current role for `email`, or `None` when the user is unknown or has
    /// no role assigned yet.
    fn resolve(&self, email: &str) -> Option<Role>;
}
