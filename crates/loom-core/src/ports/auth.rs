//! Authentication collaborator interface.

pub trait AuthProvider: Send + Sync {
    fn is_signed_in(&self) -> bool;

    /// Stable identifier of the signed-in user.
    fn user_id(&self) -> Option<String>;
}
