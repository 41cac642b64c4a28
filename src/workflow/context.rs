//! Values produced by one step and consumed by later ones.

use rand::Rng;

const USERNAME_ALPHABET: &[u8] = b"abcdefghijklmnopqrstuvwxyz0123456789";
const USERNAME_SUFFIX_LEN: usize = 6;

/// Identifiers threaded through a run.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct WorkflowContext {
    /// Username created by Add User.
    pub created_user: Option<String>,
    /// Username after Edit User. Equals the created one when editing failed.
    pub renamed_user: Option<String>,
}

impl WorkflowContext {
    /// The username later steps should look for.
    pub fn current_user(&self) -> Option<&str> {
        self.renamed_user
            .as_deref()
            .or(self.created_user.as_deref())
    }
}

/// `prefix` followed by six random lowercase letters or digits.
pub fn generate_username<R: Rng + ?Sized>(prefix: &str, rng: &mut R) -> String {
    let suffix: String = (0..USERNAME_SUFFIX_LEN)
        .map(|_| USERNAME_ALPHABET[rng.gen_range(0..USERNAME_ALPHABET.len())] as char)
        .collect();
    format!("{}{}", prefix, suffix)
}

/// Username after the edit step.
pub fn edited_username(prefix: &str, original: &str) -> String {
    format!("{}{}", prefix, original)
}
