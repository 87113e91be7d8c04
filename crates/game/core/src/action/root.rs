//! Commitment over an action journal.

use super::Action;

/// SHA-256 over the bincode encoding of each action, in order.
///
/// Two journals share a root only if they contain the same actions in the same
/// order, so a stored root identifies the journal a replay must reproduce.
#[cfg(feature = "serde")]
pub fn compute_actions_root(actions: &[Action]) -> [u8; 32] {
    use sha2::{Digest, Sha256};

    let mut hasher = Sha256::new();
    for action in actions {
        if let Ok(action_bytes) = bincode::serialize(action) {
            hasher.update(&action_bytes);
        }
    }
    hasher.finalize().into()
}

#[cfg(all(test, feature = "serde"))]
mod tests {
    use super::*;
    use crate::state::CombatantId;

    #[test]
    fn order_changes_the_root() {
        let a = Action::defend(CombatantId(1));
        let b = Action::flee(CombatantId(2));
        assert_eq!(compute_actions_root(&[a, b]), compute_actions_root(&[a, b]));
        assert_ne!(compute_actions_root(&[a, b]), compute_actions_root(&[b, a]));
        assert_eq!(
            hex::encode(compute_actions_root(&[])),
            "e3b0c44298fc1c149afbf4c8996fb92427ae41e4649b934ca495991b7852b855"
        );
    }
}
