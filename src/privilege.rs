use caps::{CapSet, Capability};
use nix::unistd::geteuid;

/// What the process could do about a permission-denied auth log.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Privilege {
    pub is_root: bool,
    // CAP_DAC_READ_SEARCH bypasses read permission checks on files
    pub can_read_any: bool,
}

impl Privilege {
    pub fn detect() -> Self {
        let can_read_any = caps::has_cap(None, CapSet::Effective, Capability::CAP_DAC_READ_SEARCH)
            .unwrap_or(false);
        Self {
            is_root: geteuid().is_root(),
            can_read_any,
        }
    }

    pub fn advice(&self) -> &'static str {
        if self.is_root || self.can_read_any {
            "Already privileged; check file ACLs or mandatory access control policy."
        } else {
            "Please run as root / with sudo."
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unprivileged_gets_sudo_hint() {
        assert_eq!(Privilege::default().advice(), "Please run as root / with sudo.");
    }

    #[test]
    fn capability_counts_as_privileged() {
        let p = Privilege {
            is_root: false,
            can_read_any: true,
        };
        assert!(p.advice().starts_with("Already privileged"));
    }

    #[test]
    fn detect_matches_effective_uid() {
        assert_eq!(Privilege::detect().is_root, geteuid().is_root());
    }
}
