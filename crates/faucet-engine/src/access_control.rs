//! Access control registry: role membership and admin relationships.
//!
//! Roles are plain identifiers mapped to member sets, with a fixed admin
//! table. Gated operations call [`RoleRegistry::check_role`] first thing.
//! Any role missing from the admin table is administered by the owner role.

use std::collections::{BTreeMap, BTreeSet};

use faucet_types::{Address, FaucetError, Result, RoleId};
use serde::{Deserialize, Serialize};

/// Role membership plus the role → admin-role table.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RoleRegistry {
    /// Members of each role. Empty sets are pruned.
    members: BTreeMap<RoleId, BTreeSet<Address>>,
    /// Explicit admin of each role.
    admins: BTreeMap<RoleId, RoleId>,
}

impl RoleRegistry {
    /// Create an empty registry (no members, no explicit admins).
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Whether `account` is a member of `role`.
    #[must_use]
    pub fn has_role(&self, role: RoleId, account: Address) -> bool {
        self.members
            .get(&role)
            .is_some_and(|set| set.contains(&account))
    }

    /// Guard: `Ok(())` if `account` holds `role`, else
    /// [`FaucetError::Unauthorized`] naming the missing role.
    pub fn check_role(&self, role: RoleId, account: Address) -> Result<()> {
        if self.has_role(role, account) {
            Ok(())
        } else {
            Err(FaucetError::Unauthorized { account, role })
        }
    }

    /// The role whose members may grant and revoke `role`.
    #[must_use]
    pub fn role_admin(&self, role: RoleId) -> RoleId {
        self.admins.get(&role).copied().unwrap_or_else(RoleId::owner)
    }

    /// Members of `role`, in address order.
    #[must_use]
    pub fn members(&self, role: RoleId) -> Vec<Address> {
        self.members
            .get(&role)
            .map(|set| set.iter().copied().collect())
            .unwrap_or_default()
    }

    /// Grant `role` to `account`. The caller must hold the role's admin.
    ///
    /// Returns `true` if the account was newly added, `false` if it was
    /// already a member (not an error).
    pub fn grant_role(&mut self, caller: Address, role: RoleId, account: Address) -> Result<bool> {
        self.check_role(self.role_admin(role), caller)?;
        let added = self.insert_member(role, account);
        if added {
            tracing::info!(role = %role.short(), %account, %caller, "role granted");
        }
        Ok(added)
    }

    /// Revoke `role` from `account`. The caller must hold the role's admin.
    ///
    /// Returns `true` if the account was removed, `false` if it was not a member.
    pub fn revoke_role(&mut self, caller: Address, role: RoleId, account: Address) -> Result<bool> {
        self.check_role(self.role_admin(role), caller)?;
        let removed = self.remove_member(role, account);
        if removed {
            tracing::info!(role = %role.short(), %account, %caller, "role revoked");
        }
        Ok(removed)
    }

    /// Give up `role`. Only the account itself may renounce.
    pub fn renounce_role(&mut self, caller: Address, role: RoleId, account: Address) -> Result<bool> {
        if caller != account {
            return Err(FaucetError::Unauthorized {
                account: caller,
                role,
            });
        }
        let removed = self.remove_member(role, account);
        if removed {
            tracing::info!(role = %role.short(), %account, "role renounced");
        }
        Ok(removed)
    }

    /// Ungated membership insert, used once at initialization.
    pub(crate) fn insert_member(&mut self, role: RoleId, account: Address) -> bool {
        self.members.entry(role).or_default().insert(account)
    }

    /// Ungated admin wiring, used once at initialization.
    pub(crate) fn set_role_admin(&mut self, role: RoleId, admin: RoleId) {
        self.admins.insert(role, admin);
    }

    fn remove_member(&mut self, role: RoleId, account: Address) -> bool {
        let Some(set) = self.members.get_mut(&role) else {
            return false;
        };
        let removed = set.remove(&account);
        if set.is_empty() {
            self.members.remove(&role);
        }
        removed
    }
}
