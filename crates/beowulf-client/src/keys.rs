//! Signing-key configuration and the role registry.
//!
//! Every submittable operation kind currently requires the `owner` role.
//! Virtual kinds are produced by the chain and need no client signature.

use crate::ClientError;
use beowulf_types::{OpKind, Operation};

/// A signing role an account key can hold.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Role {
    Owner,
}

impl Role {
    pub fn name(&self) -> &'static str {
        match self {
            Role::Owner => "owner",
        }
    }
}

/// WIF private keys configured for signing, grouped by role.
#[derive(Debug, Clone, Default)]
pub struct Keys {
    pub owner: Vec<String>,
}

impl Keys {
    /// A key set holding a single owner key.
    pub fn owner_key(wif: impl Into<String>) -> Self {
        Self {
            owner: vec![wif.into()],
        }
    }

    pub fn for_role(&self, role: Role) -> &[String] {
        match role {
            Role::Owner => &self.owner,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.owner.is_empty()
    }
}

/// Roles whose keys must sign an operation of the given kind.
pub fn required_roles(kind: OpKind) -> &'static [Role] {
    if kind.is_virtual() {
        &[]
    } else {
        &[Role::Owner]
    }
}

/// Union of required roles across every operation in a transaction.
///
/// Stricter than the dispatch rule, which keys off the first operation
/// only; callers mixing kinds can use this to collect the full role set.
pub fn roles_for_all(ops: &[Operation]) -> Result<Vec<Role>, ClientError> {
    let mut roles = Vec::new();
    for op in ops {
        let kind = op
            .kind()
            .ok_or_else(|| ClientError::UnknownOperation(op.code()))?;
        for role in required_roles(kind) {
            if !roles.contains(role) {
                roles.push(*role);
            }
        }
    }
    Ok(roles)
}
