//! Permission engine - pure decision functions over actor and owner roles
//!
//! The deletion rule forms a strict hierarchy: admin > moderator > plain user.
//! Same-tier peers cannot delete each other's content; only the exact owner
//! can. The same function gates article and comment deletion.

use crate::entities::User;

/// Whether `acting_user` may delete content owned by `resource_owner`.
///
/// - The owner always may.
/// - Admin-owned content is deletable only by the owner themself.
/// - Moderator-owned content is deletable by admins.
/// - Plain-owned content is deletable by admins and moderators.
pub fn can_delete(resource_owner: &User, acting_user: &User) -> bool {
    if acting_user.id == resource_owner.id {
        return true;
    }
    if resource_owner.is_admin {
        return false;
    }
    if resource_owner.is_moderator {
        return acting_user.is_admin;
    }
    acting_user.has_moderator_rights()
}

/// Whether `acting_user` may promote or demote `target` through the moderator
/// role. Requires an admin actor, and admins themselves cannot be re-assigned
/// through this path.
///
/// Admin rights are deliberately not gated here: granting and revoking them is
/// an operator action reachable only through the offline `blog-admin` channel.
pub fn can_assign_moderator(target: &User, acting_user: &User) -> bool {
    acting_user.is_admin && !target.is_admin
}
