//! Role-scoped visibility over the demand pipeline

use core_kernel::{ProfileId, Role};

use crate::demand::DemandStatus;
use crate::ports::DemandQuery;

/// What a caller is allowed to see of the pipeline
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DemandScope {
    /// A member sees the demands they submitted
    Own(ProfileId),
    /// A controller sees every demand
    FullPipeline,
    /// An administrator sees the accepted queue awaiting final decision
    AwaitingValidation,
    /// Nothing - a member scope without an identified user
    Hidden,
}

impl DemandScope {
    /// Derives the scope for a role
    ///
    /// A member without a user id resolves to `Hidden` rather than leaking
    /// the full pipeline.
    pub fn for_role(role: Role, user_id: Option<ProfileId>) -> Self {
        match role {
            Role::Member => match user_id {
                Some(id) => DemandScope::Own(id),
                None => DemandScope::Hidden,
            },
            Role::Controller => DemandScope::FullPipeline,
            Role::Administrator => DemandScope::AwaitingValidation,
        }
    }

    /// The query this scope translates to; `None` means an empty result
    pub fn to_query(self) -> Option<DemandQuery> {
        match self {
            DemandScope::Own(member_id) => Some(DemandQuery::by_member(member_id)),
            DemandScope::FullPipeline => Some(DemandQuery::all()),
            DemandScope::AwaitingValidation => {
                Some(DemandQuery::by_status(DemandStatus::Accepted))
            }
            DemandScope::Hidden => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_member_scope_is_own_demands() {
        let user = ProfileId::new();
        let scope = DemandScope::for_role(Role::Member, Some(user));
        assert_eq!(scope, DemandScope::Own(user));
        assert_eq!(scope.to_query(), Some(DemandQuery::by_member(user)));
    }

    #[test]
    fn test_member_without_id_sees_nothing() {
        let scope = DemandScope::for_role(Role::Member, None);
        assert_eq!(scope, DemandScope::Hidden);
        assert!(scope.to_query().is_none());
    }

    #[test]
    fn test_controller_sees_everything() {
        let scope = DemandScope::for_role(Role::Controller, None);
        assert_eq!(scope.to_query(), Some(DemandQuery::all()));
    }

    #[test]
    fn test_administrator_sees_accepted_queue() {
        let scope = DemandScope::for_role(Role::Administrator, None);
        assert_eq!(
            scope.to_query(),
            Some(DemandQuery::by_status(DemandStatus::Accepted))
        );
    }
}
