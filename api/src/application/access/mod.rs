use uuid::Uuid;

use crate::application::errors::UseCaseError;
use crate::domain::ads::ad::Ad;
use crate::domain::proposals::proposal::ExchangeProposal;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Actor {
    User(Uuid),
    Anonymous,
}

impl Actor {
    pub fn user_id(&self) -> Option<Uuid> {
        match self {
            Actor::User(id) => Some(*id),
            Actor::Anonymous => None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum Capability {
    None,
    View,
    Edit,
}

// Presentation layer is responsible for building Actor from HTTP inputs.

/// Ads are public; only the author may change them.
pub fn resolve_ad(actor: &Actor, ad: &Ad) -> Capability {
    match actor {
        Actor::User(uid) if ad.is_authored_by(*uid) => Capability::Edit,
        _ => Capability::View,
    }
}

/// The proposer owns a proposal; the addressee may only look at it.
pub fn resolve_proposal(actor: &Actor, proposal: &ExchangeProposal) -> Capability {
    match actor {
        Actor::User(uid) if proposal.proposer_id() == *uid => Capability::Edit,
        Actor::User(uid) if proposal.addressee_id() == *uid => Capability::View,
        _ => Capability::None,
    }
}

pub fn require_user(actor: &Actor) -> Result<Uuid, UseCaseError> {
    actor.user_id().ok_or(UseCaseError::Unauthenticated)
}

pub fn require_edit(cap: Capability) -> Result<(), UseCaseError> {
    if cap >= Capability::Edit {
        Ok(())
    } else {
        Err(UseCaseError::Forbidden)
    }
}

pub fn require_view(cap: Capability) -> Result<(), UseCaseError> {
    if cap >= Capability::View {
        Ok(())
    } else {
        Err(UseCaseError::Forbidden)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::{ad_by, proposal_between};

    #[test]
    fn anyone_views_ads_but_only_the_author_edits() {
        let author = Uuid::new_v4();
        let ad = ad_by(author, 1);
        assert_eq!(resolve_ad(&Actor::User(author), &ad), Capability::Edit);
        assert_eq!(resolve_ad(&Actor::User(Uuid::new_v4()), &ad), Capability::View);
        assert_eq!(resolve_ad(&Actor::Anonymous, &ad), Capability::View);
    }

    #[test]
    fn proposal_capabilities_follow_participation() {
        let proposer = Uuid::new_v4();
        let addressee = Uuid::new_v4();
        let proposal = proposal_between(proposer, addressee);

        assert_eq!(resolve_proposal(&Actor::User(proposer), &proposal), Capability::Edit);
        assert_eq!(resolve_proposal(&Actor::User(addressee), &proposal), Capability::View);
        assert_eq!(
            resolve_proposal(&Actor::User(Uuid::new_v4()), &proposal),
            Capability::None
        );
        assert_eq!(resolve_proposal(&Actor::Anonymous, &proposal), Capability::None);
    }

    #[test]
    fn anonymous_actor_is_unauthenticated() {
        assert!(matches!(
            require_user(&Actor::Anonymous),
            Err(UseCaseError::Unauthenticated)
        ));
        assert!(require_view(Capability::None).is_err());
        assert!(require_edit(Capability::View).is_err());
    }
}
