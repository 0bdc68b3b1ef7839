use uuid::Uuid;

use crate::application::access::{self, Actor};
use crate::application::dto::proposals::{NewProposal, ProposalDraft};
use crate::application::errors::{UseCaseError, UseCaseResult};
use crate::application::ports::ad_repository::AdRepository;
use crate::application::ports::proposal_repository::ProposalRepository;
use crate::application::validation::{self, FieldErrors};
use crate::domain::ads::ad::Ad;
use crate::domain::proposals::proposal::ExchangeProposal;

pub const FOREIGN_SENDER: &str = "You can only offer your own ads.";
pub const OWN_RECEIVER: &str = "You cannot propose an exchange for your own ad.";

pub struct CreateProposal<'a, P, A>
where
    P: ProposalRepository + ?Sized,
    A: AdRepository + ?Sized,
{
    pub repo: &'a P,
    pub ads: &'a A,
}

impl<'a, P, A> CreateProposal<'a, P, A>
where
    P: ProposalRepository + ?Sized,
    A: AdRepository + ?Sized,
{
    pub async fn execute(
        &self,
        actor: &Actor,
        draft: &ProposalDraft,
    ) -> UseCaseResult<ExchangeProposal> {
        let user_id = access::require_user(actor)?;

        let mut errors = draft.malformed.clone();
        let sender = self.active_ad(&mut errors, "sender_id", draft.sender_id).await?;
        let receiver = self
            .active_ad(&mut errors, "receiver_id", draft.receiver_id)
            .await?;
        let comment = validation::required_text(
            &mut errors,
            "comment",
            draft.comment.as_deref(),
            ExchangeProposal::COMMENT_MAX_LEN,
        );

        let (Some(sender), Some(receiver), Some(comment)) = (sender, receiver, comment) else {
            return Err(UseCaseError::Validation(errors));
        };
        check_parties(user_id, &sender, &receiver)?;

        let proposal = self
            .repo
            .create(&NewProposal {
                sender_id: sender.id,
                receiver_id: receiver.id,
                comment,
            })
            .await?;
        Ok(proposal)
    }

    // Inactive ads cannot take part in an exchange, so they count as missing.
    async fn active_ad(
        &self,
        errors: &mut FieldErrors,
        field: &str,
        id: Option<i64>,
    ) -> anyhow::Result<Option<Ad>> {
        let Some(id) = validation::required_id(errors, field, id) else {
            return Ok(None);
        };
        match self.ads.get_by_id(id).await? {
            Some(ad) if ad.is_active => Ok(Some(ad)),
            _ => {
                errors.add(field, validation::does_not_exist(id));
                Ok(None)
            }
        }
    }
}

/// The sender must be the requester's ad and the receiver someone else's.
fn check_parties(user_id: Uuid, sender: &Ad, receiver: &Ad) -> Result<(), FieldErrors> {
    if !sender.is_authored_by(user_id) {
        return Err(FieldErrors::single("sender_id", FOREIGN_SENDER));
    }
    if receiver.is_authored_by(user_id) {
        return Err(FieldErrors::single("receiver_id", OWN_RECEIVER));
    }
    Ok(())
}
