use std::fmt;
use std::str::FromStr;

use uuid::Uuid;

use crate::domain::ads::ad::Ad;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ProposalStatus {
    #[default]
    Pending,
    Accepted,
    Rejected,
}

impl ProposalStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            ProposalStatus::Pending => "pending",
            ProposalStatus::Accepted => "accepted",
            ProposalStatus::Rejected => "rejected",
        }
    }
}

impl fmt::Display for ProposalStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ProposalStatus {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "pending" => Ok(ProposalStatus::Pending),
            "accepted" => Ok(ProposalStatus::Accepted),
            "rejected" => Ok(ProposalStatus::Rejected),
            other => anyhow::bail!("unknown proposal status: {other}"),
        }
    }
}

#[derive(Debug, Clone)]
pub struct ExchangeProposal {
    pub id: i64,
    pub sender: Ad,
    pub receiver: Ad,
    pub comment: String,
    pub status: ProposalStatus,
    pub created_at: chrono::DateTime<chrono::Utc>,
}

impl ExchangeProposal {
    pub const COMMENT_MAX_LEN: usize = 500;

    /// The user who offered their ad.
    pub fn proposer_id(&self) -> Uuid {
        self.sender.author.id
    }

    /// The user whose ad is being asked for.
    pub fn addressee_id(&self) -> Uuid {
        self.receiver.author.id
    }

    pub fn involves(&self, user_id: Uuid) -> bool {
        self.proposer_id() == user_id || self.addressee_id() == user_id
    }
}
