use crate::application::validation::FieldErrors;

#[derive(Debug, Clone, Default)]
pub struct ProposalDraft {
    pub sender_id: Option<i64>,
    pub receiver_id: Option<i64>,
    pub comment: Option<String>,
    pub malformed: FieldErrors,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewProposal {
    pub sender_id: i64,
    pub receiver_id: i64,
    pub comment: String,
}
