pub mod create_proposal;
pub mod delete_proposal;
pub mod get_proposal;
pub mod list_proposals;
