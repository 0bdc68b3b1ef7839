pub mod ad_repository;
pub mod category_repository;
pub mod proposal_repository;
pub mod user_repository;
