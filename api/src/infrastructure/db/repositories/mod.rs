pub mod ad_repository_sqlx;
pub mod category_repository_sqlx;
pub mod proposal_repository_sqlx;
pub mod user_repository_sqlx;
