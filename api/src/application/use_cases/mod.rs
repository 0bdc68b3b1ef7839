pub mod ads;
pub mod auth;
pub mod categories;
pub mod proposals;
