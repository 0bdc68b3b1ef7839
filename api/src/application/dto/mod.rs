pub mod ads;
pub mod pagination;
pub mod proposals;
