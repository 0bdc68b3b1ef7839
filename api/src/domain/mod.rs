pub mod ads;
pub mod proposals;
