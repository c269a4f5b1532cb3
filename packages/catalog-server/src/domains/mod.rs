// Domain modules

pub mod catalog;
pub mod orders;
