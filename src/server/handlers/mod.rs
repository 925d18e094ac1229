pub mod contracts;
pub mod health;
pub mod ppa_quotations;
pub mod recontracts;
