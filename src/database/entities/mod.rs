pub mod enums;

pub mod agencies;
pub mod ancillary_contracts;
pub mod contracts;
pub mod customers;
pub mod plans;
pub mod ppa_bundles;
pub mod ppa_projects;
pub mod ppa_supply_points;
pub mod recontract_estimates;
pub mod recontract_plants;
pub mod recontract_supply_points;
