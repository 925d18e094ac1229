use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Lifecycle of a supply contract. Persisted as the exact label strings;
/// renaming a label requires a schema migration.
#[derive(Debug, Clone, PartialEq, Eq, EnumIter, DeriveActiveEnum, Serialize, Deserialize, ToSchema)]
#[sea_orm(rs_type = "String", db_type = "String(Some(32))")]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ContractStatus {
    #[sea_orm(string_value = "UNDER_CONTRACT")]
    UnderContract,
    #[sea_orm(string_value = "RECONTRACT_ESTIMATE")]
    RecontractEstimate,
    #[sea_orm(string_value = "RECONTRACTED")]
    Recontracted,
}

/// Add-on charge categories attached to a contract.
#[derive(Debug, Clone, PartialEq, Eq, EnumIter, DeriveActiveEnum, Serialize, Deserialize, ToSchema)]
#[sea_orm(rs_type = "String", db_type = "String(Some(32))")]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum AncillaryType {
    #[sea_orm(string_value = "STANDBY_POWER")]
    StandbyPower,
    #[sea_orm(string_value = "STANDBY_LINE")]
    StandbyLine,
    #[sea_orm(string_value = "PRIVATE_POWER_SUPPLY")]
    PrivatePowerSupply,
    #[sea_orm(string_value = "NON_FOSSIL_CERT")]
    NonFossilCert,
    #[sea_orm(string_value = "RENEWABLE_LEVY_REDUCTION")]
    RenewableLevyReduction,
    #[sea_orm(string_value = "ENECLOUD_DISCOUNT")]
    EnecloudDiscount,
}

/// Permitted quote validity windows for a re-contract estimate, stored as
/// the day count itself.
#[derive(Debug, Clone, Copy, PartialEq, Eq, EnumIter, DeriveActiveEnum, Serialize, Deserialize, ToSchema)]
#[sea_orm(rs_type = "i32", db_type = "Integer")]
pub enum QuoteEffectiveDays {
    #[sea_orm(num_value = 30)]
    Days30,
    #[sea_orm(num_value = 60)]
    Days60,
}

#[derive(Debug, Clone, PartialEq, Eq, EnumIter, DeriveActiveEnum, Serialize, Deserialize, ToSchema)]
#[sea_orm(rs_type = "String", db_type = "String(Some(16))")]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum VoltageLevel {
    #[sea_orm(string_value = "HIGH")]
    High,
    #[sea_orm(string_value = "EXTRA_HIGH")]
    ExtraHigh,
    #[sea_orm(string_value = "LOW")]
    Low,
}

/// Quotation progress for a PPA bundle: DRAFT -> SUBMITTED -> PRICED -> EXCEL_READY.
#[derive(Debug, Clone, PartialEq, Eq, EnumIter, DeriveActiveEnum, Serialize, Deserialize, ToSchema)]
#[sea_orm(rs_type = "String", db_type = "String(Some(16))")]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum QuoteStatus {
    #[sea_orm(string_value = "DRAFT")]
    Draft,
    #[sea_orm(string_value = "SUBMITTED")]
    Submitted,
    #[sea_orm(string_value = "PRICED")]
    Priced,
    #[sea_orm(string_value = "EXCEL_READY")]
    ExcelReady,
}

/// Commercial outcome for a PPA bundle: NONE -> OFFERED -> WON/LOST.
#[derive(Debug, Clone, PartialEq, Eq, EnumIter, DeriveActiveEnum, Serialize, Deserialize, ToSchema)]
#[sea_orm(rs_type = "String", db_type = "String(Some(16))")]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum OfferStatus {
    #[sea_orm(string_value = "NONE")]
    None,
    #[sea_orm(string_value = "OFFERED")]
    Offered,
    #[sea_orm(string_value = "WON")]
    Won,
    #[sea_orm(string_value = "LOST")]
    Lost,
}
