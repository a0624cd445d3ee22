use crate::error::LedgerError;
use serde::{Deserialize, Serialize};
use std::str::FromStr;
use utoipa::ToSchema;

/// Who is operating the portal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub enum UserRole {
    Consumer,
    Manufacturer,
    Distributor,
    Retailer,
}

impl UserRole {
    /// Consumers can only verify; every other role may mint and record movements.
    pub fn can_manage_supply_chain(&self) -> bool {
        !matches!(self, UserRole::Consumer)
    }
}

impl FromStr for UserRole {
    type Err = LedgerError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "consumer" => Ok(UserRole::Consumer),
            "manufacturer" => Ok(UserRole::Manufacturer),
            "distributor" => Ok(UserRole::Distributor),
            "retailer" => Ok(UserRole::Retailer),
            _ => Err(LedgerError::UnknownRole(s.to_string())),
        }
    }
}
