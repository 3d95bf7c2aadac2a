//! Application period entity - Windows during which applications are accepted.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Application period database model
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "finaid_application_periods")]
pub struct Model {
    /// Row id
    #[sea_orm(primary_key)]
    pub id: i64,
    /// Exclusive lower bound of the window
    pub start: DateTimeUtc,
    /// Exclusive upper bound of the window
    pub end: DateTimeUtc,
}

/// Application periods stand alone
#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}
