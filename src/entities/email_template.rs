//! Email template entity - Text used to compose bulk mail to applicants.
//!
//! Templates may reference the `application` and `review` context variables,
//! see [`crate::core::email`].

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Email template database model
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "finaid_email_templates")]
pub struct Model {
    /// Row id
    #[sea_orm(primary_key)]
    pub id: i64,
    /// Name shown to the admin picking a template
    #[sea_orm(column_type = "String(StringLen::N(80))")]
    pub name: String,
    /// Template body
    #[sea_orm(column_type = "Text")]
    pub template: String,
}

/// Email templates stand alone
#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}
