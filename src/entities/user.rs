//! User entity - Minimal account record owned by the external auth system.
//!
//! Only the fields the financial aid tables depend on are kept: the id used
//! by foreign keys and the username that namespaces receipt uploads.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// User database model
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "users")]
pub struct Model {
    /// Unique identifier for the user
    #[sea_orm(primary_key)]
    pub id: i64,
    /// Login name, also used as the receipt upload directory
    #[sea_orm(unique, column_type = "String(StringLen::N(150))")]
    pub username: String,
    /// Contact address for bulk mail
    pub email: String,
}

/// Defines relationships between User and other entities
#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    /// A user owns at most one application
    #[sea_orm(has_one = "super::application::Entity")]
    Application,
    /// Messages authored by this user
    #[sea_orm(has_many = "super::message::Entity")]
    Messages,
}

impl Related<super::application::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Application.def()
    }
}

impl Related<super::message::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Messages.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
