//! Receipt entity - Uploaded proof of expense.
//!
//! `receipt_image` holds the path relative to the media root, namespaced by the
//! owning user's username: `finaid_receipts/<username>/<filename>`.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Receipt database model
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "finaid_receipts")]
pub struct Model {
    /// Unique identifier for the receipt
    #[sea_orm(primary_key)]
    pub id: i64,
    /// When the receipt was uploaded
    pub timestamp: DateTimeUtc,
    /// Application the expense belongs to
    pub application_id: i64,
    /// What the receipt is for
    #[sea_orm(column_type = "String(StringLen::N(255))")]
    pub description: String,
    /// Receipt total in US dollars
    #[sea_orm(column_type = "Decimal(Some((8, 2)))")]
    pub amount: Decimal,
    /// Stored file, relative to the media root
    pub receipt_image: String,
    /// Whether accounting has recorded this receipt
    pub logged: bool,
}

/// Defines relationships between Receipt and other entities
#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    /// Each receipt belongs to one application
    #[sea_orm(
        belongs_to = "super::application::Entity",
        from = "Column::ApplicationId",
        to = "super::application::Column::Id"
    )]
    Application,
}

impl Related<super::application::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Application.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
