//! Review entity - Reviewer-only annotations and the final disposition.
//!
//! At most one row per application, created lazily by the first status change
//! or reviewer edit.

use super::choices::{PaymentMethod, Status};
use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Review data database model
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "finaid_review_data")]
pub struct Model {
    /// Unique identifier for the review row
    #[sea_orm(primary_key)]
    pub id: i64,
    /// Application this review belongs to
    #[sea_orm(unique)]
    pub application_id: i64,
    /// When the review row was last saved
    pub last_update: DateTimeUtc,
    /// Current lifecycle state
    pub status: Status,
    /// Amount granted in US dollars
    #[sea_orm(column_type = "Decimal(Some((8, 2)))")]
    pub amount: Decimal,
    /// Whether the grant letter went out
    pub grant_letter_sent: bool,
    /// How the grant is paid, once known
    pub reimbursement_method: Option<PaymentMethod>,
    /// Reviewer notes
    #[sea_orm(column_type = "Text")]
    pub notes: String,
    /// Notes about paying out the grant
    #[sea_orm(column_type = "Text")]
    pub disbursement_notes: String,
    /// Registration discount code
    #[sea_orm(column_type = "String(StringLen::N(20))")]
    pub promo_code: String,
    /// Legal name for payment
    #[sea_orm(column_type = "String(StringLen::N(2048))")]
    pub legal_name: String,
    /// Postal address for payment
    #[sea_orm(column_type = "Text")]
    pub address: String,
}

/// Defines relationships between review data and other entities
#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    /// Each review belongs to one application
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
