//! Application entity - One applicant's financial aid request.
//!
//! The row never stores a status. Status lives on the optional review row and
//! defaults to `Submitted` while that row is absent.

use super::choices::{ExperienceLevel, Presenting};
use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Application database model. The primary key doubles as the application number.
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "finaid_applications")]
pub struct Model {
    /// Application number
    #[sea_orm(primary_key)]
    pub id: i64,
    /// When the application was first submitted
    pub timestamp: DateTimeUtc,
    /// When the application row was last saved
    pub last_update: DateTimeUtc,
    /// Owning user; one application per user
    #[sea_orm(unique)]
    pub user_id: i64,
    /// Applicant wants to be considered for a `PyLadies` grant
    pub pyladies_grant_requested: bool,
    /// Applicant is traveling internationally
    pub international: bool,
    /// Requested assistance in US dollars
    #[sea_orm(column_type = "Decimal(Some((8, 2)))")]
    pub amount_requested: Decimal,
    /// Travel plans, including the country of departure
    #[sea_orm(column_type = "String(StringLen::N(1024))")]
    pub travel_plans: String,
    /// Career, or where the applicant studies
    #[sea_orm(column_type = "String(StringLen::N(500))")]
    pub profession: String,
    /// Involvement in open source projects or communities (may be blank)
    #[sea_orm(column_type = "String(StringLen::N(1024))")]
    pub involvement: String,
    /// How the applicant uses Python and what they hope to get out of attending
    #[sea_orm(column_type = "String(StringLen::N(500))")]
    pub what_you_want: String,
    /// Whether the applicant is presenting this year
    pub presenting: Presenting,
    /// Python experience level
    pub experience_level: ExperienceLevel,
    /// First time attending
    pub first_time: bool,
    /// Has spoken at a previous conference
    pub presented: bool,
}

/// Defines relationships between Application and other entities
#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    /// Each application belongs to one user
    #[sea_orm(
        belongs_to = "super::user::Entity",
        from = "Column::UserId",
        to = "super::user::Column::Id"
    )]
    User,
    /// Reviewer data, created on the first status change
    #[sea_orm(has_one = "super::review::Entity")]
    Review,
    /// Conversation between applicant and reviewers
    #[sea_orm(has_many = "super::message::Entity")]
    Messages,
    /// Uploaded receipts
    #[sea_orm(has_many = "super::receipt::Entity")]
    Receipts,
}

impl Related<super::user::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::User.def()
    }
}

impl Related<super::review::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Review.def()
    }
}

impl Related<super::message::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Messages.def()
    }
}

impl Related<super::receipt::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Receipts.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
