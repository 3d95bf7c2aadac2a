//! Message entity - Conversation attached to an application.
//!
//! Messages are listed oldest first. Whether a user has read a message is
//! recorded in the `message_seen` table, not on the message itself.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Message database model
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "finaid_messages")]
pub struct Model {
    /// Unique identifier for the message
    #[sea_orm(primary_key)]
    pub id: i64,
    /// Application the message is attached to
    pub application_id: i64,
    /// User who submitted the message
    pub user_id: i64,
    /// Whether the applicant can see this message
    pub visible: bool,
    /// Message body
    #[sea_orm(column_type = "Text")]
    pub message: String,
    /// When the message was submitted
    pub submitted_at: DateTimeUtc,
}

/// Defines relationships between Message and other entities
#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    /// Application the message is attached to
    #[sea_orm(
        belongs_to = "super::application::Entity",
        from = "Column::ApplicationId",
        to = "super::application::Column::Id"
    )]
    Application,
    /// Author of the message
    #[sea_orm(
        belongs_to = "super::user::Entity",
        from = "Column::UserId",
        to = "super::user::Column::Id"
    )]
    User,
    /// Read receipts for this message
    #[sea_orm(has_many = "super::message_seen::Entity")]
    Seen,
}

impl Related<super::application::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Application.def()
    }
}

impl Related<super::user::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::User.def()
    }
}

impl Related<super::message_seen::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Seen.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
