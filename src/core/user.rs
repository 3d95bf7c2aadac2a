//! User lookups and creation for the minimal account table.

use crate::{
    entities::{User, user},
    errors::{Error, Result},
};
use sea_orm::{Set, prelude::*};

/// Creates a user record.
pub async fn create_user<C>(db: &C, username: &str, email: &str) -> Result<user::Model>
where
    C: ConnectionTrait,
{
    if username.trim().is_empty() {
        return Err(Error::InvalidUsername {
            username: username.to_string(),
        });
    }
    user::ActiveModel {
        username: Set(username.trim().to_string()),
        email: Set(email.to_string()),
        ..Default::default()
    }
    .insert(db)
    .await
    .map_err(Into::into)
}

/// Loads a user, failing with [`Error::UserNotFound`] when absent.
pub async fn get_user<C>(db: &C, user_id: i64) -> Result<user::Model>
where
    C: ConnectionTrait,
{
    User::find_by_id(user_id)
        .one(db)
        .await?
        .ok_or(Error::UserNotFound { id: user_id })
}
