//! Message business logic - the applicant/reviewer conversation.
//!
//! Messages are always returned oldest first. Read tracking is a separate
//! seen-by relation, so "unseen" is answered with an anti-join rather than a
//! flag on the message.

use crate::{
    entities::{Message, MessageSeen, message, message_seen},
    errors::Result,
};
use chrono::{DateTime, Utc};
use sea_orm::{QueryOrder, Set, prelude::*, sea_query::Query};
use tracing::{debug, instrument};

/// Attaches a message to an application.
///
/// `visible` controls whether the applicant sees it; reviewer-only notes are
/// posted with `visible = false`.
#[instrument(skip(db, text))]
pub async fn post_message<C>(
    db: &C,
    application_id: i64,
    user_id: i64,
    text: &str,
    visible: bool,
    now: DateTime<Utc>,
) -> Result<message::Model>
where
    C: ConnectionTrait,
{
    let model = message::ActiveModel {
        application_id: Set(application_id),
        user_id: Set(user_id),
        visible: Set(visible),
        message: Set(text.to_string()),
        submitted_at: Set(now),
        ..Default::default()
    };
    model.insert(db).await.map_err(Into::into)
}

/// All messages on an application, oldest first.
pub async fn messages_for_application<C>(
    db: &C,
    application_id: i64,
) -> Result<Vec<message::Model>>
where
    C: ConnectionTrait,
{
    Message::find()
        .filter(message::Column::ApplicationId.eq(application_id))
        .order_by_asc(message::Column::SubmittedAt)
        .order_by_asc(message::Column::Id)
        .all(db)
        .await
        .map_err(Into::into)
}

/// Messages on an application the applicant is allowed to see, oldest first.
pub async fn visible_messages<C>(db: &C, application_id: i64) -> Result<Vec<message::Model>>
where
    C: ConnectionTrait,
{
    Message::find()
        .filter(message::Column::ApplicationId.eq(application_id))
        .filter(message::Column::Visible.eq(true))
        .order_by_asc(message::Column::SubmittedAt)
        .order_by_asc(message::Column::Id)
        .all(db)
        .await
        .map_err(Into::into)
}

/// Whether `user_id` has seen the message.
pub async fn has_seen<C>(db: &C, message_id: i64, user_id: i64) -> Result<bool>
where
    C: ConnectionTrait,
{
    let count = MessageSeen::find()
        .filter(message_seen::Column::MessageId.eq(message_id))
        .filter(message_seen::Column::UserId.eq(user_id))
        .count(db)
        .await?;
    Ok(count > 0)
}

/// Records that `user_id` has seen the message. Seeing it again is a no-op.
pub async fn mark_seen<C>(db: &C, message_id: i64, user_id: i64, now: DateTime<Utc>) -> Result<()>
where
    C: ConnectionTrait,
{
    if has_seen(db, message_id, user_id).await? {
        debug!(message_id, user_id, "Message already seen");
        return Ok(());
    }
    message_seen::ActiveModel {
        message_id: Set(message_id),
        user_id: Set(user_id),
        seen_at: Set(now),
        ..Default::default()
    }
    .insert(db)
    .await?;
    Ok(())
}

/// Every message, on any application and by any author, that `user_id` has
/// not seen. Callers narrow this further, typically to one application.
pub async fn unseen<C>(db: &C, user_id: i64) -> Result<Vec<message::Model>>
where
    C: ConnectionTrait,
{
    let seen_by_user = Query::select()
        .column(message_seen::Column::MessageId)
        .from(MessageSeen)
        .and_where(message_seen::Column::UserId.eq(user_id))
        .to_owned();

    Message::find()
        .filter(message::Column::Id.not_in_subquery(seen_by_user))
        .order_by_asc(message::Column::SubmittedAt)
        .order_by_asc(message::Column::Id)
        .all(db)
        .await
        .map_err(Into::into)
}
