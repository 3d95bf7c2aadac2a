//! Application period gating.
//!
//! Applications are open while the current time falls strictly inside any
//! configured period. Periods may overlap; the open window is their union.

use crate::{
    entities::{ApplicationPeriod, application_period},
    errors::Result,
};
use chrono::{DateTime, Utc};
use sea_orm::{QueryOrder, Set, prelude::*};
use tracing::info;

/// Whether applications are open at `now`.
pub async fn is_open<C>(db: &C, now: DateTime<Utc>) -> Result<bool>
where
    C: ConnectionTrait,
{
    let covering = ApplicationPeriod::find()
        .filter(application_period::Column::Start.lt(now))
        .filter(application_period::Column::End.gt(now))
        .count(db)
        .await?;
    Ok(covering > 0)
}

/// Adds an application period.
pub async fn create_period<C>(
    db: &C,
    start: DateTime<Utc>,
    end: DateTime<Utc>,
) -> Result<application_period::Model>
where
    C: ConnectionTrait,
{
    let period = application_period::ActiveModel {
        start: Set(start),
        end: Set(end),
        ..Default::default()
    }
    .insert(db)
    .await?;
    info!(%start, %end, "Application period added");
    Ok(period)
}

/// All periods, earliest start first.
pub async fn list_periods<C>(db: &C) -> Result<Vec<application_period::Model>>
where
    C: ConnectionTrait,
{
    ApplicationPeriod::find()
        .order_by_asc(application_period::Column::Start)
        .all(db)
        .await
        .map_err(Into::into)
}
