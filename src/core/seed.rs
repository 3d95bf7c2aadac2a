//! Applies `config.toml` seed data to the database.
//!
//! Seeding runs on every start, so it only adds what is missing: a period is
//! inserted unless an identical one exists, and templates are matched by name.

use crate::{
    config::seed::SeedConfig,
    core::{email, period},
    entities::{ApplicationPeriod, application_period},
    errors::Result,
};
use sea_orm::prelude::*;
use tracing::{info, instrument};

/// What a seeding run changed.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SeedSummary {
    /// Periods inserted
    pub periods_added: usize,
    /// Templates inserted or updated
    pub templates_written: usize,
}

/// Inserts configured periods and templates that are not in the database yet.
#[instrument(skip_all)]
pub async fn seed_from_config<C>(db: &C, config: &SeedConfig) -> Result<SeedSummary>
where
    C: ConnectionTrait,
{
    let mut summary = SeedSummary::default();

    for configured in &config.periods {
        let exists = ApplicationPeriod::find()
            .filter(application_period::Column::Start.eq(configured.start))
            .filter(application_period::Column::End.eq(configured.end))
            .count(db)
            .await?
            > 0;
        if !exists {
            period::create_period(db, configured.start, configured.end).await?;
            summary.periods_added += 1;
        }
    }

    for configured in &config.email_templates {
        let before = email::get_template_by_name(db, &configured.name).await?;
        let after = email::upsert_template(db, &configured.name, &configured.template).await?;
        if before.as_ref() != Some(&after) {
            summary.templates_written += 1;
        }
    }

    info!(
        periods_added = summary.periods_added,
        templates_written = summary.templates_written,
        "Seed data applied"
    );
    Ok(summary)
}
