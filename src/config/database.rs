//! Database configuration module.
//!
//! Handles the `SQLite` connection and table creation using `SeaORM`. Tables are
//! generated from the entity definitions with `Schema::create_table_from_entity`,
//! so the schema always matches the Rust structs. The only hand-built statement
//! is the unique index on the message seen-by pairs, which has no entity-level
//! attribute.

use crate::entities::{
    Application, ApplicationPeriod, EmailTemplate, Message, MessageSeen, Receipt, Review, User,
    message_seen,
};
use crate::errors::Result;
use sea_orm::sea_query::Index;
use sea_orm::{ConnectionTrait, Database, DatabaseConnection, Schema};
use tracing::{debug, info, instrument};

const DEFAULT_DATABASE_URL: &str = "sqlite://data/finaid.sqlite?mode=rwc";

/// Gets the database URL from the `DATABASE_URL` environment variable, falling
/// back to a local `SQLite` file.
#[must_use]
pub fn get_database_url() -> String {
    std::env::var("DATABASE_URL").unwrap_or_else(|_| DEFAULT_DATABASE_URL.to_string())
}

/// Establishes a connection to the database named by [`get_database_url`].
pub async fn create_connection() -> Result<DatabaseConnection> {
    let database_url = get_database_url();
    debug!("Connecting to database at {}", database_url);
    Database::connect(&database_url).await.map_err(Into::into)
}

/// Creates every financial aid table if it does not exist yet.
///
/// Parents are created before children so foreign keys resolve on backends
/// that check them at creation time.
#[instrument(skip(db))]
pub async fn create_tables(db: &DatabaseConnection) -> Result<()> {
    let builder = db.get_database_backend();
    let schema = Schema::new(builder);

    let mut tables = [
        schema.create_table_from_entity(User),
        schema.create_table_from_entity(Application),
        schema.create_table_from_entity(Review),
        schema.create_table_from_entity(Message),
        schema.create_table_from_entity(MessageSeen),
        schema.create_table_from_entity(ApplicationPeriod),
        schema.create_table_from_entity(EmailTemplate),
        schema.create_table_from_entity(Receipt),
    ];
    for table in &mut tables {
        table.if_not_exists();
        db.execute(builder.build(&*table)).await?;
    }

    let seen_pair = Index::create()
        .name("idx_finaid_message_seen_pair")
        .table(MessageSeen)
        .col(message_seen::Column::MessageId)
        .col(message_seen::Column::UserId)
        .unique()
        .if_not_exists()
        .to_owned();
    db.execute(builder.build(&seen_pair)).await?;

    info!("Financial aid tables ensured");
    Ok(())
}
