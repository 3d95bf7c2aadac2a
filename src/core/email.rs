//! Bulk-mail templates.
//!
//! A template is plain text with `{{ application.<field> }}` and
//! `{{ review.<field> }}` placeholders. Rendering builds a JSON context from
//! the application and its review data and substitutes each placeholder;
//! placeholders that resolve to nothing render as an empty string. Sending
//! the rendered text is left to the caller.

use crate::{
    core::{
        application::{ApplicationRecord, load_application},
        money,
    },
    entities::{EmailTemplate, email_template},
    errors::Result,
};
use sea_orm::{ActiveEnum, QueryOrder, Set, prelude::*};
use serde_json::{Map, Value, json};

/// Creates a template, or replaces the body of the template with the same name.
pub async fn upsert_template<C>(db: &C, name: &str, template: &str) -> Result<email_template::Model>
where
    C: ConnectionTrait,
{
    match get_template_by_name(db, name).await? {
        Some(existing) => {
            if existing.template == template {
                return Ok(existing);
            }
            let mut model: email_template::ActiveModel = existing.into();
            model.template = Set(template.to_string());
            model.update(db).await.map_err(Into::into)
        }
        None => email_template::ActiveModel {
            name: Set(name.to_string()),
            template: Set(template.to_string()),
            ..Default::default()
        }
        .insert(db)
        .await
        .map_err(Into::into),
    }
}

/// Finds a template by name.
pub async fn get_template_by_name<C>(db: &C, name: &str) -> Result<Option<email_template::Model>>
where
    C: ConnectionTrait,
{
    EmailTemplate::find()
        .filter(email_template::Column::Name.eq(name))
        .one(db)
        .await
        .map_err(Into::into)
}

/// All templates ordered by name.
pub async fn list_templates<C>(db: &C) -> Result<Vec<email_template::Model>>
where
    C: ConnectionTrait,
{
    EmailTemplate::find()
        .order_by_asc(email_template::Column::Name)
        .all(db)
        .await
        .map_err(Into::into)
}

/// Builds the `application` / `review` context for one application.
///
/// The application object also carries the derived `status`, `status_code`
/// and `url`, since those are what bulk mail usually refers to. `review` is
/// null while no review data exists. Amounts always carry two decimal places.
pub fn build_context(record: &ApplicationRecord) -> Result<Value> {
    let mut scaled = record.application.clone();
    scaled.amount_requested = money::to_cents(scaled.amount_requested);
    let mut application = match serde_json::to_value(&scaled)? {
        Value::Object(map) => map,
        _ => Map::new(),
    };
    let status = record.status();
    application.insert("status".to_string(), json!(status.label()));
    application.insert("status_code".to_string(), json!(status.to_value()));
    application.insert("url".to_string(), json!(record.fa_app_url()));

    let review = record.review.clone().map(|mut review| {
        review.amount = money::to_cents(review.amount);
        review
    });
    let review = serde_json::to_value(&review)?;

    Ok(json!({ "application": application, "review": review }))
}

/// Substitutes every `{{ path }}` placeholder in `template` from `context`.
#[must_use]
pub fn render(template: &str, context: &Value) -> String {
    let mut out = String::with_capacity(template.len());
    let mut rest = template;
    while let Some(open) = rest.find("{{") {
        out.push_str(&rest[..open]);
        let after_open = &rest[open + 2..];
        let Some(close) = after_open.find("}}") else {
            // Unterminated placeholder, keep the text as written
            out.push_str(&rest[open..]);
            return out;
        };
        out.push_str(&lookup(context, after_open[..close].trim()));
        rest = &after_open[close + 2..];
    }
    out.push_str(rest);
    out
}

fn lookup(context: &Value, path: &str) -> String {
    let value = path
        .split('.')
        .try_fold(context, |value, key| value.get(key));
    match value {
        Some(Value::String(s)) => s.clone(),
        Some(Value::Null) | None => String::new(),
        Some(other) => other.to_string(),
    }
}

/// Renders a stored template for one application.
pub async fn render_for_application<C>(
    db: &C,
    template: &email_template::Model,
    application_id: i64,
) -> Result<String>
where
    C: ConnectionTrait,
{
    let record = load_application(db, application_id).await?;
    let context = build_context(&record)?;
    Ok(render(&template.template, &context))
}
