//! Reviewer-side edits to an application's review data.
//!
//! Reviewers record the granted amount and payout details here. The review
//! row is created on first use, the same way a status change creates it.

use crate::{
    core::{application::ApplicationRecord, application::new_review, money},
    entities::{PaymentMethod, review},
    errors::Result,
};
use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use sea_orm::{ConnectionTrait, Set, prelude::*};
use tracing::{info, instrument};

/// Reviewer-editable fields. Status is changed through
/// [`crate::core::application::set_status`] instead.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ReviewForm {
    /// Amount granted in US dollars
    pub amount: Decimal,
    /// Grant letter has been mailed
    pub grant_letter_sent: bool,
    /// How the grant will be paid out
    pub reimbursement_method: Option<PaymentMethod>,
    /// Reviewer notes, hidden from the applicant
    pub notes: String,
    /// Payment notes for accounting
    pub disbursement_notes: String,
    /// Registration discount code
    pub promo_code: String,
    /// Name for the payment
    pub legal_name: String,
    /// Mailing address for the payment
    pub address: String,
}

impl From<&review::Model> for ReviewForm {
    fn from(review: &review::Model) -> Self {
        Self {
            amount: review.amount,
            grant_letter_sent: review.grant_letter_sent,
            reimbursement_method: review.reimbursement_method,
            notes: review.notes.clone(),
            disbursement_notes: review.disbursement_notes.clone(),
            promo_code: review.promo_code.clone(),
            legal_name: review.legal_name.clone(),
            address: review.address.clone(),
        }
    }
}

/// Writes reviewer data for an application, creating the review row if needed.
///
/// The application's status is left as it is.
#[instrument(skip(db, record, form), fields(application_id = record.application.id))]
pub async fn save_review<C>(
    db: &C,
    record: &mut ApplicationRecord,
    form: ReviewForm,
    now: DateTime<Utc>,
) -> Result<review::Model>
where
    C: ConnectionTrait,
{
    let amount = money::validate_amount(form.amount)?;

    let mut model = match record.review.clone() {
        Some(existing) => existing.into(),
        None => new_review(record.application.id, now),
    };
    model.amount = Set(amount);
    model.grant_letter_sent = Set(form.grant_letter_sent);
    model.reimbursement_method = Set(form.reimbursement_method);
    model.notes = Set(form.notes);
    model.disbursement_notes = Set(form.disbursement_notes);
    model.promo_code = Set(form.promo_code);
    model.legal_name = Set(form.legal_name);
    model.address = Set(form.address);
    model.last_update = Set(now);

    let saved = if record.review.is_some() {
        model.update(db).await?
    } else {
        info!("Creating review data on first reviewer edit");
        model.insert(db).await?
    };
    record.review = Some(saved.clone());
    Ok(saved)
}
