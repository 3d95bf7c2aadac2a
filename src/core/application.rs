//! Application business logic - submission, editing and status derivation.
//!
//! An application's status is not stored on the application row. It is read
//! from the optional review row, and an application without one is
//! `Submitted`. [`ApplicationRecord`] carries both rows so that the status and
//! everything derived from it can be answered without another query.

use crate::{
    core::{
        actions::{Actions, actions_for},
        message, money, period,
    },
    entities::{Application, ExperienceLevel, Presenting, Review, Status, User, application, review},
    errors::{Error, Result},
};
use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use sea_orm::{Set, prelude::*};
use tracing::{debug, info, instrument};

/// An application together with its review row, if one exists.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApplicationRecord {
    /// The applicant's request
    pub application: application::Model,
    /// Reviewer data; `None` until the first status change or reviewer edit
    pub review: Option<review::Model>,
}

impl ApplicationRecord {
    /// Current status, `Submitted` while there is no review row.
    #[must_use]
    pub fn status(&self) -> Status {
        self.review
            .as_ref()
            .map_or(Status::Submitted, |review| review.status)
    }

    /// Label of the current status.
    #[must_use]
    pub fn get_status_display(&self) -> &'static str {
        self.status().label()
    }

    /// Applicant actions allowed in the current status.
    #[must_use]
    pub fn actions(&self) -> Actions {
        actions_for(self.status())
    }

    /// Whether the applicant may view the decision.
    #[must_use]
    pub fn show_status_button(&self) -> bool {
        self.actions().status
    }

    /// Whether the applicant may edit the application.
    #[must_use]
    pub fn show_edit_button(&self) -> bool {
        self.actions().edit
    }

    /// Whether the applicant may withdraw.
    #[must_use]
    pub fn show_withdraw_button(&self) -> bool {
        self.actions().withdraw
    }

    /// Whether the applicant may accept an offer.
    #[must_use]
    pub fn show_accept_button(&self) -> bool {
        self.actions().accept
    }

    /// Whether the applicant may decline an offer.
    #[must_use]
    pub fn show_decline_button(&self) -> bool {
        self.actions().decline
    }

    /// Whether the applicant may ask for more than offered.
    #[must_use]
    pub fn show_request_more_button(&self) -> bool {
        self.actions().request_more
    }

    /// Whether the applicant may answer an information request.
    #[must_use]
    pub fn show_provide_info_button(&self) -> bool {
        self.actions().provide_info
    }

    /// Path of the reviewer detail view for this application.
    #[must_use]
    pub fn fa_app_url(&self) -> String {
        format!("/finaid/review/{}/", self.application.id)
    }
}

/// Applicant-supplied fields of an application.
#[derive(Debug, Clone, PartialEq, Eq)]
#[allow(clippy::struct_excessive_bools)]
pub struct ApplicationForm {
    /// Also apply for a PyLadies grant
    pub pyladies_grant_requested: bool,
    /// Travelling from outside the host country
    pub international: bool,
    /// Requested amount in US dollars
    pub amount_requested: Decimal,
    /// Free-text travel plans
    pub travel_plans: String,
    /// Current occupation
    pub profession: String,
    /// Involvement in the Python community
    pub involvement: String,
    /// What the applicant hopes to get out of the conference
    pub what_you_want: String,
    /// Whether the applicant is presenting
    pub presenting: Presenting,
    /// Self-reported Python experience
    pub experience_level: ExperienceLevel,
    /// First time attending
    pub first_time: bool,
    /// Has presented at the conference before
    pub presented: bool,
}

impl ApplicationForm {
    fn apply(self, model: &mut application::ActiveModel) -> Result<()> {
        model.amount_requested = Set(money::validate_amount(self.amount_requested)?);
        model.pyladies_grant_requested = Set(self.pyladies_grant_requested);
        model.international = Set(self.international);
        model.travel_plans = Set(self.travel_plans);
        model.profession = Set(self.profession);
        model.involvement = Set(self.involvement);
        model.what_you_want = Set(self.what_you_want);
        model.presenting = Set(self.presenting);
        model.experience_level = Set(self.experience_level);
        model.first_time = Set(self.first_time);
        model.presented = Set(self.presented);
        Ok(())
    }
}

/// Loads an application and its review row by application id.
pub async fn load_application<C>(db: &C, application_id: i64) -> Result<ApplicationRecord>
where
    C: ConnectionTrait,
{
    let (application, review) = Application::find_by_id(application_id)
        .find_also_related(Review)
        .one(db)
        .await?
        .ok_or(Error::ApplicationNotFound { id: application_id })?;
    Ok(ApplicationRecord {
        application,
        review,
    })
}

/// Finds the application owned by a user, if they have submitted one.
pub async fn application_for_user<C>(db: &C, user_id: i64) -> Result<Option<ApplicationRecord>>
where
    C: ConnectionTrait,
{
    let found = Application::find()
        .filter(application::Column::UserId.eq(user_id))
        .find_also_related(Review)
        .one(db)
        .await?;
    Ok(found.map(|(application, review)| ApplicationRecord {
        application,
        review,
    }))
}

/// Submits a new application for `user_id`.
///
/// Fails when applications are closed at `now`, when the user does not exist,
/// or when the user already has an application. The uniqueness of the owner
/// column still guards against two submissions racing past the check.
#[instrument(skip(db, form))]
pub async fn submit_application<C>(
    db: &C,
    user_id: i64,
    form: ApplicationForm,
    now: DateTime<Utc>,
) -> Result<ApplicationRecord>
where
    C: ConnectionTrait,
{
    if !period::is_open(db, now).await? {
        return Err(Error::ApplicationsClosed);
    }

    User::find_by_id(user_id)
        .one(db)
        .await?
        .ok_or(Error::UserNotFound { id: user_id })?;

    if application_for_user(db, user_id).await?.is_some() {
        return Err(Error::DuplicateApplication { user_id });
    }

    let mut model = application::ActiveModel {
        user_id: Set(user_id),
        timestamp: Set(now),
        last_update: Set(now),
        ..Default::default()
    };
    form.apply(&mut model)?;
    let application = model.insert(db).await?;

    info!(application_id = application.id, "Financial aid application submitted");
    Ok(ApplicationRecord {
        application,
        review: None,
    })
}

/// Replaces the applicant-supplied fields of an application.
///
/// Only allowed while the application is `Submitted`; once reviewers have
/// moved it on, the applicant communicates through messages instead.
#[instrument(skip(db, record, form), fields(application_id = record.application.id))]
pub async fn update_application<C>(
    db: &C,
    record: &mut ApplicationRecord,
    form: ApplicationForm,
    now: DateTime<Utc>,
) -> Result<()>
where
    C: ConnectionTrait,
{
    let status = record.status();
    if status != Status::Submitted {
        return Err(Error::NotEditable { status });
    }

    let mut model: application::ActiveModel = record.application.clone().into();
    form.apply(&mut model)?;
    model.last_update = Set(now);
    record.application = model.update(db).await?;
    Ok(())
}

/// Changes the status of an application.
///
/// When `status` differs from the current one, the review row is created if
/// needed and the new status is written immediately. The application row is
/// written only when `save` is set, so a status change never depends on the
/// applicant's data being saved. Returns whether the review row was written.
#[instrument(skip(db, record), fields(application_id = record.application.id))]
pub async fn set_status<C>(
    db: &C,
    record: &mut ApplicationRecord,
    status: Status,
    save: bool,
    now: DateTime<Utc>,
) -> Result<bool>
where
    C: ConnectionTrait,
{
    let previous = record.status();
    let changed = status != previous;
    if changed {
        let review = match record.review.clone() {
            Some(existing) => {
                let mut model: review::ActiveModel = existing.into();
                model.status = Set(status);
                model.last_update = Set(now);
                model.update(db).await?
            }
            None => {
                let mut model = new_review(record.application.id, now);
                model.status = Set(status);
                model.insert(db).await?
            }
        };
        info!(from = %previous, to = %status, "Application status changed");
        record.review = Some(review);
    } else {
        debug!(%status, "Status unchanged, nothing written");
    }

    if save {
        let mut model: application::ActiveModel = record.application.clone().into();
        model.last_update = Set(now);
        record.application = model.update(db).await?;
    }

    Ok(changed)
}

/// An unsaved review row with every reviewer field at its default.
pub(crate) fn new_review(application_id: i64, now: DateTime<Utc>) -> review::ActiveModel {
    review::ActiveModel {
        application_id: Set(application_id),
        last_update: Set(now),
        status: Set(Status::Submitted),
        amount: Set(Decimal::ZERO),
        grant_letter_sent: Set(false),
        reimbursement_method: Set(None),
        notes: Set(String::new()),
        disbursement_notes: Set(String::new()),
        promo_code: Set(String::new()),
        legal_name: Set(String::new()),
        address: Set(String::new()),
        ..Default::default()
    }
}

/// Latest time anything about the application changed: the application row,
/// its review row, or any attached message.
pub async fn get_last_update<C>(db: &C, record: &ApplicationRecord) -> Result<DateTime<Utc>>
where
    C: ConnectionTrait,
{
    let mut last_update = record.application.last_update;
    if let Some(review) = &record.review {
        last_update = last_update.max(review.last_update);
    }
    for msg in message::messages_for_application(db, record.application.id).await? {
        last_update = last_update.max(msg.submitted_at);
    }
    Ok(last_update)
}

/// Formats a last-update time as ISO 8601 with a space between date and time.
///
/// Sub-second precision is shown as microseconds, and omitted when zero.
#[must_use]
pub fn format_last_update(last_update: DateTime<Utc>) -> String {
    let pattern = if last_update.timestamp_subsec_nanos() == 0 {
        "%Y-%m-%d %H:%M:%S%:z"
    } else {
        "%Y-%m-%d %H:%M:%S%.6f%:z"
    };
    last_update.format(pattern).to_string()
}

/// [`get_last_update`] formatted with [`format_last_update`].
pub async fn get_last_update_display<C>(db: &C, record: &ApplicationRecord) -> Result<String>
where
    C: ConnectionTrait,
{
    get_last_update(db, record).await.map(format_last_update)
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]
    use super::*;
    use crate::core::message::post_message;
    use crate::test_utils::*;
    use chrono::Duration;

    #[tokio::test]
    async fn test_new_application_is_submitted() -> Result<()> {
        let (db, record) = setup_with_application().await?;

        assert!(record.review.is_none());
        assert_eq!(record.status(), Status::Submitted);
        assert_eq!(record.get_status_display(), "Submitted");

        let reloaded = load_application(&db, record.application.id).await?;
        assert_eq!(reloaded, record);
        Ok(())
    }

    #[tokio::test]
    async fn test_set_status_round_trips_every_status() -> Result<()> {
        let (db, mut record) = setup_with_application().await?;

        for status in Status::ALL {
            set_status(&db, &mut record, status, false, at(12, 0)).await?;
            assert_eq!(record.status(), status);

            let reloaded = load_application(&db, record.application.id).await?;
            assert_eq!(reloaded.status(), status);
            assert_eq!(reloaded.get_status_display(), status.label());
        }
        Ok(())
    }

    #[tokio::test]
    async fn test_set_status_to_submitted_without_review_writes_nothing() -> Result<()> {
        let (db, mut record) = setup_with_application().await?;

        let written = set_status(&db, &mut record, Status::Submitted, false, at(12, 0)).await?;
        assert!(!written);
        assert!(load_application(&db, record.application.id).await?.review.is_none());
        Ok(())
    }

    #[tokio::test]
    async fn test_set_status_is_idempotent() -> Result<()> {
        let (db, mut record) = setup_with_application().await?;

        assert!(set_status(&db, &mut record, Status::Offered, false, at(12, 0)).await?);
        assert!(!set_status(&db, &mut record, Status::Offered, false, at(13, 0)).await?);

        let review = load_application(&db, record.application.id)
            .await?
            .review
            .unwrap();
        assert_eq!(review.status, Status::Offered);
        assert_eq!(review.last_update, at(12, 0));
        Ok(())
    }

    #[tokio::test]
    async fn test_set_status_saves_application_only_when_asked() -> Result<()> {
        let (db, mut record) = setup_with_application().await?;
        let submitted_at = record.application.last_update;

        set_status(&db, &mut record, Status::InfoNeeded, false, at(12, 0)).await?;
        let reloaded = load_application(&db, record.application.id).await?;
        assert_eq!(reloaded.application.last_update, submitted_at);

        set_status(&db, &mut record, Status::Offered, true, at(13, 0)).await?;
        let reloaded = load_application(&db, record.application.id).await?;
        assert_eq!(reloaded.application.last_update, at(13, 0));
        assert_eq!(reloaded.status(), Status::Offered);

        // Unchanged status still saves the application when asked
        set_status(&db, &mut record, Status::Offered, true, at(14, 0)).await?;
        let reloaded = load_application(&db, record.application.id).await?;
        assert_eq!(reloaded.application.last_update, at(14, 0));
        assert_eq!(reloaded.review.unwrap().last_update, at(13, 0));
        Ok(())
    }

    #[tokio::test]
    async fn test_offer_switches_buttons() -> Result<()> {
        let (db, mut record) = setup_with_application().await?;
        assert!(record.show_edit_button());
        assert!(!record.show_accept_button());

        set_status(&db, &mut record, Status::Offered, false, at(12, 0)).await?;
        let reloaded = load_application(&db, record.application.id).await?;
        assert!(reloaded.show_accept_button());
        assert!(reloaded.show_decline_button());
        assert!(reloaded.show_request_more_button());
        assert!(!reloaded.show_edit_button());
        assert!(!reloaded.show_withdraw_button());
        Ok(())
    }

    #[tokio::test]
    async fn test_withdrawn_hides_status_button() -> Result<()> {
        let (db, mut record) = setup_with_application().await?;
        assert!(record.show_status_button());
        assert!(record.show_withdraw_button());

        set_status(&db, &mut record, Status::InfoNeeded, false, at(12, 0)).await?;
        assert!(record.show_provide_info_button());
        assert!(record.show_withdraw_button());

        set_status(&db, &mut record, Status::Withdrawn, false, at(13, 0)).await?;
        assert!(!record.show_status_button());
        assert!(!record.show_provide_info_button());
        Ok(())
    }

    #[tokio::test]
    async fn test_any_status_may_follow_any_other() -> Result<()> {
        let (db, mut record) = setup_with_application().await?;

        set_status(&db, &mut record, Status::Accepted, false, at(12, 0)).await?;
        set_status(&db, &mut record, Status::Submitted, false, at(13, 0)).await?;
        assert_eq!(record.status(), Status::Submitted);
        assert!(record.review.is_some());
        assert!(record.show_edit_button());
        Ok(())
    }

    #[tokio::test]
    async fn test_submit_requires_open_period() -> Result<()> {
        let db = setup_test_db().await?;
        let user = create_test_user(&db, "closed").await?;

        let result = submit_application(&db, user.id, sample_form(), at(10, 0)).await;
        assert!(matches!(result, Err(Error::ApplicationsClosed)));
        Ok(())
    }

    #[tokio::test]
    async fn test_submit_rejects_second_application() -> Result<()> {
        let (db, record) = setup_with_application().await?;

        let result =
            submit_application(&db, record.application.user_id, sample_form(), at(11, 0)).await;
        assert!(matches!(
            result,
            Err(Error::DuplicateApplication { user_id }) if user_id == record.application.user_id
        ));
        Ok(())
    }

    #[tokio::test]
    async fn test_submit_rejects_unknown_user() -> Result<()> {
        let db = setup_test_db().await?;
        create_open_period(&db).await?;

        let result = submit_application(&db, 999, sample_form(), at(10, 45)).await;
        assert!(matches!(result, Err(Error::UserNotFound { id: 999 })));
        Ok(())
    }

    #[tokio::test]
    async fn test_submit_rejects_negative_amount() -> Result<()> {
        let db = setup_test_db().await?;
        create_open_period(&db).await?;
        let user = create_test_user(&db, "negative").await?;

        let mut form = sample_form();
        form.amount_requested = Decimal::new(-500, 0);
        let result = submit_application(&db, user.id, form, at(10, 45)).await;
        assert!(matches!(result, Err(Error::InvalidAmount { .. })));
        assert!(application_for_user(&db, user.id).await?.is_none());
        Ok(())
    }

    #[tokio::test]
    async fn test_update_only_while_submitted() -> Result<()> {
        let (db, mut record) = setup_with_application().await?;

        let mut form = sample_form();
        form.travel_plans = "Train from Lyon".to_string();
        form.amount_requested = Decimal::new(75_025, 2);
        update_application(&db, &mut record, form.clone(), at(11, 0)).await?;

        let reloaded = application_for_user(&db, record.application.user_id)
            .await?
            .unwrap();
        assert_eq!(reloaded.application.travel_plans, "Train from Lyon");
        assert_eq!(reloaded.application.amount_requested, Decimal::new(75_025, 2));
        assert_eq!(reloaded.application.last_update, at(11, 0));

        set_status(&db, &mut record, Status::Offered, false, at(12, 0)).await?;
        let result = update_application(&db, &mut record, form, at(13, 0)).await;
        assert!(matches!(
            result,
            Err(Error::NotEditable {
                status: Status::Offered
            })
        ));
        Ok(())
    }

    #[tokio::test]
    async fn test_load_missing_application() -> Result<()> {
        let db = setup_test_db().await?;
        let result = load_application(&db, 42).await;
        assert!(matches!(result, Err(Error::ApplicationNotFound { id: 42 })));
        Ok(())
    }

    #[tokio::test]
    async fn test_last_update_is_latest_of_all_sources() -> Result<()> {
        let (db, mut record) = setup_with_application().await?;
        let submitted_at = record.application.last_update;
        assert_eq!(get_last_update(&db, &record).await?, submitted_at);

        set_status(&db, &mut record, Status::InfoNeeded, false, at(12, 0)).await?;
        assert_eq!(get_last_update(&db, &record).await?, at(12, 0));

        let user_id = record.application.user_id;
        post_message(&db, record.application.id, user_id, "Here you go", true, at(15, 30))
            .await?;
        post_message(&db, record.application.id, user_id, "Earlier", true, at(13, 0)).await?;

        let last = get_last_update(&db, &record).await?;
        assert_eq!(last, at(15, 30));
        assert!(last >= record.application.last_update);
        assert!(last >= record.review.as_ref().unwrap().last_update);
        assert_eq!(
            get_last_update_display(&db, &record).await?,
            "2026-03-01 15:30:00+00:00"
        );
        Ok(())
    }

    #[test]
    fn test_format_last_update_keeps_fraction() {
        let ts = at(9, 5) + Duration::milliseconds(250);
        assert_eq!(format_last_update(ts), "2026-03-01 09:05:00.250000+00:00");
        assert_eq!(format_last_update(at(9, 5)), "2026-03-01 09:05:00+00:00");
    }

    #[tokio::test]
    async fn test_detail_url() -> Result<()> {
        let (_db, record) = setup_with_application().await?;
        assert_eq!(
            record.fa_app_url(),
            format!("/finaid/review/{}/", record.application.id)
        );
        Ok(())
    }
}
