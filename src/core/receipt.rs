//! Receipt uploads.
//!
//! Files land under `<media root>/finaid_receipts/<username>/<filename>`; the
//! receipt row stores the part after the media root. An existing file is never
//! replaced: a second upload of `receipt.jpg` is stored as `receipt_1.jpg`.

use crate::{
    core::{money, user},
    entities::{Application, Receipt, receipt},
    errors::{Error, Result},
};
use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use sea_orm::{QueryOrder, Set, prelude::*};
use std::{io::ErrorKind, path::Path};
use tokio::{fs::OpenOptions, io::AsyncWriteExt};
use tracing::{debug, info, instrument, warn};

const RECEIPT_DIR: &str = "finaid_receipts";

/// Storage path for a receipt, relative to the media root.
///
/// Rejects names that are empty or could step outside the user's directory.
pub fn receipt_path(username: &str, filename: &str) -> Result<String> {
    let invalid = |name: &str| {
        name.is_empty()
            || name == "."
            || name == ".."
            || name.contains(['/', '\\', '\0'])
    };
    if invalid(filename) {
        return Err(Error::InvalidFilename {
            filename: filename.to_string(),
        });
    }
    if invalid(username) {
        return Err(Error::InvalidUsername {
            username: username.to_string(),
        });
    }
    Ok(format!("{RECEIPT_DIR}/{username}/{filename}"))
}

/// `filename` with `_<n>` inserted before its extension; `n = 0` is the name
/// itself.
fn numbered_filename(filename: &str, n: usize) -> String {
    if n == 0 {
        return filename.to_string();
    }
    match filename.rfind('.') {
        Some(dot) if dot > 0 => format!("{}_{n}{}", &filename[..dot], &filename[dot..]),
        _ => format!("{filename}_{n}"),
    }
}

/// Writes `contents` to the first free name derived from `filename` below
/// the user's receipt directory and returns its path relative to `media_root`.
async fn store_file(
    media_root: &Path,
    username: &str,
    filename: &str,
    contents: &[u8],
) -> Result<String> {
    let mut n = 0;
    loop {
        let relative = receipt_path(username, &numbered_filename(filename, n))?;
        let target = media_root.join(&relative);
        if let Some(dir) = target.parent() {
            tokio::fs::create_dir_all(dir).await?;
        }
        match OpenOptions::new()
            .write(true)
            .create_new(true)
            .open(&target)
            .await
        {
            Ok(mut file) => {
                file.write_all(contents).await?;
                file.flush().await?;
                return Ok(relative);
            }
            Err(e) if e.kind() == ErrorKind::AlreadyExists => {
                debug!(%relative, "Receipt name taken, trying next");
                n += 1;
            }
            Err(e) => return Err(e.into()),
        }
    }
}

/// Details of an uploaded receipt.
#[derive(Debug, Clone)]
pub struct ReceiptUpload<'a> {
    /// What the receipt is for
    pub description: &'a str,
    /// Receipt total in US dollars
    pub amount: Decimal,
    /// Name of the uploaded file
    pub filename: &'a str,
    /// File contents
    pub contents: &'a [u8],
}

/// Stores an uploaded receipt file and records it against an application.
///
/// The file is written before the row is inserted, so a failed write leaves no
/// dangling receipt row, and a failed insert removes the written file.
#[instrument(skip(db, media_root, upload), fields(filename = upload.filename))]
pub async fn upload_receipt<C>(
    db: &C,
    media_root: &Path,
    application_id: i64,
    upload: ReceiptUpload<'_>,
    now: DateTime<Utc>,
) -> Result<receipt::Model>
where
    C: ConnectionTrait,
{
    let amount = money::validate_amount(upload.amount)?;
    let application = Application::find_by_id(application_id)
        .one(db)
        .await?
        .ok_or(Error::ApplicationNotFound { id: application_id })?;
    let owner = user::get_user(db, application.user_id).await?;

    // Validate before touching the filesystem
    receipt_path(&owner.username, upload.filename)?;
    let relative =
        store_file(media_root, &owner.username, upload.filename, upload.contents).await?;

    let inserted = receipt::ActiveModel {
        timestamp: Set(now),
        application_id: Set(application_id),
        description: Set(upload.description.to_string()),
        amount: Set(amount),
        receipt_image: Set(relative.clone()),
        logged: Set(false),
        ..Default::default()
    }
    .insert(db)
    .await;
    let saved = match inserted {
        Ok(saved) => saved,
        Err(e) => {
            if let Err(remove_err) = tokio::fs::remove_file(media_root.join(&relative)).await {
                warn!(%relative, "Failed to remove orphaned receipt file: {}", remove_err);
            }
            return Err(e.into());
        }
    };
    info!(receipt_id = saved.id, "Receipt stored");
    Ok(saved)
}

/// Receipts for an application, oldest upload first.
pub async fn receipts_for_application<C>(db: &C, application_id: i64) -> Result<Vec<receipt::Model>>
where
    C: ConnectionTrait,
{
    Receipt::find()
        .filter(receipt::Column::ApplicationId.eq(application_id))
        .order_by_asc(receipt::Column::Timestamp)
        .order_by_asc(receipt::Column::Id)
        .all(db)
        .await
        .map_err(Into::into)
}

/// Marks a receipt as recorded by accounting.
pub async fn mark_logged<C>(db: &C, receipt_id: i64) -> Result<receipt::Model>
where
    C: ConnectionTrait,
{
    let existing = Receipt::find_by_id(receipt_id)
        .one(db)
        .await?
        .ok_or(Error::ReceiptNotFound { id: receipt_id })?;
    if existing.logged {
        return Ok(existing);
    }
    let mut model: receipt::ActiveModel = existing.into();
    model.logged = Set(true);
    model.update(db).await.map_err(Into::into)
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]
    use super::*;
    use crate::test_utils::*;

    fn upload<'a>(filename: &'a str, contents: &'a [u8]) -> ReceiptUpload<'a> {
        ReceiptUpload {
            description: "Train ticket",
            amount: Decimal::new(8_950, 2),
            filename,
            contents,
        }
    }

    #[test]
    fn test_receipt_path_is_namespaced_by_username() {
        assert_eq!(
            receipt_path("ada", "ticket.pdf").unwrap(),
            "finaid_receipts/ada/ticket.pdf"
        );
    }

    #[test]
    fn test_receipt_path_rejects_traversal() {
        for bad in ["", "..", "../secrets", "a/b.pdf", "a\\b.pdf"] {
            assert!(matches!(
                receipt_path("ada", bad),
                Err(Error::InvalidFilename { .. })
            ));
        }
    }

    #[tokio::test]
    async fn test_upload_writes_file_and_row() -> Result<()> {
        let (db, record) = setup_with_application().await?;
        let media = tempfile::tempdir()?;

        let saved = upload_receipt(
            &db,
            media.path(),
            record.application.id,
            upload("ticket.pdf", b"%PDF-1.4"),
            at(16, 0),
        )
        .await?;

        assert_eq!(saved.receipt_image, "finaid_receipts/applicant/ticket.pdf");
        assert_eq!(saved.amount, Decimal::new(8_950, 2));
        assert!(!saved.logged);
        let stored = std::fs::read(media.path().join(&saved.receipt_image))?;
        assert_eq!(stored, b"%PDF-1.4");
        Ok(())
    }

    #[test]
    fn test_numbered_filename() {
        assert_eq!(numbered_filename("receipt.jpg", 0), "receipt.jpg");
        assert_eq!(numbered_filename("receipt.jpg", 2), "receipt_2.jpg");
        assert_eq!(numbered_filename("scan.tar.gz", 1), "scan.tar_1.gz");
        assert_eq!(numbered_filename("README", 1), "README_1");
        assert_eq!(numbered_filename(".hidden", 1), ".hidden_1");
    }

    #[tokio::test]
    async fn test_same_filename_keeps_both_files() -> Result<()> {
        let (db, record) = setup_with_application().await?;
        let media = tempfile::tempdir()?;

        let first = upload_receipt(
            &db,
            media.path(),
            record.application.id,
            upload("receipt.jpg", b"HOTEL"),
            at(16, 0),
        )
        .await?;
        let second = upload_receipt(
            &db,
            media.path(),
            record.application.id,
            upload("receipt.jpg", b"TAXI"),
            at(16, 5),
        )
        .await?;

        assert_eq!(first.receipt_image, "finaid_receipts/applicant/receipt.jpg");
        assert_eq!(second.receipt_image, "finaid_receipts/applicant/receipt_1.jpg");
        assert_eq!(std::fs::read(media.path().join(&first.receipt_image))?, b"HOTEL");
        assert_eq!(std::fs::read(media.path().join(&second.receipt_image))?, b"TAXI");
        Ok(())
    }

    #[tokio::test]
    async fn test_failed_insert_removes_file() -> Result<()> {
        let (db, record) = setup_with_application().await?;
        let media = tempfile::tempdir()?;
        db.execute_unprepared("DROP TABLE finaid_receipts").await?;

        let result = upload_receipt(
            &db,
            media.path(),
            record.application.id,
            upload("lost.pdf", b"lost"),
            at(16, 0),
        )
        .await;
        assert!(matches!(result, Err(Error::Database(_))));
        assert!(!media.path().join("finaid_receipts/applicant/lost.pdf").exists());
        Ok(())
    }

    #[test]
    fn test_unusable_username_is_rejected() {
        assert!(matches!(
            receipt_path("../admin", "ticket.pdf"),
            Err(Error::InvalidUsername { .. })
        ));
    }

    #[tokio::test]
    async fn test_bad_filename_stores_nothing() -> Result<()> {
        let (db, record) = setup_with_application().await?;
        let media = tempfile::tempdir()?;

        let result = upload_receipt(
            &db,
            media.path(),
            record.application.id,
            upload("../escape.pdf", b"x"),
            at(16, 0),
        )
        .await;
        assert!(matches!(result, Err(Error::InvalidFilename { .. })));
        assert!(receipts_for_application(&db, record.application.id).await?.is_empty());
        Ok(())
    }

    #[tokio::test]
    async fn test_mark_logged() -> Result<()> {
        let (db, record) = setup_with_application().await?;
        let media = tempfile::tempdir()?;
        let first = upload_receipt(
            &db,
            media.path(),
            record.application.id,
            upload("hotel.pdf", b"hotel"),
            at(16, 0),
        )
        .await?;
        upload_receipt(
            &db,
            media.path(),
            record.application.id,
            upload("taxi.pdf", b"taxi"),
            at(16, 5),
        )
        .await?;

        let logged = mark_logged(&db, first.id).await?;
        assert!(logged.logged);

        let flags: Vec<bool> = receipts_for_application(&db, record.application.id)
            .await?
            .iter()
            .map(|r| r.logged)
            .collect();
        assert_eq!(flags, vec![true, false]);
        Ok(())
    }
}
