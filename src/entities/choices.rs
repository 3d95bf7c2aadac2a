//! Closed choice lists shared by the financial aid tables.
//!
//! The stored values are part of the persisted schema: renumbering a variant
//! or renaming a string value breaks every existing row.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Lifecycle state of a financial aid request.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, EnumIter, DeriveActiveEnum, Serialize, Deserialize,
)]
#[sea_orm(rs_type = "i32", db_type = "Integer")]
#[derive(Default)]
pub enum Status {
    /// Initial state; also what an application without review data reports
    #[sea_orm(num_value = 1)]
    #[default]
    Submitted,
    /// Applicant pulled the request
    #[sea_orm(num_value = 2)]
    Withdrawn,
    /// Reviewers asked the applicant for more information
    #[sea_orm(num_value = 3)]
    InfoNeeded,
    /// A grant has been offered
    #[sea_orm(num_value = 4)]
    Offered,
    /// Reviewers turned the request down
    #[sea_orm(num_value = 5)]
    Rejected,
    /// Applicant declined the offer
    #[sea_orm(num_value = 6)]
    Declined,
    /// Applicant accepted the offer
    #[sea_orm(num_value = 7)]
    Accepted,
    /// Applicant answered an offer by asking for more
    #[sea_orm(num_value = 8)]
    NeedMore,
}

impl Status {
    /// All statuses in the order they are listed to reviewers.
    pub const ALL: [Self; 8] = [
        Self::Submitted,
        Self::Withdrawn,
        Self::InfoNeeded,
        Self::Offered,
        Self::NeedMore,
        Self::Rejected,
        Self::Declined,
        Self::Accepted,
    ];

    /// Human-readable label.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Submitted => "Submitted",
            Self::Withdrawn => "Withdrawn",
            Self::InfoNeeded => "Information needed",
            Self::Offered => "Offered",
            Self::NeedMore => "Requesting more funds",
            Self::Rejected => "Rejected",
            Self::Declined => "Declined",
            Self::Accepted => "Accepted",
        }
    }
}

impl fmt::Display for Status {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// How granted funds are paid out.
#[derive(Debug, Clone, Copy, PartialEq, Eq, EnumIter, DeriveActiveEnum, Serialize, Deserialize)]
#[sea_orm(rs_type = "i32", db_type = "Integer")]
pub enum PaymentMethod {
    /// Paper check
    #[sea_orm(num_value = 1)]
    Check,
    /// Bank wire
    #[sea_orm(num_value = 2)]
    Wire,
    /// PayPal transfer
    #[sea_orm(num_value = 3)]
    PayPal,
}

impl PaymentMethod {
    /// Human-readable label.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Check => "Check",
            Self::Wire => "Wire Transfer",
            Self::PayPal => "PayPal",
        }
    }
}

/// Whether the applicant is presenting at the conference.
#[derive(Debug, Clone, Copy, PartialEq, Eq, EnumIter, DeriveActiveEnum, Serialize, Deserialize)]
#[sea_orm(rs_type = "i32", db_type = "Integer")]
pub enum Presenting {
    /// Accepted to present
    #[sea_orm(num_value = 1)]
    Yes,
    /// Not presenting
    #[sea_orm(num_value = 2)]
    No,
    /// Talk or poster proposal still pending
    #[sea_orm(num_value = 3)]
    Undecided,
}

impl Presenting {
    /// Human-readable label.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Yes => "Yes",
            Self::No => "No",
            Self::Undecided => "I have applied but don't know yet",
        }
    }
}

/// Self-reported Python experience.
#[derive(Debug, Clone, Copy, PartialEq, Eq, EnumIter, DeriveActiveEnum, Serialize, Deserialize)]
#[sea_orm(rs_type = "String", db_type = "String(StringLen::N(200))")]
pub enum ExperienceLevel {
    /// New to Python
    #[sea_orm(string_value = "Beginner")]
    Beginner,
    /// Uses Python regularly
    #[sea_orm(string_value = "Intermediate")]
    Intermediate,
    /// Deep Python knowledge
    #[sea_orm(string_value = "Expert")]
    Expert,
}
