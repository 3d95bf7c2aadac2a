//! Status-gated applicant actions.
//!
//! Which buttons an applicant sees is a pure function of the application's
//! status. The table below is the only place that mapping lives. It does not
//! restrict [`crate::core::application::set_status`]: any status may follow
//! any other, the table only decides what the applicant is offered.

use crate::entities::Status;

/// Actions available to the applicant for one status.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[allow(clippy::struct_excessive_bools)]
pub struct Actions {
    /// View the status page
    pub status: bool,
    /// Edit the submitted application
    pub edit: bool,
    /// Withdraw the request
    pub withdraw: bool,
    /// Accept an offer
    pub accept: bool,
    /// Decline an offer
    pub decline: bool,
    /// Ask for more than was offered
    pub request_more: bool,
    /// Answer a request for information
    pub provide_info: bool,
}

const NONE: Actions = Actions {
    status: false,
    edit: false,
    withdraw: false,
    accept: false,
    decline: false,
    request_more: false,
    provide_info: false,
};

/// Returns the actions an applicant may take while the application has `status`.
#[must_use]
pub const fn actions_for(status: Status) -> Actions {
    match status {
        Status::Submitted => Actions {
            status: true,
            edit: true,
            withdraw: true,
            ..NONE
        },
        Status::InfoNeeded => Actions {
            status: true,
            withdraw: true,
            provide_info: true,
            ..NONE
        },
        Status::Offered => Actions {
            status: true,
            accept: true,
            decline: true,
            request_more: true,
            ..NONE
        },
        Status::Withdrawn => NONE,
        Status::NeedMore | Status::Rejected | Status::Declined | Status::Accepted => Actions {
            status: true,
            ..NONE
        },
    }
}
