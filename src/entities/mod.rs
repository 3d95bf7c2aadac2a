//! Entity module - SeaORM entity definitions for the financial aid tables.
//! Each entity has a Model struct for data and an Entity struct for operations.

pub mod application;
pub mod application_period;
pub mod choices;
pub mod email_template;
pub mod message;
pub mod message_seen;
pub mod receipt;
pub mod review;
pub mod user;

// Re-export specific types to avoid conflicts
pub use application::{
    Column as ApplicationColumn, Entity as Application, Model as ApplicationModel,
};
pub use application_period::{
    Column as ApplicationPeriodColumn, Entity as ApplicationPeriod,
    Model as ApplicationPeriodModel,
};
pub use choices::{ExperienceLevel, PaymentMethod, Presenting, Status};
pub use email_template::{
    Column as EmailTemplateColumn, Entity as EmailTemplate, Model as EmailTemplateModel,
};
pub use message::{Column as MessageColumn, Entity as Message, Model as MessageModel};
pub use message_seen::{
    Column as MessageSeenColumn, Entity as MessageSeen, Model as MessageSeenModel,
};
pub use receipt::{Column as ReceiptColumn, Entity as Receipt, Model as ReceiptModel};
pub use review::{Column as ReviewColumn, Entity as Review, Model as ReviewModel};
pub use user::{Column as UserColumn, Entity as User, Model as UserModel};
