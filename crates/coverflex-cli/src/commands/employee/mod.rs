//! Employee resource commands.
//!
//! Each command fetches one document and prints it as JSON on stdout.

pub mod benefits;
pub mod cards;
pub mod company;
pub mod compensation;
pub mod family;
pub mod operations;

pub use benefits::BenefitsArgs;
pub use cards::CardsArgs;
pub use company::CompanyArgs;
pub use compensation::CompensationArgs;
pub use family::FamilyArgs;
pub use operations::OperationsArgs;
