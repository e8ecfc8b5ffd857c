//! # telephone-migrate
//!
//! One-shot migration of service argument declarations.
//!
//! Older services relied on `required: true` to add a presence rule. The
//! migration makes that rule explicit:
//!
//! ```text
//! argument :user, required: true
//! argument :user, required: true, validates: { presence: true }
//! ```
//!
//! Lines that already carry `validates:` are left untouched, so the
//! migration is idempotent.

mod error;
mod migrate;
mod rewrite;

pub use error::MigrateError;
pub use migrate::{FileChange, MigrateOptions, MigrationReport, migrate};
pub use rewrite::{PRESENCE_OPTION, Rewrite, rewrite_line, rewrite_source};
