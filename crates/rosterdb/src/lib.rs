//! # rosterdb
//!
//! User records and the pieces around them.
//!
//! ## Contents
//! - `User`, `Role` and typed field updates
//! - `UserStore`: the durable-store seam (`NullStore` stub, `MemoryStore`)
//! - nom parsers for `name, email[, role]` records and `field=value` updates
//! - `LineReader`: lazy, restartable trimmed-line reader
//! - `group_by_role`, `summary_stats` and the scoped `Timer`

#![warn(missing_docs)]

mod error;
mod group;
mod lines;
pub mod parser;
mod store;
mod summary;
mod timer;
mod user;

pub use error::{Error, Result};
pub use group::{group_by_role, RoleGroups};
pub use lines::{LineReader, Lines};
pub use parser::{parse_record, parse_update};
pub use store::{MemoryStore, NullStore, UserStore};
pub use summary::{summary_stats, Summary};
pub use timer::{timed, Timer};
pub use user::{validate_email, FieldUpdate, NewUser, Role, User, UserField};
