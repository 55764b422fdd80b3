//! Subcommand implementations for rosterctl

use std::path::Path;

use anyhow::{bail, Context, Result};
use rostercache::{CacheStats, UserManager};
use rosterdb::{
    group_by_role, parse_record, parse_update, summary_stats, timed, FieldUpdate, LineReader,
    Role, RoleGroups, Summary, User,
};
use serde::Serialize;
use tracing::{debug, info};

/// Result of the `demo` scenario
#[derive(Debug, Serialize)]
pub struct DemoReport {
    pub found: Option<User>,
    pub users: Vec<User>,
    pub groups: RoleGroups,
    pub cache: CacheStats,
}

/// Result of an `import` run
#[derive(Debug, Serialize)]
pub struct ImportReport {
    pub imported: usize,
    pub updated: usize,
    pub users: Vec<User>,
    pub groups: RoleGroups,
    pub cache: CacheStats,
}

/// Parse an `ID:FIELD=VALUE` command-line update
pub fn parse_update_arg(arg: &str) -> std::result::Result<(u64, FieldUpdate), String> {
    let (id, assignment) = arg
        .split_once(':')
        .ok_or_else(|| format!("expected ID:FIELD=VALUE, got '{}'", arg))?;
    let id = id
        .trim()
        .parse::<u64>()
        .map_err(|e| format!("invalid user id '{}': {}", id, e))?;
    let update = parse_update(assignment).map_err(|e| e.to_string())?;
    Ok((id, update))
}

/// Create two users, look one up, list and group them, and time a listing
pub fn demo(limit: usize) -> Result<DemoReport> {
    let manager = UserManager::new();

    let alice = manager.create("Alice", "alice@example.com", Role::Admin)?;
    manager.create("Bob", "bob@example.com", Role::default())?;

    let found = manager.get(alice.id)?;
    let users = manager.list(None, limit);
    let groups = group_by_role(&users, None);

    timed("user listing", || manager.list(None, limit));

    Ok(DemoReport {
        found,
        users,
        groups,
        cache: manager.stats(),
    })
}

/// Import `name, email[, role]` records from a file
///
/// Blank lines and lines starting with `#` are skipped. The first bad line
/// aborts the import.
pub fn import(
    path: &Path,
    role: Option<&Role>,
    updates: &[(u64, FieldUpdate)],
    limit: usize,
) -> Result<ImportReport> {
    timed(&format!("import of {}", path.display()), || -> Result<ImportReport> {
        let manager = UserManager::new();
        let reader = LineReader::new(path);
        let mut imported = 0;

        for (idx, line) in reader.lines().enumerate() {
            let line_no = idx + 1;
            let line = line.with_context(|| format!("Failed to read {}", path.display()))?;
            if line.is_empty() || line.starts_with('#') {
                continue;
            }

            let record =
                parse_record(&line).with_context(|| format!("line {}: bad record", line_no))?;
            let user = manager
                .create_from(record)
                .with_context(|| format!("line {}: cannot create user", line_no))?;
            debug!("line {}: created user {}", line_no, user.id);
            imported += 1;
        }
        info!("Imported {} users from {}", imported, path.display());

        let mut updated = 0;
        for (id, update) in updates {
            let user = manager
                .update(*id, std::slice::from_ref(update))
                .with_context(|| format!("cannot update user {}", id))?;
            match user {
                Some(_) => updated += 1,
                None => bail!("cannot update user {}: not found", id),
            }
        }

        let users = manager.list(role, limit);
        let groups = group_by_role(&users, role);

        Ok(ImportReport {
            imported,
            updated,
            users,
            groups,
            cache: manager.stats(),
        })
    })
}

/// Summary statistics over the given numbers
pub fn stats(numbers: &[f64]) -> Result<Summary> {
    Ok(summary_stats(numbers)?)
}
