//! Record and update parsers using nom
//!
//! Record line format:
//! ```text
//! name, email[, role]
//! ```
//!
//! Update format:
//! ```text
//! field=value
//! ```

use nom::{
    bytes::complete::{take_while, take_while1},
    character::complete::{char, space0},
    combinator::{all_consuming, map, rest},
    multi::separated_list1,
    sequence::{separated_pair, terminated},
    IResult,
};

use crate::error::{Error, Result};
use crate::user::{FieldUpdate, NewUser, Role, UserField};

fn field(input: &str) -> IResult<&str, &str> {
    map(take_while(|c: char| c != ','), str::trim)(input)
}

fn fields(input: &str) -> IResult<&str, Vec<&str>> {
    all_consuming(separated_list1(char(','), field))(input)
}

fn field_name(input: &str) -> IResult<&str, &str> {
    take_while1(|c: char| c.is_ascii_alphanumeric() || c == '_')(input)
}

fn assignment(input: &str) -> IResult<&str, (&str, &str)> {
    all_consuming(separated_pair(terminated(field_name, space0), char('='), rest))(input)
}

/// Parse a `name, email[, role]` record line
///
/// Only the shape is checked here; email validation happens on create.
pub fn parse_record(line: &str) -> Result<NewUser> {
    let (_, parts) = fields(line)?;

    let (name, email, role) = match parts.as_slice() {
        [name, email] => (*name, *email, Role::default()),
        [name, email, role] => (*name, *email, role.parse()?),
        _ => {
            return Err(Error::Parse(format!(
                "expected 'name, email[, role]', got {} fields",
                parts.len()
            )))
        }
    };

    if name.is_empty() {
        return Err(Error::Parse("record has an empty name".to_string()));
    }

    Ok(NewUser {
        name: name.to_string(),
        email: email.to_string(),
        role,
    })
}

/// Parse a `field=value` update
///
/// Whitespace around the field name and the value is ignored.
pub fn parse_update(text: &str) -> Result<FieldUpdate> {
    let (_, (name, value)) = assignment(text.trim())?;
    let field: UserField = name.parse()?;
    FieldUpdate::new(field, value.trim())
}
