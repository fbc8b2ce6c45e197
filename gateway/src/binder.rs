//! Raw-side request binding: path variables, query strings, and the
//! contract's documented ID validations.
//!
//! Everything here runs before dispatch; a failure short-circuits the
//! request and the external handler is never invoked.

use std::collections::HashMap;

use error::{GatewayError, Result};
use schema::PetStatus;

use crate::registry::PathVars;

/// Decoded query parameters. Repeated keys keep the last value.
pub type Query = HashMap<String, String>;

/// Decode a raw query string with percent- and plus-decoding.
pub fn parse_query(raw: Option<&str>) -> Query {
    url::form_urlencoded::parse(raw.unwrap_or("").as_bytes())
        .into_owned()
        .collect()
}

/// A path variable declared as a string. The template guarantees
/// presence; a missing name is a registration defect.
pub fn path_string(vars: &PathVars, name: &str) -> Result<String> {
    vars.get(name).cloned().ok_or_else(|| {
        GatewayError::invalid_argument(format!("{name}: missing path parameter"))
    })
}

/// A path variable declared as int64.
pub fn path_i64(vars: &PathVars, name: &str) -> Result<i64> {
    let raw = path_string(vars, name)?;
    raw.parse::<i64>().map_err(|_| {
        GatewayError::invalid_argument(format!("{name}: expected an integer, got \"{raw}\""))
    })
}

/// A required (implicit presence) query parameter.
pub fn required_query<'a>(query: &'a Query, name: &str) -> Result<&'a str> {
    query.get(name).map(String::as_str).ok_or_else(|| {
        GatewayError::invalid_argument(format!("{name}: missing required query parameter"))
    })
}

/// IDs documented as strictly positive (pet ids, order deletion).
pub fn positive_id(name: &str, id: i64) -> Result<i64> {
    if id >= 1 {
        Ok(id)
    } else {
        Err(GatewayError::invalid_argument(format!(
            "{name}: must be a positive integer, got {id}"
        )))
    }
}

/// Order lookup ids are contractually restricted to [1, 10].
pub fn order_id_in_range(id: i64) -> Result<i64> {
    if (1..=10).contains(&id) {
        Ok(id)
    } else {
        Err(GatewayError::invalid_argument(format!(
            "orderId: must be between 1 and 10, got {id}"
        )))
    }
}

/// Split a comma-separated filter value, validating each element as a
/// pet status. Any invalid element fails the whole request.
pub fn pet_status_filter(raw: &str) -> Result<Vec<PetStatus>> {
    raw.split(',')
        .map(|name| {
            PetStatus::from_name(name).ok_or_else(|| {
                GatewayError::invalid_argument(format!("status: unknown status \"{name}\""))
            })
        })
        .collect()
}

/// Split a comma-separated tag filter; tags are free-form strings but
/// empty elements are rejected.
pub fn tag_filter(raw: &str) -> Result<Vec<String>> {
    raw.split(',')
        .map(|tag| {
            if tag.is_empty() {
                Err(GatewayError::invalid_argument("tags: empty tag in filter"))
            } else {
                Ok(tag.to_string())
            }
        })
        .collect()
}
