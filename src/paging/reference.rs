use log::debug;

use super::PageId;
use crate::error::Result;
use crate::parse_err;

/// Parse a comma separated reference string such as `"7, 0, 1, 2"`.
///
/// Whitespace around tokens is ignored and a blank string is an empty sequence.
/// Any other token that is not an integer, including an empty one between two
/// commas, fails the whole string.
pub fn parse_reference_string(input: &str) -> Result<Vec<PageId>> {
    if input.trim().is_empty() {
        return Ok(vec![]);
    }
    let pages = input
        .split(',')
        .enumerate()
        .map(|(i, token)| {
            let token = token.trim();
            token.parse::<PageId>().map_err(|_| {
                parse_err!(
                    "invalid page reference '{}' at position {}, expected an integer",
                    token,
                    i + 1
                )
            })
        })
        .collect::<Result<Vec<_>>>()?;
    debug!("parsed reference string of {} pages", pages.len());
    Ok(pages)
}
