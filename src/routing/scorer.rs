//! Match scoring.
//!
//! A route scores 0 when any declared constraint fails. Otherwise each
//! satisfied constraint adds weight:
//!
//! | constraint            | weight                  |
//! |-----------------------|-------------------------|
//! | host                  | 1000                    |
//! | tenant                | 500                     |
//! | path prefix           | 10 per prefix character |
//! | path equals prefix    | 100                     |
//! | each header           | 50                      |
//!
//! A route with no constraints at all scores 0 and therefore cannot win.

use crate::routing::matcher::{host_matches, path_matches};
use crate::routing::pattern::CompiledRoute;
use crate::routing::request::RequestView;

pub const HOST_WEIGHT: u32 = 1000;
pub const TENANT_WEIGHT: u32 = 500;
pub const PATH_CHAR_WEIGHT: u32 = 10;
pub const EXACT_PATH_BONUS: u32 = 100;
pub const HEADER_WEIGHT: u32 = 50;

/// Score `route` against a request whose tenant has already been extracted.
pub fn score(req: &RequestView<'_>, tenant: &str, route: &CompiledRoute) -> u32 {
    let def = &route.definition;
    let mut total = 0u32;

    if !def.host.is_empty() {
        if !host_matches(&def.host, req.host()) {
            return 0;
        }
        total = total.saturating_add(HOST_WEIGHT);
    }

    if !def.tenant_id.is_empty() {
        if def.tenant_id != tenant {
            return 0;
        }
        total = total.saturating_add(TENANT_WEIGHT);
    }

    if !def.path_prefix.is_empty() {
        let path = req.path();
        if !path_matches(&def.path_prefix, route.path_pattern.as_ref(), path) {
            return 0;
        }
        total = total.saturating_add(path_weight(def.path_prefix.len()));
        if path == def.path_prefix {
            total = total.saturating_add(EXACT_PATH_BONUS);
        }
    }

    for header in &route.headers {
        if !header.expected.matches(&req.header(&header.name)) {
            return 0;
        }
        total = total.saturating_add(HEADER_WEIGHT);
    }

    total
}

/// Weight of a path prefix of `len` bytes, saturating at `u32::MAX`.
fn path_weight(len: usize) -> u32 {
    u32::try_from(len)
        .unwrap_or(u32::MAX)
        .saturating_mul(PATH_CHAR_WEIGHT)
}
