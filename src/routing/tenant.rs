//! Tenant identification.
//!
//! Strategies are tried in a fixed order and the first non-empty result wins:
//! 1. `X-Tenant-ID` header
//! 2. host of the form `tenant.api.domain`
//! 3. path of the form `/tenant/api/...`
//! 4. `tenant_id` query parameter
//!
//! An explicit header must never be overridden by a stale query parameter,
//! so the order is part of the contract.

use std::borrow::Cow;

use crate::routing::matcher::strip_port;
use crate::routing::request::RequestView;

pub const TENANT_HEADER: &str = "x-tenant-id";
pub const TENANT_QUERY_PARAM: &str = "tenant_id";

/// Extract the tenant for a request, or `""` if none is found.
pub fn extract_tenant(req: &RequestView<'_>) -> String {
    if let Some(tenant) = from_header(req) {
        return tenant.into_owned();
    }
    if let Some(tenant) = from_host(req.host()) {
        return tenant.to_string();
    }
    if let Some(tenant) = from_path(req.path()) {
        return tenant.to_string();
    }
    from_query(req).unwrap_or_default()
}

/// `X-Tenant-ID`, used verbatim when non-empty.
pub fn from_header<'a>(req: &RequestView<'a>) -> Option<Cow<'a, str>> {
    let value = req.header(TENANT_HEADER);
    (!value.is_empty()).then_some(value)
}

/// First label of a `tenant.api.domain...` host.
pub fn from_host(host: &str) -> Option<&str> {
    let mut labels = strip_port(host).split('.');
    let tenant = labels.next()?;
    let second = labels.next()?;
    labels.next()?;
    (second == "api").then_some(tenant)
}

/// First segment of a `/tenant/api/...` path.
pub fn from_path(path: &str) -> Option<&str> {
    let mut segments = path.split('/').filter(|s| !s.is_empty());
    let tenant = segments.next()?;
    let second = segments.next()?;
    (second == "api").then_some(tenant)
}

/// `tenant_id` query parameter, used verbatim when present.
pub fn from_query(req: &RequestView<'_>) -> Option<String> {
    req.query_param(TENANT_QUERY_PARAM)
}
