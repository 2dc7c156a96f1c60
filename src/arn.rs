//! Narrow parsing of ARN-like resource identifiers (`arn:partition:service:region:account:resource`) and
//! `service:action` strings, used to group resources for display.

/// Service key used when an identifier has no service segment.
pub const UNKNOWN_SERVICE: &str = "unknown";

/// The wildcard resource or action.
pub const WILDCARD: &str = "*";

/// Return the service key of a resource identifier: the third colon-delimited segment, or [UNKNOWN_SERVICE] if that
/// segment is missing or empty.
pub fn service_key(resource: &str) -> &str {
    match resource.split(':').nth(2) {
        Some(service) if !service.is_empty() => service,
        _ => UNKNOWN_SERVICE,
    }
}

/// Return the display name of a resource identifier.
///
/// The sixth colon-delimited segment is split on `/` and the last non-empty piece is used. Identifiers with fewer
/// than six segments, or whose sixth segment has no non-empty piece, are returned verbatim. The wildcard maps to
/// itself.
pub fn extract_resource_name(resource: &str) -> &str {
    if resource == WILDCARD {
        return WILDCARD;
    }

    let resource_part = match resource.split(':').nth(5) {
        Some(part) => part,
        None => return resource,
    };

    resource_part.rsplit('/').find(|segment| !segment.is_empty()).unwrap_or(resource)
}

/// Return the service prefix of an action (`"s3:GetObject"` → `"s3"`). An action without a colon is its own
/// prefix.
pub fn action_service(action: &str) -> &str {
    action.split(':').next().unwrap_or(action)
}
