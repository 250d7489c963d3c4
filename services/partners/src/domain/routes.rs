//! Static notification → route table.
//!
//! Pure and deterministic: no storage or network access. Adding a
//! notification kind means adding a table entry (and, by convention, the
//! matching anchor in the target page).

use crate::domain::types::Notification;

/// One row of the routing table.
pub struct RouteEntry {
    pub kind: &'static str,
    pub path: &'static str,
    /// Hash anchor appended as `#anchor`.
    pub hash: Option<&'static str>,
    /// Query string, appended as `?query`. `{entity_id}` / `{entity_type}`
    /// placeholders are substituted from the notification; the query is
    /// dropped entirely when a placeholder cannot be filled.
    pub query: Option<&'static str>,
    /// Append `related_entity_id` as a path segment when present.
    pub dynamic_segment: bool,
}

/// Route for notification kinds with no table entry.
pub const FALLBACK_ROUTE: &str = "/dashboard";

const ROUTES: &[RouteEntry] = &[
    RouteEntry {
        kind: "partner_invitation",
        path: "/profile",
        hash: Some("partner-connection"),
        query: None,
        dynamic_segment: false,
    },
    RouteEntry {
        kind: "invitation_accepted",
        path: "/profile",
        hash: Some("partner-connection"),
        query: None,
        dynamic_segment: false,
    },
    RouteEntry {
        kind: "invitation_declined",
        path: "/profile",
        hash: Some("partner-connection"),
        query: None,
        dynamic_segment: false,
    },
    RouteEntry {
        kind: "partner_disconnected",
        path: "/profile",
        hash: Some("partner-connection"),
        query: None,
        dynamic_segment: false,
    },
    RouteEntry {
        kind: "checklist_item",
        path: "/checklist",
        hash: None,
        query: None,
        dynamic_segment: true,
    },
    RouteEntry {
        kind: "discussion_answer",
        path: "/discussions",
        hash: Some("partner-answer"),
        query: None,
        dynamic_segment: true,
    },
    RouteEntry {
        kind: "learning_module",
        path: "/learning",
        hash: None,
        query: None,
        dynamic_segment: true,
    },
    RouteEntry {
        kind: "calculator_result",
        path: "/calculators",
        hash: None,
        query: Some("tab={entity_type}"),
        dynamic_segment: false,
    },
    RouteEntry {
        kind: "resource_added",
        path: "/resources",
        hash: None,
        query: None,
        dynamic_segment: true,
    },
    RouteEntry {
        kind: "announcement",
        path: "/dashboard",
        hash: Some("announcements"),
        query: None,
        dynamic_segment: false,
    },
];

/// Resolve the navigable target for a notification.
///
/// Unregistered kinds fall back to [`FALLBACK_ROUTE`] with a diagnostic.
pub fn resolve_route(notification: &Notification) -> String {
    let Some(entry) = ROUTES.iter().find(|e| e.kind == notification.kind) else {
        tracing::debug!(
            kind = %notification.kind,
            "no route registered for notification kind, using fallback"
        );
        return FALLBACK_ROUTE.to_owned();
    };

    let mut route = entry.path.to_owned();
    if entry.dynamic_segment {
        if let Some(id) = notification.related_entity_id.as_deref() {
            route.push('/');
            route.push_str(id);
        }
    }
    if let Some(template) = entry.query {
        if let Some(query) = fill_placeholders(template, notification) {
            route.push('?');
            route.push_str(&query);
        }
    }
    if let Some(hash) = entry.hash {
        route.push('#');
        route.push_str(hash);
    }
    route
}

fn fill_placeholders(template: &str, notification: &Notification) -> Option<String> {
    let mut out = template.to_owned();
    if out.contains("{entity_id}") {
        out = out.replace("{entity_id}", notification.related_entity_id.as_deref()?);
    }
    if out.contains("{entity_type}") {
        out = out.replace(
            "{entity_type}",
            notification.related_entity_type.as_deref()?,
        );
    }
    Some(out)
}
