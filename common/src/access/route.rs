//! # Route Classification
//!
//! Turns a request path into the dashboard zone (and optional feature) it
//! addresses. Segments are compared whole; `/hub/diamonds` is not the
//! diamond zone. Dot segments are resolved before classification, so
//! `/pricing/../hub/infinity` is the infinity zone.

use std::fmt;

use super::zone::ZoneId;

pub const LOGIN_PATH: &str = "/login";
pub const HUB_PREFIX: &str = "hub";

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Route {
    /// Anything outside `/hub`, including the login page.
    Public { path: String },
    /// `/hub` itself or an unknown `/hub/<x>`.
    HubIndex,
    /// A zone root such as `/hub/diamond`.
    Zone { zone: ZoneId },
    /// A feature inside a zone such as `/hub/basic/ai-advisor`.
    Feature { zone: ZoneId, feature: String },
}

impl Route {
    pub fn parse(path: &str) -> Self {
        let resolved = segments(path);
        let mut rest = resolved.iter().copied();

        match rest.next() {
            Some(first) if first.eq_ignore_ascii_case(HUB_PREFIX) => {}
            _ => {
                return Route::Public {
                    path: join(&resolved),
                };
            }
        }

        let Some(zone) = rest.next().and_then(|slug| slug.parse::<ZoneId>().ok()) else {
            return Route::HubIndex;
        };

        match rest.next() {
            Some(feature) => Route::Feature {
                zone,
                feature: feature.to_string(),
            },
            None => Route::Zone { zone },
        }
    }

    pub fn zone(&self) -> Option<ZoneId> {
        match self {
            Route::Zone { zone } | Route::Feature { zone, .. } => Some(*zone),
            Route::Public { .. } | Route::HubIndex => None,
        }
    }

    pub fn is_protected(&self) -> bool {
        !matches!(self, Route::Public { .. })
    }

    pub fn path(&self) -> String {
        match self {
            Route::Public { path } => path.clone(),
            Route::HubIndex => format!("/{HUB_PREFIX}"),
            Route::Zone { zone } => zone.root_path(),
            Route::Feature { zone, feature } => format!("{}/{feature}", zone.root_path()),
        }
    }
}

impl fmt::Display for Route {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.path())
    }
}

/// `path` without query, fragment, empty or dot segments, e.g.
/// `/api/./hub//basic/?x=1` becomes `/api/hub/basic`.
pub fn canonical_path(path: &str) -> String {
    join(&segments(path))
}

fn segments(path: &str) -> Vec<&str> {
    let end = path.find(['?', '#']).unwrap_or(path.len());
    let mut resolved = Vec::new();
    for segment in path[..end].split('/').filter(|segment| !segment.is_empty()) {
        match decode_dots(segment).as_str() {
            "." => {}
            ".." => {
                resolved.pop();
            }
            _ => resolved.push(segment),
        }
    }
    resolved
}

/// Percent-encoded dots count as dots.
fn decode_dots(segment: &str) -> String {
    segment.to_ascii_lowercase().replace("%2e", ".")
}

fn join(segments: &[&str]) -> String {
    format!("/{}", segments.join("/"))
}
