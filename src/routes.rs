// Route path constants and route tables - single source of truth for all API paths

use std::collections::BTreeMap;

pub const API_ROOT: &str = "/api/";
pub const APP1_ROOT: &str = "/api/app1/";
pub const APP1_HOME: &str = "/api/app1/home";

pub const SWAGGER_UI: &str = "/swagger-ui";
pub const OPENAPI_JSON: &str = "/api-docs/openapi.json";

/// A named endpoint, relative to the mount point of the table that owns it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RouteEntry {
    pub name: &'static str,
    pub path: &'static str,
}

/// An immutable group of routes mounted under an absolute prefix.
///
/// `mount` always ends with `/`, so the absolute path of an entry is
/// `mount` followed by the entry's relative path.
#[derive(Debug)]
pub struct RouteTable {
    pub name: &'static str,
    pub mount: &'static str,
    pub message: &'static str,
    pub version: Option<&'static str>,
    pub entries: &'static [RouteEntry],
    pub groups: &'static [&'static RouteTable],
}

pub static APP1: RouteTable = RouteTable {
    name: "app1",
    mount: APP1_ROOT,
    message: "App1 API Endpoints",
    version: None,
    entries: &[RouteEntry {
        name: "home",
        path: "home",
    }],
    groups: &[],
};

pub static API: RouteTable = RouteTable {
    name: "api",
    mount: API_ROOT,
    message: "REST Framework API",
    version: Some("1.0"),
    entries: &[],
    groups: &[&APP1],
};

impl RouteTable {
    /// Absolute path of one of this table's own entries.
    pub fn absolute(&self, entry: &RouteEntry) -> String {
        format!("{}{}", self.mount, entry.path)
    }

    /// Every endpoint reachable under this table, keyed by name.
    ///
    /// Own entries keep their name. A nested table contributes its mount
    /// point under its own name and its endpoints as `<group>_<name>`.
    pub fn endpoints(&self) -> BTreeMap<String, String> {
        let mut endpoints: BTreeMap<String, String> = self
            .entries
            .iter()
            .map(|entry| (entry.name.to_string(), self.absolute(entry)))
            .collect();

        for group in self.groups {
            endpoints.insert(group.name.to_string(), group.mount.to_string());
            for (name, path) in group.endpoints() {
                endpoints.insert(format!("{}_{}", group.name, name), path);
            }
        }

        endpoints
    }
}
