//! Admin route building
//!
//! The admin UI lives outside this core; we only need to hand it URLs. The
//! [`RouteBuilder`] trait keeps the core decoupled from the host's router,
//! and [`AdminRouteBuilder`] is the plain path-joining implementation.

pub trait RouteBuilder: Send + Sync {
    /// URL for a module action, e.g.
    /// `module_route("articles", Some("content"), "edit", 5)` ->
    /// `/admin/content/articles/5/edit`.
    fn module_route(&self, module: &str, prefix: Option<&str>, action: &str, id: i64) -> String;

    /// URL for a named route; dotted names map to path segments.
    fn route(&self, name: &str) -> String;
}

pub struct AdminRouteBuilder {
    base_url: String,
}

impl AdminRouteBuilder {
    pub fn new(base_url: impl Into<String>) -> Self {
        let mut base_url = base_url.into();
        while base_url.ends_with('/') {
            base_url.pop();
        }
        Self { base_url }
    }
}

impl RouteBuilder for AdminRouteBuilder {
    fn module_route(&self, module: &str, prefix: Option<&str>, action: &str, id: i64) -> String {
        match prefix.filter(|p| !p.is_empty()) {
            Some(prefix) => format!(
                "{}/{}/{}/{}/{}",
                self.base_url, prefix, module, id, action
            ),
            None => format!("{}/{}/{}/{}", self.base_url, module, id, action),
        }
    }

    fn route(&self, name: &str) -> String {
        format!("{}/{}", self.base_url, name.replace('.', "/"))
    }
}
