//! Key Conventions
//!
//! Builders for the keys collaborators use. The cache treats every key as an
//! opaque string; these only keep callers consistent with each other.

/// Key for the scanned project list.
pub fn projects() -> String {
    "projects".to_string()
}

/// Key for the parsed logs of the project at `path`.
pub fn project_logs(path: &str) -> String {
    format!("logs:{path}")
}

/// Key for a per-project aggregate computed with a conversion `rate`.
///
/// The rate is part of the key so aggregates computed under a different
/// rate never collide.
pub fn project_costs(name: &str, rate: f64) -> String {
    format!("costs:{name}:{rate}")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_key_shapes() {
        assert_eq!(projects(), "projects");
        assert_eq!(project_logs("/home/me/app"), "logs:/home/me/app");
        assert_eq!(project_costs("app", 1.5), "costs:app:1.5");
    }

    #[test]
    fn test_cost_keys_differ_by_rate() {
        assert_ne!(project_costs("app", 1.0), project_costs("app", 0.92));
    }
}
