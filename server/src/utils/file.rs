//! Path helpers for config and data locations

use std::path::PathBuf;

/// Expand `~` and make relative paths absolute against the current directory.
///
/// ```text
/// expand_path("~/.revenue/revenue.json") // -> /home/user/.revenue/revenue.json
/// expand_path("data/revenue.db")         // -> /current/dir/data/revenue.db
/// expand_path("/var/lib/revenue")        // -> /var/lib/revenue
/// ```
pub fn expand_path(path: &str) -> PathBuf {
    let path = path.trim();
    let cwd = || std::env::current_dir().unwrap_or_else(|_| PathBuf::from("."));

    if path.is_empty() {
        return cwd();
    }

    let expanded = match (path, dirs::home_dir()) {
        ("~", Some(home)) => home,
        (p, Some(home)) if p.starts_with("~/") => home.join(&p[2..]),
        (p, _) => PathBuf::from(p),
    };

    if expanded.is_relative() {
        cwd().join(expanded)
    } else {
        expanded
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_expand_path_absolute_unchanged() {
        assert_eq!(
            expand_path("/var/lib/revenue"),
            PathBuf::from("/var/lib/revenue")
        );
    }

    #[test]
    fn test_expand_path_relative_joins_cwd() {
        let cwd = std::env::current_dir().unwrap();
        assert_eq!(expand_path("data/revenue.db"), cwd.join("data/revenue.db"));
    }

    #[test]
    fn test_expand_path_empty_is_cwd() {
        let cwd = std::env::current_dir().unwrap();
        assert_eq!(expand_path("   "), cwd);
    }

    #[test]
    fn test_expand_path_tilde() {
        if let Some(home) = dirs::home_dir() {
            assert_eq!(expand_path("~"), home);
            assert_eq!(expand_path("~/.revenue"), home.join(".revenue"));
        }
    }
}
