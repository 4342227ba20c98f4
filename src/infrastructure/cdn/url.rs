//! CDN URL normalization.

use std::sync::OnceLock;

use regex::Regex;

static REPEATED_SLASHES: OnceLock<Regex> = OnceLock::new();
static DEGRADED_SCHEME: OnceLock<Regex> = OnceLock::new();

fn repeated_slashes() -> &'static Regex {
    REPEATED_SLASHES.get_or_init(|| Regex::new(r"/{2,}").expect("Invalid regex"))
}

fn degraded_scheme() -> &'static Regex {
    DEGRADED_SCHEME.get_or_init(|| Regex::new(r"^([A-Za-z][A-Za-z0-9+.\-]*):/").expect("Invalid regex"))
}

/// Collapses runs of `/` and restores the `scheme://` separator.
///
/// Idempotent.
#[must_use]
pub fn normalize_cdn_url(raw: &str) -> String {
    let collapsed = repeated_slashes().replace_all(raw.trim(), "/");
    degraded_scheme()
        .replace(&collapsed, "$1://")
        .into_owned()
}

#[cfg(test)]
mod tests {
    use super::*;
    use test_case::test_case;

    #[test_case("https://cdn.example.com/senryu/a.png", "https://cdn.example.com/senryu/a.png" ; "already_clean")]
    #[test_case("https://cdn.example.com//senryu//a.png", "https://cdn.example.com/senryu/a.png" ; "doubled_slashes")]
    #[test_case("https:/cdn.example.com/senryu/a.png", "https://cdn.example.com/senryu/a.png" ; "degraded_scheme")]
    #[test_case("https:///cdn.example.com///a.png", "https://cdn.example.com/a.png" ; "tripled_slashes")]
    #[test_case("  https://cdn.example.com/a.png\n", "https://cdn.example.com/a.png" ; "surrounding_whitespace")]
    #[test_case("http://cdn.example.com:8080//a.png", "http://cdn.example.com:8080/a.png" ; "port_kept")]
    fn test_normalize(raw: &str, expected: &str) {
        assert_eq!(normalize_cdn_url(raw), expected);
    }

    #[test_case("https://cdn.example.com//senryu//a.png" ; "doubled")]
    #[test_case("https:/cdn.example.com/a.png" ; "degraded")]
    #[test_case("/relative//path" ; "relative")]
    fn test_normalize_is_idempotent(raw: &str) {
        let once = normalize_cdn_url(raw);
        assert_eq!(normalize_cdn_url(&once), once);
    }

    #[test]
    fn test_relative_path_has_no_scheme_added() {
        assert_eq!(normalize_cdn_url("/relative//path"), "/relative/path");
    }
}
