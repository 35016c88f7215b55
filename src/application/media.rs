//! Resolution of stored image references into browser URLs.

const DEFAULT_BASE: &str = "/media/";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MediaUrls {
    base: String,
}

impl Default for MediaUrls {
    fn default() -> Self {
        Self::new(DEFAULT_BASE)
    }
}

impl MediaUrls {
    pub fn new(base: impl Into<String>) -> Self {
        let mut base = base.into().trim().to_string();
        if base.is_empty() {
            base.push_str(DEFAULT_BASE);
        }
        if !base.ends_with('/') {
            base.push('/');
        }
        Self { base }
    }

    pub fn base(&self) -> &str {
        &self.base
    }

    /// Absolute `http(s)` URLs pass through, relative paths join the base and
    /// an empty reference stays empty.
    pub fn resolve(&self, reference: &str) -> String {
        let reference = reference.trim();
        if reference.is_empty() {
            return String::new();
        }
        if is_absolute(reference) {
            return reference.to_string();
        }
        format!("{}{}", self.base, reference.trim_start_matches('/'))
    }

    pub fn resolve_opt(&self, reference: Option<&str>) -> String {
        reference.map(|value| self.resolve(value)).unwrap_or_default()
    }
}

fn is_absolute(reference: &str) -> bool {
    let lower = reference.get(..8).unwrap_or(reference).to_ascii_lowercase();
    lower.starts_with("http://") || lower.starts_with("https://")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn relative_references_join_the_base() {
        let media = MediaUrls::new("https://cdn.example.com/zorpido");
        assert_eq!(media.base(), "https://cdn.example.com/zorpido/");
        assert_eq!(
            media.resolve("/menu/momo.jpg"),
            "https://cdn.example.com/zorpido/menu/momo.jpg"
        );
    }

    #[test]
    fn absolute_urls_pass_through() {
        let media = MediaUrls::default();
        assert_eq!(
            media.resolve("HTTPS://img.example.com/a.png"),
            "HTTPS://img.example.com/a.png"
        );
        assert_eq!(media.resolve("http://x.test/b.png"), "http://x.test/b.png");
    }

    #[test]
    fn empty_references_stay_empty() {
        let media = MediaUrls::default();
        assert_eq!(media.resolve("  "), "");
        assert_eq!(media.resolve_opt(None), "");
        assert_eq!(media.resolve_opt(Some("gallery/1.jpg")), "/media/gallery/1.jpg");
    }
}
