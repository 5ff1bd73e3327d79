use super::types::NavigationVerdict;

/// URL prefix under which surfaces report the generated document's load.
pub const DOCUMENT_URL_PREFIX: &str = "data:text/html";

/// Classifies navigation attempts inside the surface.
///
/// Each generated document is allowed to load exactly once. The counters are
/// only ever incremented, so a later navigation to a `data:text/html` URL
/// (injected content, a stale reload) is suppressed.
#[derive(Debug, Clone)]
pub struct NavigationFilter {
    origin: String,
    rendered: u32,
    loaded: u32,
}

impl NavigationFilter {
    pub fn new(origin: impl Into<String>) -> Self {
        Self {
            origin: origin.into(),
            rendered: 0,
            loaded: 0,
        }
    }

    pub fn set_origin(&mut self, origin: &str) {
        if self.origin != origin {
            self.origin = origin.to_string();
        }
    }

    /// Record that a new document has been handed to the surface.
    pub fn document_rendered(&mut self) {
        self.rendered += 1;
    }

    fn is_origin(&self, url: &str) -> bool {
        let origin = self.origin.trim_end_matches('/');
        !origin.is_empty() && url.trim_end_matches('/') == origin
    }

    pub fn classify(&mut self, url: &str) -> NavigationVerdict {
        if url.starts_with(DOCUMENT_URL_PREFIX) {
            if self.loaded < self.rendered {
                self.loaded += 1;
                return NavigationVerdict::Allow;
            }
            return NavigationVerdict::Suppress;
        }
        if url == "about:blank" || self.is_origin(url) {
            return NavigationVerdict::Suppress;
        }
        NavigationVerdict::ClickThrough
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const DOC: &str = "data:text/html;charset=utf-8,<html>";

    #[test]
    fn internal_urls_suppressed() {
        let mut f = NavigationFilter::new("https://app.example.com");
        assert_eq!(f.classify("about:blank"), NavigationVerdict::Suppress);
        assert_eq!(f.classify("https://app.example.com"), NavigationVerdict::Suppress);
        assert_eq!(f.classify("https://app.example.com/"), NavigationVerdict::Suppress);
    }

    #[test]
    fn origin_with_trailing_slash() {
        let mut f = NavigationFilter::new("https://app.example.com/");
        assert_eq!(f.classify("https://app.example.com"), NavigationVerdict::Suppress);
        assert_eq!(
            f.classify("https://app.example.com/watch"),
            NavigationVerdict::ClickThrough
        );
    }

    #[test]
    fn external_urls_click_through() {
        let mut f = NavigationFilter::new("https://app.example.com");
        assert_eq!(
            f.classify("https://www.youtube.com/watch?v=dQw4w9WgXcQ"),
            NavigationVerdict::ClickThrough
        );
    }

    #[test]
    fn document_load_allowed_once_per_render() {
        let mut f = NavigationFilter::new("https://app.example.com");
        assert_eq!(f.classify(DOC), NavigationVerdict::Suppress);

        f.document_rendered();
        assert_eq!(f.classify(DOC), NavigationVerdict::Allow);
        assert_eq!(f.classify(DOC), NavigationVerdict::Suppress);

        f.document_rendered();
        assert_eq!(f.classify(DOC), NavigationVerdict::Allow);
        assert_eq!(f.classify(DOC), NavigationVerdict::Suppress);
    }

    #[test]
    fn origin_change_applies() {
        let mut f = NavigationFilter::new("https://a.example.com");
        f.set_origin("https://b.example.com");
        assert_eq!(f.classify("https://b.example.com"), NavigationVerdict::Suppress);
        assert_eq!(
            f.classify("https://a.example.com"),
            NavigationVerdict::ClickThrough
        );
    }
}
