//! Container field reference

use serde::Serialize;
use url::Url;

/// A reference to the contents of a container field.
///
/// The server returns container data as a path on its own web publishing
/// engine rather than the bytes themselves. When the parse options carry a
/// base URL, the path is also resolved into an absolute URL that the
/// transport layer can fetch.
///
/// # Example
///
/// ```
/// use filemaker_lib::model::types::ContainerRef;
/// use url::Url;
///
/// let base = Url::parse("https://fm.example.com:443/").unwrap();
/// let photo = ContainerRef::resolve("/fmi/xml/cnt/photo.jpg?-db=Contacts", Some(&base));
///
/// assert_eq!(photo.path, "/fmi/xml/cnt/photo.jpg?-db=Contacts");
/// assert_eq!(
///     photo.url.unwrap().as_str(),
///     "https://fm.example.com/fmi/xml/cnt/photo.jpg?-db=Contacts"
/// );
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct ContainerRef {
    /// The path exactly as the server reported it.
    pub path: String,
    /// The path resolved against the configured server, if available.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub url: Option<Url>,
}

impl ContainerRef {
    /// Creates a reference with no resolved URL.
    pub fn new(path: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            url: None,
        }
    }

    /// Creates a reference, resolving `path` against `base` when given.
    ///
    /// A path that cannot be joined leaves `url` empty.
    pub fn resolve(path: impl Into<String>, base: Option<&Url>) -> Self {
        let path = path.into();
        let url = base.and_then(|b| b.join(&path).ok());
        Self { path, url }
    }
}

impl std::fmt::Display for ContainerRef {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match &self.url {
            Some(url) => write!(f, "{}", url),
            None => write!(f, "{}", self.path),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_without_base() {
        let container = ContainerRef::resolve("/fmi/xml/cnt/a.png", None);
        assert_eq!(container, ContainerRef::new("/fmi/xml/cnt/a.png"));
        assert_eq!(container.to_string(), "/fmi/xml/cnt/a.png");
    }

    #[test]
    fn test_with_base_and_port() {
        let base = Url::parse("http://10.0.0.5:8080/").unwrap();
        let container = ContainerRef::resolve("/fmi/xml/cnt/a.png", Some(&base));
        assert_eq!(
            container.url.as_ref().map(Url::as_str),
            Some("http://10.0.0.5:8080/fmi/xml/cnt/a.png")
        );
    }
}
