pub mod generate;
pub mod home;
pub mod result;
pub mod subscription;

/// What a page handler hands back to the router.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Page {
    Html(String),
    /// Navigate the browser elsewhere (in-app route or external URL).
    Redirect(String),
    /// Unrecoverable render failure.
    Failure(String),
}

impl Page {
    pub fn html(&self) -> Option<&str> {
        match self {
            Page::Html(body) => Some(body),
            _ => None,
        }
    }
}
