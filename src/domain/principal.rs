/// The authenticated identity resolved from a verified bearer token.
///
/// Rebuilt on every request; never persisted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Principal {
    /// Token subject: the user's email.
    pub subject: String,
}

impl Principal {
    pub fn new(subject: impl Into<String>) -> Self {
        Self {
            subject: subject.into(),
        }
    }
}
