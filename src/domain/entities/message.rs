use std::fmt;

/// Who authored a rendered message
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Author {
    User,
    Assistant,
}

impl Author {
    pub fn as_str(&self) -> &str {
        match self {
            Author::User => "user",
            Author::Assistant => "assistant",
        }
    }
}

impl fmt::Display for Author {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// One rendered line of conversation
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Message {
    pub content: String,
    pub author: Author,
}

impl Message {
    pub fn new(content: impl Into<String>, author: Author) -> Self {
        Self {
            content: content.into(),
            author,
        }
    }

    pub fn user(content: impl Into<String>) -> Self {
        Self::new(content, Author::User)
    }

    pub fn assistant(content: impl Into<String>) -> Self {
        Self::new(content, Author::Assistant)
    }

    /// Decides styling/alignment on the surface
    pub fn is_user(&self) -> bool {
        self.author == Author::User
    }
}

/// Handle for a live typing indicator, issued by the surface that shows it
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct IndicatorId(pub u64);

impl fmt::Display for IndicatorId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "typing#{}", self.0)
    }
}
