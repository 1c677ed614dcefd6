/// Normalized page content: either Markdown or a human readable error, never both.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NormalizedContent {
    Markdown(String),
    Error(String),
}

impl NormalizedContent {
    pub fn markdown(&self) -> Option<&str> {
        match self {
            NormalizedContent::Markdown(text) => Some(text),
            NormalizedContent::Error(_) => None,
        }
    }

    pub fn error(&self) -> Option<&str> {
        match self {
            NormalizedContent::Markdown(_) => None,
            NormalizedContent::Error(message) => Some(message),
        }
    }

    pub fn is_error(&self) -> bool {
        matches!(self, NormalizedContent::Error(_))
    }

    pub fn into_result(self) -> Result<String, String> {
        match self {
            NormalizedContent::Markdown(text) => Ok(text),
            NormalizedContent::Error(message) => Err(message),
        }
    }
}
