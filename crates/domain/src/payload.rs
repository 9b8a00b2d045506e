use crate::DomainError;

/// Text-encoded image as sent by clients, either bare base64 or a data URL
/// such as `data:image/png;base64,<payload>`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ImagePayload<'a> {
    encoded: &'a str,
}

impl<'a> ImagePayload<'a> {
    /// Keeps whatever follows the first comma. The header itself is ignored.
    pub fn parse(raw: &'a str) -> Result<Self, DomainError> {
        let encoded = match raw.split_once(',') {
            Some((_header, payload)) => payload,
            None => raw,
        }
        .trim();

        if encoded.is_empty() {
            return Err(DomainError::EmptyPayload);
        }
        Ok(Self { encoded })
    }

    pub fn encoded(&self) -> &'a str {
        self.encoded
    }
}
