use super::Error;

/// Error when a mapper document is not well-formed XML.
#[derive(Debug)]
pub(super) struct XmlError {
    message: Box<str>,
}

impl std::error::Error for XmlError {}

impl core::fmt::Display for XmlError {
    fn fmt(&self, f: &mut core::fmt::Formatter) -> core::fmt::Result {
        write!(f, "malformed XML: {}", self.message)
    }
}

impl Error {
    /// Creates an XML syntax error.
    pub fn xml(message: impl core::fmt::Display) -> Error {
        Error::from(super::ErrorKind::Xml(XmlError {
            message: message.to_string().into(),
        }))
    }

    /// Returns `true` if this error, or any error it wraps, is an XML syntax
    /// error.
    pub fn is_xml(&self) -> bool {
        self.any_kind(|kind| matches!(kind, super::ErrorKind::Xml(_)))
    }
}
