//!
//! # rf21 Result and Error Types
//!

/// # [RfError] Result Type
pub type RfResult<T> = Result<T, RfError>;

///
/// # rf21 Error Enumeration
///
/// One variant per failure kind the engine can produce. All variants are
/// unrecoverable for the design being processed: the first error aborts the
/// enclosing parse or assembly call, and no partial layout is produced.
///
pub enum RfError {
    /// Design document missing a required field, or of the wrong shape
    Schema(String),
    /// Component type-tag not present in the component registry
    UnknownType(String),
    /// Technology name not present in the PDK registry
    UnknownTechnology(String),
    /// Symbolic layer name absent from the bound PDK, or used with no PDK bound
    UnknownLayer(String),
    /// Design-rule name absent from the bound PDK
    UnknownRule(String),
    /// Invalid registration, e.g. a duplicate type-tag or PDK name
    Config(String),
    /// Geometrically invalid parameter, e.g. a negative width or zero fingers
    Parameter(String),
    /// Boxed External Errors
    Boxed(Box<dyn std::error::Error + Send + Sync>),
    /// Uncategorized Error, with String Message
    Str(String),
    /// # [Ptr] Locking
    /// Caused by a [std::sync::PoisonError], which is not forwardable due to lifetime constraints.
    PtrLock,
}
impl RfError {
    /// Create an [RfError::Str] from anything String-convertible
    pub fn msg(s: impl Into<String>) -> Self {
        Self::Str(s.into())
    }
    /// Create an error-variant [Result] of our [RfError::Str] variant from anything String-convertible
    pub fn fail<T>(s: impl Into<String>) -> Result<T, Self> {
        Err(Self::msg(s))
    }
}
impl std::fmt::Debug for RfError {
    /// Display an [RfError]
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        match self {
            RfError::Schema(msg) => write!(f, "Schema Error: {}", msg),
            RfError::UnknownType(tag) => write!(f, "Unknown component type: {}", tag),
            RfError::UnknownTechnology(name) => write!(f, "Unknown technology: {}", name),
            RfError::UnknownLayer(msg) => write!(f, "Unknown layer: {}", msg),
            RfError::UnknownRule(msg) => write!(f, "Unknown design rule: {}", msg),
            RfError::Config(msg) => write!(f, "Configuration Error: {}", msg),
            RfError::Parameter(msg) => write!(f, "Parameter Error: {}", msg),
            RfError::Boxed(err) => err.fmt(f),
            RfError::Str(err) => err.fmt(f),
            RfError::PtrLock => write!(f, "[std::sync::PoisonError]"),
        }
    }
}
impl std::fmt::Display for RfError {
    /// Display an [RfError]
    /// Delegates to the [Debug] implementation
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        std::fmt::Debug::fmt(self, f)
    }
}
impl std::error::Error for RfError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Boxed(e) => Some(&**e),
            _ => None,
        }
    }
}

impl From<String> for RfError {
    fn from(s: String) -> Self {
        Self::Str(s)
    }
}
impl From<&str> for RfError {
    fn from(s: &str) -> Self {
        Self::Str(s.to_string())
    }
}
impl From<std::io::Error> for RfError {
    fn from(e: std::io::Error) -> Self {
        Self::Boxed(Box::new(e))
    }
}
impl From<serde_yaml::Error> for RfError {
    fn from(e: serde_yaml::Error) -> Self {
        Self::Boxed(Box::new(e))
    }
}
impl From<serde_json::Error> for RfError {
    fn from(e: serde_json::Error) -> Self {
        Self::Boxed(Box::new(e))
    }
}
impl From<crate::ser::Error> for RfError {
    fn from(e: crate::ser::Error) -> Self {
        Self::Boxed(Box::new(e))
    }
}
impl<T> From<std::sync::PoisonError<T>> for RfError {
    fn from(_e: std::sync::PoisonError<T>) -> Self {
        Self::PtrLock
    }
}
