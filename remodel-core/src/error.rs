use core::fmt;

/// A segment in a document path
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum PathSegment {
    /// A key in a mapping
    Field(String),
    /// An index in a sequence
    Index(usize),
}

impl fmt::Display for PathSegment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PathSegment::Field(name) => write!(f, ".{name}"),
            PathSegment::Index(i) => write!(f, "[{i}]"),
        }
    }
}

/// Error type for model construction.
#[derive(Debug)]
pub struct BuildError {
    /// The specific kind of error
    pub kind: BuildErrorKind,
    /// Path through the source document where the error occurred
    pub path: Vec<PathSegment>,
}

impl BuildError {
    /// Create a new BuildError with an empty path
    pub fn new(kind: BuildErrorKind) -> Self {
        Self {
            kind,
            path: Vec::new(),
        }
    }

    /// Shorthand for a [`BuildErrorKind::Custom`] error.
    pub fn custom(message: impl Into<String>) -> Self {
        Self::new(BuildErrorKind::Custom(message.into()))
    }

    /// Add a path segment (prepends since we unwind from error site)
    pub fn with_path(mut self, segment: PathSegment) -> Self {
        self.path.insert(0, segment);
        self
    }

    /// Format the path as a string
    pub fn path_string(&self) -> String {
        if self.path.is_empty() {
            "<root>".into()
        } else {
            use core::fmt::Write;
            let mut s = String::new();
            for seg in &self.path {
                let _ = write!(s, "{seg}");
            }
            s
        }
    }
}

impl From<BuildErrorKind> for BuildError {
    fn from(kind: BuildErrorKind) -> Self {
        Self::new(kind)
    }
}

impl fmt::Display for BuildError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.path.is_empty() {
            write!(f, "{}", self.kind)
        } else {
            write!(f, "at {}: {}", self.path_string(), self.kind)
        }
    }
}

impl core::error::Error for BuildError {
    fn source(&self) -> Option<&(dyn core::error::Error + 'static)> {
        match &self.kind {
            BuildErrorKind::InvalidScalar { source, .. } => Some(source),
            _ => None,
        }
    }
}

/// Specific error kinds for model construction
#[derive(Debug)]
pub enum BuildErrorKind {
    /// The property-copy strategy needs a zero-argument constructor.
    NoDefaultConstructor {
        /// The type being built
        type_identifier: &'static str,
    },

    /// The constructor strategy needs a document constructor.
    NoDocumentConstructor {
        /// The type being built
        type_identifier: &'static str,
    },

    /// A built instance was not of the type the field holds.
    WrongType {
        /// The type the field holds
        expected: &'static str,
        /// The type that was built
        got: &'static str,
    },

    /// A built value was of the wrong kind (e.g. a sequence for a scalar).
    UnexpectedKind {
        /// What the field holds
        expected: &'static str,
        /// What was built
        got: &'static str,
    },

    /// A raw scalar could not be converted into the field's type.
    InvalidScalar {
        /// The Rust type of the field
        expected: &'static str,
        /// The underlying conversion error
        source: serde_json::Error,
    },

    /// Strict mode: the document has a key the model does not accept.
    UnknownField {
        /// The type being built
        type_identifier: &'static str,
        /// The offending key
        field: String,
    },

    /// Strict mode: a `#[build]` field whose static type is not a model.
    UnresolvedFieldType {
        /// The type declaring the field
        type_identifier: &'static str,
        /// The annotated field
        field: String,
    },

    /// Strict mode: the property-copy strategy was handed a non-mapping.
    ExpectedMapping {
        /// The type being built
        type_identifier: &'static str,
        /// What the document was instead
        got: &'static str,
    },

    /// Error raised by a custom strategy or a document constructor.
    Custom(String),
}

impl fmt::Display for BuildErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BuildErrorKind::NoDefaultConstructor { type_identifier } => {
                write!(f, "{type_identifier} has no zero-argument constructor")
            }
            BuildErrorKind::NoDocumentConstructor { type_identifier } => {
                write!(f, "{type_identifier} has no document constructor")
            }
            BuildErrorKind::WrongType { expected, got } => {
                write!(f, "expected an instance of {expected}, got {got}")
            }
            BuildErrorKind::UnexpectedKind { expected, got } => {
                write!(f, "expected {expected}, got {got}")
            }
            BuildErrorKind::InvalidScalar { expected, source } => {
                write!(f, "invalid value for {expected}: {source}")
            }
            BuildErrorKind::UnknownField {
                type_identifier,
                field,
            } => write!(f, "unknown field `{field}` for {type_identifier}"),
            BuildErrorKind::UnresolvedFieldType {
                type_identifier,
                field,
            } => write!(
                f,
                "field `{field}` of {type_identifier} is annotated but its type is not a model"
            ),
            BuildErrorKind::ExpectedMapping {
                type_identifier,
                got,
            } => write!(f, "expected a mapping to build {type_identifier}, got {got}"),
            BuildErrorKind::Custom(message) => f.write_str(message),
        }
    }
}
