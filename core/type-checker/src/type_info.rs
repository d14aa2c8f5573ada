//! Type Information
//!
//! This module defines the representation of Go types used by the resolver.
//!
//! Only the shapes the channel rules look at are modelled precisely:
//! - Predeclared types: `int`, `string`, `error`, ...
//! - Named types, optionally qualified by a package: `Config`, `time.Time`
//! - Channel types with their direction: `chan T`, `chan<- T`, `<-chan T`
//! - Pointer types: `*time.Timer`
//!
//! Everything else (slices, maps, structs, function types) is
//! [`TypeInfoKind::Unknown`]. `Display` renders Go type strings so callers can
//! compare a type against its spelling, e.g. `time.Time`.

use core::fmt;
use std::fmt::{Display, Formatter};

use chanlint_ast::nodes::ChannelDirection;

/// Import path of the Go standard library time package.
pub const TIME_PACKAGE_PATH: &str = "time";

#[derive(Debug, Eq, PartialEq, Clone, Hash)]
pub enum TypeInfoKind {
    Builtin(String),
    Named {
        package: Option<String>,
        name: String,
    },
    Channel {
        direction: ChannelDirection,
        element: Box<TypeInfo>,
    },
    Pointer(Box<TypeInfo>),
    Unknown,
}

impl Display for TypeInfoKind {
    fn fmt(&self, f: &mut Formatter) -> fmt::Result {
        match self {
            TypeInfoKind::Builtin(name)
            | TypeInfoKind::Named {
                package: None,
                name,
            } => write!(f, "{name}"),
            TypeInfoKind::Named {
                package: Some(package),
                name,
            } => write!(f, "{package}.{name}"),
            TypeInfoKind::Channel { direction, element } => {
                let prefix = match direction {
                    ChannelDirection::Bidirectional => "chan",
                    ChannelDirection::Send => "chan<-",
                    ChannelDirection::Receive => "<-chan",
                };
                // `chan (<-chan T)` needs the parentheses to keep its meaning.
                let receive_element = matches!(
                    element.kind,
                    TypeInfoKind::Channel {
                        direction: ChannelDirection::Receive,
                        ..
                    }
                );
                if *direction == ChannelDirection::Bidirectional && receive_element {
                    write!(f, "{prefix} ({element})")
                } else {
                    write!(f, "{prefix} {element}")
                }
            }
            TypeInfoKind::Pointer(pointee) => write!(f, "*{pointee}"),
            TypeInfoKind::Unknown => write!(f, "invalid type"),
        }
    }
}

#[derive(Debug, Eq, PartialEq, Clone, Hash)]
pub struct TypeInfo {
    pub kind: TypeInfoKind,
}

impl Display for TypeInfo {
    fn fmt(&self, f: &mut Formatter) -> fmt::Result {
        write!(f, "{}", self.kind)
    }
}

impl TypeInfo {
    /// Predeclared type names of the universe scope.
    pub const BUILTIN_TYPES: &'static [&'static str] = &[
        "any",
        "bool",
        "byte",
        "comparable",
        "complex64",
        "complex128",
        "error",
        "float32",
        "float64",
        "int",
        "int8",
        "int16",
        "int32",
        "int64",
        "rune",
        "string",
        "uint",
        "uint8",
        "uint16",
        "uint32",
        "uint64",
        "uintptr",
    ];

    #[must_use]
    pub fn builtin(name: &str) -> Self {
        Self {
            kind: TypeInfoKind::Builtin(name.to_string()),
        }
    }

    #[must_use]
    pub fn named(package: Option<&str>, name: &str) -> Self {
        Self {
            kind: TypeInfoKind::Named {
                package: package.map(str::to_string),
                name: name.to_string(),
            },
        }
    }

    #[must_use]
    pub fn channel(direction: ChannelDirection, element: TypeInfo) -> Self {
        Self {
            kind: TypeInfoKind::Channel {
                direction,
                element: Box::new(element),
            },
        }
    }

    #[must_use]
    pub fn pointer(pointee: TypeInfo) -> Self {
        Self {
            kind: TypeInfoKind::Pointer(Box::new(pointee)),
        }
    }

    #[must_use]
    pub fn unknown() -> Self {
        Self {
            kind: TypeInfoKind::Unknown,
        }
    }

    /// Type for a bare type name, predeclared or declared in the current package.
    #[must_use]
    pub fn from_type_name(name: &str) -> Self {
        if Self::BUILTIN_TYPES.contains(&name) {
            Self::builtin(name)
        } else {
            Self::named(None, name)
        }
    }

    /// Element type of a channel type; `None` for every other type.
    #[must_use]
    pub fn channel_element(&self) -> Option<&TypeInfo> {
        match &self.kind {
            TypeInfoKind::Channel { element, .. } => Some(element),
            _ => None,
        }
    }

    #[must_use]
    pub fn is_unknown(&self) -> bool {
        matches!(self.kind, TypeInfoKind::Unknown)
    }

    /// Result type of the well-known `time` package functions whose result
    /// matters for timeout detection.
    #[must_use]
    pub fn time_function_result(function: &str) -> Option<TypeInfo> {
        let time = |name: &str| TypeInfo::named(Some(TIME_PACKAGE_PATH), name);
        match function {
            "After" | "Tick" => Some(TypeInfo::channel(
                ChannelDirection::Receive,
                time("Time"),
            )),
            "NewTimer" => Some(TypeInfo::pointer(time("Timer"))),
            "NewTicker" => Some(TypeInfo::pointer(time("Ticker"))),
            "Now" => Some(time("Time")),
            _ => None,
        }
    }
}

/// Package name an import path binds when the import has no explicit name.
#[must_use]
pub fn package_name_of(path: &str) -> &str {
    path.rsplit('/').next().unwrap_or(path)
}
