//! Type tags — structured type descriptors parsed from documentation text.
//!
//! Documentation records describe types as strings (`"int"`, `"UDT_Foo"`,
//! `"array<float>"`, `"float[]"`, `"series map<string, int>"`). They are
//! parsed once into a [`TypeTag`] when the index is loaded, so resolution
//! compares structure instead of re-normalizing strings on every request.
//!
//! The [`Display`](fmt::Display) form of a tag is its normalized text: bracket
//! arrays become `array<T>` and container parameters are joined with `", "`.

use std::fmt;

use smol_str::SmolStr;

/// Type qualifiers that may prefix a type (`series float`).
const QUALIFIERS: &[&str] = &["series", "simple", "const", "input"];

/// Parameter names that stand for "any element type".
const PLACEHOLDERS: &[&str] = &["any", "type"];

/// The outer class of a generic container type.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ContainerClass {
    Array,
    Matrix,
    Map,
}

impl ContainerClass {
    /// Get the keyword for this class.
    pub fn as_str(self) -> &'static str {
        match self {
            ContainerClass::Array => "array",
            ContainerClass::Matrix => "matrix",
            ContainerClass::Map => "map",
        }
    }

    /// Recognize a container keyword (case-insensitive).
    pub fn from_name(name: &str) -> Option<Self> {
        [Self::Array, Self::Matrix, Self::Map]
            .into_iter()
            .find(|class| name.eq_ignore_ascii_case(class.as_str()))
    }
}

/// The shape of a type, without its qualifier.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub enum TypeKind {
    /// A scalar or user-defined type, kept verbatim (`int`, `UDT_Foo`, `chart.point`).
    Named(SmolStr),
    /// A parametrized container. An empty parameter list is a bare `array`.
    Container {
        class: ContainerClass,
        params: Vec<TypeTag>,
    },
}

/// A parsed type descriptor.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct TypeTag {
    qualifier: Option<SmolStr>,
    kind: TypeKind,
}

impl TypeTag {
    /// A plain named type.
    pub fn named(name: impl Into<SmolStr>) -> Self {
        Self {
            qualifier: None,
            kind: TypeKind::Named(name.into()),
        }
    }

    /// A container type with the given parameters.
    pub fn container(class: ContainerClass, params: Vec<TypeTag>) -> Self {
        Self {
            qualifier: None,
            kind: TypeKind::Container { class, params },
        }
    }

    /// Parse a type string. Returns `None` for blank input.
    pub fn parse(text: &str) -> Option<Self> {
        let text = text.trim();
        if text.is_empty() {
            return None;
        }

        if let Some((head, rest)) = text.split_once(char::is_whitespace) {
            if QUALIFIERS.contains(&head) {
                if let Some(mut inner) = Self::parse(rest) {
                    inner.qualifier = Some(SmolStr::new(head));
                    return Some(inner);
                }
            }
        }

        Some(Self {
            qualifier: None,
            kind: parse_kind(text),
        })
    }

    /// The qualifier prefix, if any (`series`, `simple`, ...).
    pub fn qualifier(&self) -> Option<&str> {
        self.qualifier.as_deref()
    }

    /// The shape of this type.
    pub fn kind(&self) -> &TypeKind {
        &self.kind
    }

    /// The name of a non-container type.
    pub fn name(&self) -> Option<&str> {
        match &self.kind {
            TypeKind::Named(name) => Some(name),
            TypeKind::Container { .. } => None,
        }
    }

    /// The outer class of a container type.
    pub fn container_class(&self) -> Option<ContainerClass> {
        match &self.kind {
            TypeKind::Container { class, .. } => Some(*class),
            TypeKind::Named(_) => None,
        }
    }

    /// Container parameters (empty for named types).
    pub fn params(&self) -> &[TypeTag] {
        match &self.kind {
            TypeKind::Container { params, .. } => params,
            TypeKind::Named(_) => &[],
        }
    }

    /// Whether this is a container declared over a generic element type
    /// (`array<any>`, `matrix<type>`, or a bare `map`).
    pub fn is_placeholder(&self) -> bool {
        match &self.kind {
            TypeKind::Container { params, .. } => {
                params.is_empty()
                    || params.iter().any(|param| {
                        param
                            .name()
                            .is_some_and(|name| PLACEHOLDERS.iter().any(|p| name.eq_ignore_ascii_case(p)))
                    })
            }
            TypeKind::Named(_) => false,
        }
    }

    /// Keys under which methods of this type may be registered, most specific
    /// first: the full unqualified text, then the bare container class.
    pub fn lookup_prefixes(&self) -> Vec<String> {
        let mut prefixes = vec![self.kind.to_string()];
        if let Some(class) = self.container_class() {
            if prefixes[0] != class.as_str() {
                prefixes.push(class.as_str().to_string());
            }
        }
        prefixes
    }
}

fn parse_kind(text: &str) -> TypeKind {
    if let Some(element) = text.strip_suffix("[]") {
        return TypeKind::Container {
            class: ContainerClass::Array,
            params: TypeTag::parse(element).into_iter().collect(),
        };
    }

    if let (Some(open), true) = (text.find('<'), text.ends_with('>')) {
        if let Some(class) = ContainerClass::from_name(text[..open].trim()) {
            let params = split_params(&text[open + 1..text.len() - 1])
                .into_iter()
                .filter_map(TypeTag::parse)
                .collect();
            return TypeKind::Container { class, params };
        }
        // Other generic spellings are kept verbatim.
        return TypeKind::Named(SmolStr::new(text));
    }

    match ContainerClass::from_name(text) {
        Some(class) => TypeKind::Container {
            class,
            params: Vec::new(),
        },
        None => TypeKind::Named(SmolStr::new(text)),
    }
}

/// Split a parameter list on commas that are not nested inside `<...>`.
fn split_params(inner: &str) -> Vec<&str> {
    let mut parts = Vec::new();
    let mut depth = 0usize;
    let mut start = 0;

    for (i, c) in inner.char_indices() {
        match c {
            '<' => depth += 1,
            '>' => depth = depth.saturating_sub(1),
            ',' if depth == 0 => {
                parts.push(&inner[start..i]);
                start = i + 1;
            }
            _ => {}
        }
    }
    parts.push(&inner[start..]);
    parts
}

/// Normalize a type string: bracket arrays become `array<T>`.
///
/// Blank input normalizes to the empty string.
pub fn normalize(text: &str) -> String {
    TypeTag::parse(text)
        .map(|tag| tag.to_string())
        .unwrap_or_default()
}

/// Compatibility between an inferred receiver type and a method's declared
/// receiver type.
///
/// Containers compare by outer class only, so a placeholder (`array<any>`)
/// and a concrete element type (`array<float>`) both match any `array`. If at
/// most one side is a container, the normalized texts must contain one
/// another (`float` matches `series float`).
pub fn compatible(receiver: &TypeTag, declared: &TypeTag) -> bool {
    match (receiver.container_class(), declared.container_class()) {
        (Some(a), Some(b)) => a == b,
        _ => {
            let receiver = receiver.to_string();
            let declared = declared.to_string();
            declared.contains(&receiver) || receiver.contains(&declared)
        }
    }
}

impl fmt::Display for TypeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TypeKind::Named(name) => f.write_str(name),
            TypeKind::Container { class, params } => {
                f.write_str(class.as_str())?;
                if !params.is_empty() {
                    f.write_str("<")?;
                    for (i, param) in params.iter().enumerate() {
                        if i > 0 {
                            f.write_str(", ")?;
                        }
                        write!(f, "{param}")?;
                    }
                    f.write_str(">")?;
                }
                Ok(())
            }
        }
    }
}

impl fmt::Display for TypeTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if let Some(qualifier) = &self.qualifier {
            write!(f, "{qualifier} ")?;
        }
        write!(f, "{}", self.kind)
    }
}
