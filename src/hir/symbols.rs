//! Documentation records — the symbols the resolver hands to the editor.
//!
//! Each record is keyed in the index by its qualified name (`ta.sma`,
//! `array.push`, `close`). The kind-specific payload lives in [`RecordKind`]
//! so resolution code can match on what a symbol is instead of probing
//! optional fields.

use std::sync::Arc;

use smol_str::SmolStr;

use super::ty::TypeTag;

/// A documented argument or field.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Arg {
    /// Parameter name as displayed in signatures
    pub name: SmolStr,
    /// Declared type, if documented
    pub ty: Option<TypeTag>,
    /// Default value as source text
    pub default: Option<String>,
}

impl Arg {
    /// Create an argument with a name and optional type text.
    pub fn new(name: impl Into<SmolStr>, ty: Option<&str>) -> Self {
        Self {
            name: name.into(),
            ty: ty.and_then(TypeTag::parse),
            default: None,
        }
    }
}

/// Signature of a function or method.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Signature {
    pub args: Vec<Arg>,
    pub return_type: Option<TypeTag>,
    /// Pre-rendered syntax line, if the documentation provides one
    pub syntax: Option<String>,
}

/// A typed value: variable, constant, field, or argument value.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Binding {
    pub ty: Option<TypeTag>,
    /// Literal value as source text (constants, enum members)
    pub value: Option<String>,
}

/// A user-defined type declaration.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct TypeDecl {
    pub fields: Vec<Arg>,
}

/// Kind-specific payload of a documentation record.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum RecordKind {
    Function(Signature),
    Method(Signature),
    Variable(Binding),
    Constant(Binding),
    Type(TypeDecl),
    Field(Binding),
    /// A value offered for an argument slot (e.g. an enum member).
    Parameter(Binding),
}

/// Coarse symbol classification, used for display and filtering.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum SymbolKind {
    Function,
    Method,
    Variable,
    Constant,
    Type,
    Field,
    Parameter,
}

impl SymbolKind {
    /// Get a display label for this kind.
    pub fn display(&self) -> &'static str {
        match self {
            SymbolKind::Function => "Function",
            SymbolKind::Method => "Method",
            SymbolKind::Variable => "Variable",
            SymbolKind::Constant => "Constant",
            SymbolKind::Type => "Type",
            SymbolKind::Field => "Field",
            SymbolKind::Parameter => "Parameter",
        }
    }

    /// Returns true for symbols that are invoked with `(...)`.
    pub fn is_callable(&self) -> bool {
        matches!(self, SymbolKind::Function | SymbolKind::Method)
    }
}

/// A documentation record.
///
/// Records are immutable once loaded and shared as `Arc<DocRecord>`. Code that
/// needs an adjusted copy (hover argument patching) clones the record.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct DocRecord {
    /// Qualified name; also the index key
    pub name: SmolStr,
    /// Description text
    pub desc: Option<String>,
    pub deprecated: bool,
    /// Marks the default choice among argument-slot values
    pub is_default: bool,
    pub kind: RecordKind,
}

impl DocRecord {
    /// Create a record with no description.
    pub fn new(name: impl Into<SmolStr>, kind: RecordKind) -> Self {
        Self {
            name: name.into(),
            desc: None,
            deprecated: false,
            is_default: false,
            kind,
        }
    }

    /// A function record.
    pub fn function(name: impl Into<SmolStr>, args: Vec<Arg>, return_type: Option<&str>) -> Self {
        Self::new(
            name,
            RecordKind::Function(Signature {
                args,
                return_type: return_type.and_then(TypeTag::parse),
                syntax: None,
            }),
        )
    }

    /// A method record.
    pub fn method(name: impl Into<SmolStr>, args: Vec<Arg>, return_type: Option<&str>) -> Self {
        Self::new(
            name,
            RecordKind::Method(Signature {
                args,
                return_type: return_type.and_then(TypeTag::parse),
                syntax: None,
            }),
        )
    }

    /// A variable record.
    pub fn variable(name: impl Into<SmolStr>, ty: Option<&str>) -> Self {
        Self::new(
            name,
            RecordKind::Variable(Binding {
                ty: ty.and_then(TypeTag::parse),
                value: None,
            }),
        )
    }

    /// A constant record.
    pub fn constant(name: impl Into<SmolStr>, ty: Option<&str>) -> Self {
        Self::new(
            name,
            RecordKind::Constant(Binding {
                ty: ty.and_then(TypeTag::parse),
                value: None,
            }),
        )
    }

    /// A field record.
    pub fn field(name: impl Into<SmolStr>, ty: Option<&str>) -> Self {
        Self::new(
            name,
            RecordKind::Field(Binding {
                ty: ty.and_then(TypeTag::parse),
                value: None,
            }),
        )
    }

    /// A user-defined type record.
    pub fn user_type(name: impl Into<SmolStr>, fields: Vec<Arg>) -> Self {
        Self::new(name, RecordKind::Type(TypeDecl { fields }))
    }

    /// An argument-slot value record.
    pub fn parameter(name: impl Into<SmolStr>, ty: Option<&str>) -> Self {
        Self::new(
            name,
            RecordKind::Parameter(Binding {
                ty: ty.and_then(TypeTag::parse),
                value: None,
            }),
        )
    }

    /// Set the description.
    pub fn with_desc(mut self, desc: impl Into<String>) -> Self {
        self.desc = Some(desc.into());
        self
    }

    /// Mark as deprecated.
    pub fn deprecated(mut self) -> Self {
        self.deprecated = true;
        self
    }

    /// Mark as the default argument-slot choice.
    pub fn as_default(mut self) -> Self {
        self.is_default = true;
        self
    }

    /// Wrap in an `Arc` for insertion into an index.
    pub fn shared(self) -> Arc<Self> {
        Arc::new(self)
    }

    /// The coarse kind of this record.
    pub fn symbol_kind(&self) -> SymbolKind {
        match self.kind {
            RecordKind::Function(_) => SymbolKind::Function,
            RecordKind::Method(_) => SymbolKind::Method,
            RecordKind::Variable(_) => SymbolKind::Variable,
            RecordKind::Constant(_) => SymbolKind::Constant,
            RecordKind::Type(_) => SymbolKind::Type,
            RecordKind::Field(_) => SymbolKind::Field,
            RecordKind::Parameter(_) => SymbolKind::Parameter,
        }
    }

    pub fn is_method(&self) -> bool {
        matches!(self.kind, RecordKind::Method(_))
    }

    /// The signature of a function or method.
    pub fn signature(&self) -> Option<&Signature> {
        match &self.kind {
            RecordKind::Function(sig) | RecordKind::Method(sig) => Some(sig),
            _ => None,
        }
    }

    /// Documented arguments (empty for non-callables).
    pub fn args(&self) -> &[Arg] {
        self.signature().map(|sig| sig.args.as_slice()).unwrap_or(&[])
    }

    /// The last segment of the qualified name (`push` for `array.push`).
    pub fn member_name(&self) -> &str {
        self.name.rsplit('.').next().unwrap_or(&self.name)
    }

    /// The qualified-name prefix before the last dot, if any.
    pub fn namespace(&self) -> Option<&str> {
        self.name.rsplit_once('.').map(|(ns, _)| ns)
    }

    /// The type a value of this symbol has: a binding's declared type or,
    /// absent that, a signature's return type.
    pub fn declared_type(&self) -> Option<&TypeTag> {
        match &self.kind {
            RecordKind::Variable(b)
            | RecordKind::Constant(b)
            | RecordKind::Field(b)
            | RecordKind::Parameter(b) => b.ty.as_ref(),
            RecordKind::Function(sig) | RecordKind::Method(sig) => sig.return_type.as_ref(),
            RecordKind::Type(_) => None,
        }
    }

    /// The receiver type a method is declared on: its first argument's type,
    /// or the type named by its qualified-name prefix (`array.push` → `array`).
    ///
    /// A prefix starting with `wildcard_prefix` names the wildcard bucket,
    /// not a type. Returns `None` for non-methods and for methods that
    /// document neither.
    pub fn receiver_type(&self, wildcard_prefix: char) -> Option<TypeTag> {
        let RecordKind::Method(sig) = &self.kind else {
            return None;
        };
        if let Some(ty) = sig.args.first().and_then(|arg| arg.ty.clone()) {
            return Some(ty);
        }
        self.namespace()
            .filter(|ns| !ns.starts_with(wildcard_prefix))
            .and_then(TypeTag::parse)
    }

    /// A copy of this record with the first argument renamed to `receiver`,
    /// so hover text reads as `receiver.method(receiver, ...)`.
    ///
    /// `self` is left untouched.
    pub fn with_receiver_arg(&self, receiver: &str) -> DocRecord {
        let mut copy = self.clone();
        if let RecordKind::Function(sig) | RecordKind::Method(sig) = &mut copy.kind {
            if let Some(first) = sig.args.first_mut() {
                first.name = SmolStr::new(receiver);
            }
        }
        copy
    }
}

/// How a declared alias may be used.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Default)]
pub enum AliasKind {
    /// A pure namespace (an import alias); never a method receiver.
    #[default]
    Namespace,
    /// A value bound to a namespace or type; can receive method calls.
    Instance,
}

/// A declared short name bound to a namespace or type.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct Alias {
    pub name: SmolStr,
    /// What the alias refers to, when known
    pub target: Option<SmolStr>,
    pub kind: AliasKind,
}

impl Alias {
    /// A namespace alias with no recorded target.
    pub fn namespace(name: impl Into<SmolStr>) -> Self {
        Self {
            name: name.into(),
            target: None,
            kind: AliasKind::Namespace,
        }
    }

    /// An instance alias bound to `target`.
    pub fn instance(name: impl Into<SmolStr>, target: impl Into<SmolStr>) -> Self {
        Self {
            name: name.into(),
            target: Some(target.into()),
            kind: AliasKind::Instance,
        }
    }
}
