//! Documentation bundle loading.
//!
//! A bundle is a JSON object keyed by category name. Each category holds a
//! list of records; `aliases` holds declared aliases, either as bare names
//! (namespace aliases) or as objects:
//!
//! ```json
//! {
//!   "functions": [{ "name": "ta.sma", "args": [{ "name": "source", "type": "series float" }],
//!                   "returnType": "series float" }],
//!   "methods":   [{ "name": "array.push", "args": [{ "name": "id", "type": "array<type>" }] }],
//!   "variables": [{ "name": "close", "type": "series float" }],
//!   "aliases":   ["ta", { "name": "arr", "target": "array<int>", "kind": "instance" }]
//! }
//! ```
//!
//! Type strings are parsed into [`TypeTag`](crate::hir::TypeTag)s here, once.

use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

use serde::Deserialize;
use smol_str::SmolStr;
use thiserror::Error;
use tracing::debug;

use crate::hir::{
    Alias, AliasKind, Arg, Binding, Category, DocRecord, RecordKind, Signature, SymbolIndex,
    TypeDecl, TypeTag,
};
use crate::ide::ResolverConfig;

/// Errors loading a bundle or a config file.
#[derive(Debug, Error)]
pub enum LoadError {
    #[error("failed to read {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("unknown category `{0}`")]
    UnknownCategory(String),
}

#[derive(Deserialize)]
struct RawBundle {
    #[serde(default)]
    aliases: Vec<RawAlias>,
    #[serde(flatten)]
    categories: BTreeMap<String, Vec<RawRecord>>,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawRecord {
    name: SmolStr,
    #[serde(default)]
    desc: Option<String>,
    #[serde(default, rename = "type")]
    ty: Option<String>,
    #[serde(default)]
    return_type: Option<String>,
    #[serde(default)]
    args: Vec<RawArg>,
    #[serde(default)]
    fields: Vec<RawArg>,
    #[serde(default)]
    syntax: Option<String>,
    #[serde(default)]
    value: Option<serde_json::Value>,
    #[serde(default)]
    is_method: bool,
    #[serde(default, alias = "isDeprecated")]
    deprecated: bool,
    #[serde(default, rename = "default")]
    is_default: bool,
}

#[derive(Deserialize)]
struct RawArg {
    name: SmolStr,
    #[serde(default, rename = "type", alias = "displayType")]
    ty: Option<String>,
    #[serde(default)]
    default: Option<serde_json::Value>,
}

#[derive(Deserialize)]
#[serde(untagged)]
enum RawAlias {
    Name(SmolStr),
    Declared {
        name: SmolStr,
        #[serde(default)]
        target: Option<SmolStr>,
        #[serde(default)]
        kind: RawAliasKind,
    },
}

#[derive(Deserialize, Default)]
#[serde(rename_all = "lowercase")]
enum RawAliasKind {
    #[default]
    Namespace,
    Instance,
}

/// Read and parse the bundle at `path`.
pub fn load_index(path: &Path) -> Result<SymbolIndex, LoadError> {
    let json = read(path)?;
    let index = parse_index(&json)?;
    debug!("[LOAD] {}: {} records", path.display(), index.len());
    Ok(index)
}

/// Parse a bundle from JSON text.
pub fn parse_index(json: &str) -> Result<SymbolIndex, LoadError> {
    let raw: RawBundle = serde_json::from_str(json)?;
    let mut index = SymbolIndex::new();

    for (name, records) in raw.categories {
        let category =
            Category::from_name(&name).ok_or_else(|| LoadError::UnknownCategory(name.clone()))?;
        for record in records {
            index.insert(category, record.into_record(category));
        }
    }
    for alias in raw.aliases {
        index.add_alias(alias.into());
    }
    Ok(index)
}

/// Read a [`ResolverConfig`] from `path`. Missing fields keep their defaults.
pub fn load_config(path: &Path) -> Result<ResolverConfig, LoadError> {
    parse_config(&read(path)?)
}

/// Parse a [`ResolverConfig`] from JSON text.
pub fn parse_config(json: &str) -> Result<ResolverConfig, LoadError> {
    Ok(serde_json::from_str(json)?)
}

fn read(path: &Path) -> Result<String, LoadError> {
    fs::read_to_string(path).map_err(|source| LoadError::Io {
        path: path.to_path_buf(),
        source,
    })
}

impl RawRecord {
    fn into_record(self, category: Category) -> DocRecord {
        let binding = |ty: Option<String>, value: Option<serde_json::Value>| Binding {
            ty: ty.as_deref().and_then(TypeTag::parse),
            value: value.map(render_value),
        };

        let kind = match category {
            Category::Functions | Category::Methods => {
                let signature = Signature {
                    args: self.args.into_iter().map(RawArg::into_arg).collect(),
                    return_type: self.return_type.as_deref().and_then(TypeTag::parse),
                    syntax: self.syntax,
                };
                if category == Category::Methods || self.is_method {
                    RecordKind::Method(signature)
                } else {
                    RecordKind::Function(signature)
                }
            }
            Category::Variables => RecordKind::Variable(binding(self.ty.or(self.return_type), self.value)),
            Category::Constants => RecordKind::Constant(binding(self.ty.or(self.return_type), self.value)),
            Category::Fields => RecordKind::Field(binding(self.ty.or(self.return_type), self.value)),
            Category::Types => RecordKind::Type(TypeDecl {
                fields: self.fields.into_iter().map(RawArg::into_arg).collect(),
            }),
        };

        DocRecord {
            name: self.name,
            desc: self.desc,
            deprecated: self.deprecated,
            is_default: self.is_default,
            kind,
        }
    }
}

impl RawArg {
    fn into_arg(self) -> Arg {
        Arg {
            name: self.name,
            ty: self.ty.as_deref().and_then(TypeTag::parse),
            default: self.default.map(render_value),
        }
    }
}

impl From<RawAlias> for Alias {
    fn from(raw: RawAlias) -> Self {
        match raw {
            RawAlias::Name(name) => Alias::namespace(name),
            RawAlias::Declared { name, target, kind } => Alias {
                name,
                target,
                kind: match kind {
                    RawAliasKind::Namespace => AliasKind::Namespace,
                    RawAliasKind::Instance => AliasKind::Instance,
                },
            },
        }
    }
}

/// Literal values keep strings unquoted and everything else as JSON text.
fn render_value(value: serde_json::Value) -> String {
    match value {
        serde_json::Value::String(s) => s,
        other => other.to_string(),
    }
}
