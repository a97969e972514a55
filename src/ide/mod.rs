//! IDE features — request-level APIs for editor integrations.
//!
//! This module sits between the semantic model (HIR) and the editor. Each
//! function answers one editor request.
//!
//! ## Design Principles
//!
//! 1. **Pure functions**: Take data in, return data out
//! 2. **No editor types**: Positions and results are our own types
//! 3. **Degrade, don't fail**: completion turns errors into empty results;
//!    hover reports them to the caller
//!
//! ## Usage
//!
//! ```ignore
//! use std::sync::Arc;
//! use pinelens::base::{DocumentId, LineCol};
//! use pinelens::ide::AnalysisHost;
//!
//! let host = AnalysisHost::new(Arc::new(index));
//! let analysis = host.analysis();
//!
//! let list = analysis.completions(DocumentId::new(0), "myArray.pu", LineCol::new(0, 10), None);
//! let hover = analysis.hover("myArray.push")?;
//! ```

mod analysis;
mod completion;
mod config;
mod handoff;
mod hover;
mod matcher;
mod methods;
pub mod text_utils;

pub use analysis::{Analysis, AnalysisHost};
pub use completion::{CompletionCandidate, CompletionKind, CompletionList, completions};
pub use config::ResolverConfig;
pub use handoff::{HandoffSlot, PendingHandoff};
pub use hover::{HoverResult, hover};
pub use matcher::{NameMatcher, typo_count};
pub use methods::{MethodCandidates, MethodResolver, generate_candidate_names};
