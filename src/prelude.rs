//! Prelude module for convenient imports
//!
//! This module re-exports the most commonly used types and traits from the brickflow crate.
//! Import this module to get access to the core functionality without having to import
//! each type individually.
//!
//! # Example
//!
//! ```rust
//! use brickflow::prelude::*;
//!
//! # fn run_example() -> Result<()> {
//! // Assemble a small playbook
//! let mut session = PlaybookSession::new();
//! let intake = session.add_brick(BrickCategory::Collection, Position::default()).id.clone();
//! let draft = session.add_brick(BrickCategory::Documentation, Position::default()).id.clone();
//! session.connect(&intake, &draft).ok_or("connect failed")?;
//!
//! // Check it and lay it out
//! let issues = session.validate();
//! assert!(!has_errors(&issues));
//! session.auto_layout();
//!
//! // Persist and restore
//! let mut store = MemoryStore::new();
//! session.save(&mut store, "workstream-1")?;
//! let mut restored = PlaybookSession::new();
//! restored.load(&store, "workstream-1")?;
//! assert_eq!(restored.bricks().len(), 2);
//! # Ok(())
//! # }
//! # run_example().unwrap();
//! ```

// Session and graph model
pub use crate::graph::{
    Brick, BrickValidity, Condition, Connection, ConnectionKind, HandleSide, PlaybookDefinition,
    Position, to_dot,
};
pub use crate::session::PlaybookSession;

// Brick catalog
pub use crate::catalog::{BrickCategory, CollectionField, OutputField, static_outputs};

// Analysis and templates
pub use crate::analysis::{Analyzer, BrickRef, FieldDataFlow, FieldFlow, UpstreamField};
pub use crate::template::{
    StaticTemplates, TemplateDirectory, VariableCoverage, VariableResolution, analyze_coverage,
    extract_variables, template_coverage,
};

// Graph checks and layout
pub use crate::autoconfig::{BrickPatch, configure_connection};
pub use crate::layout::layout;
pub use crate::validation::{Issue, Severity, has_errors, validate};

// Persistence
pub use crate::store::{GraphStore, IntoPlaybook, MemoryStore, PlaybookRows, PlaybookSnapshot};

// Error types
pub use crate::error::{ConversionError, StoreError};

// Result type alias for convenience
pub type Result<T> = std::result::Result<T, Box<dyn std::error::Error>>;
