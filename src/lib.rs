//! # Brickflow - Contract Playbook Graph Engine
//!
//! **Brickflow** is the graph core of a contract playbook builder. It owns the
//! bricks (workflow steps) and connections of a playbook, analyses what data
//! flows where, auto-configures freshly drawn connections, validates the
//! structure, and lays the graph out for a visual editor.
//!
//! ## Core Workflow
//!
//! The engine is host-agnostic. It operates on a canonical in-memory model of
//! a playbook graph. The primary workflow is:
//!
//! 1.  **Load Your Data**: Parse whatever your host persists (database rows, JSON exports) into your own Rust structs.
//! 2.  **Convert to Brickflow's Model**: Implement the `IntoPlaybook` trait for your structs, or deserialize straight into the bundled `PlaybookRows` layout.
//! 3.  **Edit**: Drive a `PlaybookSession` from editor events: add bricks, draw connections (auto-configuration runs once per new connection), patch labels and configs.
//! 4.  **Analyse**: Ask the session's `Analyzer` for upstream data, document pickers and field provenance; check template coverage; run `validate` and `auto_layout` before presenting the result.
//!
//! ## Quick Start
//!
//! The following example assembles and checks a small NDA playbook.
//!
//! ```rust
//! use brickflow::prelude::*;
//!
//! fn main() -> Result<()> {
//!     let templates = StaticTemplates::new().with_template(
//!         "tpl-nda",
//!         "NDA",
//!         "Hello {{workstream.name}}, the {{previous_output.counterparty}} NDA is ready.",
//!     );
//!     let mut session = PlaybookSession::new().with_templates(templates);
//!
//!     // Collect the deal facts, generate the NDA from them, then review it.
//!     let intake = session
//!         .add_brick(BrickCategory::Collection, Position::default())
//!         .id
//!         .clone();
//!     session.update_brick_config(
//!         &intake,
//!         [(
//!             "fields".to_string(),
//!             serde_json::json!([{ "name": "counterparty", "label": "Counterparty" }]),
//!         )],
//!     );
//!     let draft = session
//!         .add_brick(BrickCategory::Documentation, Position::default())
//!         .id
//!         .clone();
//!     session.update_brick_config(
//!         &draft,
//!         [("template_id".to_string(), serde_json::json!("tpl-nda"))],
//!     );
//!     let review = session
//!         .add_brick(BrickCategory::Review, Position::default())
//!         .id
//!         .clone();
//!     session.connect(&intake, &draft).ok_or("connect failed")?;
//!     session.connect(&draft, &review).ok_or("connect failed")?;
//!
//!     // Auto-configuration named the review step after the template.
//!     assert_eq!(session.brick(&review).unwrap().label, "Review NDA");
//!
//!     // Every template variable is covered by upstream data.
//!     let coverage = session.template_coverage(&draft, "tpl-nda").unwrap();
//!     assert!(coverage.iter().all(|c| c.resolution.is_resolved()));
//!
//!     // Structure is sound; give it editor coordinates.
//!     assert!(!has_errors(&session.validate()));
//!     session.auto_layout();
//!     Ok(())
//! }
//! ```

pub mod analysis;
pub mod autoconfig;
pub mod catalog;
pub mod error;
pub mod graph;
pub mod layout;
pub mod prelude;
pub mod session;
pub mod store;
pub mod template;
pub mod validation;
