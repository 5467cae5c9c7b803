//! issuegate-domain: Workflow and access-control decision engine
//!
//! This crate contains the decision core of the issue tracker:
//! - Entity model: projects, templates, states, issues, fields, users, groups
//! - Field-type facade: validation constraints and value coercion per kind
//! - State-transition and responsible resolvers
//! - Permission resolver with request-scoped memoization
//! - Access decision engine (voters) answering yes/no per action
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────┐
//! │              issuegate-domain               │
//! ├─────────────────────────────────────────────┤
//! │  model/      - Entities, ids, enums         │
//! │  field/      - Field-type facade            │
//! │  permission/ - Permission resolver + cache  │
//! │  resolver/   - Transition & responsible     │
//! │  voter/      - Access decision engine       │
//! └─────────────────────────────────────────────┘
//! ```
//!
//! The engine is request-scoped: construct a [`voter::DecisionEngine`] per
//! inbound command, let it memoize permission lookups for that request,
//! and drop it with the request. All writes happen in the calling command
//! handler after an affirmative decision.

pub mod error;
pub mod field;
pub mod model;
pub mod permission;
pub mod resolver;
pub mod translate;
pub mod voter;

// Re-export commonly used types at the crate root
pub use error::{DomainError, DomainResult};
pub use translate::{NoopTranslator, Translator};
pub use voter::{DecisionEngine, EngineConfig};
