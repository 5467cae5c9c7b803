//! Tests for the access decision engine.
//!
//! Organized by subject:
//! - Issue actions (view, create, mutate, comments, files, dependencies)
//! - Administrative actions (templates, states, fields, projects,
//!   users, groups)
