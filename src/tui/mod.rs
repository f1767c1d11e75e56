//! Terminal front end — ratatui presentation layer.
//!
//! Model (`App`) + update (key dispatch) + view (`render::draw`). The view is
//! a pure function of the session state; the only retained widget state is
//! the two live editors.

pub mod app;
pub mod editor;
pub mod render;
pub mod runner;
