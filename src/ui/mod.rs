//! Terminal rendering layer.
//!
//! ```text
//! AppState → compute_viewmodel → UIViewModel → render_layout → ANSI output
//! ```
//!
//! - [`viewmodel`]: display-ready snapshot of the state
//! - [`renderer`]: entry point called from the plugin's render hook
//! - [`components`]: one renderer per pane section
//! - [`helpers`]: cursor positioning, padding, truncation, highlighting
//! - [`theme`]: color themes and escape sequences

pub mod components;
pub mod helpers;
pub mod renderer;
pub mod theme;
pub mod viewmodel;

pub use renderer::render;
pub use theme::Theme;
pub use viewmodel::{
    CandidateDetails, CandidateRow, EmptyState, FilterPanel, FooterInfo, HeaderInfo, PaginationBar,
    SearchBarInfo, StatusKind, StatusLine, UIViewModel,
};
