//! Web viewer module for metasnap
//!
//! Serves the current analysis result as an HTML page and JSON API. A new
//! result can be posted at any time and replaces the previous one.

pub mod page;
pub mod routes;
pub mod server;

pub use page::{PageOptions, render_html_page};
pub use server::{AppState, ServerConfig, build_app, start_server};
