//! Body rendering for entry display.
//!
//! # Responsibility
//! - Turn raw entry bodies into HTML fragments safe to embed verbatim.
//!
//! # Invariants
//! - Output only contains escaped text plus `<p>`, `<br />`, `<strong>`
//!   and `<code>` markup.
//! - Rendering is total: every input string yields some output.

pub mod body;

pub use body::{escape_html, render_body, KEYWORD_LABELS};
