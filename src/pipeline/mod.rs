//! Pipeline stages for Markdown-to-TSX conversion.
//!
//! Each submodule implements exactly one step, so each is testable on its
//! own with plain strings.
//!
//! ## Data Flow
//!
//! ```text
//! input ──▶ images ──▶ transform ──▶ splice
//! (read)    (catalog)  (lines→JSX)   (return ( … ))
//! ```
//!
//! 1. [`input`]     — validate and read the Markdown document
//! 2. [`images`]    — catalog `![alt](path)` references and create the
//!    images folder
//! 3. [`transform`] — classify each line and emit JSX, using [`inline`] for
//!    escaping and emphasis/link/code rules
//! 4. [`splice`]    — insert the markup into the target component

pub mod images;
pub mod inline;
pub mod input;
pub mod splice;
pub mod transform;
