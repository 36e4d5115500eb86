//! Headless host adapter for the Tidepool renderer.
//!
//! [`Document`] keeps a live element tree in an arena and implements every capability of
//! [`tidepool_core::Host`]. It is what the renderer's own test-suite runs against, and it is
//! useful anywhere a live tree is needed without a platform: snapshot tests, layout
//! experiments, or driving components from a terminal.
//!
//! ```rust
//! use tidepool_core::Host;
//! use tidepool_memory::Document;
//!
//! let mut doc = Document::new();
//! let list = doc.create_element("ul");
//! let item = doc.create_element("li");
//! doc.append_child(list, item);
//! assert_eq!(doc.snapshot(list).children().len(), 1);
//! ```

mod document;
mod snapshot;

pub use document::{Document, HostStats};
pub use snapshot::Snapshot;
