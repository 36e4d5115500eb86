//! Core data model for the Tidepool renderer.
//!
//! This crate holds everything the renderer and its host adapters agree on, without any of
//! the reconciliation logic itself:
//!
//! - [`node`] - immutable virtual nodes ([`VNode`], [`VChild`]) and the [`h`] factory
//! - [`value`] - prop and state values ([`Value`], [`Props`])
//! - [`component`] - the stateful [`Component`] contract and pure [`RenderFn`]s
//! - [`host`] - the [`Host`] capability set a platform adapter implements
//! - [`error`] - the error taxonomy shared by every crate in the workspace

#[macro_use]
mod macros;
pub mod component;
pub mod error;
pub mod event;
pub mod handler;
pub mod host;
pub mod node;
pub mod value;

#[doc(inline)]
pub use component::{Component, ComponentType, InstanceId, RenderFn, Scope};
#[doc(inline)]
pub use error::{Error, Result};
#[doc(inline)]
pub use event::Event;
#[doc(inline)]
pub use handler::{Handler, NodeRef};
#[doc(inline)]
pub use host::{Host, NodeId};
#[doc(inline)]
pub use node::{NodeType, VChild, VNode, h};
#[doc(inline)]
pub use value::{Props, Value};
