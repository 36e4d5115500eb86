#![doc = include_str!("../README.md")]
#![allow(clippy::multiple_crate_versions)]

mod attributes;
pub mod config;
mod lifecycle;
pub mod logging;
mod meta;
mod mount;
mod patch;
mod renderer;


#[doc(inline)]
pub use config::{RendererBuilder, RendererConfig};
#[doc(inline)]
pub use logging::install_tracing;
#[doc(inline)]
pub use renderer::Renderer;

#[doc(inline)]
pub use tidepool_core::{
    Component, ComponentType, Error, Event, Handler, Host, InstanceId, NodeId, NodeRef,
    NodeType, Props, RenderFn, Result, Scope, VChild, VNode, Value, h, props,
};
