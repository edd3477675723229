// ABOUTME: Tool module - defines tools, parameter specs, registry, dispatch.
// ABOUTME: Core abstraction for agent capabilities.

mod registry;
mod result;
mod spec;
mod traits;

pub use registry::*;
pub use result::*;
pub use spec::*;
pub use traits::*;

#[cfg(test)]
mod registry_test;
