//! Event Registry model types.

mod aggregate;
mod article;
mod entity;
mod event;
mod mention;

pub use aggregate::*;
pub use article::*;
pub use entity::*;
pub use event::*;
pub use mention::*;
