//! Upstream source and export integrations.

pub mod source {
    pub use crate::source::*;
}

pub mod export {
    pub use crate::export::*;
}
