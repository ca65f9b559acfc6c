// Pipeline stages and shared errors/models
pub mod filter {
    pub use crate::filter::*;
}

pub mod enrichment {
    pub use crate::enrichment::*;
}

pub mod tagger {
    pub use crate::tagger::*;
}

pub mod scorer {
    pub use crate::scorer::*;
}

pub mod pipeline {
    pub use crate::pipeline::*;
}

pub mod models {
    pub use crate::models::*;
}

pub mod errors {
    pub use crate::errors::*;
}
