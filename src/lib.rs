pub mod error;
pub mod extract;
pub mod field;
pub mod grid;
pub mod interp;
pub mod mesh;
pub mod tables;
pub mod types;
pub mod utils;

pub use error::{MarchingCubesError, Result};
pub use extract::{generate, generate_default};
pub use field::Metaball;
pub use mesh::MeshBuffers;
