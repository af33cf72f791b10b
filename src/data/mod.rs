/// Data layer: core types, loading, and reshaping.
///
/// Architecture:
/// ```text
///   x y z text file
///        │
///        ▼
///   ┌──────────┐
///   │  loader  │  parse lines → InputTable
///   └──────────┘
///        │
///        ▼
///   ┌──────────┐
///   │ reshape  │  split columns → (81, 44) grids
///   └──────────┘
///        │
///        ▼
///   ┌──────────────┐
///   │ SurfaceGrids │  X, Y, Z
///   └──────────────┘
/// ```

pub mod loader;
pub mod model;
pub mod reshape;
