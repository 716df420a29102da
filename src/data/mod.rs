/// Data layer: tables, named observables and loading.
///
/// Architecture:
/// ```text
///  T.csv  E.csv  ...       temp_data.csv / magn_data.csv
///        │                        │
///        ▼                        ▼
///   ┌──────────────┐      ┌──────────────┐
///   │ load_vectors │      │  load_sweep  │   parse file → ObservableTable
///   └──────────────┘      └──────────────┘
///        │                        │
///        ▼                        ▼
///   ┌──────────────┐      ┌──────────────┐
///   │ObservableSet │      │  SweepTable  │   Observable → column
///   └──────────────┘      └──────────────┘
/// ```

pub mod loader;
pub mod model;
