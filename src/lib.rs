//! Small in-memory tabular data engine.
//!
//! Architecture:
//! ```text
//!  .csv / .json
//!       │
//!       ▼
//!  ┌──────────┐
//!  │  loader   │  parse file, infer one dtype per column → Frame
//!  └──────────┘
//!       │
//!       ▼
//!  ┌──────────┐
//!  │  Frame    │  Vec<Series> + row labels; select / slice / filter
//!  └──────────┘
//!       │
//!       ▼
//!  ┌──────────┐
//!  │  Series   │  typed nullable column; compare → mask, stats
//!  └──────────┘
//! ```
//!
//! Everything is immutable after load: derived frames are new frames, so
//! concurrent readers need no locking. The library never prints; callers
//! format the returned values however they wish.

pub mod error;
pub mod frame;
pub mod loader;
pub mod series;
pub mod value;

pub use error::{FrameError, Result};
pub use frame::{Frame, Row, NULL_MASK_EXCLUDES};
pub use loader::{load_csv, load_file, load_json};
pub use series::{AggOp, CmpOp, Series};
pub use value::{DType, Value};
