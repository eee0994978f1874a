//! # optiqr
//!
//! A Rust library for building QR Code symbols (ISO/IEC 18004), from input text to a
//! grid of dark and light modules ready for rendering.
//!
//! ## Features
//!
//! - **Mode segmentation**: Splits input into numeric, alphanumeric, byte and Kanji runs
//! - **Automatic sizing**: Picks the smallest version that fits, then raises the error
//!   correction level as far as that version allows
//! - **GS1 data**: FNC1 mode with `[` as the FNC1 marker
//! - **Reed-Solomon error correction**: Generic GF(2^m) encoder, with presets for QR,
//!   Data Matrix and Australia Post
//! - **Mask selection**: Scores all 8 mask patterns and applies the best one
//!
//! ## Quick Start
//!
//! ```rust
//! use optiqr::QRBuilder;
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! // Simplest usage - provide only data, all other settings are automatically chosen
//! let symbol = QRBuilder::new("HELLO WORLD").encode()?;
//!
//! assert_eq!(symbol.width(), 21);
//! assert!(symbol.info.starts_with("Version: 1\n"));
//! for row in symbol.to_bit_strings() {
//!     println!("{row}");
//! }
//! # Ok(())
//! # }
//! ```
//!
//! ### Full Configuration
//!
//! ```rust
//! use optiqr::{ECLevel, QRBuilder, Version};
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let qr = QRBuilder::new("[01]09501101530008[17]250101")
//!     .version(Version::new(3)?) // Used if the data would fit a smaller version
//!     .ec_level(ECLevel::M)      // Minimum level, raised when the version has room
//!     .gs1(true)                 // '[' marks FNC1
//!     .build()?;
//!
//! assert_eq!(*qr.version(), 3);
//! assert!(qr.ec_level() >= ECLevel::M);
//! # Ok(())
//! # }
//! ```
//!
//! ## Error Correction Levels
//! - **L (Low)**: ~7% error correction
//! - **M (Medium)**: ~15% error correction
//! - **Q (Quartile)**: ~25% error correction
//! - **H (High)**: ~30% error correction

pub mod builder;
pub(crate) mod common;

pub use builder::{Module, ModuleKind, QRBuilder, QR};
pub use common::codec::{compute_segments, Mode, Segment};
pub use common::ec::{GaloisField, ReedSolomon};
pub use common::error::{QRError, QRResult};
pub use common::mask::MaskPattern;
pub use common::metadata::{Color, ECLevel, Version};
pub use common::symbol::Symbol;
