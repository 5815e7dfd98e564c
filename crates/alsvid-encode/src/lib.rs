//! Classical-to-quantum image encoding schemes.
//!
//! Implements three encodings from the quantum image processing literature,
//! building circuits with `alsvid-ir` and (for the inverse directions)
//! consuming measurement counts and statevectors from `alsvid-sim`:
//!
//! - **FRQI** angle-encodes each pixel intensity into a multi-controlled Ry
//!   rotation, controlled on the pixel's binary position index.
//! - **NEQR** basis-state-encodes an 8-bit intensity per position with
//!   multi-controlled NOTs, and reconstructs the image exactly from
//!   measurement counts.
//! - **QPIE** loads the whole L2-normalized image as the amplitudes of one
//!   state and recovers it from the simulated statevector.
//!
//! All encoders are stateless: each call reads the input array, builds a
//! fresh circuit, and returns.
//!
//! # Example
//!
//! ```
//! use alsvid_encode::NeqrEncoder;
//! use alsvid_sim::Simulator;
//! use ndarray::array;
//!
//! let image = array![[0.0, 85.0 / 255.0], [170.0 / 255.0, 1.0]].into_dyn();
//! let encoder = NeqrEncoder::new();
//!
//! let circuit = encoder.encode(&image, true).unwrap();
//! let result = Simulator::new().run(&circuit, 8192).unwrap();
//! let recovered = encoder.reconstruct(&result.counts, &[2, 2]).unwrap();
//! assert_eq!(recovered, image);
//! ```

pub mod error;
pub mod frqi;
pub mod image;
pub mod index;
pub mod neqr;
pub mod qpie;

pub use error::{EncodeError, EncodeResult};
pub use frqi::{FrqiEncoder, FRQI_ANGLE_SCALE};
pub use image::{ImageLayout, PixelArray};
pub use index::{binarize_indices, index_width, BinaryIndex, IntensityCode};
pub use neqr::NeqrEncoder;
pub use qpie::QpieEncoder;
