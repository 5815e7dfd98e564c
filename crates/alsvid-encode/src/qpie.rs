//! QPIE: quantum probability image encoding.
//!
//! Encodes the whole L2-normalized image as the amplitude vector of a single
//! quantum state. State preparation is delegated to the circuit's exact
//! amplitude-initialization primitive; recovery reads the simulated
//! statevector back.

use ndarray::ArrayD;
use num_complex::Complex64;
use tracing::{debug, instrument};

use alsvid_ir::Circuit;
use alsvid_sim::Simulator;

use crate::error::{EncodeError, EncodeResult};
use crate::image::{ImageLayout, PixelArray};
use crate::index::index_width;

/// QPIE circuit encoder. Stateless and reentrant.
#[derive(Debug, Default)]
pub struct QpieEncoder;

impl QpieEncoder {
    pub fn new() -> Self {
        Self
    }

    /// Encode a pixel array as probability amplitudes.
    ///
    /// The image is divided by its Frobenius norm, flattened row-major,
    /// zero-padded to the next power of two, and loaded through an
    /// `initialize` instruction on the `pixel` register. An all-zero image
    /// has no norm and is rejected.
    #[instrument(skip(self, image))]
    pub fn encode(&self, image: &PixelArray, with_measurement: bool) -> EncodeResult<Circuit> {
        let layout = ImageLayout::of(image)?;
        let num_elements = image.len();
        let norm = image.iter().map(|v| v * v).sum::<f64>().sqrt();
        if norm == 0.0 {
            return Err(EncodeError::InvalidInput(
                "image has zero norm, amplitudes cannot be normalized".into(),
            ));
        }

        let width = index_width(num_elements);
        debug!(
            "QPIE encoding {}x{} image, {} elements over {} qubits",
            layout.height(),
            layout.width(),
            num_elements,
            width
        );

        let mut amplitudes: Vec<Complex64> = image
            .iter()
            .map(|v| Complex64::new(v / norm, 0.0))
            .collect();
        amplitudes.resize(1 << width, Complex64::new(0.0, 0.0));

        let mut circuit = Circuit::new("qpie");
        let pixel_reg = circuit.add_qreg("pixel", width);
        let pixel_bits = circuit.add_creg("bits_pixel", width);

        circuit.initialize(amplitudes, pixel_reg.bits())?;

        if with_measurement {
            circuit.barrier_all()?;
            circuit.measure_register(&pixel_reg, &pixel_bits)?;
        }

        Ok(circuit)
    }

    /// Recover the normalized image from an exact statevector.
    ///
    /// Takes the real part of each amplitude, drops the power-of-two
    /// padding, and reshapes row-major. Only statevector recovery is
    /// supported; measurement probabilities lose sign and phase.
    pub fn recover_from_statevector(
        &self,
        statevector: &[Complex64],
        shape: &[usize],
    ) -> EncodeResult<PixelArray> {
        let num_elements: usize = shape.iter().product();
        if statevector.len() < num_elements {
            return Err(EncodeError::InvalidInput(format!(
                "statevector of length {} cannot fill shape {:?}",
                statevector.len(),
                shape
            )));
        }

        let reals: Vec<f64> = statevector
            .iter()
            .take(num_elements)
            .map(|amp| amp.re)
            .collect();
        ArrayD::from_shape_vec(shape.to_vec(), reals)
            .map_err(|e| EncodeError::InvalidInput(e.to_string()))
    }

    /// Simulate a prepared circuit and recover the normalized image.
    pub fn recover(&self, circuit: &Circuit, shape: &[usize]) -> EncodeResult<PixelArray> {
        let statevector = Simulator::new().statevector(circuit)?;
        self.recover_from_statevector(&statevector, shape)
    }
}
