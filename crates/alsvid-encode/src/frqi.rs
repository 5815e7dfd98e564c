//! FRQI: flexible representation of quantum images.
//!
//! Angle-encodes each pixel intensity into a single-qubit rotation, applied
//! under a multi-controlled gate whose controls recognize the pixel's binary
//! position index.

use std::f64::consts::PI;

use tracing::{debug, instrument};

use alsvid_ir::{Circuit, ClassicalRegister, QuantumRegister};

use crate::error::EncodeResult;
use crate::image::{channel_pixels, ImageLayout, PixelArray};
use crate::index::{binarize_indices, index_width};

/// Empirical FRQI angle scaling: `θ = v · FRQI_ANGLE_SCALE · π`.
///
/// The factors are kept verbatim for compatibility with existing encodings;
/// do not simplify.
pub const FRQI_ANGLE_SCALE: f64 = 255.0 * 3.0 / 17.0 / 90.0;

/// FRQI circuit encoder. Stateless and reentrant.
#[derive(Debug, Default)]
pub struct FrqiEncoder;

impl FrqiEncoder {
    pub fn new() -> Self {
        Self
    }

    /// Encode a pixel array into an FRQI circuit.
    ///
    /// Allocates one index register (`pixels_indexes`) in uniform
    /// superposition and one single-qubit intensity register per channel,
    /// then emits one multi-controlled Ry per pixel per channel, in raster
    /// order. When `with_measurement` is set, every quantum register is
    /// measured into its classical mirror.
    #[instrument(skip(self, image))]
    pub fn encode(&self, image: &PixelArray, with_measurement: bool) -> EncodeResult<Circuit> {
        let layout = ImageLayout::of(image)?;
        let num_pixels = layout.num_pixels();
        let width = index_width(num_pixels);
        let indices = binarize_indices(num_pixels)?;

        debug!(
            "FRQI encoding {}x{} image, {} channels, {} index qubits",
            layout.height(),
            layout.width(),
            layout.num_channels(),
            width
        );

        let mut circuit = Circuit::new("frqi");
        let index_reg = circuit.add_qreg("pixels_indexes", width);
        let channel_regs: Vec<QuantumRegister> = channel_names(&layout)
            .into_iter()
            .map(|name| circuit.add_qreg(name, 1))
            .collect();

        let index_bits = circuit.add_creg("bits_pixels_indexes", width);
        let channel_bits: Vec<ClassicalRegister> = channel_regs
            .iter()
            .map(|reg| {
                let name = if reg.name() == "intensity" {
                    "intensity_bit".to_string()
                } else {
                    format!("bit_{}", reg.name())
                };
                circuit.add_creg(name, 1)
            })
            .collect();

        // Uniform superposition over pixel positions.
        for qubit in index_reg.iter() {
            circuit.h(qubit)?;
        }
        circuit.barrier_all()?;

        for (channel, target_reg) in channel_regs.iter().enumerate() {
            let pixels = channel_pixels(image, channel);
            for (pixel, index) in pixels.iter().zip(indices.iter()) {
                let theta = pixel * FRQI_ANGLE_SCALE * PI;

                // Open control: flip the zero bits of the position pattern so
                // the all-ones control recognizes exactly this pixel.
                for pos in index.zero_bits() {
                    circuit.x(index_reg[pos as usize])?;
                }
                circuit.mcry(2.0 * theta, index_reg.bits(), target_reg[0])?;
                for pos in index.zero_bits() {
                    circuit.x(index_reg[pos as usize])?;
                }
                circuit.barrier_all()?;
            }
        }

        if with_measurement {
            let qregs: Vec<&QuantumRegister> =
                std::iter::once(&index_reg).chain(channel_regs.iter()).collect();
            let cregs: Vec<&ClassicalRegister> =
                std::iter::once(&index_bits).chain(channel_bits.iter()).collect();
            for (i, (qreg, creg)) in qregs.iter().zip(cregs.iter()).enumerate() {
                circuit.measure_register(qreg, creg)?;
                if i + 1 < qregs.len() {
                    circuit.barrier_all()?;
                }
            }
        }

        Ok(circuit)
    }
}

/// Intensity register names per channel: a lone `intensity` register for
/// grayscale, `red`/`green`/`blue` for RGB, `ch{i}` otherwise.
fn channel_names(layout: &ImageLayout) -> Vec<String> {
    match layout {
        ImageLayout::Gray { .. } => vec!["intensity".into()],
        ImageLayout::Rgb { .. } => vec!["red".into(), "green".into(), "blue".into()],
        ImageLayout::Multi { channels, .. } => {
            (0..*channels).map(|c| format!("ch{c}")).collect()
        }
    }
}
