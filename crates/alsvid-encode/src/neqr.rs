//! NEQR: novel enhanced quantum representation.
//!
//! Basis-state-encodes an 8-bit intensity value per pixel position so that
//! measurement outcomes are exactly invertible back into the image.

use ndarray::ArrayD;
use tracing::{debug, instrument};

use alsvid_ir::{Circuit, ClassicalRegister, QuantumRegister, QubitId};
use alsvid_sim::Counts;

use crate::error::{EncodeError, EncodeResult};
use crate::image::{channel_pixels, ImageLayout, PixelArray};
use crate::index::{binarize_indices, index_width, BinaryIndex, IntensityCode};

/// Width of the NEQR intensity register. Always 8: intensities are 0-255.
const INTENSITY_QUBITS: u32 = 8;

/// Width of the RGB channel-selector register.
const CHANNEL_QUBITS: u32 = 2;

/// NEQR circuit encoder and measurement-count reconstructor.
///
/// Stateless and reentrant; `require_square` opts into the variant that
/// rejects non-square images up front.
#[derive(Debug, Default)]
pub struct NeqrEncoder {
    require_square: bool,
}

impl NeqrEncoder {
    pub fn new() -> Self {
        Self {
            require_square: false,
        }
    }

    /// Reject non-square images with `InvalidInput` before encoding.
    pub fn require_square(mut self) -> Self {
        self.require_square = true;
        self
    }

    /// Encode a pixel array into a NEQR circuit.
    ///
    /// Register declaration order is `intensity`, `pixels_indexes`, then
    /// `channel` for RGB images; measurement keys therefore read
    /// `"<channel> <index> <intensity>"` (RGB) or `"<index> <intensity>"`
    /// (grayscale), most significant register first.
    #[instrument(skip(self, image))]
    pub fn encode(&self, image: &PixelArray, with_measurement: bool) -> EncodeResult<Circuit> {
        let layout = ImageLayout::of(image)?;
        let num_channels = match layout {
            ImageLayout::Gray { .. } => 1,
            ImageLayout::Rgb { .. } => 3,
            ImageLayout::Multi { channels, .. } => {
                return Err(EncodeError::AmbiguousChannelCount { channels });
            }
        };
        if self.require_square && !layout.is_square() {
            return Err(EncodeError::InvalidInput(format!(
                "image must be square, got {}x{}",
                layout.height(),
                layout.width()
            )));
        }

        let num_pixels = layout.num_pixels();
        let width = index_width(num_pixels);
        let indices = binarize_indices(num_pixels)?;

        debug!(
            "NEQR encoding {}x{} image, {} channels, {} index qubits",
            layout.height(),
            layout.width(),
            num_channels,
            width
        );

        let mut circuit = Circuit::new("neqr");
        let intensity_reg = circuit.add_qreg("intensity", INTENSITY_QUBITS);
        let index_reg = circuit.add_qreg("pixels_indexes", width);
        let channel_reg = (num_channels == 3).then(|| circuit.add_qreg("channel", CHANNEL_QUBITS));

        let intensity_bits = circuit.add_creg("bits_intensity", INTENSITY_QUBITS);
        let index_bits = circuit.add_creg("bits_pixels_indexes", width);
        let channel_bits =
            (num_channels == 3).then(|| circuit.add_creg("bits_channel", CHANNEL_QUBITS));

        // Uniform superposition over positions (and channels).
        for qubit in index_reg.iter() {
            circuit.h(qubit)?;
        }
        if let Some(reg) = &channel_reg {
            for qubit in reg.iter() {
                circuit.h(qubit)?;
            }
        }
        circuit.barrier_all()?;

        let controls: Vec<QubitId> = index_reg
            .iter()
            .chain(channel_reg.iter().flat_map(|reg| reg.iter()))
            .collect();

        for channel in 0..num_channels {
            let pattern = BinaryIndex::new(channel, CHANNEL_QUBITS);
            let pixels = channel_pixels(image, channel);
            for (pixel, index) in pixels.iter().zip(indices.iter()) {
                let code = IntensityCode::from_value(*pixel);
                // Zero intensity costs no gates.
                if code.is_zero() {
                    continue;
                }

                self.open_control(&mut circuit, &index_reg, index, channel_reg.as_ref(), &pattern)?;
                for bit in code.one_bits() {
                    circuit.mcx(&controls, intensity_reg[bit as usize])?;
                }
                self.open_control(&mut circuit, &index_reg, index, channel_reg.as_ref(), &pattern)?;
                circuit.barrier_all()?;
            }
        }

        if with_measurement {
            let qregs: Vec<&QuantumRegister> = [Some(&intensity_reg), Some(&index_reg)]
                .into_iter()
                .flatten()
                .chain(channel_reg.as_ref())
                .collect();
            let cregs: Vec<&ClassicalRegister> = [Some(&intensity_bits), Some(&index_bits)]
                .into_iter()
                .flatten()
                .chain(channel_bits.as_ref())
                .collect();
            for (i, (qreg, creg)) in qregs.iter().zip(cregs.iter()).enumerate() {
                circuit.measure_register(qreg, creg)?;
                if i + 1 < qregs.len() {
                    circuit.barrier_all()?;
                }
            }
        }

        Ok(circuit)
    }

    /// X-sandwich half: flip the zero bits of the position pattern (and, for
    /// RGB, of the channel pattern) so the all-ones control matches exactly
    /// this pixel and channel. Called once before and once after the
    /// controlled gates.
    fn open_control(
        &self,
        circuit: &mut Circuit,
        index_reg: &QuantumRegister,
        index: &BinaryIndex,
        channel_reg: Option<&QuantumRegister>,
        pattern: &BinaryIndex,
    ) -> EncodeResult<()> {
        for pos in index.zero_bits() {
            circuit.x(index_reg[pos as usize])?;
        }
        if let Some(reg) = channel_reg {
            for pos in pattern.zero_bits() {
                circuit.x(reg[pos as usize])?;
            }
        }
        Ok(())
    }

    /// Rebuild a pixel array from measurement counts.
    ///
    /// Keys are sorted lexicographically, which orders them by channel then
    /// pixel index; the unused `"11"` channel pattern is discarded and keys
    /// past the pixel count (index-register padding) are truncated. The
    /// intensity field is the final, 8-bit field of each key.
    #[instrument(skip(self, counts))]
    pub fn reconstruct(&self, counts: &Counts, shape: &[usize]) -> EncodeResult<PixelArray> {
        match shape {
            [height, width] => self.reconstruct_gray(counts, *height, *width),
            [height, width, 3] => self.reconstruct_rgb(counts, *height, *width),
            [_, _, channels] => Err(EncodeError::AmbiguousChannelCount {
                channels: *channels,
            }),
            _ => Err(EncodeError::InvalidShape { ndim: shape.len() }),
        }
    }

    fn reconstruct_gray(
        &self,
        counts: &Counts,
        height: usize,
        width: usize,
    ) -> EncodeResult<PixelArray> {
        let num_pixels = height * width;
        let values = sorted_intensities(counts, None)?;
        if values.len() < num_pixels {
            return Err(EncodeError::InvalidInput(format!(
                "counts cover {} pixel indices but the image has {}",
                values.len(),
                num_pixels
            )));
        }

        let pixels: Vec<f64> = values.into_iter().take(num_pixels).collect();
        let array = ArrayD::from_shape_vec(vec![height, width], pixels)
            .map_err(|e| EncodeError::InvalidInput(e.to_string()))?;
        Ok(array)
    }

    fn reconstruct_rgb(
        &self,
        counts: &Counts,
        height: usize,
        width: usize,
    ) -> EncodeResult<PixelArray> {
        let num_pixels = height * width;
        let mut array = ArrayD::zeros(vec![height, width, 3]);

        for channel in 0..3 {
            let prefix = BinaryIndex::new(channel, CHANNEL_QUBITS).bitstring();
            let values = sorted_intensities(counts, Some(&prefix))?;
            if values.len() < num_pixels {
                return Err(EncodeError::InvalidInput(format!(
                    "counts cover {} pixel indices for channel {} but the image has {}",
                    values.len(),
                    channel,
                    num_pixels
                )));
            }
            for (i, value) in values.into_iter().take(num_pixels).enumerate() {
                array[[i / width, i % width, channel]] = value;
            }
        }

        Ok(array)
    }
}

/// Normalized intensities in pixel-index order, filtered to one channel when
/// a channel prefix is given.
fn sorted_intensities(counts: &Counts, channel: Option<&str>) -> EncodeResult<Vec<f64>> {
    let mut keys: Vec<&str> = counts
        .iter()
        .map(|(key, _)| key)
        .filter(|key| match channel {
            Some(prefix) => key
                .split_whitespace()
                .next()
                .is_some_and(|field| field == prefix),
            None => true,
        })
        .collect();
    keys.sort_unstable();

    keys.into_iter()
        .map(|key| {
            let field = key.split_whitespace().last().ok_or_else(|| {
                EncodeError::InvalidInput(format!("empty counts key {key:?}"))
            })?;
            if field.len() != INTENSITY_QUBITS as usize {
                return Err(EncodeError::InvalidInput(format!(
                    "intensity field {field:?} is not 8 bits"
                )));
            }
            let code = u8::from_str_radix(field, 2).map_err(|_| {
                EncodeError::InvalidInput(format!("malformed intensity field {field:?}"))
            })?;
            Ok(IntensityCode(code).to_value())
        })
        .collect()
}
