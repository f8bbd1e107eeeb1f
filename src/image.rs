//! Image containers used by one capture cycle.
//!
//! - `HighResImage`: the 224x224 packed-color capture, backed by borrowed
//!   scratch so the large buffer can live in PSRAM and be reused.
//! - `ColorGrid`: the 28x28 downsampled packed colors.
//! - `GrayGrid`: the 28x28 luminance bytes.
//! - `ClassifierInput`: the flat byte buffer handed to the classifier.
//!
//! All grids are square and row-major.

/// Side of the captured drawing area, in display pixels.
pub const HI_RES: usize = 224;
/// Side of the classifier input image.
pub const LO_RES: usize = 28;
/// Block edge used when averaging `HI_RES` down to `LO_RES`.
pub const SCALE: usize = HI_RES / LO_RES;
pub const CLASSIFIER_INPUT_LEN: usize = LO_RES * LO_RES;

const _: () = assert!(HI_RES % LO_RES == 0);

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum ScratchError {
    WrongLength { expected: usize, actual: usize },
}

pub struct HighResImage<'buf> {
    cells: &'buf mut [u16],
}

impl<'buf> HighResImage<'buf> {
    pub const LEN: usize = HI_RES * HI_RES;

    /// Wrap a scratch slice of exactly `LEN` cells.
    pub fn new(cells: &'buf mut [u16]) -> Result<Self, ScratchError> {
        if cells.len() != Self::LEN {
            return Err(ScratchError::WrongLength {
                expected: Self::LEN,
                actual: cells.len(),
            });
        }
        Ok(Self { cells })
    }

    #[inline]
    pub fn get(&self, x: usize, y: usize) -> u16 {
        self.cells[y * HI_RES + x]
    }

    #[inline]
    pub fn set(&mut self, x: usize, y: usize, word: u16) {
        self.cells[y * HI_RES + x] = word;
    }

    pub fn fill(&mut self, word: u16) {
        self.cells.fill(word);
    }

    pub fn row_mut(&mut self, y: usize) -> &mut [u16] {
        &mut self.cells[y * HI_RES..(y + 1) * HI_RES]
    }

    pub fn as_slice(&self) -> &[u16] {
        self.cells
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ColorGrid {
    cells: [u16; LO_RES * LO_RES],
}

impl ColorGrid {
    pub const fn new() -> Self {
        Self {
            cells: [0; LO_RES * LO_RES],
        }
    }

    #[inline]
    pub fn get(&self, x: usize, y: usize) -> u16 {
        self.cells[y * LO_RES + x]
    }

    #[inline]
    pub fn set(&mut self, x: usize, y: usize, word: u16) {
        self.cells[y * LO_RES + x] = word;
    }

    pub fn as_slice(&self) -> &[u16] {
        &self.cells
    }

    pub fn as_mut_slice(&mut self) -> &mut [u16] {
        &mut self.cells
    }
}

impl Default for ColorGrid {
    fn default() -> Self {
        Self::new()
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct GrayGrid {
    cells: [u8; LO_RES * LO_RES],
}

impl GrayGrid {
    pub const fn new() -> Self {
        Self {
            cells: [0; LO_RES * LO_RES],
        }
    }

    #[inline]
    pub fn get(&self, x: usize, y: usize) -> u8 {
        self.cells[y * LO_RES + x]
    }

    #[inline]
    pub fn set(&mut self, x: usize, y: usize, value: u8) {
        self.cells[y * LO_RES + x] = value;
    }

    pub fn fill(&mut self, value: u8) {
        self.cells.fill(value);
    }

    pub fn rows(&self) -> core::slice::Chunks<'_, u8> {
        self.cells.chunks(LO_RES)
    }

    pub fn as_slice(&self) -> &[u8] {
        &self.cells
    }
}

impl Default for GrayGrid {
    fn default() -> Self {
        Self::new()
    }
}

/// Byte-per-pixel buffer handed to the classifier.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ClassifierInput {
    bytes: [u8; CLASSIFIER_INPUT_LEN],
}

impl ClassifierInput {
    pub const fn new() -> Self {
        Self {
            bytes: [0; CLASSIFIER_INPUT_LEN],
        }
    }

    /// Row-by-row copy of a converted grid.
    pub fn copy_from(&mut self, gray: &GrayGrid) {
        for (y, row) in gray.rows().enumerate() {
            self.bytes[y * LO_RES..(y + 1) * LO_RES].copy_from_slice(row);
        }
    }

    pub fn as_bytes(&self) -> &[u8] {
        &self.bytes
    }
}

impl Default for ClassifierInput {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn scale_is_eight() {
        assert_eq!(SCALE, 8);
        assert_eq!(CLASSIFIER_INPUT_LEN, 784);
    }

    #[test]
    fn high_res_rejects_wrong_scratch() {
        let mut short = vec![0u16; HighResImage::LEN - 1];
        assert_eq!(
            HighResImage::new(&mut short).err(),
            Some(ScratchError::WrongLength {
                expected: HighResImage::LEN,
                actual: HighResImage::LEN - 1,
            })
        );
    }

    #[test]
    fn high_res_is_row_major() {
        let mut scratch = vec![0u16; HighResImage::LEN];
        let mut img = HighResImage::new(&mut scratch).unwrap();
        img.set(3, 1, 0xABCD);
        assert_eq!(img.get(3, 1), 0xABCD);
        assert_eq!(img.as_slice()[HI_RES + 3], 0xABCD);
        img.row_mut(2)[0] = 7;
        assert_eq!(img.get(0, 2), 7);
    }

    #[test]
    fn classifier_input_copies_rows() {
        let mut gray = GrayGrid::new();
        gray.set(0, 0, 1);
        gray.set(LO_RES - 1, 0, 2);
        gray.set(0, 1, 3);
        gray.set(LO_RES - 1, LO_RES - 1, 4);

        let mut input = ClassifierInput::new();
        input.copy_from(&gray);
        let bytes = input.as_bytes();
        assert_eq!(bytes.len(), CLASSIFIER_INPUT_LEN);
        assert_eq!(bytes[0], 1);
        assert_eq!(bytes[LO_RES - 1], 2);
        assert_eq!(bytes[LO_RES], 3);
        assert_eq!(bytes[CLASSIFIER_INPUT_LEN - 1], 4);
        assert_eq!(bytes, gray.as_slice());
    }
}
