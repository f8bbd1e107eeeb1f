//! Diagnostic image dump over a byte transport.
//!
//! ```text
//! **********IMAGE START**********\n
//! b0 ' ' b1 ' ' ... b27 ' ' \n      one line per row, 28 rows
//! **********IMAGE STOP**********\n
//! ```
//!
//! Pixel bytes are written raw, not as text, so a zero pixel is a NUL byte.

use embedded_io::Write;

use crate::image::{GrayGrid, LO_RES};

pub const START_MARKER: &[u8] = b"**********IMAGE START**********\n";
pub const STOP_MARKER: &[u8] = b"**********IMAGE STOP**********\n";

const LINE_LEN: usize = LO_RES * 2 + 1;

pub fn write_dump<W: Write>(out: &mut W, image: &GrayGrid) -> Result<(), W::Error> {
    out.write_all(START_MARKER)?;

    for row in image.rows() {
        let mut line: heapless::Vec<u8, LINE_LEN> = heapless::Vec::new();
        for &px in row {
            // capacity is exact, pushes cannot fail
            line.push(px).ok();
            line.push(b' ').ok();
        }
        line.push(b'\n').ok();
        out.write_all(&line)?;
    }

    out.write_all(STOP_MARKER)?;
    out.flush()
}
