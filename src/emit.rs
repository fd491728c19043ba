use std::io::Write;

use crate::error::Error;
use crate::table::VdropTable;

pub const VALUES_PER_LINE: usize = 8;
pub const ARRAY_NAME: &str = "vdrop";
pub const TOOL_NAME: &str = "generate-dvdb-table";

/// How the table is laid out in the generated C source.
#[derive(Debug, Clone)]
pub struct Layout {
    pub array_name: String,
    pub per_line: usize,
}

impl Default for Layout {
    fn default() -> Self {
        Layout {
            array_name: ARRAY_NAME.to_string(),
            per_line: VALUES_PER_LINE,
        }
    }
}

/// Writes `table` as a `const uint16_t` array, `per_line` values to a row.
///
/// Every value is followed by a comma, including the last one on each row.
/// A short final row is kept rather than dropped.
pub fn write_c_array<W: Write>(
    out: &mut W,
    table: &VdropTable,
    layout: &Layout,
) -> Result<(), Error> {
    if layout.per_line == 0 {
        return Err(Error::ZeroRowWidth);
    }

    writeln!(
        out,
        "// Voltage dop per byte saved/restored to/from FRAM when no energy is supplied."
    )?;
    writeln!(out, "// Generated by {}", TOOL_NAME)?;
    writeln!(out, "#include <stdint.h>")?;
    writeln!(out, "const uint16_t {}[] = {{", layout.array_name)?;

    for row in table.entries().chunks(layout.per_line) {
        for value in row {
            write!(out, "{},", value)?;
        }
        writeln!(out)?;
    }

    writeln!(out, "}};")?;
    Ok(())
}
