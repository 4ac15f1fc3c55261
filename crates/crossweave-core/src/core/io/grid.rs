use crate::core::models::board::Board;
use std::io::{self, Write};

/// Writes a finished board as text.
///
/// The grid comes first, one row per line with `.` for empty cells, followed
/// by a blank line and the placed words in placement order.
pub fn write_to(board: &Board, writer: &mut impl Write) -> io::Result<()> {
    write!(writer, "{}", board.render())?;
    writeln!(writer)?;
    for word in board.placed_words() {
        writeln!(writer, "{word}")?;
    }
    Ok(())
}
