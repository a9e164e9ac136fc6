use std::io::{self, BufRead, Write};

use crate::report::Report;

/// Ask before an unbounded journal read. Only "y"/"Y" confirms; EOF declines.
pub fn confirm_all<R: BufRead, W: Write>(mut input: R, report: &mut Report<W>) -> io::Result<bool> {
    report.all_history_warning()?;
    report.ask("Are you sure you want to continue? (y/N): ")?;

    let mut answer = String::new();
    input.read_line(&mut answer)?;
    Ok(answer.trim().eq_ignore_ascii_case("y"))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn answer(text: &str) -> bool {
        colored::control::set_override(false);
        let mut report = Report::new(Vec::new());
        confirm_all(text.as_bytes(), &mut report).unwrap()
    }

    #[test]
    fn only_y_confirms() {
        assert!(answer("y\n"));
        assert!(answer("  Y \n"));
        assert!(!answer("yes\n"));
        assert!(!answer("n\n"));
        assert!(!answer("\n"));
        assert!(!answer(""));
    }

    #[test]
    fn question_is_shown_without_newline() {
        colored::control::set_override(false);
        let mut report = Report::new(Vec::new());
        confirm_all("n\n".as_bytes(), &mut report).unwrap();
        let out = String::from_utf8(report.into_inner()).unwrap();
        assert!(out.ends_with("[?] Are you sure you want to continue? (y/N): "));
    }
}
