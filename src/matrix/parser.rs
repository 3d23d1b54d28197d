use super::SimilarityMatrix;
use crate::errors::{GraphError, Result};
use std::collections::HashSet;
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;
use tracing::{debug, warn};

const DELIMITER: char = '\t';

/// Parse a matrix from an iterator of text lines.
///
/// Fails with [`GraphError::MalformedInput`] on the first shape or value
/// problem. No partial matrix is ever returned.
pub fn parse_matrix<I, S>(lines: I) -> Result<SimilarityMatrix>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    parse_lines(lines.into_iter().map(Ok))
}

/// Parse a matrix held in memory.
pub fn parse_matrix_str(text: &str) -> Result<SimilarityMatrix> {
    parse_matrix(text.lines())
}

/// Read and parse a matrix file.
pub fn read_matrix(path: &Path) -> Result<SimilarityMatrix> {
    let file = File::open(path)
        .map_err(|e| GraphError::io("failed to open matrix file", path, e))?;
    let lines = BufReader::new(file)
        .lines()
        .map(|line| line.map_err(|e| GraphError::io("failed to read matrix file", path, e)));

    let matrix = parse_lines(lines)?;
    debug!(
        path = %path.display(),
        nodes = matrix.len(),
        "parsed similarity matrix"
    );
    Ok(matrix)
}

fn parse_lines<I, S>(mut lines: I) -> Result<SimilarityMatrix>
where
    I: Iterator<Item = Result<S>>,
    S: AsRef<str>,
{
    let header = match lines.next() {
        Some(line) => line?,
        None => return Err(GraphError::malformed("input is empty", 1, None)),
    };
    let node_ids = parse_header(header.as_ref())?;
    let n = node_ids.len();

    let mut rows = Vec::with_capacity(n);
    for (i, expected_id) in node_ids.iter().enumerate() {
        let line_no = i + 2;
        let line = match lines.next() {
            Some(line) => line?,
            None => {
                return Err(GraphError::malformed(
                    format!(
                        "missing data row for '{}' (expected {} rows, found {})",
                        expected_id, n, i
                    ),
                    line_no,
                    None,
                ))
            }
        };
        rows.push(parse_row(line.as_ref(), expected_id, n, line_no)?);
    }

    let mut trailing = 0usize;
    for line in lines {
        match line {
            Ok(line) if line.as_ref().trim().is_empty() => {}
            Ok(_) => trailing += 1,
            Err(e) => {
                // Content past the matrix is never fatal; stop reading it
                warn!(error = %e, "stopped reading after the last matrix row");
                trailing += 1;
                break;
            }
        }
    }
    if trailing > 0 {
        warn!(
            lines = trailing,
            "ignoring non-empty lines after the last matrix row"
        );
    }

    Ok(SimilarityMatrix { node_ids, rows })
}

/// Header tokens are trimmed and empty tokens dropped.
fn parse_header(line: &str) -> Result<Vec<String>> {
    let ids: Vec<String> = line
        .split(DELIMITER)
        .map(str::trim)
        .filter(|token| !token.is_empty())
        .map(str::to_string)
        .collect();

    if ids.is_empty() {
        return Err(GraphError::malformed("header lists no node identifiers", 1, None));
    }

    let mut seen = HashSet::with_capacity(ids.len());
    for (idx, id) in ids.iter().enumerate() {
        if !seen.insert(id.as_str()) {
            return Err(GraphError::malformed(
                format!("duplicate node identifier '{}' in header", id),
                1,
                Some(idx + 1),
            ));
        }
    }

    Ok(ids)
}

fn parse_row(line: &str, expected_id: &str, n: usize, line_no: usize) -> Result<Vec<f64>> {
    let fields: Vec<&str> = line.split(DELIMITER).map(str::trim).collect();

    if fields.len() != n + 1 {
        return Err(GraphError::malformed(
            format!(
                "row '{}' has {} fields, expected {}",
                expected_id,
                fields.len(),
                n + 1
            ),
            line_no,
            None,
        ));
    }

    if fields[0] != expected_id {
        return Err(GraphError::malformed(
            format!(
                "row identifier mismatch: expected '{}', found '{}'",
                expected_id, fields[0]
            ),
            line_no,
            Some(1),
        ));
    }

    fields[1..]
        .iter()
        .enumerate()
        .map(|(j, token)| {
            parse_value(token).ok_or_else(|| {
                GraphError::malformed(
                    format!("invalid similarity value '{}' in row '{}'", token, expected_id),
                    line_no,
                    Some(j + 2),
                )
            })
        })
        .collect()
}

fn parse_value(token: &str) -> Option<f64> {
    token.parse::<f64>().ok().filter(|v| v.is_finite())
}

#[cfg(test)]
mod tests {
    use super::*;
    use indoc::indoc;

    #[test]
    fn test_parse_three_node_matrix() {
        let text = "A\tB\tC\nA\t1\t0.5\t0.2\nB\t0.5\t1\t0.7\nC\t0.2\t0.7\t1\n";
        let matrix = parse_matrix_str(text).unwrap();

        assert_eq!(matrix.node_ids, vec!["A", "B", "C"]);
        assert_eq!(matrix.len(), 3);
        assert_eq!(matrix.value(1, 2), Some(0.7));
        assert_eq!(matrix.value(2, 0), Some(0.2));
    }

    #[test]
    fn test_header_tokens_are_trimmed_and_empty_dropped() {
        let text = "\t A \t\tB\t\nA\t1\t0.3\nB\t0.3\t1";
        let matrix = parse_matrix_str(text).unwrap();
        assert_eq!(matrix.node_ids, vec!["A", "B"]);
    }

    #[test]
    fn test_row_tokens_are_trimmed() {
        let text = "A\tB\n A \t 1 \t 0.25\nB\t0.25\t1 ";
        let matrix = parse_matrix_str(text).unwrap();
        assert_eq!(matrix.value(0, 1), Some(0.25));
    }

    #[test]
    fn test_empty_input_fails() {
        let err = parse_matrix(Vec::<String>::new()).unwrap_err();
        assert!(matches!(err, GraphError::MalformedInput { line: 1, .. }));
    }

    #[test]
    fn test_blank_header_fails() {
        let err = parse_matrix_str(" \t \nA\t1").unwrap_err();
        assert!(matches!(err, GraphError::MalformedInput { line: 1, .. }));
    }

    #[test]
    fn test_duplicate_header_id_fails() {
        let err = parse_matrix_str("A\tB\tA\n").unwrap_err();
        assert!(matches!(
            err,
            GraphError::MalformedInput {
                line: 1,
                column: Some(3),
                ..
            }
        ));
    }

    #[test]
    fn test_missing_row_fails() {
        let text = "A\tB\tC\nA\t1\t0.5\t0.2\nB\t0.5\t1\t0.7\n";
        let err = parse_matrix_str(text).unwrap_err();
        match err {
            GraphError::MalformedInput { line, message, .. } => {
                assert_eq!(line, 4);
                assert!(message.contains("'C'"));
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_wrong_field_count_fails() {
        let text = "A\tB\nA\t1\t0.5\t0.9\nB\t0.5\t1";
        let err = parse_matrix_str(text).unwrap_err();
        match err {
            GraphError::MalformedInput { line, message, .. } => {
                assert_eq!(line, 2);
                assert!(message.contains("has 4 fields, expected 3"));
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_row_identifier_mismatch_fails() {
        let text = indoc! {"
            A\tB\tC
            A\t1\t0.5\t0.2
            X\t0.5\t1\t0.7
            C\t0.2\t0.7\t1
        "};
        let err = parse_matrix_str(text).unwrap_err();
        match err {
            GraphError::MalformedInput {
                line,
                column,
                message,
            } => {
                assert_eq!(line, 3);
                assert_eq!(column, Some(1));
                assert!(message.contains("expected 'B', found 'X'"));
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_unparsable_value_reports_column() {
        let text = "A\tB\nA\t1\tabc\nB\t0.5\t1";
        let err = parse_matrix_str(text).unwrap_err();
        match err {
            GraphError::MalformedInput {
                line,
                column,
                message,
            } => {
                assert_eq!(line, 2);
                assert_eq!(column, Some(3));
                assert!(message.contains("'abc'"));
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_non_finite_values_rejected() {
        for bad in ["NaN", "inf", "-inf"] {
            let text = format!("A\tB\nA\t1\t{bad}\nB\t0.5\t1");
            assert!(parse_matrix_str(&text).is_err(), "{bad} should be rejected");
        }
    }

    #[test]
    fn test_diagonal_must_still_be_numeric() {
        let text = "A\tB\nA\t-\t0.5\nB\t0.5\t1";
        assert!(parse_matrix_str(text).is_err());
    }

    #[test]
    fn test_trailing_lines_are_ignored() {
        let text = "A\tB\nA\t1\t0.5\nB\t0.5\t1\n\nextra\tstuff\n";
        let matrix = parse_matrix_str(text).unwrap();
        assert_eq!(matrix.len(), 2);
    }

    #[test]
    fn test_unreadable_bytes_after_last_row_are_ignored() {
        let dir = tempfile::TempDir::new().unwrap();
        let path = dir.path().join("matrix.txt");
        let mut bytes = b"A\tB\nA\t1\t0.5\nB\t0.5\t1\n".to_vec();
        bytes.extend_from_slice(&[0xff, 0xfe, b'\n', b'x', b'\n']);
        std::fs::write(&path, bytes).unwrap();

        let matrix = read_matrix(&path).unwrap();
        assert_eq!(matrix.node_ids, vec!["A", "B"]);
        assert_eq!(matrix.value(0, 1), Some(0.5));
    }

    #[test]
    fn test_unreadable_bytes_inside_matrix_fail() {
        let dir = tempfile::TempDir::new().unwrap();
        let path = dir.path().join("matrix.txt");
        let mut bytes = b"A\tB\nA\t1\t0.5\n".to_vec();
        bytes.extend_from_slice(&[0xff, 0xfe, b'\n']);
        std::fs::write(&path, bytes).unwrap();

        assert!(matches!(read_matrix(&path), Err(GraphError::Io { .. })));
    }

    #[test]
    fn test_read_matrix_missing_file() {
        let err = read_matrix(Path::new("/nonexistent/dir/matrix.txt")).unwrap_err();
        assert!(matches!(err, GraphError::Io { .. }));
    }
}
