use std::{
    fs::File,
    io::{self, BufRead, BufReader, Read},
    path::Path,
    process::{Child, ChildStdout, Command, Stdio},
};

use crate::{
    error::ParseError,
    misc::log::targets,
    solver::{clause::ClauseRef, literal::Literal},
};

/// Trait describing that a struct can process clauses
pub trait ClauseReceiver {
    /// Creates `num_variables` variables
    fn create_variables(&mut self, num_variables: usize);
    /// Add clauses; returns false once the receiver knows the formula is unsatisfiable
    fn add_clause(&mut self, literals: &[Literal]) -> bool;
}

/// Parsing state
struct ParseState<'a> {
    /// Name used in error messages
    filename: &'a str,
    /// Number of variables in header
    num_variables_header: usize,
    /// Number of clauses in header
    num_clauses_header: usize,
    /// Number of parsed clauses
    curr_num_clauses: usize,
    /// Whether already processed the header `p cnf ...`
    processed_header: bool,
    /// Literals of the clause not yet terminated by `0`
    pending: Vec<Literal>,
    /// Whether the receiver still takes clauses; cleared once it reports the
    /// formula unsatisfiable, after which clauses are only counted
    still_satisfiable: bool,
}

impl<'a> ParseState<'a> {
    fn new(filename: &'a str) -> Self {
        Self {
            filename,
            num_variables_header: 0,
            num_clauses_header: 0,
            curr_num_clauses: 0,
            processed_header: false,
            pending: Vec::new(),
            still_satisfiable: true,
        }
    }

    /// Parse the `p cnf <variables> <clauses>` line
    fn header(&mut self, line: &str, line_no: usize) -> Result<(), ParseError> {
        let filename = self.filename;
        let invalid = || ParseError::InvalidHeader {
            filename: filename.to_owned(),
            line_no,
        };
        let parts: Vec<&str> = line.split_whitespace().collect();
        if self.processed_header || parts.len() != 4 || parts[0] != "p" || parts[1] != "cnf" {
            return Err(invalid());
        }
        self.num_variables_header = parts[2].parse().map_err(|_| invalid())?;
        self.num_clauses_header = parts[3].parse().map_err(|_| invalid())?;
        if !can_allocate_variables(self.num_variables_header) {
            return Err(invalid());
        }
        self.processed_header = true;
        Ok(())
    }

    /// Parse a line of zero-terminated clauses
    fn clauses(
        &mut self,
        line: &str,
        line_no: usize,
        receiver: &mut impl ClauseReceiver,
    ) -> Result<(), ParseError> {
        for token in line.split_whitespace() {
            let value: i64 = token.parse().map_err(|_| ParseError::InvalidLiteral {
                filename: self.filename.to_owned(),
                line_no,
            })?;
            match Literal::from_dimacs(value) {
                None => self.finish_clause(receiver),
                Some(literal) => {
                    if literal.var() >= self.num_variables_header {
                        return Err(ParseError::VariableOutOfRange {
                            filename: self.filename.to_owned(),
                            line_no,
                            variable: value.unsigned_abs(),
                            declared: self.num_variables_header,
                        });
                    }
                    self.pending.push(literal);
                }
            }
        }
        Ok(())
    }

    /// Hand the pending clause to the receiver
    fn finish_clause(&mut self, receiver: &mut impl ClauseReceiver) {
        self.curr_num_clauses += 1;
        if self.still_satisfiable && !receiver.add_clause(&self.pending) {
            log::debug!(target: targets::PARSE, "Clause {} makes the formula unsatisfiable", self.curr_num_clauses);
            self.still_satisfiable = false;
        }
        self.pending.clear();
    }
}

/// Whether the per-literal tables of `num_variables` variables fit in memory
fn can_allocate_variables(num_variables: usize) -> bool {
    let Some(num_literals) = num_variables.checked_mul(2) else {
        return false;
    };
    let mut watch_lists: Vec<Vec<ClauseRef>> = Vec::new();
    watch_lists.try_reserve_exact(num_literals).is_ok()
}

/// Output of a `gzip -dc` child process; a failed exit is reported as a read
/// error once the output is exhausted
struct GzipReader {
    child: Child,
    stdout: ChildStdout,
}

impl Read for GzipReader {
    fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        let read = self.stdout.read(buf)?;
        if read == 0 && !buf.is_empty() {
            let status = self.child.wait()?;
            if !status.success() {
                return Err(io::Error::new(
                    io::ErrorKind::InvalidData,
                    format!("gzip failed ({status})"),
                ));
            }
        }
        Ok(read)
    }
}

impl Drop for GzipReader {
    fn drop(&mut self) {
        // Reap the child even if parsing stopped before its output ended
        if let Ok(None) = self.child.try_wait() {
            let _ = self.child.kill();
        }
        let _ = self.child.wait();
    }
}

/// Open plain text file
fn open_plain_file(filename: &str) -> Result<Box<dyn BufRead>, ParseError> {
    let file = File::open(filename).map_err(|source| ParseError::Open {
        filename: filename.to_owned(),
        source,
    })?;
    Ok(Box::new(BufReader::new(file)))
}

/// Open xz-compressed file
fn open_xz_file(filename: &str) -> Result<Box<dyn BufRead>, ParseError> {
    let file = File::open(filename).map_err(|source| ParseError::Open {
        filename: filename.to_owned(),
        source,
    })?;
    Ok(Box::new(BufReader::new(xz2::read::XzDecoder::new(file))))
}

/// Open gzip-compressed file
fn open_gzip_file(filename: &str) -> Result<Box<dyn BufRead>, ParseError> {
    let open_error = |source| ParseError::Open {
        filename: filename.to_owned(),
        source,
    };
    if !Path::new(filename).exists() {
        return Err(open_error(io::Error::from(io::ErrorKind::NotFound)));
    }
    let mut child = Command::new("gzip")
        .args(["-dc", filename])
        .stdout(Stdio::piped())
        .stderr(Stdio::null())
        .spawn()
        .map_err(open_error)?;
    let Some(stdout) = child.stdout.take() else {
        let _ = child.kill();
        let _ = child.wait();
        return Err(open_error(io::Error::other("gzip has no output")));
    };
    Ok(Box::new(BufReader::new(GzipReader { child, stdout })))
}

/// Parse `.cnf`, `.cnf.xz`, or `.cnf.gz`
pub fn parse_cnf(filename: &str, receiver: &mut impl ClauseReceiver) -> Result<(), ParseError> {
    let path = Path::new(filename);
    let file = match path.extension() {
        Some(x) if x.eq_ignore_ascii_case("xz") => open_xz_file(filename)?,
        Some(x) if x.eq_ignore_ascii_case("gz") => open_gzip_file(filename)?,
        _ => open_plain_file(filename)?,
    };
    parse_dimacs(file, filename, receiver)
}

/// Parse DIMACS CNF from `reader`; `filename` is only used in errors
pub fn parse_dimacs(
    reader: impl BufRead,
    filename: &str,
    receiver: &mut impl ClauseReceiver,
) -> Result<(), ParseError> {
    let mut curr_state = ParseState::new(filename);
    for (line_idx, line_res) in reader.lines().enumerate() {
        let line_no = line_idx + 1;
        let line = line_res.map_err(|source| ParseError::Read {
            filename: filename.to_owned(),
            line_no,
            source,
        })?;
        let line = line.trim();
        match line {
            // Blank line or comment
            l if l.is_empty() || l.starts_with('c') => {}
            // End of input in SATLIB files
            l if l.starts_with('%') => break,
            // Header
            l if l.starts_with('p') => {
                curr_state.header(l, line_no)?;
                log::debug!(
                    target: targets::PARSE,
                    "Header declares {} variables and {} clauses",
                    curr_state.num_variables_header,
                    curr_state.num_clauses_header
                );
                receiver.create_variables(curr_state.num_variables_header);
            }
            // Header missing
            _ if !curr_state.processed_header => {
                return Err(ParseError::MissingHeader {
                    filename: filename.to_owned(),
                    line_no,
                });
            }
            // Parse clauses
            l => curr_state.clauses(l, line_no, receiver)?,
        }
    }

    if !curr_state.processed_header {
        return Err(ParseError::MissingHeader {
            filename: filename.to_owned(),
            line_no: 0,
        });
    }

    // Final clause without terminating zero
    if !curr_state.pending.is_empty() {
        curr_state.finish_clause(receiver);
    }

    // Check number of clauses
    if curr_state.curr_num_clauses != curr_state.num_clauses_header {
        return Err(ParseError::ClauseCount {
            filename: filename.to_owned(),
            expected: curr_state.num_clauses_header,
            found: curr_state.curr_num_clauses,
        });
    }
    Ok(())
}
