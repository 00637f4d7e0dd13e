//! DIMACS CNF reader with CryptoMiniSat-style XOR lines (`x1 -2 3 0`).

use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;
use std::str::FromStr;

use log::debug;
use snafu::ResultExt;

use crate::engine::Engine;
use crate::error::{DimacsSnafu, IoSnafu, Result, SolverError};
use crate::ingest::ClauseBatch;
use crate::solver::Solver;

/// `vars[0] ^ ... ^ vars[n-1] == rhs` over positive variables.
#[derive(Debug, Clone, Eq, PartialEq)]
pub struct XorLine {
    pub vars: Vec<i64>,
    pub rhs: bool,
}

#[derive(Debug, Clone, Default, Eq, PartialEq)]
pub struct Dimacs {
    /// Variable count declared by the `p cnf` header.
    pub num_vars: usize,
    pub clauses: Vec<Vec<i64>>,
    pub xors: Vec<XorLine>,
}

fn parse_int(token: &str, line: usize) -> Result<i64> {
    token.parse().ok().ok_or_else(|| {
        DimacsSnafu {
            line,
            message: format!("invalid literal '{}'", token),
        }
        .build()
    })
}

impl Dimacs {
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        debug!("Reading DIMACS from '{}'", path.display());
        let file = File::open(path).context(IoSnafu)?;
        Self::parse(BufReader::new(file))
    }

    /// Clauses may span several lines. A negated literal on an XOR line flips its parity.
    pub fn parse<R: BufRead>(reader: R) -> Result<Self> {
        let mut dimacs = Dimacs::default();
        let mut clause = Vec::new();

        for (index, line) in reader.lines().enumerate() {
            let line_no = index + 1;
            let line = line.context(IoSnafu)?;
            let line = line.trim();

            if line.is_empty() || line.starts_with('c') {
                continue;
            }
            if line.starts_with('%') {
                break;
            }
            if let Some(header) = line.strip_prefix('p') {
                let tokens: Vec<&str> = header.split_whitespace().collect();
                match tokens.as_slice() {
                    ["cnf", vars, _clauses] => {
                        let vars = parse_int(vars, line_no)?;
                        dimacs.num_vars = usize::try_from(vars).map_err(|_| {
                            DimacsSnafu {
                                line: line_no,
                                message: format!("invalid variable count '{}'", vars),
                            }
                            .build()
                        })?;
                    }
                    _ => {
                        return DimacsSnafu {
                            line: line_no,
                            message: format!("invalid header 'p{}'", header),
                        }
                        .fail()
                    }
                }
                continue;
            }
            if let Some(body) = line.strip_prefix('x') {
                if !clause.is_empty() {
                    return DimacsSnafu {
                        line: line_no,
                        message: "XOR line inside an unterminated clause",
                    }
                    .fail();
                }
                let mut xor = XorLine {
                    vars: Vec::new(),
                    rhs: true,
                };
                let mut terminated = false;
                for token in body.split_whitespace() {
                    let x = parse_int(token, line_no)?;
                    if x == 0 {
                        terminated = true;
                        break;
                    }
                    if x < 0 {
                        xor.rhs = !xor.rhs;
                    }
                    xor.vars.push(x.abs());
                }
                if !terminated {
                    return DimacsSnafu {
                        line: line_no,
                        message: "XOR line not terminated by zero",
                    }
                    .fail();
                }
                dimacs.xors.push(xor);
                continue;
            }

            for token in line.split_whitespace() {
                let x = parse_int(token, line_no)?;
                if x == 0 {
                    dimacs.clauses.push(std::mem::take(&mut clause));
                } else {
                    clause.push(x);
                }
            }
        }

        if !clause.is_empty() {
            dimacs.clauses.push(clause);
        }
        debug!(
            "Parsed DIMACS: {} vars, {} clauses, {} XORs",
            dimacs.num_vars,
            dimacs.clauses.len(),
            dimacs.xors.len()
        );
        Ok(dimacs)
    }
}

impl FromStr for Dimacs {
    type Err = SolverError;

    fn from_str(s: &str) -> Result<Self> {
        Self::parse(s.as_bytes())
    }
}

impl<E: Engine> Solver<E> {
    /// Loads a parsed DIMACS problem, declaring the header's variables first.
    pub fn add_dimacs(&mut self, dimacs: &Dimacs) -> Result<()> {
        self.add_clauses(ClauseBatch::List(&dimacs.clauses), dimacs.num_vars)?;
        for xor in &dimacs.xors {
            self.add_xor_clause(&xor.vars, xor.rhs)?;
        }
        Ok(())
    }
}
