use std::fmt::{Display, Formatter};
use std::os::raw::{c_int, c_long, c_longlong};

use itertools::process_results;
use pyo3::buffer::PyBuffer;
use pyo3::create_exception;
use pyo3::exceptions::{PyException, PySystemError, PyTypeError, PyValueError};
use pyo3::prelude::*;
use pyo3::types::{PyBool, PyInt, PyList, PyTuple};

use cryptosat_core::config::SolverConfig;
use cryptosat_core::ingest::{ClauseBatch, ClauseBuffer, ItemWidth};
use cryptosat_core::lit::RawLit;
use cryptosat_core::solution::{Solution, SolutionFormat};
use cryptosat_core::{SolverError, DEFAULT_MAX_GLUE};

create_exception!(pycryptosat, IllegalState, PyException);

#[pymodule]
fn pycryptosat(m: &Bound<'_, PyModule>) -> PyResult<()> {
    m.add_class::<Solver>()?;
    m.add("IllegalState", m.py().get_type::<IllegalState>())?;
    m.add("__version__", env!("CARGO_PKG_VERSION"))?;
    Ok(())
}

#[pyclass(str)]
struct Solver {
    inner: cryptosat_core::Solver,
}

impl Display for Solver {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.inner)
    }
}

#[pymethods]
impl Solver {
    #[new]
    #[pyo3(signature = (verbose=0, time_limit=0.0, confl_limit=0, threads=1))]
    pub fn new(verbose: i64, time_limit: f64, confl_limit: i64, threads: i64) -> PyResult<Self> {
        let config = SolverConfig::from_host(verbose, time_limit, confl_limit, threads).map_err(CryptoSatError)?;
        Ok(Self {
            inner: cryptosat_core::Solver::from_config(&config),
        })
    }

    pub fn nb_vars(&self) -> usize {
        self.inner.nb_vars()
    }

    pub fn nb_clauses(&self) -> usize {
        self.inner.nb_clauses()
    }

    pub fn add_clause(&mut self, clause: &Bound<'_, PyAny>) -> PyResult<()> {
        let lits = parse_lits(clause)?;
        self.inner.add_clause(lits).map_err(CryptoSatError)?;
        Ok(())
    }

    /// Adds either a list of clauses or an `array.array` of zero-terminated clauses.
    #[pyo3(signature = (clauses, max_var=0))]
    pub fn add_clauses(&mut self, clauses: &Bound<'_, PyAny>, max_var: i64) -> PyResult<()> {
        self.inner.reserve_vars(usize::try_from(max_var).unwrap_or(0));

        if is_clause_array(clauses)? {
            return self.add_clause_array(clauses);
        }

        let iter = clauses
            .try_iter()
            .map_err(|_| PyTypeError::new_err("iterable object expected"))?;
        // Clauses decoded before a host-side failure are still added.
        let mut decoded = Vec::new();
        let mut failure = None;
        for clause in iter {
            match clause.and_then(|clause| parse_lits(&clause)) {
                Ok(lits) => decoded.push(lits),
                Err(err) => {
                    failure = Some(err);
                    break;
                }
            }
        }
        self.inner
            .add_clauses(ClauseBatch::List(decoded), 0)
            .map_err(CryptoSatError)?;
        failure.map_or(Ok(()), Err)
    }

    pub fn add_xor_clause(&mut self, xor_clause: &Bound<'_, PyAny>, rhs: &Bound<'_, PyAny>) -> PyResult<()> {
        let rhs = rhs
            .downcast::<PyBool>()
            .map_err(|_| PyTypeError::new_err("rhs must be boolean"))?
            .is_true();
        let lits = parse_lits(xor_clause)?;
        self.inner.add_xor_clause(lits, rhs).map_err(CryptoSatError)?;
        Ok(())
    }

    /// Returns `(True, solution)` for SAT, where `solution[0]` is `None`
    /// and `solution[v]` is the value of variable `v`.
    /// Returns `(False, None)` for UNSAT and `(None, None)` when undetermined.
    #[pyo3(signature = (assumptions=None))]
    pub fn solve<'py>(
        &mut self,
        py: Python<'py>,
        assumptions: Option<&Bound<'py, PyAny>>,
    ) -> PyResult<(Option<bool>, Option<Bound<'py, PyTuple>>)> {
        let assumptions = match assumptions {
            Some(obj) => parse_lits(obj)?,
            None => Vec::new(),
        };
        let inner = &mut self.inner;
        let (response, solution) = py.allow_threads(|| inner.solve(assumptions)).map_err(CryptoSatError)?;
        let solution = match solution {
            Some(solution) => Some(PyTuple::new(py, solution.as_slice().iter().copied())?),
            None => None,
        };
        Ok((response.to_option(), solution))
    }

    pub fn is_satisfiable(&mut self, py: Python<'_>) -> PyResult<Option<bool>> {
        let inner = &mut self.inner;
        let answer = py.allow_threads(|| inner.is_satisfiable()).map_err(CryptoSatError)?;
        Ok(answer)
    }

    /// Returns up to `max_nr_of_solutions` solutions differing on `var_selected`.
    #[pyo3(signature = (max_nr_of_solutions, var_selected, raw=true))]
    pub fn msolve_selected<'py>(
        &mut self,
        py: Python<'py>,
        max_nr_of_solutions: i64,
        var_selected: &Bound<'py, PyAny>,
        raw: bool,
    ) -> PyResult<Bound<'py, PyList>> {
        let selected = parse_lits(var_selected)?;
        let max_count = usize::try_from(max_nr_of_solutions).unwrap_or(0);
        let format = SolutionFormat::from_raw_flag(raw);
        let inner = &mut self.inner;
        let solutions = py
            .allow_threads(|| inner.msolve_selected(max_count, selected, format))
            .map_err(CryptoSatError)?;

        let tuples = solutions
            .iter()
            .map(|solution| match solution {
                Solution::Raw(s) => PyTuple::new(py, s.as_slice().iter().copied()),
                Solution::Dense(s) => PyTuple::new(py, s.as_slice().iter().copied()),
            })
            .collect::<PyResult<Vec<_>>>()?;
        PyList::new(py, tuples)
    }

    #[pyo3(signature = (max_len, max_glue=DEFAULT_MAX_GLUE))]
    pub fn start_getting_small_clauses(&mut self, max_len: u32, max_glue: u32) {
        self.inner.start_getting_small_clauses(max_len, max_glue);
    }

    /// Returns the next learnt clause as a list of literals, or `None` when done.
    pub fn get_next_small_clause(&mut self) -> PyResult<Option<Vec<i64>>> {
        let clause = self.inner.get_next_small_clause().map_err(CryptoSatError)?;
        Ok(clause.map(|lits| lits.iter().map(|lit| lit.to_external()).collect()))
    }

    pub fn end_getting_small_clauses(&mut self) {
        self.inner.end_getting_small_clauses();
    }
}

impl Solver {
    fn add_clause_array(&mut self, array: &Bound<'_, PyAny>) -> PyResult<()> {
        let py = array.py();
        let typecode: String = array.getattr("typecode")?.extract()?;
        ItemWidth::check_typecode(&typecode).map_err(CryptoSatError)?;
        let itemsize: usize = array.getattr("itemsize")?.extract()?;
        let width = ItemWidth::from_itemsize(itemsize).map_err(CryptoSatError)?;

        let result = match width {
            ItemWidth::Int => {
                let data: Vec<c_int> = PyBuffer::get(array)?.to_vec(py)?;
                self.inner.add_clauses(ClauseBatch::buffer(data.as_slice()), 0)
            }
            ItemWidth::Long => {
                let data: Vec<c_long> = PyBuffer::get(array)?.to_vec(py)?;
                self.inner.add_clauses(ClauseBatch::buffer(ClauseBuffer::Long(&data)), 0)
            }
            ItemWidth::LongLong => {
                let data: Vec<c_longlong> = PyBuffer::get(array)?.to_vec(py)?;
                self.inner.add_clauses(ClauseBatch::buffer(data.as_slice()), 0)
            }
        };
        result.map_err(CryptoSatError)?;
        Ok(())
    }
}

/// Objects shaped like `array.array` take the flat buffer path.
fn is_clause_array(obj: &Bound<'_, PyAny>) -> PyResult<bool> {
    Ok(obj.hasattr("buffer_info")? && obj.hasattr("typecode")? && obj.hasattr("itemsize")?)
}

fn raw_lit(obj: &Bound<'_, PyAny>) -> RawLit {
    if !obj.is_instance_of::<PyInt>() {
        let repr = obj.repr().map(|r| r.to_string()).unwrap_or_default();
        return RawLit::NotInteger(repr);
    }
    match obj.extract::<i128>() {
        Ok(x) => RawLit::Int(x),
        // Wider than 128 bits, out of range either way:
        Err(_) if obj.lt(0).unwrap_or(false) => RawLit::Int(i128::MIN),
        Err(_) => RawLit::Int(i128::MAX),
    }
}

fn parse_lits(obj: &Bound<'_, PyAny>) -> PyResult<Vec<RawLit>> {
    let iter = obj
        .try_iter()
        .map_err(|_| PyTypeError::new_err("iterable object expected"))?;
    process_results(iter, |lits| lits.map(|lit| raw_lit(&lit)).collect())
}

#[derive(Debug)]
struct CryptoSatError(SolverError);

impl From<CryptoSatError> for PyErr {
    fn from(err: CryptoSatError) -> PyErr {
        let message = err.0.to_string();
        match err.0 {
            ref e if e.is_type_error() => PyTypeError::new_err(message),
            SolverError::IllegalEngineState { .. } => IllegalState::new_err(message),
            SolverError::Undetermined { .. } => PySystemError::new_err(message),
            _ => PyValueError::new_err(message),
        }
    }
}
