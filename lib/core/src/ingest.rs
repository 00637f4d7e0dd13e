//! Clause parsing: a single clause, a list of clauses, or a flat zero-delimited buffer.

use std::mem::size_of;
use std::os::raw::{c_int, c_long, c_longlong};

use snafu::ensure;

use crate::error::{MalformedBufferSnafu, Result, UnknownVariableSnafu};
use crate::lit::{decode, IntoRawLit, Lit};

/// A decoded clause together with its largest variable index.
#[derive(Debug, Clone, Default, Eq, PartialEq)]
pub struct ParsedClause {
    pub lits: Vec<Lit>,
    pub max_var: u32,
}

/// Decodes one clause. The first invalid literal aborts the whole clause.
pub fn parse_clause<I>(lits: I) -> Result<ParsedClause>
where
    I: IntoIterator,
    I::Item: IntoRawLit,
{
    let mut parsed = ParsedClause::default();
    for raw in lits {
        let lit = decode(raw)?;
        parsed.max_var = parsed.max_var.max(lit.var());
        parsed.lits.push(lit);
    }
    Ok(parsed)
}

/// Decodes assumption literals, which must refer to the first `num_vars` variables.
pub fn parse_assumptions<I>(lits: I, num_vars: usize) -> Result<Vec<Lit>>
where
    I: IntoIterator,
    I::Item: IntoRawLit,
{
    lits.into_iter()
        .map(|raw| {
            let lit = decode(raw)?;
            ensure!(
                (lit.var() as usize) < num_vars,
                UnknownVariableSnafu {
                    var: lit.var() as i64 + 1
                }
            );
            Ok(lit)
        })
        .collect()
}

/// Element width of a flat clause buffer, one of the C integer types.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum ItemWidth {
    Int,
    Long,
    LongLong,
}

impl ItemWidth {
    /// Resolves a declared item size, preferring `int`, then `long`, then `long long`.
    pub fn from_itemsize(itemsize: usize) -> Result<Self> {
        if itemsize == size_of::<c_int>() {
            Ok(ItemWidth::Int)
        } else if itemsize == size_of::<c_long>() {
            Ok(ItemWidth::Long)
        } else if itemsize == size_of::<c_longlong>() {
            Ok(ItemWidth::LongLong)
        } else {
            MalformedBufferSnafu {
                reason: format!("invalid clause array: invalid itemsize '{}'", itemsize),
            }
            .fail()
        }
    }

    /// Checks an `array.array` typecode: only `i`, `l` and `q` hold clause literals.
    pub fn check_typecode(typecode: &str) -> Result<()> {
        let mut chars = typecode.chars();
        match (chars.next(), chars.next()) {
            (Some('i' | 'l' | 'q'), None) => Ok(()),
            (Some(c), None) => MalformedBufferSnafu {
                reason: format!("invalid clause array: invalid typecode '{}'", c),
            }
            .fail(),
            _ => MalformedBufferSnafu {
                reason: format!("invalid clause array: invalid typecode '{}'", typecode),
            }
            .fail(),
        }
    }

    pub const fn size(self) -> usize {
        match self {
            ItemWidth::Int => size_of::<c_int>(),
            ItemWidth::Long => size_of::<c_long>(),
            ItemWidth::LongLong => size_of::<c_longlong>(),
        }
    }
}

/// Concatenated clauses, each followed by a zero. The last element must be zero.
#[derive(Debug, Copy, Clone)]
pub enum ClauseBuffer<'a> {
    Int(&'a [c_int]),
    Long(&'a [c_long]),
    LongLong(&'a [c_longlong]),
}

impl<'a> ClauseBuffer<'a> {
    pub const fn width(&self) -> ItemWidth {
        match self {
            ClauseBuffer::Int(_) => ItemWidth::Int,
            ClauseBuffer::Long(_) => ItemWidth::Long,
            ClauseBuffer::LongLong(_) => ItemWidth::LongLong,
        }
    }

    pub const fn len(&self) -> usize {
        match self {
            ClauseBuffer::Int(xs) => xs.len(),
            ClauseBuffer::Long(xs) => xs.len(),
            ClauseBuffer::LongLong(xs) => xs.len(),
        }
    }

    pub const fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn get(&self, index: usize) -> i64 {
        match self {
            ClauseBuffer::Int(xs) => xs[index] as i64,
            ClauseBuffer::Long(xs) => xs[index] as i64,
            ClauseBuffer::LongLong(xs) => xs[index] as i64,
        }
    }

    fn check_terminated(&self) -> Result<()> {
        ensure!(
            self.is_empty() || self.get(self.len() - 1) == 0,
            MalformedBufferSnafu {
                reason: "last clause not terminated by zero"
            }
        );
        Ok(())
    }
}

impl<'a> From<&'a [c_int]> for ClauseBuffer<'a> {
    fn from(xs: &'a [c_int]) -> Self {
        ClauseBuffer::Int(xs)
    }
}

impl<'a> From<&'a [c_longlong]> for ClauseBuffer<'a> {
    fn from(xs: &'a [c_longlong]) -> Self {
        ClauseBuffer::LongLong(xs)
    }
}

/// The list type of a batch that only holds a buffer.
pub type NoList = std::iter::Empty<Vec<i64>>;

/// A batch of clauses in one of the two accepted shapes.
///
/// Build buffer batches with [`ClauseBatch::buffer`], which fixes the unused list type.
#[derive(Debug)]
pub enum ClauseBatch<'a, I = NoList> {
    List(I),
    Buffer(ClauseBuffer<'a>),
}

impl<'a> ClauseBatch<'a, NoList> {
    pub fn buffer<B: Into<ClauseBuffer<'a>>>(buffer: B) -> Self {
        ClauseBatch::Buffer(buffer.into())
    }
}

/// Uniform stream of parsed clauses over both batch shapes.
///
/// The list shape yields every clause, empty ones included.
/// The buffer shape skips empty segments between consecutive zeros.
pub(crate) enum ClauseSource<'a, I> {
    List(I),
    Buffer { buffer: ClauseBuffer<'a>, pos: usize },
}

impl<'a, I> ClauseSource<'a, I>
where
    I: Iterator,
    I::Item: IntoIterator,
    <I::Item as IntoIterator>::Item: IntoRawLit,
{
    /// Validates the batch shape before anything is parsed.
    pub(crate) fn new<B>(batch: ClauseBatch<'a, B>) -> Result<Self>
    where
        B: IntoIterator<IntoIter = I>,
    {
        match batch {
            ClauseBatch::List(clauses) => Ok(ClauseSource::List(clauses.into_iter())),
            ClauseBatch::Buffer(buffer) => {
                buffer.check_terminated()?;
                Ok(ClauseSource::Buffer { buffer, pos: 0 })
            }
        }
    }
}

impl<'a, I> Iterator for ClauseSource<'a, I>
where
    I: Iterator,
    I::Item: IntoIterator,
    <I::Item as IntoIterator>::Item: IntoRawLit,
{
    type Item = Result<ParsedClause>;

    fn next(&mut self) -> Option<Self::Item> {
        match self {
            ClauseSource::List(clauses) => clauses.next().map(parse_clause),
            ClauseSource::Buffer { buffer, pos } => loop {
                if *pos >= buffer.len() {
                    return None;
                }
                let start = *pos;
                while buffer.get(*pos) != 0 {
                    *pos += 1;
                }
                let end = *pos;
                // Skip the terminating zero:
                *pos += 1;
                if start < end {
                    return Some(parse_clause((start..end).map(|i| buffer.get(i))));
                }
            },
        }
    }
}
