use crate::error::{InvalidXorLiteralSnafu, Result};
use crate::lit::{decode, IntoRawLit};

/// Decoded XOR clause: 0-based variables (duplicates kept) and their largest index.
#[derive(Debug, Clone, Default, Eq, PartialEq)]
pub struct ParsedXor {
    pub vars: Vec<u32>,
    pub max_var: Option<u32>,
}

/// Decodes an XOR clause. Every entry must be a positive literal.
pub fn parse_xor_clause<I>(lits: I) -> Result<ParsedXor>
where
    I: IntoIterator,
    I::Item: IntoRawLit,
{
    let mut parsed = ParsedXor::default();
    for raw in lits {
        let lit = decode(raw)?;
        if lit.negated() {
            return InvalidXorLiteralSnafu {
                value: lit.to_external(),
            }
            .fail();
        }
        parsed.max_var = parsed.max_var.max(Some(lit.var()));
        parsed.vars.push(lit.var());
    }
    Ok(parsed)
}
