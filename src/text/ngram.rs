// N-gram generation over token sequences.
//
// Each n-gram is a window of N consecutive tokens joined into one string, so
// the set-based metrics can treat it as an ordinary comparable unit.

use anyhow::Result;

/// Separator placed between tokens inside a single n-gram.
pub const NGRAM_SEPARATOR: &str = " ";

/// Produce every window of `n` consecutive tokens, in input order.
///
/// A sequence shorter than `n` yields an empty vector. `n == 0` is a caller
/// error.
pub fn ngrams<S: AsRef<str>>(tokens: &[S], n: usize) -> Result<Vec<String>> {
    if n == 0 {
        anyhow::bail!("n-gram size must be at least 1, got 0");
    }

    Ok(tokens
        .windows(n)
        .map(|window| {
            window
                .iter()
                .map(|t| t.as_ref())
                .collect::<Vec<&str>>()
                .join(NGRAM_SEPARATOR)
        })
        .collect())
}
