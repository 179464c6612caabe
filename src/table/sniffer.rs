//! Delimiter and quote detection from a text sample
//!
//! Two passes run over the sample lines. The first looks for fields fully
//! enclosed in quotes; when it finds some, the quote character and the
//! delimiter adjoining those fields are taken from it. Otherwise the
//! delimiter is the candidate character that occurs the same number of times
//! on (nearly) every line, or failing that, the preferred candidate that
//! occurs on every line at all.

use thiserror::Error;

/// Number of leading bytes inspected when sniffing a file
pub const SAMPLE_SIZE: usize = 1024;

/// Delimiter candidates, in preference order
const PREFERRED_DELIMITERS: &[u8] = b",\t;|:";

/// Quote candidates, in preference order
const QUOTE_CHARS: &[u8] = b"\"'";

/// Lowest share of sample lines (percent) that must agree on a delimiter count
const MIN_CONSISTENCY: u32 = 90;

/// The formatting convention of a delimited text table
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Dialect {
    pub delimiter: u8,
    pub quote: u8,
    /// Whitespace following a delimiter is not part of the field
    pub skip_initial_space: bool,
}

impl Default for Dialect {
    fn default() -> Self {
        Self::with_delimiter(b',')
    }
}

impl Dialect {
    pub fn with_delimiter(delimiter: u8) -> Self {
        Self {
            delimiter,
            quote: b'"',
            skip_initial_space: false,
        }
    }
}

/// Reasons a sample does not determine a dialect
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SniffError {
    #[error("the sample contains no data")]
    EmptySample,
    #[error("could not determine the delimiter from the sample")]
    NoDelimiter,
}

/// Infer the dialect of a table from a leading sample of its text.
///
/// `truncated` tells whether the sample was cut from a longer file, in which
/// case its last line is incomplete and left out of the analysis.
pub fn sniff(sample: &str, truncated: bool) -> Result<Dialect, SniffError> {
    let sample = sample.strip_prefix('\u{feff}').unwrap_or(sample);
    let mut lines: Vec<&str> = sample
        .lines()
        .map(|line| line.trim_end_matches('\r'))
        .filter(|line| !line.trim().is_empty())
        .collect();
    if truncated && lines.len() > 1 && !sample.ends_with('\n') {
        lines.pop();
    }
    if lines.is_empty() {
        return Err(SniffError::EmptySample);
    }

    let (quote, delimiter) = match guess_quote_and_delimiter(&lines) {
        Some((quote, Some(delimiter))) => (quote, delimiter),
        Some((quote, None)) => (quote, guess_delimiter(&lines)?),
        None => (b'"', guess_delimiter(&lines)?),
    };

    Ok(Dialect {
        delimiter,
        quote,
        skip_initial_space: skips_initial_space(&lines, delimiter),
    })
}

/// What sits next to a quoted field
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Boundary {
    /// Start or end of the line
    Edge,
    /// A separator character
    Separator(u8),
}

fn is_word_byte(b: u8) -> bool {
    b.is_ascii_alphanumeric() || !b.is_ascii()
}

/// Classify the bytes before position `at` (exclusive), walking backwards
fn boundary_before(bytes: &[u8], at: usize) -> Option<Boundary> {
    let mut k = at;
    let mut saw_space = false;
    while k > 0 {
        let c = bytes[k - 1];
        if c == b' ' {
            saw_space = true;
            k -= 1;
            continue;
        }
        if is_word_byte(c) || QUOTE_CHARS.contains(&c) {
            return saw_space.then_some(Boundary::Separator(b' '));
        }
        return Some(Boundary::Separator(c));
    }
    Some(Boundary::Edge)
}

/// Classify the bytes from position `from` onwards
fn boundary_after(bytes: &[u8], from: usize) -> Option<Boundary> {
    let mut k = from;
    let mut saw_space = false;
    while k < bytes.len() {
        let c = bytes[k];
        if c == b' ' {
            saw_space = true;
            k += 1;
            continue;
        }
        if is_word_byte(c) || QUOTE_CHARS.contains(&c) {
            return saw_space.then_some(Boundary::Separator(b' '));
        }
        return Some(Boundary::Separator(c));
    }
    Some(Boundary::Edge)
}

/// Find the closing quote of a field opened at `open`, skipping doubled quotes
fn closing_quote(bytes: &[u8], open: usize, quote: u8) -> Option<usize> {
    let mut k = open + 1;
    while k < bytes.len() {
        if bytes[k] == quote {
            if bytes.get(k + 1) == Some(&quote) {
                k += 2;
                continue;
            }
            return Some(k);
        }
        k += 1;
    }
    None
}

/// Look for quoted fields; returns the quote character and, when the quoted
/// fields are bounded by one, the delimiter
fn guess_quote_and_delimiter(lines: &[&str]) -> Option<(u8, Option<u8>)> {
    let mut quote_counts = [0usize; QUOTE_CHARS.len()];
    let mut delimiter_votes: Vec<[usize; 256]> = vec![[0; 256]; QUOTE_CHARS.len()];

    for line in lines {
        let bytes = line.as_bytes();
        for (qi, &quote) in QUOTE_CHARS.iter().enumerate() {
            let mut i = 0;
            while i < bytes.len() {
                if bytes[i] != quote {
                    i += 1;
                    continue;
                }
                let Some(before) = boundary_before(bytes, i) else {
                    i += 1;
                    continue;
                };
                let Some(close) = closing_quote(bytes, i, quote) else {
                    break;
                };
                let Some(after) = boundary_after(bytes, close + 1) else {
                    i = close + 1;
                    continue;
                };
                let delimiter = match (before, after) {
                    (Boundary::Separator(a), Boundary::Separator(b)) if a != b => {
                        i = close + 1;
                        continue;
                    }
                    (Boundary::Separator(d), _) | (_, Boundary::Separator(d)) => Some(d),
                    (Boundary::Edge, Boundary::Edge) => None,
                };
                quote_counts[qi] += 1;
                if let Some(d) = delimiter {
                    delimiter_votes[qi][d as usize] += 1;
                }
                i = close + 1;
            }
        }
    }

    let (qi, _) = quote_counts
        .iter()
        .enumerate()
        .filter(|(_, count)| **count > 0)
        .max_by(|(ia, a), (ib, b)| a.cmp(b).then(ib.cmp(ia)))?;

    let votes = &delimiter_votes[qi];
    let delimiter = (0..=255u8)
        .filter(|d| votes[*d as usize] > 0)
        .max_by(|a, b| {
            votes[*a as usize]
                .cmp(&votes[*b as usize])
                .then(preference_rank(*b).cmp(&preference_rank(*a)))
        });

    Some((QUOTE_CHARS[qi], delimiter))
}

/// Lower rank is preferred
fn preference_rank(delimiter: u8) -> usize {
    PREFERRED_DELIMITERS
        .iter()
        .position(|d| *d == delimiter)
        .unwrap_or(match delimiter {
            b' ' => PREFERRED_DELIMITERS.len(),
            _ => PREFERRED_DELIMITERS.len() + 1,
        })
}

/// Pick the candidate whose per-line count is the most consistent. When no
/// count is consistent enough, the preferred candidate present on every line
/// wins, so short or long rows surface later as row errors.
fn guess_delimiter(lines: &[&str]) -> Result<u8, SniffError> {
    let candidates = PREFERRED_DELIMITERS.iter().copied().chain(std::iter::once(b' '));

    // (candidate, consistency percent, present on every line)
    let scored: Vec<(u8, u32, bool)> = candidates
        .filter_map(|candidate| {
            let counts: Vec<usize> = lines
                .iter()
                .map(|line| line.bytes().filter(|b| *b == candidate).count())
                .collect();
            let (mode, frequency) = mode_of(&counts)?;
            if mode == 0 {
                return None;
            }
            let percent = (frequency * 100 / lines.len()) as u32;
            Some((candidate, percent, counts.iter().all(|n| *n > 0)))
        })
        .collect();

    for threshold in (MIN_CONSISTENCY..=100).rev() {
        let best = scored
            .iter()
            .filter(|(_, percent, _)| *percent >= threshold)
            .min_by_key(|(candidate, _, _)| preference_rank(*candidate));
        if let Some((candidate, _, _)) = best {
            return Ok(*candidate);
        }
    }

    scored
        .iter()
        .filter(|(_, _, everywhere)| *everywhere)
        .min_by_key(|(candidate, _, _)| preference_rank(*candidate))
        .map(|(candidate, _, _)| *candidate)
        .ok_or(SniffError::NoDelimiter)
}

/// Most frequent value and its frequency; ties go to the larger value
fn mode_of(values: &[usize]) -> Option<(usize, usize)> {
    let mut tally: Vec<(usize, usize)> = Vec::new();
    for value in values {
        match tally.iter_mut().find(|(v, _)| v == value) {
            Some((_, n)) => *n += 1,
            None => tally.push((*value, 1)),
        }
    }
    tally
        .into_iter()
        .max_by(|(va, na), (vb, nb)| na.cmp(nb).then(va.cmp(vb)))
}

fn skips_initial_space(lines: &[&str], delimiter: u8) -> bool {
    if delimiter == b' ' {
        return false;
    }
    let mut occurrences = 0;
    for line in lines {
        let bytes = line.as_bytes();
        for (i, b) in bytes.iter().enumerate() {
            if *b == delimiter {
                occurrences += 1;
                if bytes.get(i + 1) != Some(&b' ') {
                    return false;
                }
            }
        }
    }
    occurrences > 0
}
