//! Decoding of whitespace separated ASCII data array payloads

// crate modules
use crate::error::{Error, Result};

// feapost modules
use feapost_utils::f;

// external crates
use log::warn;

// nom parser combinators
use nom::bytes::complete::take_while_m_n;
use nom::character::complete::{char, satisfy};
use nom::combinator::{all_consuming, recognize};
use nom::number::complete::double;
use nom::sequence::tuple;
use nom::IResult;

/// Decode a whitespace separated list of floats
///
/// Every token is parsed as an `f64`. Tokens that fail to parse but show the
/// signature of a dropped exponent marker are repaired to `0.0`, anything else
/// is an error.
///
/// FEAP writes very small values with a three digit exponent and no room left
/// for the `E`, so `6.89234E-310` comes out as `6.89234-310`. These values are
/// all denormals and effectively zero, so they are replaced rather than
/// reinterpreted.
pub fn floats(text: &str) -> Result<Vec<f64>> {
    text.split_whitespace().map(float).collect()
}

/// Decode a whitespace separated list of non-negative integers
pub fn indices(text: &str) -> Result<Vec<usize>> {
    text.split_whitespace()
        .map(|token| {
            token.parse::<usize>().map_err(|_| {
                Error::MalformedDocument(f!("invalid index \"{token}\" in data array"))
            })
        })
        .collect()
}

/// Decode a single float token, repairing dropped exponents
pub fn float(token: &str) -> Result<f64> {
    if let Ok((_, value)) = all_consuming(double::<&str, ()>)(token) {
        return Ok(value);
    }

    // signed infinities, as written by FloatExt::ascii()
    if let Ok(value) = token.parse::<f64>() {
        return Ok(value);
    }

    if has_dropped_exponent(token) {
        warn!("Dropped exponent in \"{token}\", value set to 0.0");
        return Ok(0.0);
    }

    Err(Error::MalformedDocument(f!(
        "invalid number \"{token}\" in data array"
    )))
}

/// Check for `<digit>.<5 digits>-<3 digits>` anywhere in a token
///
/// e.g. `6.89234-310`, as written by FEAP for `6.89234E-310`.
pub fn has_dropped_exponent(token: &str) -> bool {
    token
        .char_indices()
        .any(|(idx, _)| dropped_exponent(&token[idx..]).is_ok())
}

/// Recognise the dropped exponent signature at the start of the input
fn dropped_exponent(i: &str) -> IResult<&str, &str> {
    recognize(tuple((
        satisfy(|c| c.is_ascii_digit()),
        char('.'),
        take_while_m_n(5, 5, |c: char| c.is_ascii_digit()),
        char('-'),
        take_while_m_n(3, 3, |c: char| c.is_ascii_digit()),
    )))(i)
}
