//! Library of parser functions for file names

// nom parser combinators
use nom::bytes::complete::{tag, take_till, take_while_m_n};
use nom::character::complete::{alpha0, digit1};
use nom::combinator::{all_consuming, map_res};
use nom::sequence::{preceded, terminated, tuple};
use nom::IResult;

/// First run of decimal digits anywhere in the name, as an integer
///
/// Any run too large for a `u64` fails like a missing run.
pub fn first_digit_run(i: &str) -> IResult<&str, u64> {
    preceded(
        take_till(|c: char| c.is_ascii_digit()),
        map_res(digit1, str::parse::<u64>),
    )(i)
}

/// Five digit step counter appended to solver output, e.g. `00042`
fn step_counter(i: &str) -> IResult<&str, u64> {
    map_res(
        take_while_m_n(5, 5, |c: char| c.is_ascii_digit()),
        str::parse::<u64>,
    )(i)
}

/// Exact solver output name for a given stem, e.g. `Pblock00042.vtu`
///
/// The stem is everything between the leading `P` and the counter.
pub fn solver_output<'a>(stem: &'a str) -> impl FnMut(&'a str) -> IResult<&'a str, u64> {
    move |i: &'a str| {
        all_consuming(preceded(
            tuple((tag("P"), tag(stem))),
            terminated(step_counter, tag(".vtu")),
        ))(i)
    }
}

/// Any solver output name: `P`, then letters, then the counter and `.vtu`
///
/// Only the start of the name has to match, so backup copies such as
/// `Pblock00042.vtu.bak` are included.
pub fn any_solver_output(i: &str) -> IResult<&str, u64> {
    preceded(
        tuple((tag("P"), alpha0)),
        terminated(step_counter, tag(".vtu")),
    )(i)
}

/// Check for a name ending with the extension, with or without the dot
///
/// Anything ending `.vtu` also ends `vtu`, so the dotted form needs no
/// separate check. An empty extension matches every name.
pub fn has_extension(name: &str, extension: &str) -> bool {
    name.ends_with(extension)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_first_digit_run() {
        assert_eq!(first_digit_run("Pblock00042.vtu"), Ok((".vtu", 42)));
        assert_eq!(first_digit_run("12_step_3.vtu"), Ok(("_step_3.vtu", 12)));
        assert_eq!(first_digit_run("step7"), Ok(("", 7)));

        // the first run wins, not the last
        assert_eq!(first_digit_run("P2D_block00010.vtu"), Ok(("D_block00010.vtu", 2)));

        assert!(first_digit_run("no_numbers.vtu").is_err());
        assert!(first_digit_run("").is_err());
        assert!(first_digit_run("P99999999999999999999999.vtu").is_err());
    }

    #[test]
    fn test_solver_output() {
        assert_eq!(solver_output("block")("Pblock00042.vtu"), Ok(("", 42)));
        assert_eq!(solver_output("block")("Pblock00000.vtu"), Ok(("", 0)));

        // wrong stem, counter width, or trailing content
        assert!(solver_output("block")("Pother00042.vtu").is_err());
        assert!(solver_output("block")("Pblock0042.vtu").is_err());
        assert!(solver_output("block")("Pblock000420.vtu").is_err());
        assert!(solver_output("block")("Pblock00042_refactored.vtu").is_err());
        assert!(solver_output("block")("Iblock00042.vtu").is_err());
    }

    #[test]
    fn test_any_solver_output() {
        assert!(any_solver_output("Pblock00042.vtu").is_ok());
        assert!(any_solver_output("P00042.vtu").is_ok());
        assert!(any_solver_output("Pblock00042.vtu.bak").is_ok());

        assert!(any_solver_output("Pblock_a00042.vtu").is_err());
        assert!(any_solver_output("Pblock0042.vtu").is_err());
        assert!(any_solver_output("Pblock00042_refactored.vtu").is_err());
        assert!(any_solver_output("Iblock00042.vtu").is_err());
    }

    #[test]
    fn test_has_extension() {
        assert!(has_extension("Pblock00042.vtu", "vtu"));
        assert!(has_extension("Pblock00042.vtu", ".vtu"));
        assert!(has_extension("results_vtu", "vtu"));
        assert!(!has_extension("results_vtu", ".vtu"));
        assert!(!has_extension("Pblock00042.vtk", "vtu"));

        // an empty extension matches everything
        assert!(has_extension("Pblock00042.vtk", ""));
    }
}
