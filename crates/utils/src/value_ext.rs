use crate::f;

/// Extends primitives with more specific formatting options
pub trait ValueExt {
    /// Better scientific number formatting
    ///
    /// The default is not very consistent for scientific in particular, so this
    /// allows easy definition.
    ///
    /// Works for anything that can be represented as scientific using the
    /// `LowerExp` trait, which is pretty much every numerical primitive.
    ///
    /// ```rust
    /// # use feapost_utils::ValueExt;
    /// let number: f64 = -1.0;
    /// assert_eq!(number.sci(5, 2), "-1.00000e+00".to_string());
    /// assert_eq!(1.0_f64.sci(5, 2), "1.00000e+00".to_string());
    /// assert_eq!(6.89234e-310_f64.sci(5, 3), "6.89234e-310".to_string());
    /// ```
    fn sci(&self, precision: usize, exp_pad: usize) -> String;
}

impl<T: std::fmt::LowerExp> ValueExt for T {
    fn sci(&self, precision: usize, exp_pad: usize) -> String {
        let mut num = f!("{:.precision$e}", &self, precision = precision);
        // Safe to `unwrap` as `num` is guaranteed to contain `'e'`
        let exp = num.split_off(num.find('e').unwrap());
        // Make sure the exponent is signed
        let (sign, exp) = match exp.strip_prefix("e-") {
            Some(exp) => ('-', exp),
            None => ('+', &exp[1..]),
        };
        // Pad the exponent with zeros if needed and put it back on the number
        num.push_str(&f!("e{}{:0>pad$}", sign, exp, pad = exp_pad));
        num
    }
}

/// Extends `f64` with a lossless, compact text representation
pub trait FloatExt {
    /// Shortest text that parses back to exactly the same value
    ///
    /// Plain decimal notation is used for moderate magnitudes and exponent
    /// notation for very small or very large values, so that denormals such
    /// as `6.89234e-310` do not explode into hundreds of zeros.
    ///
    /// ```rust
    /// # use feapost_utils::FloatExt;
    /// assert_eq!(0.0_f64.ascii(), "0");
    /// assert_eq!((-2.5_f64).ascii(), "-2.5");
    /// assert_eq!(1.0e-5_f64.ascii(), "1e-5");
    /// assert_eq!(6.89234e-310_f64.ascii(), "6.89234e-310");
    /// assert_eq!(f64::NAN.ascii(), "nan");
    /// assert_eq!(f64::NEG_INFINITY.ascii(), "-inf");
    ///
    /// let value: f64 = 0.1 + 0.2;
    /// assert_eq!(value.ascii().parse::<f64>().unwrap(), value);
    /// ```
    fn ascii(&self) -> String;
}

impl FloatExt for f64 {
    fn ascii(&self) -> String {
        if self.is_nan() {
            return "nan".to_string();
        }

        if self.is_infinite() {
            return match self.is_sign_negative() {
                true => "-inf".to_string(),
                false => "inf".to_string(),
            };
        }

        let magnitude = self.abs();
        if *self == 0.0 || (1.0e-4..1.0e16).contains(&magnitude) {
            f!("{self}")
        } else {
            f!("{self:e}")
        }
    }
}
