use super::Fpf;

/// `2^e` as an `f64`, built from its bit pattern so subnormal powers are
/// exact too. Saturates to `0` below `2^-1074` and to infinity above `2^1023`.
pub(crate) fn pow2(e: i32) -> f64 {
    match e {
        i32::MIN..=-1075 => 0.0,
        -1074..=-1023 => f64::from_bits(1u64 << (e + 1074)),
        -1022..=1023 => f64::from_bits(((e + 1023) as u64) << 52),
        1024..=i32::MAX => f64::INFINITY,
    }
}

impl Fpf {
    /// Weight of the least significant bit, `2^lsb`.
    pub fn resolution(&self) -> f64 {
        pow2(self.lsb)
    }

    /// Closed interval `(min, max)` of representable values.
    ///
    /// Signed: `[-2^msb, 2^msb - 2^lsb]`. Unsigned: `[0, 2^(msb+1) - 2^lsb]`.
    /// Exact as long as the word fits an `f64` mantissa (`wl <= 53`).
    pub fn range(&self) -> (f64, f64) {
        if self.signed {
            (-pow2(self.msb), pow2(self.msb) - pow2(self.lsb))
        } else {
            (0.0, pow2(self.msb) * 2.0 - pow2(self.lsb))
        }
    }

    /// Nearest multiple of `2^lsb`, ties to even.
    ///
    /// Does not saturate: a value outside `range()` rounds to a grid point
    /// outside it too. See [`Fpf::clamp`]. Non-finite values pass through,
    /// and a grid point past `f64::MAX` steps back to the last finite one.
    pub fn round_to_format(&self, value: f64) -> f64 {
        if !value.is_finite() {
            return value;
        }
        // From 2^(lsb+53) up every f64 is already a multiple of 2^lsb.
        if value.abs() >= pow2(self.lsb + f64::MANTISSA_DIGITS as i32) {
            return value;
        }
        let step = self.resolution();
        let steps = (value / step).round_ties_even();
        let rounded = steps * step;
        if rounded.is_finite() {
            rounded
        } else {
            (steps - steps.signum()) * step
        }
    }

    /// Saturate `value` into `range()`.
    pub fn clamp(&self, value: f64) -> f64 {
        let (min, max) = self.range();
        value.clamp(min, max)
    }

    /// Whether `value` is exactly representable in this format.
    pub fn contains(&self, value: f64) -> bool {
        let (min, max) = self.range();
        value.is_finite() && value >= min && value <= max && self.round_to_format(value) == value
    }

    /// The same word reinterpreted with its binary point moved: both
    /// exponents move by `n`, the word length and signedness are kept.
    ///
    /// `n` is clamped so that the exponents stay within
    /// [`Fpf::MIN_EXPONENT`]`..=`[`Fpf::MAX_EXPONENT`].
    #[must_use]
    pub fn shift(&self, n: i32) -> Fpf {
        // down <= 0 <= up for every constructed format.
        let up = Fpf::MAX_EXPONENT - self.msb;
        let down = Fpf::MIN_EXPONENT - self.lsb;
        let n = n.clamp(down, up);
        Fpf {
            msb: self.msb + n,
            lsb: self.lsb + n,
            ..*self
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn range_of_bytes() {
        let s = Fpf::from_msb_lsb(7, 0, true).unwrap();
        assert_eq!(s.range(), (-128.0, 127.0));
        let u = Fpf::from_msb_lsb(7, 0, false).unwrap();
        assert_eq!(u.range(), (0.0, 255.0));
    }

    #[test]
    fn range_with_fraction() {
        let f = Fpf::parse("Q4.3").unwrap();
        assert_eq!(f.range(), (-8.0, 8.0 - 0.125));
        assert_eq!(f.resolution(), 0.125);
        let g = Fpf::parse("u(-3,-10)").unwrap();
        assert_eq!(g.range(), (0.0, 0.25 - 1.0 / 1024.0));
    }

    #[test]
    fn round_to_integer_grid() {
        let f = Fpf::from_msb_lsb(7, 0, true).unwrap();
        assert_eq!(f.round_to_format(25.0), 25.0);
        assert_eq!(f.round_to_format(25.001), 25.0);
        assert_eq!(f.round_to_format(25.26789), 25.0);
        assert_eq!(f.round_to_format(25.7), 26.0);
        assert_eq!(f.round_to_format(-3.2), -3.0);
    }

    #[test]
    fn round_ties_to_even() {
        let f = Fpf::from_msb_lsb(7, 0, true).unwrap();
        assert_eq!(f.round_to_format(2.5), 2.0);
        assert_eq!(f.round_to_format(3.5), 4.0);
        assert_eq!(f.round_to_format(-2.5), -2.0);
        let g = Fpf::parse("Q2.2").unwrap();
        assert_eq!(g.round_to_format(0.125), 0.0);
        assert_eq!(g.round_to_format(0.375), 0.5);
    }

    #[test]
    fn round_does_not_clamp() {
        let f = Fpf::from_msb_lsb(7, 0, true).unwrap();
        assert_eq!(f.round_to_format(1000.4), 1000.0);
        assert_eq!(f.clamp(1000.0), 127.0);
        assert_eq!(f.clamp(-1000.0), -128.0);
        assert!(f.round_to_format(f64::NAN).is_nan());
        assert_eq!(f.round_to_format(f64::INFINITY), f64::INFINITY);
    }

    #[test]
    fn round_with_positive_lsb() {
        let f = Fpf::from_msb_lsb(10, 3, false).unwrap();
        assert_eq!(f.round_to_format(21.0), 24.0);
        assert_eq!(f.round_to_format(19.0), 16.0);
    }

    #[test]
    fn contains_grid_points_only() {
        let f = Fpf::parse("Q4.3").unwrap();
        assert!(f.contains(-8.0));
        assert!(f.contains(7.875));
        assert!(!f.contains(8.0));
        assert!(!f.contains(0.1));
        assert!(!f.contains(f64::NAN));
    }

    #[test]
    fn shift_moves_both_ends() {
        let f = Fpf::create(Some(16), Some(3), Some(-12), true).unwrap();
        assert_eq!(f.shift(2).wml(), (16, 5, -10));
        assert_eq!(f.shift(-4).wml(), (16, -1, -16));
        assert_eq!(f.shift(0), f);
        assert_eq!(f.shift(7).shift(-7), f);
        assert_eq!(f.wml(), (16, 3, -12));
    }

    #[test]
    fn shift_keeps_signedness() {
        let f = Fpf::parse("uQ4.3").unwrap();
        assert!(!f.shift(3).signed());
    }

    #[test]
    fn exact_powers_of_two() {
        assert_eq!(pow2(0), 1.0);
        assert_eq!(pow2(-3), 0.125);
        assert_eq!(pow2(10), 1024.0);
        assert_eq!(pow2(1023), 2f64.powi(1023));
        assert_eq!(pow2(-1022), f64::MIN_POSITIVE);
        assert_eq!(pow2(-1074), f64::from_bits(1));
        assert_eq!(pow2(-1075), 0.0);
        assert_eq!(pow2(1024), f64::INFINITY);
    }

    #[test]
    fn shift_saturates_at_exponent_limits() {
        let f = Fpf::create(Some(16), Some(3), Some(-12), true).unwrap();
        let top = f.shift(i32::MAX);
        assert_eq!(top.wml(), (16, Fpf::MAX_EXPONENT, Fpf::MAX_EXPONENT - 15));
        let bottom = f.shift(i32::MIN);
        assert_eq!(bottom.wml(), (16, Fpf::MIN_EXPONENT + 15, Fpf::MIN_EXPONENT));
        assert_eq!(top.shift(1), top);
        assert_eq!(bottom.shift(-1), bottom);
    }

    #[test]
    fn arithmetic_at_the_top_exponent() {
        let f = Fpf::from_msb_lsb(Fpf::MAX_EXPONENT, Fpf::MAX_EXPONENT - 7, false).unwrap();
        let (min, max) = f.range();
        assert_eq!(min, 0.0);
        assert_eq!(max, 255.0 * f.resolution());
        assert!(max.is_finite());

        assert_eq!(f.round_to_format(3.0), 0.0);
        assert_eq!(f.clamp(3.0), 3.0);
        assert_eq!(f.clamp(f64::MAX), max);
        // 2^1024 is the nearest grid point but not an f64.
        assert_eq!(f.round_to_format(f64::MAX), 511.0 * f.resolution());
        assert_eq!(f.round_to_format(-f64::MAX), -511.0 * f.resolution());
        assert!(f.contains(max));

        let s = Fpf::from_msb_lsb(Fpf::MAX_EXPONENT, Fpf::MAX_EXPONENT - 7, true).unwrap();
        assert_eq!(s.range(), (-pow2(1022), 127.0 * s.resolution()));
        assert_eq!(s.clamp(-f64::MAX), -pow2(1022));
    }

    #[test]
    fn arithmetic_at_the_bottom_exponent() {
        let f = Fpf::from_msb_lsb(-1060, Fpf::MIN_EXPONENT, true).unwrap();
        assert_eq!(f.resolution(), f64::from_bits(1));
        let (min, max) = f.range();
        assert_eq!(min, -pow2(-1060));
        assert!(min < 0.0 && max > 0.0);

        // Every subnormal is a multiple of 2^-1074.
        assert_eq!(f.round_to_format(1e-320), 1e-320);
        assert_eq!(f.round_to_format(f64::from_bits(7)), f64::from_bits(7));
        assert_eq!(f.clamp(1.0), max);
        assert_eq!(f.clamp(-1.0), min);
        assert!(f.contains(min));
        assert!(f.contains(max));

        let coarse = Fpf::from_msb_lsb(-1060, -1070, true).unwrap();
        assert_eq!(coarse.round_to_format(f64::from_bits(7)), 0.0);
        assert_eq!(coarse.round_to_format(f64::from_bits(24)), f64::from_bits(32));
    }

    #[test]
    fn widest_word_stays_finite() {
        for signed in [true, false] {
            let f = Fpf::from_msb_lsb(Fpf::MAX_EXPONENT, Fpf::MIN_EXPONENT, signed).unwrap();
            let (min, max) = f.range();
            assert!(min.is_finite() && max.is_finite() && min < max);
            assert_eq!(f.round_to_format(1e300), 1e300);
            assert_eq!(f.round_to_format(1e-320), 1e-320);
            assert_eq!(f.clamp(f64::MAX), max);
            assert!(f.clamp(f64::NAN).is_nan());
        }
    }
}
