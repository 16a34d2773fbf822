use fxp::Fpf;
use proptest::prelude::*;

fn any_fpf() -> impl Strategy<Value = Fpf> {
    (2i32..=30, -30i32..=30, any::<bool>())
        .prop_map(|(wl, msb, signed)| Fpf::from_wl_msb(wl, msb, signed).unwrap())
}

/// Words of up to 53 bits anywhere in the accepted exponent window.
fn any_extreme_fpf() -> impl Strategy<Value = Fpf> {
    (1i32..=53, Fpf::MIN_EXPONENT..=Fpf::MAX_EXPONENT, any::<bool>())
        .prop_filter_map("outside the exponent window", |(wl, lsb, signed)| {
            Fpf::from_wl_lsb(wl, lsb, signed).ok()
        })
}

fn any_finite() -> impl Strategy<Value = f64> {
    prop::num::f64::NORMAL | prop::num::f64::SUBNORMAL | prop::num::f64::ZERO
}

proptest! {
    #[test]
    fn prop_wml_satisfies_invariant(f in any_fpf()) {
        let (wl, msb, lsb) = f.wml();
        prop_assert_eq!(wl, msb - lsb + 1);
        prop_assert_eq!(Fpf::create(Some(wl), Some(msb), Some(lsb), f.signed()).unwrap(), f);
    }

    #[test]
    fn prop_display_parses_back(f in any_fpf()) {
        prop_assert_eq!(f.to_string().parse::<Fpf>().unwrap(), f);
    }

    #[test]
    fn prop_rounding_lands_on_grid(f in any_fpf(), x in -1.0e6f64..1.0e6) {
        let r = f.round_to_format(x);
        let step = f.resolution();
        prop_assert_eq!((r / step).fract(), 0.0);
        prop_assert!((r - x).abs() <= step / 2.0);
        prop_assert_eq!(f.round_to_format(r), r);
    }

    #[test]
    fn prop_range_ends_are_representable(f in any_fpf()) {
        let (min, max) = f.range();
        prop_assert!(min < max);
        prop_assert!(f.contains(min));
        prop_assert!(f.contains(max));
    }

    #[test]
    fn prop_encode_decode(f in any_fpf(), t in 0.0f64..=1.0) {
        let (min, max) = f.range();
        let v = f.round_to_format(min + t * (max - min));
        let bits = f.encode(v).unwrap();
        prop_assert_eq!(bits.len(), f.wl() as usize);
        prop_assert_eq!(f.decode(&bits).unwrap(), v);
    }

    #[test]
    fn prop_shift_round_trips(f in any_fpf(), n in -100i32..100) {
        let g = f.shift(n);
        prop_assert_eq!(g.wl(), f.wl());
        prop_assert_eq!(g.msb(), f.msb() + n);
        prop_assert_eq!(g.shift(-n), f);
    }

    #[test]
    fn prop_extreme_exponents_stay_total(f in any_extreme_fpf(), x in any_finite()) {
        let (min, max) = f.range();
        prop_assert!(min.is_finite() && max.is_finite());
        prop_assert!(min < max);
        prop_assert!(f.resolution() > 0.0);

        let r = f.round_to_format(x);
        prop_assert!(r.is_finite());
        prop_assert_eq!(f.round_to_format(r), r);

        let c = f.clamp(r);
        prop_assert!(min <= c && c <= max);
        let bits = f.encode(c).unwrap();
        prop_assert_eq!(f.decode(&bits).unwrap(), c);
    }

    #[test]
    fn prop_shift_stays_in_window(f in any_extreme_fpf(), n in any::<i32>()) {
        let g = f.shift(n);
        prop_assert_eq!(g.wl(), f.wl());
        prop_assert!(g.lsb() >= Fpf::MIN_EXPONENT && g.msb() <= Fpf::MAX_EXPONENT);
        let (min, max) = g.range();
        prop_assert!(min.is_finite() && max.is_finite() && min < max);
    }
}
