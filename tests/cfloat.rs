use bexnum::blocktriple::BlockTriple;
use bexnum::cfloat::CfloatContext;
use bexnum::{Error, Real, RoundingContext};
use rug::Integer;

fn from_f64(ctx: &CfloatContext, x: f64) -> bexnum::cfloat::Cfloat {
    ctx.round(&BlockTriple::from(x))
}

#[test]
fn format_parameters() {
    let ctx = CfloatContext::new(2, 8);
    assert_eq!(ctx.max_p(), 6);
    assert_eq!(ctx.max_m(), 5);
    assert_eq!(ctx.bias(), 1);
    assert_eq!(ctx.emax(), 1);
    assert_eq!(ctx.emin(), 0);
    assert_eq!(ctx.expmin(), -5);

    assert!(
        matches!(
            CfloatContext::try_new(0, 8),
            Err(Error::ConfigurationInvalid(_))
        ),
        "es = 0 is rejected"
    );
    assert!(CfloatContext::try_new(7, 8).is_err());
    assert!(CfloatContext::try_new(1, 2).is_err());
}

#[test]
fn constants() {
    let ctx = CfloatContext::new(2, 8);
    assert_eq!(ctx.minpos().to_f64(), 0.03125, "smallest subnormal 2^-5");
    assert_eq!(ctx.maxpos().to_f64(), 3.9375, "2 * (2 - 2^-5)");
    assert_eq!(ctx.maxneg().to_f64(), -3.9375);
    assert_eq!(ctx.minneg().to_f64(), -0.03125);
    assert_eq!(ctx.zero(false).to_f64(), 0.0);
    assert!(ctx.inf(false).to_f64().is_infinite());
    assert!(ctx.qnan().to_f64().is_nan());

    // without subnormals minpos is the smallest normal
    let ctx = CfloatContext::new(2, 8).with_subnormals(false);
    assert_eq!(ctx.minpos().to_f64(), 1.0, "2^emin with emin = 0");
}

#[test]
fn infinity_minus_infinity_is_quiet_nan() {
    // sign 0, exponent all ones, top fraction bit
    let ctx = CfloatContext::new(2, 8);
    let r = ctx.add(&ctx.inf(false), &ctx.inf(true));
    assert!(r.is_nan());
    assert!(r.flags().invalid);
    assert_eq!(r.into_bits(), Integer::from(0b0_11_10000));

    let r = ctx.add(&ctx.inf(false), &ctx.inf(false));
    assert!(r.is_infinite());
    assert!(!r.sign());

    let r = ctx.add(&ctx.inf(true), &ctx.inf(true));
    assert!(r.is_infinite());
    assert!(r.sign());
}

#[test]
fn division_specials() {
    let ctx = CfloatContext::new(2, 8);
    let zero = ctx.zero(false);
    let one = from_f64(&ctx, 1.0);

    let r = ctx.div(&zero, &zero);
    assert!(r.is_nan());
    assert!(r.flags().invalid);
    assert!(!r.flags().divzero);

    let r = ctx.div(&one, &zero);
    assert!(r.is_infinite());
    assert!(!r.sign());
    assert!(r.flags().divzero);
    assert_eq!(ctx.checked_div(&one, &zero), Err(Error::DivideByZero));

    let r = ctx.div(&one, &ctx.zero(true));
    assert!(r.is_infinite());
    assert!(r.sign());

    let r = ctx.sqrt(&from_f64(&ctx, -1.0));
    assert!(r.is_nan());
    assert!(r.flags().invalid);
}

#[test]
fn signed_zero() {
    let ctx = CfloatContext::new(2, 8);

    let nz = from_f64(&ctx, -0.0);
    assert!(nz.is_zero());
    assert_eq!(nz.into_bits(), Integer::from(0x80));
    assert!(nz.to_f64().is_sign_negative());

    let r = ctx.add(&nz, &nz);
    assert!(r.is_zero() && r.sign(), "-0 + -0 = -0");

    let r = ctx.add(&ctx.zero(false), &nz);
    assert!(r.is_zero() && !r.sign(), "+0 + -0 = +0");

    let x = from_f64(&ctx, 1.25);
    let r = ctx.sub(&x, &x);
    assert!(r.is_zero() && !r.sign(), "x - x = +0");
}

#[test]
fn round_to_nearest_even() {
    let ctx = CfloatContext::new(2, 8);
    // grid step at 1.0 is 2^-5; both probes sit exactly halfway
    assert_eq!(from_f64(&ctx, 1.015625).to_f64(), 1.0, "tie to even (down)");
    assert_eq!(
        from_f64(&ctx, 1.046875).to_f64(),
        1.0625,
        "tie to even (up)"
    );
    // just above the midpoint rounds up
    assert_eq!(from_f64(&ctx, 1.016).to_f64(), 1.03125);
}

#[test]
fn overflow_behavior() {
    let ctx = CfloatContext::new(2, 8);
    let big = from_f64(&ctx, 1.0e6);
    assert!(big.is_infinite());
    assert!(big.flags().overflow);

    let sat = CfloatContext::new(2, 8).with_saturating(true);
    let big = from_f64(&sat, 1.0e6);
    assert_eq!(big.to_f64(), 3.9375, "saturating clamps to maxpos");
    assert!(big.flags().overflow);
    assert_eq!(from_f64(&sat, -1.0e6).to_f64(), -3.9375);

    // rounding-induced overflow obeys the same rule
    let just_over = 3.9375 + 0.0625; // one ulp above maxpos
    assert!(from_f64(&ctx, just_over).is_infinite());
    assert_eq!(from_f64(&sat, just_over).to_f64(), 3.9375);

    let maxed = ctx.add(&ctx.maxpos(), &ctx.maxpos());
    assert!(maxed.is_infinite());
    assert!(matches!(
        ctx.checked_add(&ctx.maxpos(), &ctx.maxpos()),
        Err(Error::ArithmeticOverflow)
    ));
}

#[test]
fn underflow_behavior() {
    let ctx = CfloatContext::new(2, 8);
    let tiny = from_f64(&ctx, 0.001);
    assert!(tiny.is_zero(), "below minpos/2 underflows to zero");
    assert!(tiny.flags().underflow);

    // gradual underflow keeps subnormal magnitudes
    let sub = from_f64(&ctx, 0.09);
    assert!(sub.is_subnormal());
    assert_eq!(sub.to_f64(), 0.09375);

    // without subnormals the whole band flushes to zero, even values
    // nearer to minpos
    let flushed = CfloatContext::new(2, 8).with_subnormals(false);
    assert!(from_f64(&flushed, 0.25).is_zero());
    assert!(from_f64(&flushed, 0.75).is_zero());

    let sat = CfloatContext::new(2, 8)
        .with_subnormals(false)
        .with_saturating(true);
    assert_eq!(from_f64(&sat, 0.25).to_f64(), 1.0, "snaps to minpos");
    assert_eq!(from_f64(&sat, -0.25).to_f64(), -1.0);
}

#[test]
fn subnormal_band_decoding() {
    // a subnormal pattern means different things per configuration
    let bits = Integer::from(0b0_00_00011);

    let ctx = CfloatContext::new(2, 8);
    let x = ctx.bits_to_number(&bits);
    assert!(x.is_subnormal());
    assert_eq!(x.to_f64(), 3.0 * 0.03125);

    let flushed = CfloatContext::new(2, 8).with_subnormals(false);
    assert!(flushed.bits_to_number(&bits).is_zero());

    let sat = CfloatContext::new(2, 8)
        .with_subnormals(false)
        .with_saturating(true);
    assert_eq!(sat.bits_to_number(&bits).to_f64(), 1.0);
}

#[test]
fn supernormal_band() {
    // cfloat<4,1> with subnormals and supernormals: every pattern is
    // finite except the single NaR slot
    let ctx = CfloatContext::new(1, 4).with_supernormals(true);
    let expected = [0.0, 0.5, 1.0, 1.5, 2.0, 2.5, 3.0, 3.5];
    for (i, v) in expected.iter().enumerate() {
        let x = ctx.bits_to_number(&Integer::from(i));
        assert_eq!(x.to_f64(), *v, "pattern {:#06b}", i);
    }
    // negative half mirrors, except the NaR pattern at -2.0
    for (i, v) in expected.iter().enumerate() {
        let x = ctx.bits_to_number(&Integer::from(8 + i));
        if i == 4 {
            assert!(x.is_nan(), "sign=1 exp=all1 frac=0 is NaR");
        } else {
            assert_eq!(x.to_f64(), -*v, "pattern {:#06b}", 8 + i);
        }
    }

    assert_eq!(ctx.maxpos().to_f64(), 3.5);
    assert!(ctx.qnan().into_bits() == Integer::from(0b1100));

    // no infinities: overflow saturates
    let over = ctx.add(&ctx.maxpos(), &ctx.maxpos());
    assert_eq!(over.to_f64(), 3.5);

    // a result of exactly -2.0 would be the NaR pattern; it steps to
    // the nearest representable neighbor instead
    let minus_two = ctx.round(&BlockTriple::from(-2.0));
    assert!(!minus_two.is_nan());
    assert_eq!(minus_two.to_f64(), -1.5);
}

#[test]
fn encode_decode_round_trip() {
    // with both bands populated every pattern survives the cycle
    for ctx in [
        CfloatContext::new(2, 8),
        CfloatContext::new(2, 8).with_supernormals(true),
        CfloatContext::new(3, 8),
        CfloatContext::new(1, 4).with_supernormals(true),
    ] {
        for i in 0..(1u64 << ctx.nbits()) {
            let x = ctx.bits_to_number(&Integer::from(i));
            assert_eq!(
                x.into_bits(),
                Integer::from(i),
                "round trip failed at {} for es={} nbits={}",
                i,
                ctx.es(),
                ctx.nbits()
            );
        }
    }

    // dead-band configurations canonicalize; re-encoding is idempotent
    for ctx in [
        CfloatContext::new(2, 8).with_subnormals(false),
        CfloatContext::new(2, 8)
            .with_subnormals(false)
            .with_saturating(true),
    ] {
        for i in 0..(1u64 << ctx.nbits()) {
            let x = ctx.bits_to_number(&Integer::from(i));
            let canonical = x.into_bits();
            let y = ctx.bits_to_number(&canonical);
            assert_eq!(y.into_bits(), canonical, "idempotence failed at {}", i);
        }
    }
}

#[test]
fn tensorfloat_conversion() {
    // bfloat-style 19-bit format with an 8-bit exponent
    let ctx = CfloatContext::tf32();
    assert_eq!(ctx.nbits(), 19);
    assert_eq!(ctx.max_m(), 10);

    let x = from_f64(&ctx, 1.2345);
    let rel = (x.to_f64() - 1.2345).abs() / 1.2345;
    assert!(rel <= 2f64.powi(-10), "relative error {} too large", rel);
    assert!(!x.flags().overflow && !x.flags().underflow);
}

#[test]
fn nan_encodings() {
    let ctx = CfloatContext::new(2, 8);
    let q = ctx.qnan();
    assert!(!q.sign(), "quiet NaN carries a clear sign bit");
    assert_eq!(q.into_bits(), Integer::from(0b0_11_10000));
    let s = ctx.snan();
    assert!(s.sign(), "signalling NaN carries a set sign bit");
    assert_eq!(s.into_bits(), Integer::from(0b1_11_10000));

    // decoding distinguishes by sign
    assert_eq!(
        ctx.bits_to_number(&Integer::from(0b0_11_00001)).nan_quiet(),
        Some(true)
    );
    assert_eq!(
        ctx.bits_to_number(&Integer::from(0b1_11_00001)).nan_quiet(),
        Some(false)
    );

    // NaN propagation canonicalizes to the quiet NaN
    let r = ctx.add(&s, &from_f64(&ctx, 1.0));
    assert!(r.is_nan());
    assert_eq!(r.into_bits(), q.into_bits());
}

#[test]
fn binary_rendering() {
    let ctx = CfloatContext::new(2, 8);
    let x = from_f64(&ctx, 1.0);
    // bias 1: exponent field 01, fraction zero
    assert_eq!(x.to_binary(), "0b0.01.00000");
    assert_eq!(ctx.maxneg().to_binary(), "0b1.10.11111");
}

#[test]
fn ordering() {
    let ctx = CfloatContext::new(2, 8);
    let a = from_f64(&ctx, 0.5);
    let b = from_f64(&ctx, 1.5);
    assert!(a < b);
    assert!(ctx.neg(&b) < ctx.neg(&a));
    assert!(ctx.inf(true) < a && b < ctx.inf(false));
    assert_eq!(ctx.qnan().partial_cmp(&a), None);
    assert_eq!(ctx.zero(true), ctx.zero(false));
}
