use bexnum::blockbinary::BlockBinary;
use bexnum::blocktriple::BlockTriple;
use bexnum::Real;

fn triple(sign: bool, exp: isize, c: u64) -> BlockTriple {
    BlockTriple::Normal(sign, exp, BlockBinary::from_u64(64, c))
}

#[test]
fn decompose_f64() {
    let x = BlockTriple::from(1.5);
    assert_eq!(x.e(), Some(0));
    assert_eq!(x, triple(false, -1, 3));
    assert_eq!(x.to_f64(), 1.5);

    let x = BlockTriple::from(-0.75);
    assert_eq!(x, triple(true, -2, 3));

    // signed zeros survive the decomposition
    let z = BlockTriple::from(-0.0);
    assert!(z.is_zero());
    assert!(z.sign());
    assert!(z.to_f64().is_sign_negative());

    // subnormal f64
    let tiny = f64::from_bits(1);
    let x = BlockTriple::from(tiny);
    assert_eq!(x.exp(), Some(-1074));
    assert_eq!(x.to_f64(), tiny);

    assert!(BlockTriple::from(f64::NAN).is_nan());
    assert_eq!(BlockTriple::from(f64::INFINITY), BlockTriple::Inf(false));
}

#[test]
fn exact_addition() {
    let a = BlockTriple::from(1.5);
    let b = BlockTriple::from(2.5);
    assert_eq!(BlockTriple::add(&a, &b).to_f64(), 4.0);

    // alignment across very different scales stays exact
    let a = BlockTriple::from(1.0);
    let b = BlockTriple::from(2f64.powi(-60));
    let sum = BlockTriple::add(&a, &b);
    assert_eq!(sum.e(), Some(0));
    assert_eq!(BlockTriple::sub(&sum, &b), a);

    // cancellation to zero is +0 unless both signs are negative
    let x = BlockTriple::from(3.25);
    let z = BlockTriple::add(&x, &x.neg());
    assert!(z.is_zero());
    assert!(!z.sign());

    let nz = BlockTriple::add(&BlockTriple::from(-0.0), &BlockTriple::from(-0.0));
    assert!(nz.is_zero());
    assert!(nz.sign());

    let pz = BlockTriple::add(&BlockTriple::from(0.0), &BlockTriple::from(-0.0));
    assert!(pz.is_zero());
    assert!(!pz.sign());
}

#[test]
fn addition_specials() {
    let pinf = BlockTriple::Inf(false);
    let ninf = BlockTriple::Inf(true);
    let one = BlockTriple::from(1.0);

    assert_eq!(BlockTriple::add(&pinf, &pinf), pinf);
    assert!(BlockTriple::add(&pinf, &ninf).is_nan());
    assert_eq!(BlockTriple::add(&pinf, &one), pinf);
    assert_eq!(BlockTriple::add(&one, &ninf), ninf);
    assert!(BlockTriple::add(&BlockTriple::Nan, &one).is_nan());
}

#[test]
fn exact_multiplication() {
    let a = BlockTriple::from(1.5);
    assert_eq!(BlockTriple::mul(&a, &a).to_f64(), 2.25);

    let a = BlockTriple::from(3.0);
    let b = BlockTriple::from(-7.0);
    assert_eq!(BlockTriple::mul(&a, &b).to_f64(), -21.0);

    // the full product is kept: 53-bit * 53-bit
    let c = BlockTriple::from(2f64.powi(52) + 1.0);
    let sq = BlockTriple::mul(&c, &c);
    assert_eq!(sq.prec(), Some(105));

    assert!(BlockTriple::mul(&BlockTriple::Inf(false), &BlockTriple::Zero(false)).is_nan());
    let z = BlockTriple::mul(&BlockTriple::Zero(false), &BlockTriple::from(-2.0));
    assert!(z.is_zero());
    assert!(z.sign());
}

#[test]
fn division() {
    // exact quotient comes out exact, sticky clear
    let a = BlockTriple::from(6.0);
    let b = BlockTriple::from(3.0);
    assert_eq!(BlockTriple::div(&a, &b, 12).to_f64(), 2.0);

    // 1/3 to 12 odd-rounded digits
    let q = BlockTriple::div(&BlockTriple::from(1.0), &b, 12);
    assert_eq!(q.prec(), Some(12));
    let err = (q.to_f64() - 1.0 / 3.0).abs();
    assert!(err < 2f64.powi(-11), "1/3 approximation error {}", err);

    // specials
    assert!(BlockTriple::div(&BlockTriple::Zero(false), &BlockTriple::Zero(false), 8).is_nan());
    assert_eq!(
        BlockTriple::div(&a, &BlockTriple::Zero(false), 8),
        BlockTriple::Inf(false)
    );
    assert_eq!(
        BlockTriple::div(&a, &BlockTriple::Zero(true), 8),
        BlockTriple::Inf(true)
    );
    let z = BlockTriple::div(&BlockTriple::Zero(true), &b, 8);
    assert!(z.is_zero());
    assert!(z.sign());
}

#[test]
fn square_root() {
    assert_eq!(BlockTriple::sqrt(&BlockTriple::from(4.0), 12).to_f64(), 2.0);
    assert_eq!(
        BlockTriple::sqrt(&BlockTriple::from(2.25), 12).to_f64(),
        1.5
    );

    let r = BlockTriple::sqrt(&BlockTriple::from(2.0), 30);
    let err = (r.to_f64() - 2f64.sqrt()).abs();
    assert!(err < 2f64.powi(-29), "sqrt(2) approximation error {}", err);

    // odd scale fix-up
    let r = BlockTriple::sqrt(&BlockTriple::from(8.0), 30);
    let err = (r.to_f64() - 8f64.sqrt()).abs();
    assert!(err < 2f64.powi(-27), "sqrt(8) approximation error {}", err);

    // specials
    assert!(BlockTriple::sqrt(&BlockTriple::from(-1.0), 8).is_nan());
    assert!(BlockTriple::sqrt(&BlockTriple::Inf(true), 8).is_nan());
    assert_eq!(
        BlockTriple::sqrt(&BlockTriple::Inf(false), 8),
        BlockTriple::Inf(false)
    );
    let z = BlockTriple::sqrt(&BlockTriple::Zero(true), 8);
    assert!(z.is_zero());
    assert!(z.sign(), "sqrt(-0) is -0");
}

#[test]
fn ordering() {
    let a = BlockTriple::from(1.0);
    let b = BlockTriple::from(1.5);
    assert!(a < b);
    assert!(b.neg() < a);
    assert!(BlockTriple::Inf(true) < b.neg());
    assert!(b < BlockTriple::Inf(false));
    assert_eq!(BlockTriple::Zero(false), BlockTriple::Zero(true));
    assert_eq!(
        BlockTriple::Nan.partial_cmp(&a),
        None,
        "NaN compares with nothing"
    );

    // equal values at different representations
    let wide = BlockTriple::Normal(false, -2, BlockBinary::from_u64(64, 6));
    assert_eq!(wide, b);
}
