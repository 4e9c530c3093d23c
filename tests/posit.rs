use bexnum::blockbinary::BlockBinary;
use bexnum::blocktriple::BlockTriple;
use bexnum::posit::PositContext;
use bexnum::{Real, RoundingContext};
use rug::Integer;

fn triple(sign: bool, exp: isize, c: u64) -> BlockTriple {
    BlockTriple::Normal(sign, exp, BlockBinary::from_u64(64, c))
}

fn decode(ctx: &PositContext, i: u64) -> BlockTriple {
    BlockTriple::from_number(&ctx.bits_to_number(&Integer::from(i)))
}

#[test]
fn enumerate() {
    // posit<6,2>: every positive pattern as (exp, c), in raw order
    let ctx = PositContext::new(2, 6);
    let positives: [(isize, u64); 31] = [
        (-16, 1),
        (-12, 1),
        (-10, 1),
        (-8, 1),
        (-7, 1),
        (-6, 1),
        (-5, 1),
        (-5, 2),
        (-5, 3),
        (-4, 2),
        (-4, 3),
        (-3, 2),
        (-3, 3),
        (-2, 2),
        (-2, 3),
        (-1, 2),
        (-1, 3),
        (0, 2),
        (0, 3),
        (1, 2),
        (1, 3),
        (2, 2),
        (2, 3),
        (4, 1),
        (5, 1),
        (6, 1),
        (7, 1),
        (8, 1),
        (10, 1),
        (12, 1),
        (16, 1),
    ];

    assert!(decode(&ctx, 0).is_zero());
    assert!(decode(&ctx, 32).is_nan(), "1000..0 is NaR");

    for (k, (exp, c)) in positives.iter().enumerate() {
        let i = (k + 1) as u64;
        let num = decode(&ctx, i);
        let expected = triple(false, *exp, *c);
        assert_eq!(num, expected, "failed conversion: i={}", i);
    }

    // the negative half is the two's complement of the positive half:
    // raw 64 - k holds the negation of raw k
    for (k, (exp, c)) in positives.iter().enumerate() {
        let i = 64 - (k + 1) as u64;
        let num = decode(&ctx, i);
        let expected = triple(true, *exp, *c);
        assert_eq!(num, expected, "failed conversion: i={}", i);
    }
}

#[test]
fn round_trip() {
    for ctx in [
        PositContext::new(2, 6),
        PositContext::new(2, 8),
        PositContext::new(3, 12),
        PositContext::new(0, 5),
    ] {
        for i in 0..(1u64 << ctx.nbits()) {
            let num = ctx.bits_to_number(&Integer::from(i));
            let j = num.clone().into_bits();
            assert_eq!(
                Integer::from(i),
                j,
                "round trip failed: i={}, num={:?}",
                i,
                num
            );
        }
    }
}

#[test]
fn bounds() {
    // posit<8,2>
    let ctx = PositContext::new(2, 8);
    assert_eq!(ctx.useed(), Integer::from(16));
    assert_eq!(
        BlockTriple::from_number(&ctx.maxpos()),
        triple(false, 24, 1)
    );
    assert_eq!(
        BlockTriple::from_number(&ctx.minpos()),
        triple(false, -24, 1)
    );
    assert_eq!(
        BlockTriple::from_number(&ctx.minneg()),
        triple(true, 24, 1)
    );

    // posit<8,3>
    let ctx = PositContext::new(3, 8);
    assert_eq!(ctx.useed(), Integer::from(256));
    assert_eq!(
        BlockTriple::from_number(&ctx.maxpos()),
        triple(false, 48, 1)
    );
    assert_eq!(
        BlockTriple::from_number(&ctx.minpos()),
        triple(false, -48, 1)
    );
}

#[test]
fn round_small() {
    let ctx = PositContext::new(2, 8);

    // all non-real inputs collapse onto NaR
    assert!(ctx.round(&BlockTriple::Nan).is_nar(), "round(NaN) = NaR");
    assert!(ctx.round(&BlockTriple::Inf(false)).is_nar(), "round(+Inf) = NaR");
    assert!(ctx.round(&BlockTriple::Inf(true)).is_nar(), "round(-Inf) = NaR");

    let rounded_zero = ctx.round(&BlockTriple::Zero(false));
    assert!(rounded_zero.is_zero(), "round(+0) = +0");

    // rounding MAXVAL * 2 saturates at MAXVAL
    let maxval = BlockTriple::from_number(&ctx.maxpos());
    let big = triple(false, 25, 1);
    assert_eq!(BlockTriple::from_number(&ctx.round(&big)), maxval);

    // rounding MINVAL / 2 saturates at MINVAL
    let minval = BlockTriple::from_number(&ctx.minpos());
    let tiny = triple(false, -25, 1);
    assert_eq!(BlockTriple::from_number(&ctx.round(&tiny)), minval);

    // rounding +1
    let one = BlockTriple::from(1.0);
    assert_eq!(BlockTriple::from_number(&ctx.round(&one)), one);

    // +1.0625 is halfway to the next encoding; ties to even gives +1
    let one_1_16 = BlockTriple::from(1.0625);
    assert_eq!(BlockTriple::from_number(&ctx.round(&one_1_16)), one);

    // +1.1875 is halfway between 1.125 and 1.25; ties to even gives 1.25
    let one_3_16 = BlockTriple::from(1.1875);
    assert_eq!(
        BlockTriple::from_number(&ctx.round(&one_3_16)),
        BlockTriple::from(1.25)
    );
}

#[test]
fn saturation_guards() {
    let ctx = PositContext::new(2, 8);

    // arithmetic overflow never produces NaR
    let r = ctx.add(&ctx.maxpos(), &ctx.maxpos());
    assert!(!r.is_nar());
    assert_eq!(r, ctx.maxpos());

    let r = ctx.mul(&ctx.maxpos(), &ctx.maxpos());
    assert_eq!(r, ctx.maxpos());

    let r = ctx.mul(&ctx.minneg(), &ctx.maxpos());
    assert_eq!(r, ctx.minneg());

    // nonzero underflow never produces zero
    let r = ctx.mul(&ctx.minpos(), &ctx.minpos());
    assert!(!r.is_zero());
    assert_eq!(r, ctx.minpos());

    let r = ctx.div(&ctx.minpos(), &ctx.maxpos());
    assert_eq!(r, ctx.minpos());
}

#[test]
fn exception_values() {
    let ctx = PositContext::new(2, 8);
    let one = ctx.round(&BlockTriple::from(1.0));
    let nar = ctx.nar();

    assert!(ctx.div(&one, &ctx.zero()).is_nar(), "x / 0 = NaR");
    assert!(ctx.div(&ctx.zero(), &ctx.zero()).is_nar());
    assert!(ctx.add(&nar, &one).is_nar(), "NaR propagates");
    assert!(ctx.sqrt(&ctx.neg(&one)).is_nar(), "sqrt(-1) = NaR");
    assert!(!ctx.sqrt(&one).is_nar());

    // NaR encodes as 1 followed by zeros
    assert_eq!(nar.clone().into_bits(), Integer::from(128));
}

#[test]
fn negation_is_twos_complement() {
    let ctx = PositContext::new(2, 8);
    for i in 1..256u64 {
        if i == 128 {
            continue; // NaR
        }
        let x = ctx.bits_to_number(&Integer::from(i));
        let neg = ctx.neg(&x);
        assert_eq!(
            neg.into_bits(),
            Integer::from(256 - i),
            "negation of raw {} is its two's complement",
            i
        );
    }
}

#[test]
fn zero_is_unsigned() {
    let ctx = PositContext::new(2, 8);
    let z = ctx.round(&BlockTriple::Zero(true));
    assert!(z.is_zero());
    assert_eq!(z.into_bits(), Integer::from(0), "posits have a single zero");
}

#[test]
fn binary_rendering() {
    let ctx = PositContext::new(2, 8);
    let one = ctx.round(&BlockTriple::from(1.0));
    assert_eq!(one.to_binary(), "0b0.10.00.000");

    let nar = ctx.nar();
    assert_eq!(nar.to_binary(), "0b1.0000000");
}
