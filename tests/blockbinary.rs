use bexnum::blockbinary::BlockBinary;
use bexnum::Error;
use rug::Integer;

#[test]
fn construction() {
    let z = BlockBinary::<u64>::new(12);
    assert_eq!(z.nbits(), 12);
    assert!(z.is_zero());
    assert_eq!(z.limb_count(), 1);

    let z = BlockBinary::<u8>::new(12);
    assert_eq!(z.limb_count(), 2);

    let v = BlockBinary::<u8>::from_u64(16, 0xBEEF);
    assert_eq!(v.to_unsigned(), Integer::from(0xBEEF));
    assert!(v.is_negative(), "0xBEEF has the sign bit set at 16 bits");
    assert_eq!(v.to_integer(), Integer::from(0xBEEFi64 - 0x10000));
}

#[test]
fn width_masking() {
    // bits above the width must vanish
    let v = BlockBinary::<u8>::from_u64(4, 0xFF);
    assert_eq!(v.to_unsigned(), Integer::from(0xF));

    let v = BlockBinary::<u64>::from_i64(8, -1);
    assert_eq!(v.to_unsigned(), Integer::from(0xFF));
    assert_eq!(v.to_integer(), Integer::from(-1));
}

#[test]
fn bit_access() {
    let mut v = BlockBinary::<u16>::new(20);
    v.set(0, true).unwrap();
    v.set(19, true).unwrap();
    assert!(v.get(0).unwrap());
    assert!(v.get(19).unwrap());
    assert!(!v.get(10).unwrap());
    assert_eq!(v.to_unsigned(), (Integer::from(1) << 19) + 1);

    v.flip(0).unwrap();
    assert!(!v.get(0).unwrap());

    assert_eq!(
        v.get(20),
        Err(Error::IndexOutOfRange {
            index: 20,
            nbits: 20
        })
    );
    assert_eq!(
        v.set(25, true),
        Err(Error::IndexOutOfRange {
            index: 25,
            nbits: 20
        })
    );
}

#[test]
fn wrapping_arithmetic() {
    let a = BlockBinary::<u8>::from_u64(8, 0xFF);
    let b = BlockBinary::<u8>::from_u64(8, 1);
    assert!(a.add(&b).is_zero(), "0xFF + 1 wraps to zero at 8 bits");

    let a = BlockBinary::<u64>::from_u64(8, 0x80);
    let b = BlockBinary::<u64>::from_u64(8, 0x80);
    assert!(a.add(&b).is_zero());

    // multiplication truncates to the width
    let a = BlockBinary::<u8>::from_u64(8, 0x10);
    assert!(a.mul(&a).is_zero(), "0x10 * 0x10 = 0x100 truncates to 0");

    let a = BlockBinary::<u32>::from_u64(16, 300);
    let b = BlockBinary::<u32>::from_u64(16, 200);
    assert_eq!(a.mul(&b).to_unsigned(), Integer::from(60000));

    // subtraction through the two's complement
    let a = BlockBinary::<u64>::from_u64(8, 5);
    let b = BlockBinary::<u64>::from_u64(8, 7);
    assert_eq!(a.sub(&b).to_integer(), Integer::from(-2));
}

#[test]
fn signed_division() {
    let a = BlockBinary::<u64>::from_i64(16, 7);
    let b = BlockBinary::<u64>::from_i64(16, 2);
    assert_eq!(a.div(&b).unwrap().to_integer(), Integer::from(3));
    assert_eq!(a.rem(&b).unwrap().to_integer(), Integer::from(1));

    // truncation toward zero, remainder takes the dividend's sign
    let a = BlockBinary::<u64>::from_i64(16, -7);
    assert_eq!(a.div(&b).unwrap().to_integer(), Integer::from(-3));
    assert_eq!(a.rem(&b).unwrap().to_integer(), Integer::from(-1));

    let b = BlockBinary::<u64>::from_i64(16, -2);
    assert_eq!(a.div(&b).unwrap().to_integer(), Integer::from(3));
    assert_eq!(a.rem(&b).unwrap().to_integer(), Integer::from(-1));

    let zero = BlockBinary::<u64>::new(16);
    assert_eq!(a.div(&zero), Err(Error::DivideByZero));
    assert_eq!(a.rem(&zero), Err(Error::DivideByZero));
}

#[test]
fn restoring_division() {
    let a = BlockBinary::<u8>::from_u64(16, 100);
    let b = BlockBinary::<u8>::from_u64(16, 7);
    let (q, r) = a.udivmod(&b);
    assert_eq!(q.to_unsigned(), Integer::from(14));
    assert_eq!(r.to_unsigned(), Integer::from(2));

    // full-width operands: the partial remainder must not wrap
    let a = BlockBinary::<u8>::from_u64(8, 0xFE);
    let b = BlockBinary::<u8>::from_u64(8, 0xFF);
    let (q, r) = a.udivmod(&b);
    assert!(q.is_zero());
    assert_eq!(r.to_unsigned(), Integer::from(0xFE));
}

#[test]
fn shifts() {
    let v = BlockBinary::<u64>::from_u64(8, 0xF0);
    assert_eq!(v.lshr(4).to_unsigned(), Integer::from(0x0F));
    // arithmetic shift drags the sign bit down
    assert_eq!(v.shr(4).to_unsigned(), Integer::from(0xFF));
    assert_eq!(v.shr(4).to_integer(), Integer::from(-1));

    let v = BlockBinary::<u64>::from_i64(8, -8);
    assert_eq!(v.shr(1).to_integer(), Integer::from(-4));

    let v = BlockBinary::<u64>::from_u64(8, 0x0F);
    assert_eq!(v.shl(4).to_unsigned(), Integer::from(0xF0));
    assert_eq!(v.shl(8).to_unsigned(), Integer::from(0));

    // shifts across limb boundaries
    let v = BlockBinary::<u8>::from_u64(24, 0x0000FF);
    assert_eq!(v.shl(12).to_unsigned(), Integer::from(0x0FF000));
    assert_eq!(v.shl(12).lshr(12).to_unsigned(), Integer::from(0xFF));
}

#[test]
fn comparisons() {
    let minus_one = BlockBinary::<u64>::from_i64(8, -1);
    let one = BlockBinary::<u64>::from_i64(8, 1);
    let min = BlockBinary::<u64>::min_value(8);

    assert!(minus_one < one, "signed comparison");
    assert!(min < minus_one);
    assert!(one > min);
    assert_eq!(
        minus_one.ucmp(&one),
        std::cmp::Ordering::Greater,
        "unsigned comparison sees the raw pattern"
    );
}

#[test]
fn conversions() {
    for limb_width in [61usize, 64, 65, 100] {
        let raw = (Integer::from(0x0123_4567_89AB_CDEFu64) << 40u32) | Integer::from(0xFFu64);
        let v = BlockBinary::<u32>::from_integer(limb_width, &raw);
        assert_eq!(
            v.to_unsigned(),
            raw.clone().keep_bits(limb_width as u32),
            "round trip at width {}",
            limb_width
        );
    }

    // setbits interprets negative integers as two's complement
    let mut v = BlockBinary::<u16>::new(12);
    v.setbits(&Integer::from(-1));
    assert_eq!(v.to_unsigned(), Integer::from(0xFFF));
    assert_eq!(v.to_integer(), Integer::from(-1));
}

#[test]
fn resize_and_extend() {
    let v = BlockBinary::<u64>::from_i64(8, -3);
    assert_eq!(v.resize(16).to_integer(), Integer::from(-3));
    assert_eq!(v.resize(4).to_integer(), Integer::from(-3));
    assert_eq!(v.zext(16).to_unsigned(), Integer::from(0xFD));
}

#[test]
fn significant_bits() {
    assert_eq!(BlockBinary::<u8>::new(24).significant_bits(), 0);
    assert_eq!(BlockBinary::<u8>::from_u64(24, 1).significant_bits(), 1);
    assert_eq!(BlockBinary::<u8>::from_u64(24, 0x1FF).significant_bits(), 9);
    assert_eq!(
        BlockBinary::<u64>::from_u64(24, 0x800000).significant_bits(),
        24
    );
}

#[test]
fn binary_rendering() {
    let v = BlockBinary::<u64>::from_u64(6, 0b101101);
    assert_eq!(v.to_binary(), "0b101101");
}

#[test]
#[should_panic(expected = "equal widths")]
fn mixed_width_rejected() {
    let a = BlockBinary::<u64>::new(8);
    let b = BlockBinary::<u64>::new(9);
    let _ = a.add(&b);
}
