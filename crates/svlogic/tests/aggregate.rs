use svlogic::{Bit, Logic, Packed};

// ---------------------------------------------------------------------------
// Slices
// ---------------------------------------------------------------------------

#[test]
fn slice_reads_declared_range() {
    let v = Bit::<15>::from_u64(0xabcd);
    assert_eq!(v.slice::<7, 1>(11, 4).to_u64(), 0xbc);
    assert_eq!(v.slice::<7, 1>(4, 11).to_u64(), 0xbc, "bounds in either order");
    assert_eq!(v.slice::<7, 1>(3, 0).to_u64(), 0x0d, "extra result bits are zero");
}

#[test]
fn slice_outside_source() {
    let v = Bit::<15>::from_u64(0xabcd);
    assert_eq!(v.slice::<7, 1>(19, 12).to_u64(), 0x0a);
    assert!(v.slice::<7, 1>(40, 33).is_zero());

    let v = Logic::<7>::from(0xffu8);
    assert_eq!(v.slice::<7, 1>(11, 4).to_string(), "xxxx1111");
}

#[test]
fn slice_with_offset_declaration() {
    // logic [11:4]
    let v = Bit::<11, 4>::from_u64(0xa5);
    assert_eq!(v.slice::<3, 1>(11, 8).to_u64(), 0xa);
    assert!(v.get(4));
    assert!(!v.get(3), "below the declared range reads 0");
}

#[test]
fn little_endian_declaration() {
    // bit [0:7]: index 0 is the most significant bit
    let v = Bit::<0, 7>::from_u64(0b1000_0001);
    assert!(v.get(0));
    assert!(v.get(7));
    assert!(!v.get(1));
    assert_eq!(v.slice::<1, 1>(6, 7).to_u64(), 0b01);
    assert_eq!(v.slice::<1, 1>(0, 1).to_u64(), 0b10);
}

// ---------------------------------------------------------------------------
// Updates
// ---------------------------------------------------------------------------

#[test]
fn update_writes_declared_range() {
    let mut v = Bit::<15>::ZERO;
    v.update(11, 4, &Bit::<7>::from_u64(0xff));
    assert_eq!(v.to_u64(), 0x0ff0);

    let mut v = Bit::<15>::ones();
    v.update(15, 8, &Bit::<3>::from_u64(0x5));
    assert_eq!(v.to_u64(), 0x05ff, "narrow source zero-fills the range");
}

#[test]
fn update_little_endian() {
    let mut v = Bit::<0, 7>::ZERO;
    v.update(0, 3, &Bit::<3>::from_u64(0b1011));
    assert_eq!(v.to_u64(), 0xb0);
    assert!(v.get(0));
    assert!(!v.get(1));
}

#[test]
fn update_two_state_from_four_state() {
    let mut v = Bit::<7>::ones();
    v.update(3, 0, &Logic::<3>::from("4'b1x0z"));
    assert_eq!(v.to_u64(), 0xf8, "x and z bits are written as 0");
}

#[test]
fn update_four_state() {
    let mut v = Logic::<7>::from(0u8);
    v.update(5, 2, &Logic::<3>::from("4'b1x0z"));
    assert_eq!(v.to_string(), "001x0z00");
    v.update(7, 6, &Bit::<1>::from_u64(0b11));
    assert_eq!(v.to_string(), "111x0z00");
}

#[test]
fn update_out_of_range_is_clipped() {
    let mut v = Bit::<7>::ZERO;
    v.update(11, 4, &Bit::<7>::from_u64(0xff));
    assert_eq!(v.to_u64(), 0xf0);
}

#[test]
fn extreme_bounds_never_trap() {
    // [MAX:0] covers the whole source; [MAX:MAX-3] lies beyond it.
    let v = Bit::<7>::from_u64(0xff);
    assert_eq!(v.slice::<3, 1>(0, usize::MAX).to_u64(), 0xf);
    assert!(v.slice::<3, 1>(usize::MAX, usize::MAX - 3).is_zero());
    assert!(Bit::<0, 7>::from_u64(0xff).slice::<3, 1>(0, usize::MAX).is_zero());

    let v = Logic::<7>::from(0xffu8);
    assert_eq!(v.slice::<3, 1>(usize::MAX, 0).to_string(), "1111");
    assert_eq!(v.slice::<3, 1>(usize::MAX, usize::MAX - 3).to_string(), "xxxx");
    assert_eq!(Logic::<0, 7>::from(0xffu8).slice::<3, 1>(0, usize::MAX).to_string(), "xxxx");

    let mut b = Bit::<7>::ZERO;
    b.update(usize::MAX, 0, &Bit::<3>::from_u64(0xa));
    assert_eq!(b.to_u64(), 0x0a, "narrow source zero-fills the range");
    b.update(usize::MAX, usize::MAX - 3, &Bit::<3>::from_u64(0xf));
    assert_eq!(b.to_u64(), 0x0a, "write past the end is dropped");

    let mut b = Bit::<0, 7>::ones();
    b.update(0, usize::MAX, &Bit::<3>::from_u64(0xf));
    assert!(b.is_zero());

    let mut l = Logic::<7>::default();
    l.update(usize::MAX, 0, &Logic::<3>::from("4'b1x0z"));
    assert_eq!(l.to_string(), "00001x0z");
    l.update(usize::MAX, usize::MAX - 3, &Logic::<3>::from("4'b1111"));
    assert_eq!(l.to_string(), "00001x0z");
}

// ---------------------------------------------------------------------------
// Concatenation and packing
// ---------------------------------------------------------------------------

#[test]
fn concat_places_self_high() {
    let c: Bit<11> = Bit::<3>::from_u64(0x1).concat(&Bit::<7>::from_u64(0x23));
    assert_eq!(c.to_u64(), 0x123);
    assert_eq!(c.to_string(), "000100100011");

    let c: Logic<11> = Logic::<3>::from("4'bx001").concat(&Logic::<7>::from(0x23u8));
    assert_eq!(c.to_string(), "x00100100011");
}

#[test]
fn pack_mixes_two_and_four_state() {
    let (a, b, c) = (Bit::<3>::from_u64(1), Bit::<3>::from_u64(2), Bit::<3>::from_u64(3));
    assert_eq!(Bit::<11>::pack(&[&a, &b, &c]).to_u64(), 0x123);

    let low = Logic::<7>::x();
    let packed = Logic::<11>::pack(&[&a as &dyn Packed, &low]);
    assert_eq!(packed.to_string(), "0001xxxxxxxx");
    // A two-state target drops the unknown bits.
    assert_eq!(Bit::<11>::pack(&[&a as &dyn Packed, &low]).to_u64(), 0x100);
}

#[test]
fn pack_truncates_and_zero_fills() {
    let a = Bit::<7>::from_u64(0xab);
    let b = Bit::<7>::from_u64(0xcd);
    assert_eq!(Bit::<11>::pack(&[&a, &b]).to_u64(), 0xbcd);
    assert_eq!(Bit::<23>::pack(&[&a, &b]).to_u64(), 0xabcd);
}

#[test]
fn unpack_most_significant_first() {
    let v = Logic::<11>::from("'b000100100011");
    let mut parts = [Logic::<3>::x(); 3];
    let [x, y, z] = &mut parts;
    v.unpack(&mut [x, y, z]);
    assert_eq!(parts.map(|p| p.to_string()), ["0001", "0010", "0011"]);
}

#[test]
fn unpack_past_source_end() {
    let v = Logic::<7>::from(0xa5u8);
    let mut parts = [Logic::<3>::ZERO; 3];
    let [x, y, z] = &mut parts;
    v.unpack(&mut [x, y, z]);
    assert_eq!(parts.map(|p| p.to_string()), ["xxxx", "1010", "0101"]);

    let mut parts = [Bit::<3>::ones(); 3];
    let [x, y, z] = &mut parts;
    Bit::<7>::from_u64(0xa5).unpack(&mut [x, y, z]);
    assert_eq!(parts.map(|p| p.to_u64()), [0, 0xa, 0x5]);
}

#[test]
fn unpack_four_state_into_two_state() {
    let v = Logic::<7>::from("8'b1x1z_0101");
    let (mut hi, mut lo) = (Bit::<3>::ZERO, Bit::<3>::ZERO);
    v.unpack(&mut [&mut hi, &mut lo]);
    assert_eq!(hi.to_u64(), 0b1010);
    assert_eq!(lo.to_u64(), 0b0101);
}

#[test]
fn extend_sign_and_zero() {
    let v = Bit::<7, 0, true>::from_i64(-2);
    let wide = v.extend::<99, 2>();
    assert_eq!(wide.to_i64(), -2);
    assert!(wide.get(99));
    assert!(!Bit::<7>::from_u64(0xfe).extend::<99, 2>().get(99));
    assert_eq!(Bit::<15>::from_u64(0x1234).extend::<7, 1>().to_u64(), 0x34);
}
