use std::hint::black_box;

use criterion::{Criterion, criterion_group, criterion_main};
use svlogic::{Bit, Logic};

fn benchmark_arith(c: &mut Criterion) {
    // Native holder path
    {
        let a = Bit::<31>::from_u64(0xdead_beef);
        let b = Bit::<31>::from_u64(0x1234_5677);
        c.bench_function("bit32_mul_add_x1000", |bench| {
            bench.iter(|| {
                let mut acc = black_box(a);
                for _ in 0..1000 {
                    acc = acc * b + a;
                }
                acc
            })
        });
    }

    // Limb engine path
    {
        let a = Bit::<255, 0, false, 4>::from_u128(u128::MAX / 3) << 100u32;
        let b = Bit::<255, 0, false, 4>::from_u128(0x1234_5678_9abc_def0);
        c.bench_function("bit256_mul_x1000", |bench| {
            bench.iter(|| {
                let mut acc = black_box(a);
                for _ in 0..1000 {
                    acc = acc * b;
                }
                acc
            })
        });
        c.bench_function("bit256_div_x1000", |bench| {
            bench.iter(|| {
                let mut acc = Bit::<255, 0, false, 4>::ZERO;
                for _ in 0..1000 {
                    acc = acc + black_box(a) / b;
                }
                acc
            })
        });
    }

    // Four-state lanes
    {
        let a = Logic::<127, 0, false, 2>::from("128'h0123_4567_89ab_cdef_xxxx_zzzz_0000_ffff");
        let b = Logic::<127, 0, false, 2>::from("128'hffff_0000_zzzz_xxxx_fedc_ba98_7654_3210");
        c.bench_function("logic128_bitwise_x1000", |bench| {
            bench.iter(|| {
                let mut acc = black_box(a);
                for _ in 0..1000 {
                    acc = (acc & b) | (acc ^ a);
                }
                acc
            })
        });
    }

    // Literal codec
    {
        let v = -Bit::<199, 0, true, 4>::from("200'd123456789012345678901234567890");
        c.bench_function("format_decimal_200", |bench| {
            bench.iter(|| black_box(v).format("d"))
        });
        c.bench_function("parse_hex_200", |bench| {
            bench.iter(|| Bit::<199, 0, false, 4>::from(black_box("200'hfedc_ba98_7654_3210_0123_4567_89ab_cdef_55")))
        });
    }
}

criterion_group!(benches, benchmark_arith);
criterion_main!(benches);
