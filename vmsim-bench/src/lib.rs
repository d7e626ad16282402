use criterion::*;

use vmsim::prelude::v1::*;

use rand::{Rng, SeedableRng};
use rand_xorshift::XorShiftRng as CurRng;

/// Addresses walking the address space byte by byte.
pub fn sequential_trace(spec: &MmuSpec, len: usize) -> Vec<Address> {
    (0..len as umem)
        .map(|i| Address::from(i % spec.address_space_size))
        .collect()
}

/// Uniformly distributed addresses over the whole address space.
pub fn random_trace(spec: &MmuSpec, len: usize, seed: u64) -> Vec<Address> {
    let mut rng = CurRng::seed_from_u64(seed);
    (0..len)
        .map(|_| Address::from(rng.gen_range(0..spec.address_space_size)))
        .collect()
}

/// Random addresses confined to a working set of `pages` pages.
pub fn working_set_trace(spec: &MmuSpec, len: usize, pages: umem, seed: u64) -> Vec<Address> {
    let mut rng = CurRng::seed_from_u64(seed);
    let decoder = AddressDecoder::new(*spec).unwrap();
    (0..len)
        .map(|_| {
            let page = PageId::new(rng.gen_range(0..pages.min(spec.page_count())) as u32);
            decoder.encode(page, rng.gen_range(0..spec.page_size))
        })
        .collect()
}

fn translate_trace(bench: &mut Bencher, spec: MmuSpec, trace: &[Address]) {
    bench.iter_batched(
        || {
            let store = BufferBackingStore::with_pattern(spec.page_count(), spec.page_size);
            Translator::new(spec, store).unwrap()
        },
        |mut translator| {
            for address in trace.iter() {
                black_box(translator.translate(*address).unwrap());
            }
            black_box(translator.stats())
        },
        BatchSize::SmallInput,
    );
}

pub fn translate_group(c: &mut Criterion, backend_name: &str, spec: MmuSpec) {
    let mut group = c.benchmark_group(format!("{}_translate", backend_name));

    let len = 0x4000;
    let traces = [
        ("sequential", sequential_trace(&spec, len)),
        ("random", random_trace(&spec, len, 0x5eed)),
        (
            "working_set",
            working_set_trace(&spec, len, spec.tlb_entries as umem, 0x5eed),
        ),
    ];

    for (name, trace) in traces.iter() {
        group.throughput(Throughput::Elements(trace.len() as u64));
        group.bench_with_input(BenchmarkId::new(*name, len), trace, |b, trace| {
            translate_trace(b, spec, trace)
        });
    }

    group.finish();
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn traces_stay_in_range() {
        let spec = MmuSpec::DEFAULT;
        let decoder = AddressDecoder::new(spec).unwrap();

        for trace in [
            sequential_trace(&spec, 100_000),
            random_trace(&spec, 10_000, 1),
            working_set_trace(&spec, 10_000, 16, 1),
        ] {
            assert!(trace.iter().all(|addr| decoder.decode(*addr).is_ok()));
        }
    }

    #[test]
    fn working_set_is_bounded() {
        let spec = MmuSpec::DEFAULT;
        let decoder = AddressDecoder::new(spec).unwrap();
        let trace = working_set_trace(&spec, 10_000, 16, 2);
        assert!(trace
            .iter()
            .all(|addr| decoder.decode(*addr).unwrap().0.as_u32() < 16));
    }
}
