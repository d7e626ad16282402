extern crate vmsim_bench;
use vmsim_bench::*;

use criterion::*;

use vmsim::mmu::MmuSpec;
use vmsim::types::size;

fn translate_bench_group(c: &mut Criterion) {
    translate_group(c, "default", MmuSpec::DEFAULT);
    translate_group(
        c,
        "large_tlb",
        MmuSpec::DEFAULT
            .page_size(size::kb(4))
            .address_space_size(size::mb(16))
            .tlb_entries(1024),
    );
}

criterion_group! {
    name = translate_bench;
    config = Criterion::default()
        .warm_up_time(std::time::Duration::from_millis(300))
        .measurement_time(std::time::Duration::from_millis(2700));
    targets = translate_bench_group
}

criterion_main!(translate_bench);
