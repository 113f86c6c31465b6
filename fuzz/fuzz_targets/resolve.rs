#![no_main]
use libfuzzer_sys::fuzz_target;

use arbitrary::Arbitrary;
use honest_sss::{resolve, Share};

#[derive(Debug, Arbitrary)]
struct Parameters {
    pub threshold: u8,
    pub shares: Vec<Share>,
}

fuzz_target!(|params: Parameters| {
    // keep C(n, k) small enough for the fuzzer
    if params.shares.len() > 12 {
        return;
    }
    if let Ok(resolution) = resolve(&params.shares, params.threshold as usize) {
        assert!(resolution.honest.is_disjoint(&resolution.fake));
        assert_eq!(
            resolution.honest.len() + resolution.fake.len(),
            params.shares.len()
        );
    }
});
