#![no_main]
use libfuzzer_sys::fuzz_target;

use arbitrary::Arbitrary;
use honest_sss::{SecretSharing, Share};

#[derive(Debug, Arbitrary)]
struct Parameters {
    pub threshold: u8,
    pub shares: Vec<Share>,
}

fuzz_target!(|params: Parameters| {
    let sss = SecretSharing(params.threshold as usize);
    let _secret = sss.recover(&params.shares);
});
