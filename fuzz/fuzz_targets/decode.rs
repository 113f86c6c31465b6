#![no_main]
use libfuzzer_sys::fuzz_target;

use arbitrary::Arbitrary;
use honest_sss::decode;

#[derive(Debug, Arbitrary)]
struct Parameters {
    pub value: String,
    pub base: u32,
}

fuzz_target!(|params: Parameters| {
    let _value = decode(&params.value, params.base);
});
