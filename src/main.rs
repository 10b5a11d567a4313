/// Binary entrypoint for the `urlshort` executable.
///
/// Keeps the binary thin — all logic lives in the `urlshort_lib` crate so
/// tests can drive it with fake shorteners and clipboards.
fn main() {
    urlshort_lib::run();
}
