// This binary crate is intentionally minimal.
// All network logic lives in the library (src/lib.rs and its modules).
// Run the demo with:
//   cargo run --example xor
fn main() {
    println!("shallow-nn: a single-hidden-layer perceptron in plain Rust.");
    println!("Run `cargo run --example xor` to see the XOR demo.");
}
