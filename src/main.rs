/// Binary entrypoint for the `trumigrate` executable.
///
/// All logic lives in `trumigrate_lib` so tests can call it directly.
fn main() {
    trumigrate_lib::run();
}
