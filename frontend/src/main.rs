use wasm_logger;

fn main() {
    // Initialize the logger for WebAssembly
    wasm_logger::init(wasm_logger::Config::default());

    wheel_frontend::mount_all();
}
