fn main() -> std::process::ExitCode {
    pruebatec::launch("producto", "config/producto.toml", producto_server::run)
}
