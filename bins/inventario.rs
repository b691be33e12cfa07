fn main() -> std::process::ExitCode {
    pruebatec::launch("inventario", "config/inventario.toml", inventario_server::run)
}
