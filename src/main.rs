fn main() -> std::process::ExitCode {
    bootstrapper_lib::run()
}
