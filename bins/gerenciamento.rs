use server::{bootstrap, ServiceKind};

fn main() -> std::process::ExitCode {
    bootstrap::main_for(ServiceKind::Gerenciamento)
}
