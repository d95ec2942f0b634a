#[tokio::main(flavor = "current_thread")]
async fn main() {
    if let Err(e) = pass_installer::main_cli().await {
        eprintln!("{e:?}");
        std::process::exit(pass_installer::exit_code(&e));
    }
}
