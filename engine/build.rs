fn main() -> Result<(), Box<dyn std::error::Error>> {
    println!("cargo:rerun-if-changed=proto/journal.proto");
    tonic_build::configure()
        .build_server(true)
        .build_client(true) // Client stubs are handy for integration tooling
        .compile(
            &["proto/journal.proto"],
            &["proto"],
        )?;
    Ok(())
}
