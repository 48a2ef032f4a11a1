use std::fmt;

use pawlog::{StackTrace, paw_config};

#[derive(Debug)]
struct Session {
    user: &'static str,
    roles: Vec<&'static str>,
    retries: u8,
}

#[derive(Debug)]
struct HandshakeError(std::io::Error);

impl fmt::Display for HandshakeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("handshake failed")
    }
}

impl std::error::Error for HandshakeError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        Some(&self.0)
    }
}

fn connect() -> Result<(), HandshakeError> {
    Err(HandshakeError(std::io::Error::other("connection reset by peer")))
}

fn main() {
    let paw = paw_config()
        .with_name("demo")
        .with_max_stack_traces(4)
        .with_enabled(true)
        .init_global();

    paw.info("server listening on 0.0.0.0:8080", None);
    paw.warn("config file not found, using defaults", None);
    paw.debug(
        &Session {
            user: "ferris",
            roles: vec!["admin", "crab"],
            retries: 2,
        },
        None,
    );
    if let Err(err) = connect() {
        paw.error("could not reach upstream", Some(&err), Some(&StackTrace::capture()));
    }
    log::info!("log macros are decorated too");
}
