use miette::Diagnostic;
use thiserror::Error;

#[derive(Error, Diagnostic, Debug)]
pub enum ConfigError {
    #[error("{var} is not set or is empty")]
    #[diagnostic(
        code(debate::config::missing_credential),
        help("export {var}=<your api key> or add it to a .env file")
    )]
    MissingCredential { var: &'static str },
}

#[derive(Error, Diagnostic, Debug)]
pub enum ClientError {
    #[error("{service} API returned {status}: {message}")]
    #[diagnostic(code(debate::client::api))]
    Api {
        service: &'static str,
        status: u16,
        message: String,
    },
    #[error("{service} returned no reply: {reason}")]
    #[diagnostic(code(debate::client::empty_reply))]
    EmptyReply {
        service: &'static str,
        reason: String,
    },
}
