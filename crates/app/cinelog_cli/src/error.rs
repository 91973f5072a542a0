use thiserror::Error;

pub type Result<T> = core::result::Result<T, Error>;

#[derive(Error, Debug)]
pub enum Error {
    #[error("{}", .0)]
    Custom(String),

    #[error("IO::{:?}: {}", .0, .0)]
    Io(#[from] std::io::Error),

    #[error("FlexiLogger::{:?}: {}", .0, .0)]
    FlexiLogger(#[from] flexi_logger::FlexiLoggerError),

    #[error("{}", .0)]
    Api(#[from] cinelog_core::api::ApiError),

    #[error("{}", .0)]
    Session(#[from] cinelog_core::session::SessionError),

    #[error("{}", .0)]
    ReviewForm(#[from] cinelog_core::workflow::review::ReviewFormError),

    #[error("{}", .0)]
    Admin(#[from] cinelog_core::workflow::admin::AdminError),
}
