use advertising::AdvertisingError;
use command::CommandError;
use filter::FilterError;
use thiserror::Error;

pub use uuid::Uuid;

pub mod addr;
pub mod advertising;
pub mod beacon;
pub mod bitfield;
pub mod byte_order;
pub mod command;
pub mod event;
pub mod filter;
pub mod opcode;
pub mod packet;
pub mod sys;

#[derive(Clone, Error, Debug, Eq, PartialEq)]
pub enum Error {
    #[error(transparent)]
    Advertising(#[from] AdvertisingError),
    #[error(transparent)]
    Filter(#[from] FilterError),
    #[error(transparent)]
    Command(#[from] CommandError),
}

pub type Result<T> = std::result::Result<T, Error>;
