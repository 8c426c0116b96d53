pub(crate) use super::ensure;
pub use super::{FromBytes, Payload, Protocol, ToBytes};
pub use crate::net::{c_string_buf, Error};
pub use bytes::{Buf, BufMut, Bytes};
