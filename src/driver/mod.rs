pub(crate) mod hal_transport;
pub(crate) mod transport;
