#[cfg(feature = "cover")]
pub mod cover;
#[cfg(feature = "tags")]
pub mod tags;
