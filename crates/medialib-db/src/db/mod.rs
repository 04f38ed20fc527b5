//! Repository modules

pub mod media;
pub mod mediable;

pub use media::MediaRepository;
pub use mediable::MediableRepository;
