mod codec_factory;
mod presenter_factory;

pub use codec_factory::CodecFactory;
pub use presenter_factory::{PresenterFactory, PresenterType};
