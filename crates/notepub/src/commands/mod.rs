//! CLI command implementations.

pub(crate) mod preview;
pub(crate) mod publish;

pub(crate) use preview::PreviewArgs;
pub(crate) use publish::PublishArgs;
