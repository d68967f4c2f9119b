pub mod erb;
pub mod gammatone;
