pub mod cancel;
pub mod filterbank;
pub mod filters;
pub mod output;
pub mod signal;
pub mod stream;
