pub(crate) mod utils;
mod validate;
