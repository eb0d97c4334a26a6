mod color_pool;
mod color_token;

pub use color_pool::ColorPool;
pub use color_token::ColorToken;
