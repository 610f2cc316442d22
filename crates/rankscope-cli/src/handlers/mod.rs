mod context;

pub mod at;
pub mod check;
pub mod colors;
pub mod info;
pub mod show;
pub mod tree;

pub use context::HandlerContext;
